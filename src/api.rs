use crate::auth::{auth_middleware, AuthenticatedUser, Authenticator};
use crate::error::StarneighboursError;
use crate::models::{LoginForm, LoginResponse, PageParams, Starneighbour};
use crate::service::StarneighboursService;
use crate::types::RateLimit;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Extension, Form, Router,
};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Shared state of the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<StarneighboursService>,
    pub auth: Arc<Authenticator>,
}

/// Response for errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Liveness check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivenessResponse {
    pub status: String,
}

/// Maps domain errors onto HTTP responses
#[derive(Debug)]
pub struct ApiError(pub StarneighboursError);

impl From<StarneighboursError> for ApiError {
    fn from(err: StarneighboursError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            StarneighboursError::InvalidParameter(_) => StatusCode::UNPROCESSABLE_ENTITY,
            StarneighboursError::AuthError(_) | StarneighboursError::TokenError(_) => {
                StatusCode::UNAUTHORIZED
            }
            StarneighboursError::NotFound(_) => StatusCode::NOT_FOUND,
            e if e.is_transport() || e.is_decode() => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        }

        let message = match &self.0 {
            // Upstream URLs and token details stay in the logs
            StarneighboursError::AuthError(_) | StarneighboursError::TokenError(_) => {
                "Invalid credentials".to_string()
            }
            StarneighboursError::NotFound(_) => "Resource not found".to_string(),
            e if e.is_transport() => "Upstream request failed".to_string(),
            e if e.is_decode() => "Unexpected upstream response".to_string(),
            e => e.to_string(),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/repos/:owner/:repo/starneighbours", get(get_starneighbours))
        .route_layer(middleware::from_fn_with_state(
            state.auth.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/login", post(login))
        .route("/rate", get(get_rate_limit))
        .route("/livez", get(liveness_check))
        .merge(protected)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Serve the API until `shutdown` resolves
pub async fn start_server(
    app_state: AppState,
    addr: &str,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let app = create_router(app_state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Starneighbours server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

/// Exchange a username/password form for an access token
async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<LoginResponse>, ApiError> {
    let access_token = state.auth.login(&form.username, &form.password)?;
    Ok(Json(LoginResponse { access_token }))
}

async fn get_rate_limit(State(state): State<AppState>) -> Result<Json<RateLimit>, ApiError> {
    let rate_limit = state.service.get_rate_limit().await?;
    Ok(Json(rate_limit))
}

async fn get_starneighbours(
    State(state): State<AppState>,
    Path((owner, repo)): Path<(String, String)>,
    query: Result<Query<PageParams>, QueryRejection>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<Starneighbour>>, ApiError> {
    let Query(params) =
        query.map_err(|rejection| StarneighboursError::InvalidParameter(rejection.body_text()))?;
    info!(user = %user.0, %owner, %repo, "Starneighbours requested");
    let starneighbours = state
        .service
        .get_starneighbours(&owner, &repo, params)
        .await?;
    Ok(Json(starneighbours))
}

async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(LivenessResponse {
            status: "alive".to_string(),
        }),
    )
}
