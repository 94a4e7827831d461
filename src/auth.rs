use crate::api::ApiError;
use crate::config::AuthConfig;
use crate::error::{Result, StarneighboursError};
use crate::models::Claims;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use std::sync::Arc;
use tracing::{debug, warn};

/// Issues and checks access tokens against the configured user table
pub struct Authenticator {
    config: AuthConfig,
}

/// Subject of a verified access token, stored in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub String);

impl Authenticator {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Check a username/password pair and issue a signed access token.
    pub fn login(&self, username: &str, password: &str) -> Result<String> {
        let user = self.config.users.get(username).ok_or_else(|| {
            StarneighboursError::AuthError("Invalid credentials".to_string())
        })?;

        if !constant_time_eq(user.password.expose_secret().as_bytes(), password.as_bytes()) {
            return Err(StarneighboursError::AuthError("Invalid credentials".to_string()));
        }

        let expires_at = Utc::now()
            .checked_add_signed(self.config.token_ttl)
            .ok_or_else(|| StarneighboursError::InvalidParameter("token TTL out of range".to_string()))?;
        let claims = Claims {
            sub: username.to_string(),
            exp: expires_at.timestamp().max(0) as usize,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.expose_secret().as_bytes()),
        )?;

        debug!(user = %user.name, "Issued access token");
        Ok(token)
    }

    /// Validate signature and expiry, and that the subject is still a known user.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.expose_secret().as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| StarneighboursError::AuthError(format!("Invalid token: {}", e)))?;

        if !self.config.users.contains_key(&data.claims.sub) {
            return Err(StarneighboursError::AuthError("Unknown user".to_string()));
        }

        Ok(data.claims)
    }
}

/// Compare two byte strings without short-circuiting on the first mismatch.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Middleware requiring a valid `Bearer` access token
pub async fn auth_middleware(
    State(authenticator): State<Arc<Authenticator>>,
    mut req: Request,
    next: Next,
) -> std::result::Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
        Some(token) => token.trim(),
        None => {
            return Err(StarneighboursError::AuthError(
                "Missing or invalid Authorization header".to_string(),
            )
            .into())
        }
    };

    let claims = authenticator.verify(token).map_err(|e| {
        warn!("Rejected access token: {}", e);
        e
    })?;

    req.extensions_mut().insert(AuthenticatedUser(claims.sub));
    Ok(next.run(req).await)
}
