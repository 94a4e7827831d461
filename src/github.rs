use crate::config::{Credential, GitHubConfig};
use crate::error::{Result, StarneighboursError};
use crate::types::{RateLimit, Stargazer, StarredRepo};
use reqwest::{Client, RequestBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

/// Thin read-only client for the three GitHub resources we consume.
///
/// One call is one GET: no retries, no backoff, no caching.
pub struct GitHubClient {
    client: Client,
    api_url: Url,
    credential: Credential,
}

impl GitHubClient {
    pub fn new(config: GitHubConfig) -> Result<Self> {
        if config.api_url.cannot_be_a_base() {
            return Err(StarneighboursError::ApiError(format!(
                "API URL cannot be used as a base: {}",
                config.api_url
            )));
        }

        let client = Client::builder()
            .user_agent("Starneighbours Server/0.1.0")
            .timeout(config.request_timeout)
            .build()?;

        Ok(GitHubClient {
            client,
            api_url: config.api_url,
            credential: config.credential,
        })
    }

    /// Build an endpoint URL, escaping each path segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credential {
            Credential::Anonymous => request,
            Credential::Token(token) => {
                request.header("Authorization", format!("token {}", token.expose_secret()))
            }
            Credential::Basic { user, token } => {
                request.basic_auth(user, Some(token.expose_secret()))
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let request = self
            .client
            .get(url.clone())
            .header("Accept", "application/vnd.github.v3+json");

        let response = self.authorize(request).send().await?;

        let rate_limit_remaining = response
            .headers()
            .get("X-RateLimit-Remaining")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse::<u32>().ok());

        if let Some(remaining) = rate_limit_remaining {
            debug!(%url, remaining, "GitHub rate limit");
        }

        match response.status() {
            status if status.is_success() => {}
            StatusCode::NOT_FOUND => {
                return Err(StarneighboursError::NotFound(url.to_string()));
            }
            status => {
                warn!(%url, status = status.as_u16(), "GitHub request failed");
                return Err(StarneighboursError::UpstreamStatus {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
            }
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| StarneighboursError::DecodeError {
            url: url.to_string(),
            source,
        })
    }

    pub async fn fetch_rate_limit(&self) -> Result<RateLimit> {
        let url = self.endpoint(&["rate_limit"]);
        self.get_json(url).await
    }

    /// Fetch one page of stargazers. Paging values are passed through as-is.
    pub async fn fetch_stargazers(
        &self,
        owner: &str,
        repo: &str,
        per_page: u32,
        page: u32,
    ) -> Result<Vec<Stargazer>> {
        let mut url = self.endpoint(&["repos", owner, repo, "stargazers"]);
        url.query_pairs_mut()
            .append_pair("per_page", &per_page.to_string())
            .append_pair("page", &page.to_string());

        let stargazers: Vec<Stargazer> = self.get_json(url).await?;
        debug!(owner, repo, page, count = stargazers.len(), "Fetched stargazers");
        Ok(stargazers)
    }

    pub async fn fetch_starred(&self, login: &str) -> Result<Vec<StarredRepo>> {
        let url = self.endpoint(&["users", login, "starred"]);
        self.get_json(url).await
    }
}
