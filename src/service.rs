use crate::aggregator::Aggregator;
use crate::config::AggregatorConfig;
use crate::error::{Result, StarneighboursError};
use crate::github::GitHubClient;
use crate::models::{PageParams, Starneighbour};
use crate::types::RateLimit;
use std::sync::Arc;
use tracing::info;

/// The read operations exposed to the HTTP layer
pub struct StarneighboursService {
    client: Arc<GitHubClient>,
    aggregator: Aggregator,
}

impl StarneighboursService {
    pub fn new(client: Arc<GitHubClient>, config: AggregatorConfig) -> Self {
        let aggregator = Aggregator::new(client.clone(), config);
        Self { client, aggregator }
    }

    pub async fn get_rate_limit(&self) -> Result<RateLimit> {
        self.client.fetch_rate_limit().await
    }

    /// Starneighbours of one page of `owner/repo` stargazers.
    ///
    /// The target repository is not excluded from the result.
    pub async fn get_starneighbours(
        &self,
        owner: &str,
        repo: &str,
        params: PageParams,
    ) -> Result<Vec<Starneighbour>> {
        validate_page_params(&params)?;

        info!(owner, repo, per_page = params.per_page, page = params.page, "Looking up starneighbours");

        let stargazers = self
            .client
            .fetch_stargazers(owner, repo, params.per_page, params.page)
            .await?;

        self.aggregator.build_starneighbours(&stargazers).await
    }
}

pub fn validate_page_params(params: &PageParams) -> Result<()> {
    if params.per_page == 0 || params.per_page > PageParams::MAX_PER_PAGE {
        return Err(StarneighboursError::InvalidParameter(format!(
            "per_page must be between 1 and {}, got {}",
            PageParams::MAX_PER_PAGE,
            params.per_page
        )));
    }
    if params.page == 0 {
        return Err(StarneighboursError::InvalidParameter(
            "page must be at least 1".to_string(),
        ));
    }
    Ok(())
}
