use crate::config::AggregatorConfig;
use crate::error::{Result, StarneighboursError};
use crate::github::GitHubClient;
use crate::models::Starneighbour;
use crate::types::{Stargazer, StarredRepo};
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Reverse index from repository short name to the logins that starred it.
///
/// Keys and logins both keep their first-insertion order. Keyed on `name`,
/// so repositories of different owners sharing a name are merged.
#[derive(Debug, Default)]
pub struct StarIndex {
    order: Vec<String>,
    logins: HashMap<String, Vec<String>>,
}

impl StarIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every repository starred by `login`.
    pub fn record(&mut self, login: &str, starred: &[StarredRepo]) {
        for repo in starred {
            match self.logins.get_mut(&repo.name) {
                Some(stargazers) => {
                    if !stargazers.iter().any(|existing| existing == login) {
                        stargazers.push(login.to_string());
                    }
                }
                None => {
                    self.order.push(repo.name.clone());
                    self.logins.insert(repo.name.clone(), vec![login.to_string()]);
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Ranked by descending stargazer count. The sort is stable, so ties keep
    /// key insertion order.
    pub fn into_ranked(self) -> Vec<Starneighbour> {
        let StarIndex { order, mut logins } = self;

        let mut starneighbours: Vec<Starneighbour> = order
            .into_iter()
            .map(|repo| {
                let stargazers = logins.remove(&repo).unwrap_or_default();
                Starneighbour { repo, stargazers }
            })
            .collect();

        starneighbours.sort_by(|a, b| b.stargazers.len().cmp(&a.stargazers.len()));
        starneighbours
    }
}

/// Fans out one starred-repo request per stargazer and folds the results.
pub struct Aggregator {
    client: Arc<GitHubClient>,
    config: AggregatorConfig,
}

impl Aggregator {
    pub fn new(client: Arc<GitHubClient>, config: AggregatorConfig) -> Self {
        Self { client, config }
    }

    /// Build the ranked starneighbours of `stargazers`.
    ///
    /// At most `max_concurrent_requests` requests are in flight and results
    /// are taken as they complete. The first failure aborts the whole
    /// aggregation and drops the requests still in flight. Successful results
    /// are folded by this task alone, in stargazer order, so the output is
    /// deterministic for identical upstream responses.
    pub async fn build_starneighbours(&self, stargazers: &[Stargazer]) -> Result<Vec<Starneighbour>> {
        let started = Instant::now();
        let limit = self.config.max_concurrent_requests.max(1);

        info!(
            stargazers = stargazers.len(),
            max_concurrent_requests = limit,
            "Fetching starred repositories"
        );

        let logins: Vec<String> = stargazers.iter().map(|s| s.login.clone()).collect();
        let mut slots: Vec<Option<(String, Vec<StarredRepo>)>> = (0..logins.len()).map(|_| None).collect();

        let mut completed = stream::iter(logins.into_iter().enumerate().map(|(position, login)| {
            let client = Arc::clone(&self.client);
            async move {
                let starred = client.fetch_starred(&login).await?;
                debug!(%login, count = starred.len(), "Fetched starred repositories");
                Ok::<_, StarneighboursError>((position, login, starred))
            }
        }))
        .buffer_unordered(limit);

        while let Some(result) = completed.next().await {
            match result {
                Ok((position, login, starred)) => slots[position] = Some((login, starred)),
                Err(e) => {
                    warn!("Aborting starneighbours aggregation: {}", e);
                    return Err(e);
                }
            }
        }

        let mut index = StarIndex::new();
        for (login, starred) in slots.into_iter().flatten() {
            index.record(&login, &starred);
        }

        info!(
            repos = index.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Built starneighbours"
        );
        Ok(index.into_ranked())
    }
}
