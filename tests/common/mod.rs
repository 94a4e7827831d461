#![allow(dead_code)]

use serde_json::{json, Value};
use starneighbours_server::config::{AggregatorConfig, Credential, GitHubConfig};
use starneighbours_server::github::GitHubClient;
use starneighbours_server::service::StarneighboursService;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn client_for(server: &MockServer) -> Arc<GitHubClient> {
    client_with(server, Credential::Anonymous, Duration::from_secs(5))
}

pub fn client_with(server: &MockServer, credential: Credential, timeout: Duration) -> Arc<GitHubClient> {
    let config = GitHubConfig::new(&server.uri(), credential)
        .expect("mock server URI should parse")
        .with_timeout(timeout);
    Arc::new(GitHubClient::new(config).expect("Failed to create client"))
}

pub fn service_for(server: &MockServer, max_concurrent_requests: usize) -> StarneighboursService {
    StarneighboursService::new(
        client_for(server),
        AggregatorConfig { max_concurrent_requests },
    )
}

pub fn rate_limit_body() -> Value {
    json!({
        "resources": {
            "core": {"limit": 5000, "remaining": 4999, "reset": 1372700873, "used": 1},
            "search": {"limit": 30, "remaining": 18, "reset": 1372697452, "used": 12}
        },
        "rate": {"limit": 5000, "remaining": 4999, "reset": 1372700873, "used": 1}
    })
}

/// A stargazer object with the extra fields GitHub sends along
pub fn stargazer_json(id: u64, login: &str) -> Value {
    json!({
        "login": login,
        "id": id,
        "node_id": "MDQ6VXNlcjE=",
        "avatar_url": "https://github.com/images/error/octocat_happy.gif",
        "url": format!("https://api.github.com/users/{}", login),
        "type": "User",
        "site_admin": false
    })
}

pub fn starred_json(id: u64, full_name: &str) -> Value {
    let name = full_name.split('/').nth(1).unwrap_or(full_name);
    json!({
        "id": id,
        "node_id": "MDEwOlJlcG9zaXRvcnkxMjk2MjY5",
        "name": name,
        "full_name": full_name,
        "private": false,
        "description": "This your first repo!",
        "stargazers_count": 80,
        "topics": ["octocat", "atom", "electron", "api"]
    })
}

pub async fn mount_stargazers(server: &MockServer, owner: &str, repo: &str, stargazers: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/repos/{}/{}/stargazers", owner, repo)))
        .respond_with(ResponseTemplate::new(200).set_body_json(stargazers))
        .mount(server)
        .await;
}

pub async fn mount_starred(server: &MockServer, login: &str, starred: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/users/{}/starred", login)))
        .respond_with(ResponseTemplate::new(200).set_body_json(starred))
        .mount(server)
        .await;
}
