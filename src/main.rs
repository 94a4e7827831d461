use anyhow::Context;
use clap::Parser;
use colored::*;
use starneighbours_server::api::{start_server, AppState};
use starneighbours_server::auth::Authenticator;
use starneighbours_server::cli::Cli;
use starneighbours_server::config::{Credential, ServerConfig};
use starneighbours_server::github::GitHubClient;
use starneighbours_server::service::StarneighboursService;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::from_cli(cli).context("Invalid configuration")?;

    println!("{}", "Starneighbours Server".bold().green());
    println!("{}\n", "=".repeat(50).dimmed());

    match &config.github.credential {
        Credential::Anonymous => {
            println!("{}", "No GitHub token configured, using anonymous rate limits".yellow());
        }
        Credential::Token(_) => println!("🔑 GitHub token auth"),
        Credential::Basic { user, .. } => println!("🔑 GitHub basic auth as {}", user),
    }
    if config.auth.users.is_empty() {
        println!("{}", "No login user configured, starneighbours will be unreachable".yellow());
    }

    println!("🌐 Upstream API: {}", config.github.api_url);
    println!(
        "⚙️  Max concurrent requests: {}, timeout: {}s",
        config.aggregator.max_concurrent_requests,
        config.github.request_timeout.as_secs()
    );

    let client = Arc::new(
        GitHubClient::new(config.github).context("Failed to create GitHub client")?
    );

    let app_state = AppState {
        service: Arc::new(StarneighboursService::new(client, config.aggregator)),
        auth: Arc::new(Authenticator::new(config.auth)),
    };

    println!("\nPress Ctrl+C to stop the server\n");

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for Ctrl+C: {}", e);
        }
        println!("\n🛑 Shutting down server...");
    };

    start_server(app_state, &config.bind, shutdown)
        .await
        .with_context(|| format!("Server failed on {}", config.bind))?;

    println!("✅ Server stopped");
    Ok(())
}
