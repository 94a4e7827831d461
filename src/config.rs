use secrecy::SecretString;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

use crate::cli::Cli;
use crate::error::{Result, StarneighboursError};

/// How the upstream client authenticates
#[derive(Debug)]
pub enum Credential {
    Anonymous,
    Token(SecretString),
    Basic { user: String, token: SecretString },
}

#[derive(Debug)]
pub struct GitHubConfig {
    pub api_url: Url,
    pub credential: Credential,
    pub request_timeout: Duration,
}

impl GitHubConfig {
    pub fn new(api_url: &str, credential: Credential) -> Result<Self> {
        Ok(Self {
            api_url: Url::parse(api_url)?,
            credential,
            request_timeout: Duration::from_secs(30),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AggregatorConfig {
    /// Upper bound on concurrent starred-repo requests for one query
    pub max_concurrent_requests: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            max_concurrent_requests: 10,
        }
    }
}

/// An entry of the login user table
#[derive(Debug)]
pub struct UserRecord {
    pub name: String,
    pub password: SecretString,
}

#[derive(Debug)]
pub struct AuthConfig {
    pub jwt_secret: SecretString,
    pub token_ttl: chrono::Duration,
    pub users: HashMap<String, UserRecord>,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: SecretString::from(jwt_secret.into()),
            token_ttl: chrono::Duration::minutes(15),
            users: HashMap::new(),
        }
    }

    pub fn with_user(mut self, username: &str, name: &str, password: &str) -> Self {
        self.users.insert(
            username.to_string(),
            UserRecord {
                name: name.to_string(),
                password: SecretString::from(password.to_string()),
            },
        );
        self
    }
}

/// Everything the server needs at startup
#[derive(Debug)]
pub struct ServerConfig {
    pub bind: String,
    pub github: GitHubConfig,
    pub aggregator: AggregatorConfig,
    pub auth: AuthConfig,
}

impl ServerConfig {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let credential = match (cli.github_user, cli.github_token) {
            (Some(user), Some(token)) => Credential::Basic {
                user,
                token: SecretString::from(token),
            },
            (None, Some(token)) => Credential::Token(SecretString::from(token)),
            (Some(_), None) => {
                return Err(StarneighboursError::InvalidParameter(
                    "GITHUB_USER requires GITHUB_TOKEN".to_string(),
                ))
            }
            (None, None) => Credential::Anonymous,
        };

        if cli.request_timeout == 0 {
            return Err(StarneighboursError::InvalidParameter(
                "request timeout must be at least one second".to_string(),
            ));
        }
        if cli.token_ttl <= 0 {
            return Err(StarneighboursError::InvalidParameter(
                "token TTL must be positive".to_string(),
            ));
        }

        let github = GitHubConfig::new(&cli.github_api_url, credential)?
            .with_timeout(Duration::from_secs(cli.request_timeout));

        let mut auth = AuthConfig::new(cli.jwt_secret);
        auth.token_ttl = chrono::Duration::try_minutes(cli.token_ttl).ok_or_else(|| {
            StarneighboursError::InvalidParameter(format!(
                "token TTL of {} minutes is out of range",
                cli.token_ttl
            ))
        })?;
        if let (Some(user), Some(password)) = (cli.login_user, cli.login_password) {
            let name = cli.login_name.unwrap_or_else(|| user.clone());
            auth = auth.with_user(&user, &name, &password);
        }

        Ok(Self {
            bind: cli.bind,
            github,
            aggregator: AggregatorConfig {
                max_concurrent_requests: cli.max_concurrent_requests.max(1),
            },
            auth,
        })
    }
}
