use clap::Parser;

#[derive(Parser)]
#[command(name = "starneighbours-server")]
#[command(about = "Starneighbours Server - Finds repositories co-starred by a repository's stargazers")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Address the HTTP server binds to
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind: String,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    pub github_api_url: String,

    /// GitHub username used for basic auth (token auth when omitted)
    #[arg(long, env = "GITHUB_USER")]
    pub github_user: Option<String>,

    /// GitHub personal access token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Timeout for each upstream request, in seconds
    #[arg(long, env = "REQUEST_TIMEOUT", default_value_t = 30)]
    pub request_timeout: u64,

    /// Maximum number of starred-repo requests in flight per query
    #[arg(long, env = "MAX_CONCURRENT_REQUESTS", default_value_t = 10)]
    pub max_concurrent_requests: usize,

    /// Secret used to sign access tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Lifetime of issued access tokens, in minutes
    #[arg(long, env = "TOKEN_TTL_MINUTES", default_value_t = 15)]
    pub token_ttl: i64,

    /// Username (email) allowed to log in
    #[arg(long, env = "LOGIN_USER", requires = "login_password")]
    pub login_user: Option<String>,

    /// Password of the login user
    #[arg(long, env = "LOGIN_PASSWORD", hide_env_values = true)]
    pub login_password: Option<String>,

    /// Display name of the login user
    #[arg(long, env = "LOGIN_NAME")]
    pub login_name: Option<String>,
}
