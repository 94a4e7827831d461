use serde::{Deserialize, Serialize};

/// A repository co-starred by one or more of the queried stargazers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Starneighbour {
    pub repo: String,
    /// Logins in the order they were first recorded for this repo
    pub stargazers: Vec<String>,
}

/// Paging parameters of the starneighbours query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    #[serde(default = "PageParams::default_per_page")]
    pub per_page: u32,
    #[serde(default = "PageParams::default_page")]
    pub page: u32,
}

impl PageParams {
    pub const MAX_PER_PAGE: u32 = 100;

    fn default_per_page() -> u32 {
        30
    }

    fn default_page() -> u32 {
        1
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            per_page: Self::default_per_page(),
            page: Self::default_page(),
        }
    }
}

/// Login form, in the shape of an OAuth2 password request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

/// JWT claims carried by issued access tokens
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}
