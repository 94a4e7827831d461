use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};

// GitHub API response structures. Only the fields we consume are declared;
// serde ignores the rest but rejects missing or mistyped ones.

/// The `rate` member of a `/rate_limit` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    pub limit: u64,
    pub used: u64,
    pub remaining: u64,
    /// Unix timestamp at which the window resets
    pub reset: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimit {
    pub rate: Rate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stargazer {
    pub id: u64,
    #[serde(deserialize_with = "non_empty")]
    pub login: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarredRepo {
    pub id: u64,
    #[serde(deserialize_with = "non_empty")]
    pub name: String,
    pub full_name: String,
}

/// Logins and repository names are used as keys, so an empty one is a malformed record.
fn non_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    if value.is_empty() {
        return Err(de::Error::invalid_value(Unexpected::Str(&value), &"a non-empty string"));
    }
    Ok(value)
}
