use serde::{Deserialize, Serialize};

/// A permission granted to the bearer of a VideoSDK token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Join meetings directly
    AllowJoin,
    /// Moderate participants
    AllowMod,
    /// Request entry and wait to be admitted
    AskJoin,
}

/// Claims carried by a VideoSDK token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub apikey: String,
    pub permissions: Vec<Permission>,
    /// Issued-at, Unix seconds
    pub iat: i64,
    /// Expiry, Unix seconds
    pub exp: i64,
}
