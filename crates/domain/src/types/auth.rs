//! Authentication wire types

use serde::{Deserialize, Serialize};

/// Access token response payload returned by the login and refresh endpoints
///
/// All fields are optional on decode; a refresh that answers without a usable
/// `accessToken` is treated as a failed refresh by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

impl AuthTokenResponse {
    /// The access token, if present and non-empty
    pub fn usable_token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|token| !token.is_empty())
    }
}
