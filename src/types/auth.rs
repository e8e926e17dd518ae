//! Authentication credentials for a realm

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Credentials for one account on one realm
///
/// The realm is the server origin (e.g. "https://chat.example.com").
/// The API key is a per-account secret issued by the server and is sent
/// on every request as HTTP Basic credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Auth {
    /// Realm/server URL (e.g. "https://chat.example.com")
    pub realm: String,
    /// Account email address
    pub email: String,
    /// API key for the account
    pub api_key: String,
}

impl Auth {
    /// Create new credentials
    pub fn new(
        realm: impl Into<String>,
        email: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Auth {
            realm: realm.into(),
            email: email.into(),
            api_key: api_key.into(),
        }
    }

    /// Build the `Authorization` header value for API requests
    ///
    /// The server expects HTTP Basic credentials of the form
    /// `base64(email:api_key)`.
    pub fn basic_auth_header(&self) -> String {
        let credentials = format!("{}:{}", self.email, self.api_key);
        format!("Basic {}", STANDARD.encode(credentials))
    }
}
