use reqwest::Client;
use url::Url;

use crate::error::{Error, ErrorCode, Result};
use crate::types::Auth;

/// Fixed client identifier sent as the User-Agent on every request
pub const USER_AGENT: &str = concat!("ChatCoreMobile/", env!("CARGO_PKG_VERSION"));

/// API client for a realm server
///
/// Carries the credentials it was built with; every request is sent with
/// Basic authorization and the fixed client identifier.
pub struct ApiClient {
    /// HTTP client for REST API calls
    pub(crate) http_client: Client,
    /// Base URL of the realm (e.g. "https://chat.example.com")
    base_url: Url,
    /// Credentials used for the Authorization header
    auth: Auth,
}

impl ApiClient {
    /// Create a new API client for the given credentials
    ///
    /// # Arguments
    /// * `auth` - Credentials; `auth.realm` must be a valid absolute URL
    ///
    /// # Returns
    /// A Result containing the ApiClient or an Error
    pub fn new(auth: Auth) -> Result<Self> {
        let base_url = Url::parse(&auth.realm)
            .map_err(|e| Error::new(ErrorCode::InvalidArgument, format!("Invalid realm URL: {e}")))?;

        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| Error::network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            base_url,
            auth,
        })
    }

    /// The credentials this client was built with
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Build the full API URL for a given endpoint
    ///
    /// # Arguments
    /// * `endpoint` - The API endpoint path (e.g. "/messages/1/reactions")
    ///
    /// # Returns
    /// The full URL string
    pub fn api_url(&self, endpoint: &str) -> String {
        let endpoint = endpoint.trim_start_matches('/');
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/api/v1/{endpoint}")
    }

    /// Make a form-encoded POST request to the API
    ///
    /// # Arguments
    /// * `endpoint` - The API endpoint path
    /// * `form` - Form fields (will be urlencoded)
    ///
    /// # Returns
    /// A Result containing the reqwest::Response or an Error
    pub async fn post_form(
        &self,
        endpoint: &str,
        form: &[(&str, String)],
    ) -> Result<reqwest::Response> {
        let url = self.api_url(endpoint);

        self.http_client
            .post(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::AUTHORIZATION, self.auth.basic_auth_header())
            .form(form)
            .send()
            .await
            .map_err(|e| Error::network(format!("POST request failed: {e}")))
    }

    /// Check that a response succeeded, discarding the body
    ///
    /// # Arguments
    /// * `response` - The HTTP response from the API
    ///
    /// # Returns
    /// Ok on 2xx; otherwise a NetworkError carrying the HTTP status and
    /// whatever error text the server sent
    pub async fn check_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            Err(Error::network(format!(
                "API request failed with status {status}: {error_text}"
            ))
            .with_http_status(status.as_u16()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_auth() -> Auth {
        Auth::new("https://chat.example.com", "me@example.com", "key")
    }

    #[test]
    fn test_new_client() {
        let client = ApiClient::new(test_auth());
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_realm_url() {
        let client = ApiClient::new(Auth::new("not a url", "me@example.com", "key"));
        assert!(client.is_err());
    }

    #[test]
    fn test_api_url() {
        let client = ApiClient::new(test_auth()).unwrap();
        assert_eq!(
            client.api_url("/messages/42/reactions"),
            "https://chat.example.com/api/v1/messages/42/reactions"
        );
        assert_eq!(
            client.api_url("messages/42/reactions"),
            "https://chat.example.com/api/v1/messages/42/reactions"
        );
    }

    #[test]
    fn test_user_agent_is_versioned() {
        assert!(USER_AGENT.starts_with("ChatCoreMobile/"));
    }
}
