//! Save-to-device orchestration

use crate::error::Result;
use crate::media::gateway::StorageGateway;
use crate::media::url::resolve_url;
use crate::types::{Auth, SaveOutcome};

/// Downloads images through the configured storage gateway
///
/// Each call is independent: concurrent downloads of the same resource run
/// their own permission checks and transfers, and nothing is deduplicated.
pub struct ImageDownloader {
    gateway: Box<dyn StorageGateway>,
}

impl ImageDownloader {
    /// Create a downloader over a storage gateway
    pub fn new(gateway: Box<dyn StorageGateway>) -> Self {
        ImageDownloader { gateway }
    }

    /// Download an image reference to device storage
    ///
    /// # Arguments
    /// * `src` - Image reference, absolute or relative to the realm
    /// * `auth` - Credentials for the realm the reference belongs to
    ///
    /// # Returns
    /// The gateway's outcome: a photo-library URI, or a scheduled
    /// download job
    pub async fn download(&self, src: &str, auth: &Auth) -> Result<SaveOutcome> {
        let absolute_url = resolve_url(src, &auth.realm)?;
        self.gateway.store(src, &absolute_url, auth).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct RecordingGateway {
        calls: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl RecordingGateway {
        fn new() -> Self {
            RecordingGateway {
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl StorageGateway for RecordingGateway {
        async fn store(
            &self,
            src: &str,
            absolute_url: &str,
            _auth: &Auth,
        ) -> Result<SaveOutcome> {
            self.calls
                .lock()
                .unwrap()
                .push((src.to_string(), absolute_url.to_string()));
            Ok(SaveOutcome::PhotoLibrary {
                uri: "ph://stub".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_download_resolves_relative_reference() {
        let gateway = RecordingGateway::new();
        let downloader = ImageDownloader::new(Box::new(gateway.clone()));
        let auth = Auth::new("https://chat.example.com", "me@example.com", "K");

        downloader
            .download("/user_uploads/2/photo.jpg", &auth)
            .await
            .unwrap();

        let calls = gateway.calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![(
                "/user_uploads/2/photo.jpg".to_string(),
                "https://chat.example.com/user_uploads/2/photo.jpg".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_download_passes_absolute_reference_through() {
        let gateway = RecordingGateway::new();
        let downloader = ImageDownloader::new(Box::new(gateway.clone()));
        let auth = Auth::new("https://chat.example.com", "me@example.com", "K");

        downloader.download("http://x/y.png", &auth).await.unwrap();

        let calls = gateway.calls.lock().unwrap().clone();
        assert_eq!(calls[0].1, "http://x/y.png");
    }

    #[tokio::test]
    async fn test_unresolvable_reference_never_reaches_gateway() {
        let gateway = RecordingGateway::new();
        let downloader = ImageDownloader::new(Box::new(gateway.clone()));
        let auth = Auth::new("not a url", "me@example.com", "K");

        let result = downloader.download("/photo.jpg", &auth).await;

        assert!(result.is_err());
        assert!(gateway.calls.lock().unwrap().is_empty());
    }
}
