//! Storage gateways
//!
//! The platform-appropriate way of getting an image onto the device is a
//! polymorphic capability: one trait, two concrete implementations, chosen
//! when the downloader is configured. Photo-library platforms hand the
//! URL to the system library; download-manager platforms fetch it
//! themselves after a permission handshake.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use futures::StreamExt;
use tokio::io::AsyncWriteExt;

use crate::api::USER_AGENT;
use crate::error::{Error, ErrorCode, Result};
use crate::media::permission::{ensure_storage_permission, StoragePermission};
use crate::media::url::{append_api_key, file_name};
use crate::types::{Auth, DownloadJob, SaveOutcome, FALLBACK_MIME_TYPE};

/// Host capability that saves a URL into the device photo library
///
/// The platform fetches the URL itself; authentication must therefore
/// already be embedded in the URL.
#[async_trait]
pub trait PhotoLibrary: Send + Sync {
    /// Save the content behind `url`; returns the URI of the saved asset
    async fn save(&self, url: &str) -> Result<String>;
}

/// Platform-appropriate way of storing a downloaded image
#[async_trait]
pub trait StorageGateway: Send + Sync {
    /// Store the image behind `absolute_url` (resolved from `src`)
    async fn store(&self, src: &str, absolute_url: &str, auth: &Auth) -> Result<SaveOutcome>;
}

/// Variant A: hand the URL to the platform photo library
///
/// No permission handshake is involved; the library prompts on its own
/// terms. Failures from the save capability propagate unchanged.
pub struct PhotoLibraryGateway {
    library: Box<dyn PhotoLibrary>,
}

impl PhotoLibraryGateway {
    /// Create a gateway over the host's photo-library capability
    pub fn new(library: Box<dyn PhotoLibrary>) -> Self {
        PhotoLibraryGateway { library }
    }
}

#[async_trait]
impl StorageGateway for PhotoLibraryGateway {
    async fn store(&self, _src: &str, absolute_url: &str, auth: &Auth) -> Result<SaveOutcome> {
        let url = append_api_key(absolute_url, &auth.api_key);
        let uri = self.library.save(&url).await?;
        Ok(SaveOutcome::PhotoLibrary { uri })
    }
}

/// Variant B: fetch the image ourselves into the download directory
///
/// Requires storage-write permission. The GET is issued synchronously so
/// request failures surface to the caller; the body transfer then runs in
/// the background and is no longer tracked or cancellable.
pub struct DownloadManagerGateway {
    permissions: Box<dyn StoragePermission>,
    download_dir: PathBuf,
    http_client: reqwest::Client,
}

impl DownloadManagerGateway {
    /// Create a gateway writing into `download_dir`
    ///
    /// No request timeout is configured: image downloads are expected to
    /// outlive any sensible fixed deadline.
    pub fn new(
        permissions: Box<dyn StoragePermission>,
        download_dir: impl Into<PathBuf>,
    ) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::network(format!("Failed to create HTTP client: {e}")))?;

        Ok(DownloadManagerGateway {
            permissions,
            download_dir: download_dir.into(),
            http_client,
        })
    }

    /// Build the job descriptor for a source reference
    ///
    /// The file name is the last path segment of `src`; the MIME type is
    /// the fixed fallback and a user-visible notification is requested.
    pub(crate) fn build_job(&self, src: &str, absolute_url: &str) -> Result<DownloadJob> {
        let name = file_name(src);
        if name.is_empty() {
            return Err(Error::invalid_argument(format!(
                "No file name in image reference '{src}'"
            )));
        }
        let destination = self.download_dir.join(&name);

        Ok(DownloadJob {
            url: absolute_url.to_string(),
            file_name: name,
            destination: destination.to_string_lossy().into_owned(),
            mime_type: FALLBACK_MIME_TYPE.to_string(),
            notify: true,
            enqueued_at: Utc::now(),
        })
    }
}

#[async_trait]
impl StorageGateway for DownloadManagerGateway {
    async fn store(&self, src: &str, absolute_url: &str, auth: &Auth) -> Result<SaveOutcome> {
        ensure_storage_permission(self.permissions.as_ref()).await?;

        let job = self.build_job(src, absolute_url)?;

        let response = self
            .http_client
            .get(absolute_url)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded; charset=utf-8",
            )
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::AUTHORIZATION, auth.basic_auth_header())
            .send()
            .await
            .map_err(|e| Error::network(format!("GET request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(
                Error::network(format!("Download failed with status {status}"))
                    .with_http_status(status.as_u16()),
            );
        }

        // The caller gets the job descriptor back immediately; the body
        // transfer continues in the background and is not cancellable.
        let destination = PathBuf::from(&job.destination);
        tokio::spawn(async move {
            if let Err(e) = write_body(response, &destination).await {
                eprintln!("Background download to {} failed: {e}", destination.display());
            }
        });

        Ok(SaveOutcome::DownloadManager { job })
    }
}

/// Stream a response body to its destination file
async fn write_body(response: reqwest::Response, destination: &Path) -> Result<()> {
    let mut file = tokio::fs::File::create(destination).await.map_err(|e| {
        Error::new(
            ErrorCode::Unknown,
            format!("Failed to create {}: {e}", destination.display()),
        )
    })?;

    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| Error::network(format!("Failed to read body: {e}")))?;
        file.write_all(&chunk).await.map_err(|e| {
            Error::new(
                ErrorCode::Unknown,
                format!("Failed to write {}: {e}", destination.display()),
            )
        })?;
    }

    file.flush().await.map_err(|e| {
        Error::new(
            ErrorCode::Unknown,
            format!("Failed to flush {}: {e}", destination.display()),
        )
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::permission::PermissionStatus;
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct RecordingLibrary {
        saved_urls: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl RecordingLibrary {
        fn new(fail: bool) -> Self {
            RecordingLibrary {
                saved_urls: Arc::new(Mutex::new(Vec::new())),
                fail,
            }
        }

        fn saved(&self) -> Vec<String> {
            self.saved_urls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PhotoLibrary for RecordingLibrary {
        async fn save(&self, url: &str) -> Result<String> {
            self.saved_urls.lock().unwrap().push(url.to_string());
            if self.fail {
                Err(Error::new(ErrorCode::Unknown, "library rejected the asset"))
            } else {
                Ok("ph://saved-asset".to_string())
            }
        }
    }

    struct DenyingBroker;

    #[async_trait]
    impl StoragePermission for DenyingBroker {
        async fn check(&self) -> Result<bool> {
            Ok(false)
        }

        async fn request(&self) -> Result<PermissionStatus> {
            Ok(PermissionStatus::Denied)
        }
    }

    fn test_auth() -> Auth {
        Auth::new("https://chat.example.com", "me@example.com", "K")
    }

    #[tokio::test]
    async fn test_photo_library_appends_api_key_with_question_mark() {
        let library = RecordingLibrary::new(false);
        let gateway = PhotoLibraryGateway::new(Box::new(library.clone()));

        let outcome = gateway
            .store("y.png", "http://x/y.png", &test_auth())
            .await
            .unwrap();

        match outcome {
            SaveOutcome::PhotoLibrary { uri } => assert_eq!(uri, "ph://saved-asset"),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(library.saved(), vec!["http://x/y.png?api_key=K".to_string()]);
    }

    #[tokio::test]
    async fn test_photo_library_appends_api_key_with_ampersand() {
        let library = RecordingLibrary::new(false);
        let gateway = PhotoLibraryGateway::new(Box::new(library.clone()));

        gateway
            .store("y.png", "http://x/y.png?size=full", &test_auth())
            .await
            .unwrap();

        assert_eq!(
            library.saved(),
            vec!["http://x/y.png?size=full&api_key=K".to_string()]
        );
    }

    #[tokio::test]
    async fn test_photo_library_save_failure_propagates() {
        let gateway = PhotoLibraryGateway::new(Box::new(RecordingLibrary::new(true)));
        let err = gateway
            .store("y.png", "http://x/y.png", &test_auth())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Unknown);
        assert_eq!(err.message, "library rejected the asset");
    }

    #[tokio::test]
    async fn test_download_manager_permission_denied_issues_no_request() {
        let gateway =
            DownloadManagerGateway::new(Box::new(DenyingBroker), "/tmp/downloads").unwrap();

        // The URL is unroutable on purpose: if the gateway ever issued the
        // GET, this test would fail with a network error instead.
        let err = gateway
            .store(
                "photo.jpg",
                "http://[100::1]/photo.jpg",
                &test_auth(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::PermissionDenied);
    }

    #[test]
    fn test_build_job_derives_file_name() {
        let gateway =
            DownloadManagerGateway::new(Box::new(DenyingBroker), "/sdcard/Download").unwrap();
        let job = gateway
            .build_job("http://host/path/photo.jpg", "http://host/path/photo.jpg")
            .unwrap();

        assert_eq!(job.file_name, "photo.jpg");
        assert_eq!(job.destination, "/sdcard/Download/photo.jpg");
        assert_eq!(job.mime_type, FALLBACK_MIME_TYPE);
        assert!(job.notify);
    }

    #[test]
    fn test_build_job_rejects_empty_file_name() {
        let gateway =
            DownloadManagerGateway::new(Box::new(DenyingBroker), "/sdcard/Download").unwrap();
        let err = gateway
            .build_job("http://host/path/", "http://host/path/")
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
    }
}
