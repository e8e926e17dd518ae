//! Download descriptors
//!
//! These values describe a single save-to-device operation. They are
//! constructed per invocation and carry no retained state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// MIME type used when the server does not tell us better
///
/// Download managers refuse URLs without a recognizable file extension
/// unless an explicit MIME type is supplied.
pub const FALLBACK_MIME_TYPE: &str = "text/plain";

/// A download scheduled with the managed-download gateway
///
/// Once returned, the transfer is tracked by the background runtime and
/// cannot be cancelled through this library.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadJob {
    /// Fully resolved source URL
    pub url: String,
    /// File name, derived from the last path segment of the source
    pub file_name: String,
    /// Absolute destination path on device storage
    pub destination: String,
    /// MIME type reported to the download manager
    pub mime_type: String,
    /// Whether a user-visible notification is requested for the transfer
    pub notify: bool,
    /// When the job was handed to the background runtime
    pub enqueued_at: DateTime<Utc>,
}

/// Outcome of a save-to-device request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SaveOutcome {
    /// The image was handed to the platform photo library
    PhotoLibrary {
        /// URI reported back by the photo library capability
        uri: String,
    },
    /// The image was scheduled as a managed download
    DownloadManager {
        /// Descriptor for the scheduled transfer
        job: DownloadJob,
    },
}
