//! Storage-write permission handshake
//!
//! Download-manager platforms gate device storage behind a user-granted
//! permission. The actual check/prompt UI belongs to the host; this module
//! owns only the decision logic around it.

use async_trait::async_trait;

use crate::error::{Error, Result};

/// Result of a permission prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    /// The user granted the permission
    Granted,
    /// The user denied the permission
    Denied,
    /// The user denied the permission and asked not to be prompted again
    DeniedPermanently,
}

/// Host capability for checking and prompting storage-write permission
#[async_trait]
pub trait StoragePermission: Send + Sync {
    /// Check whether the permission is currently granted, without prompting
    async fn check(&self) -> Result<bool>;

    /// Prompt the user for the permission
    async fn request(&self) -> Result<PermissionStatus>;
}

/// Ensure storage-write permission is granted, prompting if necessary
///
/// A positive check short-circuits without prompting. Otherwise the user
/// is prompted once; Denied and DeniedPermanently both fail with
/// PermissionDenied, and no further prompts are attempted.
pub async fn ensure_storage_permission(broker: &dyn StoragePermission) -> Result<()> {
    if broker.check().await? {
        return Ok(());
    }
    match broker.request().await? {
        PermissionStatus::Granted => Ok(()),
        PermissionStatus::Denied | PermissionStatus::DeniedPermanently => {
            Err(Error::permission_denied("Storage permission denied"))
        }
    }
}
