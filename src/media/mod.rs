//! Image downloader unit
//!
//! Resolves an image reference against the realm and stores it through
//! the platform-appropriate gateway.

pub mod download;
pub mod gateway;
pub mod permission;
pub mod url;

pub use download::ImageDownloader;
pub use gateway::{DownloadManagerGateway, PhotoLibrary, PhotoLibraryGateway, StorageGateway};
pub use permission::{ensure_storage_permission, PermissionStatus, StoragePermission};
