//! Core types for libchatcore
//!
//! This module contains the data model shared by the emoji picker and the
//! image downloader.

pub mod auth;
pub mod download;
pub mod emoji;
pub mod reaction;

// Re-export for convenience
pub use auth::Auth;
pub use download::{DownloadJob, SaveOutcome, FALLBACK_MIME_TYPE};
pub use emoji::{RealmEmoji, RealmEmojiMap};
pub use reaction::{ReactionRequest, ReactionType};
