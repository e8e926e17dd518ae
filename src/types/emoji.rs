//! Emoji types for realm-custom emojis

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Realm-custom emoji state, keyed by emoji name
///
/// Owned by the host application (it is part of the server-driven realm
/// state) and handed to this library read-only.
pub type RealmEmojiMap = HashMap<String, RealmEmoji>;

/// A custom emoji defined on a realm
///
/// Represents an emoji uploaded by a realm administrator. This does not
/// include standard Unicode emojis, which are available on every realm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealmEmoji {
    /// Server-assigned numeric identifier for the emoji
    pub id: i64,

    /// Name of the emoji (without colons, e.g. "parrot" not ":parrot:")
    pub name: String,

    /// URL of the emoji image, relative to the realm
    #[serde(default)]
    pub source_url: Option<String>,

    /// Whether the emoji has been deactivated on the realm
    ///
    /// Deactivated emoji stay in the server state so existing reactions
    /// keep rendering, but they are not offered for new reactions.
    #[serde(default)]
    pub deactivated: bool,
}

impl RealmEmoji {
    /// Create a new RealmEmoji
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            source_url: None,
            deactivated: false,
        }
    }

    /// Set the image source URL (builder pattern)
    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    /// Mark the emoji as deactivated (builder pattern)
    pub fn deactivated(mut self) -> Self {
        self.deactivated = true;
        self
    }

    /// Get the emoji name with colons (e.g. ":parrot:")
    pub fn name_with_colons(&self) -> String {
        format!(":{}:", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_realm_emoji_creation() {
        let emoji = RealmEmoji::new(42, "parrot");

        assert_eq!(emoji.id, 42);
        assert_eq!(emoji.name, "parrot");
        assert!(emoji.source_url.is_none());
        assert!(!emoji.deactivated);
    }

    #[test]
    fn test_name_with_colons() {
        let emoji = RealmEmoji::new(42, "parrot");
        assert_eq!(emoji.name_with_colons(), ":parrot:");
    }

    #[test]
    fn test_builder() {
        let emoji = RealmEmoji::new(7, "old_logo")
            .with_source_url("/user_avatars/2/emoji/old_logo.png")
            .deactivated();

        assert_eq!(
            emoji.source_url.as_deref(),
            Some("/user_avatars/2/emoji/old_logo.png")
        );
        assert!(emoji.deactivated);
    }

    #[test]
    fn test_deserialize_defaults() {
        // Server payloads may omit source_url and deactivated
        let emoji: RealmEmoji = serde_json::from_str(r#"{"id": 3, "name": "blobheart"}"#).unwrap();
        assert_eq!(emoji.id, 3);
        assert!(!emoji.deactivated);
    }
}
