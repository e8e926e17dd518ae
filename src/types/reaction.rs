//! Reaction types
//!
//! A reaction associates an emoji with a message, attributed to the
//! authenticated user. The request value here is ephemeral: it is built
//! at selection time, posted to the server, and never persisted locally.

use serde::{Deserialize, Serialize};

/// The two kinds of emoji a reaction can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionType {
    /// A realm-custom emoji, identified by its server-assigned id
    RealmEmoji,
    /// A standard emoji, identified by its Unicode code point
    UnicodeEmoji,
}

impl ReactionType {
    /// The wire tag for this reaction type
    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionType::RealmEmoji => "realm_emoji",
            ReactionType::UnicodeEmoji => "unicode_emoji",
        }
    }
}

/// A request to record a reaction against a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionRequest {
    /// The message being reacted to
    pub message_id: i64,
    /// Which kind of emoji the code refers to
    pub reaction_type: ReactionType,
    /// Type-specific value: realm emoji id, or Unicode code point (hex)
    pub emoji_code: String,
    /// Display name of the emoji, as shown in the picker
    pub emoji_name: String,
}

impl ReactionRequest {
    /// Build a request for a realm-custom emoji
    pub fn realm(message_id: i64, emoji_id: i64, name: impl Into<String>) -> Self {
        ReactionRequest {
            message_id,
            reaction_type: ReactionType::RealmEmoji,
            emoji_code: emoji_id.to_string(),
            emoji_name: name.into(),
        }
    }

    /// Build a request for a standard Unicode emoji
    pub fn unicode(message_id: i64, code_point: &str, name: impl Into<String>) -> Self {
        ReactionRequest {
            message_id,
            reaction_type: ReactionType::UnicodeEmoji,
            emoji_code: code_point.to_string(),
            emoji_name: name.into(),
        }
    }
}
