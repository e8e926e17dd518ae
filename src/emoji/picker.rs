//! Emoji picker state machine
//!
//! One picker instance backs one "pick a reaction" screen. The picker owns
//! the filter string and the target message id; the realm-emoji map and the
//! outbound collaborators are injected by the caller on every operation.

use async_trait::async_trait;

use crate::emoji::code_points;
use crate::emoji::filter::filter_emoji_list;
use crate::error::{Error, Result};
use crate::types::{RealmEmojiMap, ReactionRequest};

/// Collaborator that records a reaction on the server
///
/// The picker treats this as fire-and-forget: delivery failures are the
/// sink's concern, never surfaced to the screen.
#[async_trait]
pub trait ReactionSink: Send + Sync {
    async fn add_reaction(&self, request: &ReactionRequest) -> Result<()>;
}

/// Collaborator that receives the navigate-back signal after a selection
pub trait Navigator: Send + Sync {
    fn navigate_back(&self);
}

/// State for one emoji-picker screen
///
/// The screen has a single logical state ("awaiting selection"): filter
/// changes transition to itself, a selection ends the screen's life.
pub struct EmojiPicker {
    /// The message the chosen reaction will be recorded against
    message_id: i64,
    /// Current filter, always stored lowercase
    filter: String,
}

impl EmojiPicker {
    /// Create a picker for a message, with an empty filter
    pub fn new(message_id: i64) -> Self {
        EmojiPicker {
            message_id,
            filter: String::new(),
        }
    }

    /// The target message id
    pub fn message_id(&self) -> i64 {
        self.message_id
    }

    /// Update the filter from user text input
    ///
    /// Any string is accepted; matching is case-insensitive so the text is
    /// lowercased on the way in.
    pub fn set_filter(&mut self, text: &str) {
        self.filter = text.to_lowercase();
    }

    /// The current (lowercased) filter
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Derive the currently visible emoji names
    pub fn visible_emoji(&self, realm_emoji: &RealmEmojiMap) -> Vec<String> {
        filter_emoji_list(&self.filter, realm_emoji)
    }

    /// Resolve a display name to a reaction request
    ///
    /// Realm-custom lookup wins over the standard table. Deactivated realm
    /// entries are not eligible for new reactions. A name found in neither
    /// table is a caller contract violation and yields InvalidArgument.
    pub fn resolve(&self, name: &str, realm_emoji: &RealmEmojiMap) -> Result<ReactionRequest> {
        if let Some(custom) = realm_emoji.get(name).filter(|e| !e.deactivated) {
            return Ok(ReactionRequest::realm(self.message_id, custom.id, name));
        }
        match code_points::code_point(name) {
            Some(code) => Ok(ReactionRequest::unicode(self.message_id, code, name)),
            None => Err(Error::invalid_argument(format!(
                "Unknown emoji name: {name}"
            ))),
        }
    }

    /// Select an emoji: record the reaction and leave the screen
    ///
    /// The sink call's outcome is deliberately not inspected (optimistic
    /// UI); exactly one navigate-back signal is sent per selection
    /// regardless of how the sink fared.
    pub async fn select_emoji(
        &self,
        name: &str,
        realm_emoji: &RealmEmojiMap,
        sink: &dyn ReactionSink,
        navigator: &dyn Navigator,
    ) -> Result<()> {
        let request = self.resolve(name, realm_emoji)?;
        let _ = sink.add_reaction(&request).await;
        navigator.navigate_back();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RealmEmoji, ReactionType};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Records every request it receives; optionally fails them all
    struct RecordingSink {
        requests: Mutex<Vec<ReactionRequest>>,
        fail: bool,
    }

    impl RecordingSink {
        fn new(fail: bool) -> Self {
            RecordingSink {
                requests: Mutex::new(Vec::new()),
                fail,
            }
        }

        fn recorded(&self) -> Vec<ReactionRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ReactionSink for RecordingSink {
        async fn add_reaction(&self, request: &ReactionRequest) -> Result<()> {
            self.requests.lock().unwrap().push(request.clone());
            if self.fail {
                Err(Error::network("sink unavailable"))
            } else {
                Ok(())
            }
        }
    }

    struct CountingNavigator {
        back_signals: AtomicUsize,
    }

    impl CountingNavigator {
        fn new() -> Self {
            CountingNavigator {
                back_signals: AtomicUsize::new(0),
            }
        }
    }

    impl Navigator for CountingNavigator {
        fn navigate_back(&self) {
            self.back_signals.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn realm_map() -> RealmEmojiMap {
        let mut map = RealmEmojiMap::new();
        map.insert("company_logo".to_string(), RealmEmoji::new(42, "company_logo"));
        map
    }

    #[test]
    fn test_filter_is_lowercased() {
        let mut picker = EmojiPicker::new(1);
        picker.set_filter("OcToPuS");
        assert_eq!(picker.filter(), "octopus");
    }

    #[test]
    fn test_resolve_prefers_realm_emoji() {
        let picker = EmojiPicker::new(1234);
        let request = picker.resolve("company_logo", &realm_map()).unwrap();

        assert_eq!(request.reaction_type, ReactionType::RealmEmoji);
        assert_eq!(request.emoji_code, "42");
        assert_eq!(request.emoji_name, "company_logo");
        assert_eq!(request.message_id, 1234);
    }

    #[test]
    fn test_resolve_falls_back_to_standard_table() {
        let picker = EmojiPicker::new(1234);
        let request = picker.resolve("+1", &realm_map()).unwrap();

        assert_eq!(request.reaction_type, ReactionType::UnicodeEmoji);
        assert_eq!(request.emoji_code, "1f44d");
    }

    #[test]
    fn test_resolve_skips_deactivated_realm_emoji() {
        let mut map = RealmEmojiMap::new();
        // Deactivated realm emoji that shadows a standard name
        map.insert(
            "octopus".to_string(),
            RealmEmoji::new(9, "octopus").deactivated(),
        );

        let picker = EmojiPicker::new(1);
        let request = picker.resolve("octopus", &map).unwrap();
        assert_eq!(request.reaction_type, ReactionType::UnicodeEmoji);
    }

    #[test]
    fn test_resolve_unknown_name_is_error() {
        let picker = EmojiPicker::new(1);
        let err = picker.resolve("definitely_not_real", &realm_map()).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::InvalidArgument);
    }

    #[tokio::test]
    async fn test_select_records_reaction_and_navigates_back() {
        let picker = EmojiPicker::new(1234);
        let sink = RecordingSink::new(false);
        let navigator = CountingNavigator::new();

        picker
            .select_emoji("company_logo", &realm_map(), &sink, &navigator)
            .await
            .unwrap();

        let recorded = sink.recorded();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].reaction_type, ReactionType::RealmEmoji);
        assert_eq!(navigator.back_signals.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_select_navigates_back_even_when_sink_fails() {
        let picker = EmojiPicker::new(1234);
        let sink = RecordingSink::new(true);
        let navigator = CountingNavigator::new();

        // Sink failure is absorbed; the screen still closes exactly once
        picker
            .select_emoji("+1", &realm_map(), &sink, &navigator)
            .await
            .unwrap();

        assert_eq!(sink.recorded().len(), 1);
        assert_eq!(navigator.back_signals.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_select_unknown_name_has_no_side_effects() {
        let picker = EmojiPicker::new(1234);
        let sink = RecordingSink::new(false);
        let navigator = CountingNavigator::new();

        let result = picker
            .select_emoji("definitely_not_real", &realm_map(), &sink, &navigator)
            .await;

        assert!(result.is_err());
        assert!(sink.recorded().is_empty());
        assert_eq!(navigator.back_signals.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_visible_emoji_uses_current_filter() {
        let mut picker = EmojiPicker::new(1);
        picker.set_filter("company");
        let names = picker.visible_emoji(&realm_map());
        assert_eq!(names, vec!["company_logo".to_string()]);
    }
}
