//! Emoji list filtering
//!
//! Pure, side-effect-free derivation of the visible emoji list from the
//! current filter text and the realm-emoji state.

use crate::emoji::code_points;
use crate::types::RealmEmojiMap;

/// Compute the list of emoji names matching a filter
///
/// Realm-custom names (minus deactivated entries) are merged with the
/// standard set, matched case-insensitively as a substring, sorted and
/// deduplicated. An empty filter matches everything.
pub fn filter_emoji_list(filter: &str, realm_emoji: &RealmEmojiMap) -> Vec<String> {
    let needle = filter.to_lowercase();
    let mut names: Vec<String> = realm_emoji
        .values()
        .filter(|emoji| !emoji.deactivated)
        .map(|emoji| emoji.name.clone())
        .chain(code_points::names().map(str::to_string))
        .filter(|name| name.to_lowercase().contains(&needle))
        .collect();
    names.sort();
    names.dedup();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RealmEmoji;

    fn realm_map(entries: &[(&str, i64)]) -> RealmEmojiMap {
        entries
            .iter()
            .map(|(name, id)| (name.to_string(), RealmEmoji::new(*id, *name)))
            .collect()
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let realm = realm_map(&[("company_logo", 1)]);
        let names = filter_emoji_list("", &realm);

        assert!(names.contains(&"company_logo".to_string()));
        assert!(names.contains(&"octopus".to_string()));
        // Sorted output
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_substring_match_is_case_insensitive() {
        let realm = realm_map(&[("PartyParrot", 1)]);
        let names = filter_emoji_list("parrot", &realm);
        assert_eq!(names, vec!["PartyParrot".to_string()]);
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let realm = realm_map(&[("company_logo", 1)]);
        let first = filter_emoji_list("hear", &realm);
        let second = filter_emoji_list("hear", &realm);
        assert_eq!(first, second);
        assert!(first.contains(&"hear_no_evil".to_string()));
    }

    #[test]
    fn test_realm_name_shadowing_standard_name_deduplicates() {
        // A realm emoji that reuses a standard name must appear once
        let realm = realm_map(&[("octopus", 9)]);
        let names = filter_emoji_list("octopus", &realm);
        assert_eq!(names, vec!["octopus".to_string()]);
    }

    #[test]
    fn test_deactivated_realm_emoji_hidden() {
        let mut realm = realm_map(&[("fresh_logo", 2)]);
        realm.insert(
            "old_logo".to_string(),
            RealmEmoji::new(1, "old_logo").deactivated(),
        );

        let names = filter_emoji_list("logo", &realm);
        assert_eq!(names, vec!["fresh_logo".to_string()]);
    }

    #[test]
    fn test_no_match_yields_empty_list() {
        let names = filter_emoji_list("zzzzzzzz_nothing", &RealmEmojiMap::new());
        assert!(names.is_empty());
    }
}
