//! Profanity filter
//!
//! Tokens are split on the literal space character only. Tabs and newlines
//! are not separators, so `"kerfuffle\tnow"` is a single token and is left
//! alone. Consecutive spaces produce empty tokens, which keeps the original
//! spacing intact when the tokens are joined back together.

use std::collections::HashSet;

/// Replacement for a banned token.
pub const MASK: &str = "****";

/// Words banned when no list is configured.
pub const DEFAULT_BANNED_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];

/// Case-insensitive, exact-token profanity filter.
///
/// The banned set is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfanityFilter {
    banned: HashSet<String>,
}

impl ProfanityFilter {
    /// Builds a filter from `words`. Words are lowercased; empty words are
    /// ignored.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let banned = words
            .into_iter()
            .map(|w| w.as_ref().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { banned }
    }

    /// Returns whether `token` matches a banned word, ignoring case.
    pub fn is_banned(&self, token: &str) -> bool {
        !token.is_empty() && self.banned.contains(&token.to_lowercase())
    }

    /// Replaces every banned token in `body` with [`MASK`].
    pub fn filter(&self, body: &str) -> String {
        body.split(' ')
            .map(|token| if self.is_banned(token) { MASK } else { token })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for ProfanityFilter {
    fn default() -> Self {
        Self::new(DEFAULT_BANNED_WORDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masks_case_insensitive_matches() {
        let filter = ProfanityFilter::default();
        assert_eq!(
            filter.filter("I hate kerfuffle and Sharbert"),
            "I hate **** and ****"
        );
        assert_eq!(filter.filter("FORNAX"), "****");
    }

    #[test]
    fn test_preserves_casing_of_clean_tokens() {
        let filter = ProfanityFilter::default();
        assert_eq!(
            filter.filter("Hello World, this IS Fine"),
            "Hello World, this IS Fine"
        );
    }

    #[test]
    fn test_attached_punctuation_is_not_a_match() {
        let filter = ProfanityFilter::default();
        assert_eq!(filter.filter("Sharbert! kerfuffle"), "Sharbert! ****");
    }

    #[test]
    fn test_substrings_are_not_matched() {
        let filter = ProfanityFilter::default();
        assert_eq!(filter.filter("kerfuffles fornaxes"), "kerfuffles fornaxes");
    }

    #[test]
    fn test_only_spaces_separate_tokens() {
        let filter = ProfanityFilter::default();
        assert_eq!(filter.filter("kerfuffle\tfornax"), "kerfuffle\tfornax");
        assert_eq!(filter.filter("ok\nsharbert"), "ok\nsharbert");
    }

    #[test]
    fn test_spacing_is_preserved() {
        let filter = ProfanityFilter::default();
        assert_eq!(filter.filter("  fornax   ok "), "  ****   ok ");
        assert_eq!(filter.filter(""), "");
    }

    #[test]
    fn test_filter_is_idempotent() {
        let filter = ProfanityFilter::default();
        assert_eq!(filter.filter("**** is fine"), "**** is fine");

        let once = filter.filter("kerfuffle is not fine");
        assert_eq!(filter.filter(&once), once);
    }

    #[test]
    fn test_custom_word_list() {
        let filter = ProfanityFilter::new(["Darn", ""]);
        assert!(filter.is_banned("DARN"));
        assert!(!filter.is_banned(""));
        assert_eq!(filter.filter("darn kerfuffle DARN"), "**** kerfuffle ****");
    }

    #[test]
    fn test_empty_list_passes_everything() {
        let filter = ProfanityFilter::new(Vec::<String>::new());
        assert!(!filter.is_banned("sharbert"));
        assert_eq!(filter.filter("kerfuffle"), "kerfuffle");
    }
}
