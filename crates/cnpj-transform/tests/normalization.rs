//! Property tests for field normalization.

use cnpj_transform::normalize_text;
use proptest::prelude::*;

proptest! {
    #[test]
    fn normalization_is_idempotent(value in "\\PC*") {
        let once = normalize_text(&value);
        prop_assert_eq!(normalize_text(&once), once);
    }

    #[test]
    fn output_is_ascii_without_lowercase(value in "\\PC*") {
        let normalized = normalize_text(&value);
        prop_assert!(normalized.is_ascii());
        prop_assert!(!normalized.chars().any(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn whitespace_is_collapsed(value in "[ \\t\\na-zà-ÿ]*") {
        let normalized = normalize_text(&value);
        prop_assert!(!normalized.starts_with(' '));
        prop_assert!(!normalized.ends_with(' '));
        prop_assert!(!normalized.contains("  "));
        prop_assert!(!normalized.contains('\t'));
        prop_assert!(!normalized.contains('\n'));
    }

    #[test]
    fn latin1_words_keep_their_count(words in prop::collection::vec("[a-zà-öø-ÿ]{1,8}", 0..6)) {
        let joined = words.join("   ");
        let normalized = normalize_text(&joined);
        let count = if normalized.is_empty() { 0 } else { normalized.split(' ').count() };
        prop_assert_eq!(count, words.len());
    }
}
