//! Property-based tests for contract filename derivation.

use chrono::TimeZone;
use dashboard_client::download::{default_filename, disposition_filename, sanitize_quote_number};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Whatever the quote number, the sanitized form holds only word
    /// characters and hyphens.
    #[test]
    fn sanitized_numbers_are_word_chars_and_hyphens(raw in "[ -~]{0,32}") {
        let out = sanitize_quote_number(&raw);
        prop_assert!(out.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-'));
    }

    /// Sanitization never produces doubled or edge hyphens.
    #[test]
    fn sanitized_numbers_have_no_hyphen_runs(raw in "[ -~]{0,32}") {
        let out = sanitize_quote_number(&raw);
        prop_assert!(!out.contains("--"));
        prop_assert!(!out.starts_with('-') && !out.ends_with('-'));
    }

    /// Already-clean quote numbers pass through untouched.
    #[test]
    fn clean_numbers_are_unchanged(raw in "[A-Za-z0-9_]{1,20}") {
        prop_assert_eq!(sanitize_quote_number(&raw), raw);
    }

    /// Derived filenames embed the sanitized number and end in .pdf.
    #[test]
    fn derived_filenames_are_well_formed(
        raw in "[ -~]{1,20}",
        ts in 0i64..4_000_000_000i64,
    ) {
        let now = chrono::Utc.timestamp_opt(ts, 0).unwrap();
        let name = default_filename(&raw, now);
        prop_assert!(name.starts_with("contract-"));
        prop_assert!(name.ends_with(".pdf"));
        prop_assert!(name.contains(&sanitize_quote_number(&raw)));
    }

    /// A quoted disposition filename always round-trips.
    #[test]
    fn quoted_disposition_filenames_parse(name in "[A-Za-z0-9._-]{1,24}") {
        let header = format!("attachment; filename=\"{name}\"");
        prop_assert_eq!(disposition_filename(&header), Some(name));
    }
}
