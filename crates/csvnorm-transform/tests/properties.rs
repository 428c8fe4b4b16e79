//! Property tests for the field normalizers.

use proptest::prelude::*;

use csvnorm_transform::{
    format_seconds, normalize_zip, parse_compact_duration, sum_durations, upper_case_name,
};

proptest! {
    #[test]
    fn zip_pads_short_numeric_codes(zip in "[0-9]{1,5}") {
        let normalized = normalize_zip(&zip).unwrap();
        prop_assert_eq!(normalized.len(), 5);
        prop_assert!(normalized.ends_with(zip.as_str()));
        prop_assert!(normalized[..5 - zip.len()].chars().all(|c| c == '0'));
    }

    #[test]
    fn zip_normalization_is_idempotent(zip in "[0-9]{1,5}") {
        let once = normalize_zip(&zip).unwrap();
        let twice = normalize_zip(&once).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn zip_never_shortens_long_codes(zip in "[0-9]{6,20}") {
        prop_assert_eq!(normalize_zip(&zip).unwrap(), zip);
    }

    #[test]
    fn zip_rejects_alphabetic_content(prefix in "[0-9]{0,4}", letter in "[a-zA-Z]") {
        let zip = format!("{prefix}{letter}");
        prop_assert!(normalize_zip(&zip).is_err());
    }

    #[test]
    fn full_name_is_upper_cased(name in "[a-zA-Z '.-]{0,40}") {
        prop_assert_eq!(upper_case_name(&name), name.to_ascii_uppercase());
    }

    #[test]
    fn compact_duration_matches_components(
        hours in 0u32..1000,
        minutes in 0u32..60,
        seconds in 0u32..60,
        millis in 0u32..1000,
    ) {
        let text = format!("{hours}:{minutes:02}:{seconds:02}.{millis:03}");
        let parsed = parse_compact_duration(&text).unwrap();
        let expected = f64::from(hours) * 3600.0
            + f64::from(minutes) * 60.0
            + f64::from(seconds)
            + f64::from(millis) / 1000.0;
        prop_assert!((parsed - expected).abs() < 1e-6, "{} -> {}", text, parsed);
    }

    #[test]
    fn total_duration_is_rounded_sum(first_ms in 0u64..10_000_000_000, second_ms in 0u64..10_000_000_000) {
        let first = first_ms as f64 / 1000.0;
        let second = second_ms as f64 / 1000.0;
        let total = sum_durations(first, second);
        prop_assert_eq!(format_seconds(total), format_seconds(first + second));
        prop_assert!((total - (first + second)).abs() < 0.0005 + 1e-9);
    }
}
