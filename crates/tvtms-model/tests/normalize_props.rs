//! Property tests for the closed-enum normalizers.
//!
//! The pipeline relies on these being total (never fail) and idempotent
//! (re-normalizing a canonical name is a no-op), so both properties are
//! checked over arbitrary input.

use proptest::prelude::*;

use tvtms_model::{ActionTier, Category, MappingType};

proptest! {
    #[test]
    fn mapping_type_normalize_is_total_and_idempotent(raw in ".*") {
        let normalized = MappingType::normalize(&raw);
        prop_assert_eq!(MappingType::normalize(normalized.as_str()), normalized);
    }

    #[test]
    fn category_normalize_is_total_and_idempotent(raw in ".*") {
        let normalized = Category::normalize(&raw);
        prop_assert_eq!(Category::normalize(normalized.as_str()), normalized);
    }

    #[test]
    fn category_ignores_trailing_period_and_case(raw in "(?i)(opt|nec|acd|inf)") {
        let with_period = format!("{}.", raw);
        prop_assert_eq!(Category::normalize(&with_period), Category::normalize(&raw));
        prop_assert_eq!(
            Category::normalize(&raw.to_uppercase()),
            Category::normalize(&raw.to_lowercase())
        );
    }

    #[test]
    fn tier_classification_never_panics(raw in ".*") {
        let tier = ActionTier::classify(&raw, MappingType::Standard);
        prop_assert!(tier.rank() <= 5);
    }
}
