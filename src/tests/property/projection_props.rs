//! Property-based tests for the View Projector
//!
//! Tests invariants:
//! - Exactly one render item per input record, never more, never fewer
//! - Empty input yields exactly the sentinel
//! - Input order is preserved
//! - Copy payloads strip the attribute marker, first occurrence only
//! - Style keys are lower-case and space-free

use proptest::prelude::*;

use crate::core::catalog::{Category, PredicateRecord};
use crate::core::filter::ViewMode;
use crate::core::project::{copy_payload, project, style_key, Projection};

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

fn arb_category() -> impl Strategy<Value = Category> {
    prop_oneof![
        Just(Category::Equality),
        Just(Category::Comparison),
        Just(Category::Pattern),
        Just(Category::Presence),
        Just(Category::Inclusion),
        Just(Category::Boolean),
    ]
}

fn arb_records() -> impl Strategy<Value = Vec<PredicateRecord>> {
    prop::collection::vec(("[a-z]{1,8}", arb_category()), 0..20).prop_map(|parts| {
        parts
            .into_iter()
            .enumerate()
            .map(|(i, (base, category))| PredicateRecord {
                name: format!("{base}_{i}"),
                category,
                description: format!("{base} description"),
                syntax: format!("attribute_{base}_{i}"),
                example: format!("User.ransack({base}_{i}: true)"),
            })
            .collect()
    })
}

fn arb_mode() -> impl Strategy<Value = ViewMode> {
    prop_oneof![Just(ViewMode::Cards), Just(ViewMode::List)]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_one_item_per_record(records in arb_records(), mode in arb_mode()) {
        let refs: Vec<&PredicateRecord> = records.iter().collect();
        let projection = project(&refs, mode);
        if refs.is_empty() {
            prop_assert_eq!(projection, Projection::Empty);
        } else {
            prop_assert_eq!(projection.items().len(), refs.len());
        }
    }

    #[test]
    fn prop_order_and_content_preserved(records in arb_records(), mode in arb_mode()) {
        let refs: Vec<&PredicateRecord> = records.iter().collect();
        let projection = project(&refs, mode);
        for (record, item) in refs.iter().zip(projection.items()) {
            prop_assert_eq!(&record.name, &item.name);
            prop_assert_eq!(record.category, item.category);
            prop_assert_eq!(&record.description, &item.description);
            prop_assert_eq!(&record.syntax, &item.syntax);
            prop_assert_eq!(&record.example, &item.example);
        }
    }

    #[test]
    fn prop_mode_selects_variant(records in arb_records(), mode in arb_mode()) {
        let refs: Vec<&PredicateRecord> = records.iter().collect();
        match project(&refs, mode) {
            Projection::Cards(_) => prop_assert_eq!(mode, ViewMode::Cards),
            Projection::List(_) => prop_assert_eq!(mode, ViewMode::List),
            Projection::Empty => prop_assert!(refs.is_empty()),
        }
    }

    #[test]
    fn prop_copy_payload_strips_marker(suffix in "[a-z_]{0,12}") {
        let syntax = format!("attribute_{suffix}");
        prop_assert_eq!(copy_payload(&syntax), format!("_{suffix}"));
    }

    #[test]
    fn prop_copy_payload_without_marker_is_identity(syntax in "[b-z_]{0,12}") {
        // No 'a' means the marker cannot occur.
        prop_assert_eq!(copy_payload(&syntax), syntax);
    }
}

#[test]
fn style_keys_are_lowercase_and_space_free() {
    for category in Category::ALL {
        let key = style_key(category);
        assert_eq!(key, key.to_lowercase());
        assert!(!key.contains(' '));
        assert!(!key.is_empty());
    }
}
