//! Property-based tests for the Filter Engine and Selection State
//!
//! Tests invariants:
//! - Every result matches the search term in at least one searched field
//! - Every result belongs to a selected category (when any is selected)
//! - Filtering is idempotent for identical selections
//! - Output order is a sub-order of catalog order
//! - Toggling a category twice restores the prior selection

use std::collections::HashSet;

use proptest::prelude::*;

use crate::core::catalog::{Catalog, Category, PredicateRecord};
use crate::core::filter::{filter, Selection};

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

/// Generate a catalog of 0..20 records with unique names (an index suffix
/// guarantees the load-time uniqueness invariant).
fn arb_catalog() -> impl Strategy<Value = Catalog> {
    prop::collection::vec(("[a-z]{1,8}", "[a-z ]{0,16}", arb_category()), 0..20).prop_map(
        |parts| {
            let records = parts
                .into_iter()
                .enumerate()
                .map(|(i, (base, description, category))| PredicateRecord {
                    name: format!("{base}_{i}"),
                    category,
                    description,
                    syntax: format!("attribute_{base}_{i}"),
                    example: String::new(),
                })
                .collect();
            Catalog::new(records).expect("generated names are unique")
        },
    )
}

/// Search terms mixing letters, underscores, and whitespace, including the
/// empty term.
fn arb_term() -> impl Strategy<Value = String> {
    "[a-z_ ]{0,6}"
}

/// An arbitrary subset of the known categories.
fn arb_category_set() -> impl Strategy<Value = Vec<Category>> {
    prop::collection::vec(arb_category(), 0..6)
}

fn selection_with(term: &str, categories: &[Category]) -> Selection {
    let mut selection = Selection::new();
    selection.set_search_term(term);
    for &category in categories {
        if !selection.is_selected(category) {
            selection.toggle_category(category);
        }
    }
    selection
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_results_match_search_term(catalog in arb_catalog(), term in arb_term()) {
        let selection = selection_with(&term, &[]);
        let lowered = term.to_lowercase();
        for record in filter(&catalog, &selection) {
            prop_assert!(
                lowered.is_empty()
                    || record.name.to_lowercase().contains(&lowered)
                    || record.description.to_lowercase().contains(&lowered)
                    || record.category.label().to_lowercase().contains(&lowered)
                    || record.syntax.to_lowercase().contains(&lowered)
            );
        }
    }

    #[test]
    fn prop_empty_term_matches_all(catalog in arb_catalog()) {
        let results = filter(&catalog, &Selection::new());
        prop_assert_eq!(results.len(), catalog.len());
    }

    #[test]
    fn prop_results_belong_to_selected_categories(
        catalog in arb_catalog(),
        categories in arb_category_set(),
    ) {
        let selection = selection_with("", &categories);
        let selected: HashSet<Category> = selection.selected_categories().clone();
        for record in filter(&catalog, &selection) {
            prop_assert!(selected.is_empty() || selected.contains(&record.category));
        }
    }

    #[test]
    fn prop_filter_is_idempotent(
        catalog in arb_catalog(),
        term in arb_term(),
        categories in arb_category_set(),
    ) {
        let selection = selection_with(&term, &categories);
        let first: Vec<&str> = filter(&catalog, &selection)
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        let second: Vec<&str> = filter(&catalog, &selection)
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_output_order_is_suborder_of_catalog(
        catalog in arb_catalog(),
        term in arb_term(),
        categories in arb_category_set(),
    ) {
        let selection = selection_with(&term, &categories);
        let positions: Vec<usize> = filter(&catalog, &selection)
            .iter()
            .map(|result| {
                catalog
                    .records()
                    .iter()
                    .position(|r| r.name == result.name)
                    .expect("result came from the catalog")
            })
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn prop_double_toggle_restores_selection(
        initial in arb_category_set(),
        toggled in arb_category(),
    ) {
        let selection = selection_with("", &initial);
        let mut mutated = selection.clone();
        mutated.toggle_category(toggled);
        mutated.toggle_category(toggled);
        prop_assert_eq!(
            mutated.selected_categories(),
            selection.selected_categories()
        );
    }

    #[test]
    fn prop_narrowing_never_grows_results(
        catalog in arb_catalog(),
        term in arb_term(),
        categories in arb_category_set(),
    ) {
        let unfiltered = filter(&catalog, &Selection::new()).len();
        let narrowed = filter(&catalog, &selection_with(&term, &categories)).len();
        prop_assert!(narrowed <= unfiltered);
    }
}
