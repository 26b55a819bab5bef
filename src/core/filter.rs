//! Selection state and the filter engine.
//!
//! `Selection` holds the session's search term, category toggle set, and
//! view mode. `filter` is the pure function projecting the catalog through
//! the current selection. Neither side touches rendering.

use std::collections::HashSet;

use super::catalog::{Catalog, Category, PredicateRecord};

// ── View mode ───────────────────────────────────────────────────────────────

/// Visual layout for the filtered results. Orthogonal to filtering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Cards,
    List,
}

impl ViewMode {
    /// Parse a mode label. Anything other than cards/list coerces to the
    /// default rather than erroring.
    pub fn parse(label: &str) -> ViewMode {
        match label {
            "cards" => ViewMode::Cards,
            "list" => ViewMode::List,
            _ => ViewMode::Cards,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Cards => "cards",
            ViewMode::List => "list",
        }
    }

    pub fn toggled(self) -> ViewMode {
        match self {
            ViewMode::Cards => ViewMode::List,
            ViewMode::List => ViewMode::Cards,
        }
    }
}

// ── Selection state ─────────────────────────────────────────────────────────

/// Mutable session state driving the filter engine.
///
/// Owned by the single event-handling actor; every mutation is followed by
/// a re-filter in the composing layer (debounced for search edits).
#[derive(Clone, Debug, Default)]
pub struct Selection {
    /// Lower-cased search term. Empty means "match all".
    search_term: String,
    /// Active category toggles. Empty means "no category filter".
    selected_categories: HashSet<Category>,
    view_mode: ViewMode,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the search term with the lower-cased input. No trimming:
    /// whitespace-only terms are matched literally.
    pub fn set_search_term(&mut self, text: &str) {
        self.search_term = text.to_lowercase();
    }

    /// Toggle a category in or out of the selected set.
    pub fn toggle_category(&mut self, category: Category) {
        if !self.selected_categories.remove(&category) {
            self.selected_categories.insert(category);
        }
    }

    /// Toggle by label. Unknown labels are ignored without error — the UI
    /// only ever offers known labels.
    pub fn toggle_category_label(&mut self, label: &str) {
        if let Some(category) = Category::from_label(label) {
            self.toggle_category(category);
        }
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn selected_categories(&self) -> &HashSet<Category> {
        &self.selected_categories
    }

    pub fn is_selected(&self, category: Category) -> bool {
        self.selected_categories.contains(&category)
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }
}

// ── Filter engine ───────────────────────────────────────────────────────────

/// Filter the catalog through the selection.
///
/// A record is included iff the search term is empty or a case-insensitive
/// substring of its name, description, category label, or syntax, AND the
/// category set is empty or contains the record's category. Output order is
/// catalog order.
pub fn filter<'a>(catalog: &'a Catalog, selection: &Selection) -> Vec<&'a PredicateRecord> {
    catalog
        .records()
        .iter()
        .filter(|record| matches_search(record, selection.search_term()))
        .filter(|record| matches_category(record, selection.selected_categories()))
        .collect()
}

fn matches_search(record: &PredicateRecord, term: &str) -> bool {
    term.is_empty()
        || record.name.to_lowercase().contains(term)
        || record.description.to_lowercase().contains(term)
        || record.category.label().to_lowercase().contains(term)
        || record.syntax.to_lowercase().contains(term)
}

fn matches_category(record: &PredicateRecord, selected: &HashSet<Category>) -> bool {
    selected.is_empty() || selected.contains(&record.category)
}

// ── Tests ──────────────────────────────────────────────────────────────────
