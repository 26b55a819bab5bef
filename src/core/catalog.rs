//! Predicate catalog — the fixed, read-only dataset the browser serves.
//!
//! The catalog is bundled into the binary as JSON via `include_str!` and
//! parsed once at startup. After a successful load it is never mutated.

use serde::Deserialize;
use thiserror::Error;

/// Compile-time bundled catalog data (~60 predicate records).
const PREDICATES_JSON: &str = include_str!("../../assets/predicates.json");

// ── Categories ──────────────────────────────────────────────────────────────

/// The closed set of predicate categories.
///
/// Records outside this set cannot exist: an unknown label in the bundled
/// data is a deserialization error, not a runtime state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
pub enum Category {
    Equality,
    Comparison,
    Pattern,
    Presence,
    Inclusion,
    Boolean,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 6] = [
        Category::Equality,
        Category::Comparison,
        Category::Pattern,
        Category::Presence,
        Category::Inclusion,
        Category::Boolean,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Equality => "Equality",
            Category::Comparison => "Comparison",
            Category::Pattern => "Pattern",
            Category::Presence => "Presence",
            Category::Inclusion => "Inclusion",
            Category::Boolean => "Boolean",
        }
    }

    /// Resolve a label to a category. Unknown labels yield `None`, which
    /// callers treat as a silent no-op (the UI only ever offers known labels).
    pub fn from_label(label: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.label() == label)
    }
}

// ── Records ─────────────────────────────────────────────────────────────────

/// One catalog entry describing a single query-filter operator.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PredicateRecord {
    /// Short identifier, unique across the catalog.
    pub name: String,
    pub category: Category,
    pub description: String,
    /// Template string containing the queryable token (e.g. `attribute_eq`).
    pub syntax: String,
    /// Multi-line illustrative snippet. Opaque to matching.
    pub example: String,
}

// ── Catalog ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse predicate data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("predicate record {index} has an empty name")]
    EmptyName { index: usize },
    #[error("duplicate predicate name '{name}'")]
    DuplicateName { name: String },
}

/// The ordered, immutable sequence of predicate records.
#[derive(Clone, Debug)]
pub struct Catalog {
    records: Vec<PredicateRecord>,
}

impl Catalog {
    /// Build a catalog from records, validating the load-time invariants:
    /// names are non-empty and unique. Category validity is already
    /// guaranteed by the `Category` enum.
    pub fn new(records: Vec<PredicateRecord>) -> Result<Self, CatalogError> {
        let mut seen: Vec<&str> = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            if record.name.is_empty() {
                return Err(CatalogError::EmptyName { index });
            }
            if seen.contains(&record.name.as_str()) {
                return Err(CatalogError::DuplicateName {
                    name: record.name.clone(),
                });
            }
            seen.push(record.name.as_str());
        }
        Ok(Self { records })
    }

    /// Parse and validate the bundled catalog asset.
    pub fn load_bundled() -> Result<Self, CatalogError> {
        let records: Vec<PredicateRecord> = serde_json::from_str(PREDICATES_JSON)?;
        let catalog = Self::new(records)?;
        log::info!("Loaded predicate catalog ({} records)", catalog.len());
        Ok(catalog)
    }

    pub fn records(&self) -> &[PredicateRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
