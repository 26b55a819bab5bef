//! View projector — maps filtered records into render-ready items.
//!
//! Pure and total: one render item per input record, order preserved. The
//! renderer consumes the projection without reaching back into the catalog.

use super::catalog::{Category, PredicateRecord};
use super::filter::ViewMode;

/// Marker prefix stripped from the syntax template for the copy payload.
const ATTRIBUTE_MARKER: &str = "attribute_";

/// Display-ready fields for one predicate record.
///
/// Identical content in both view modes; only the spatial arrangement
/// differs at render time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderItem {
    pub name: String,
    pub category: Category,
    pub category_label: &'static str,
    /// Presentation grouping key derived from the category label. Never
    /// consulted by the filter engine.
    pub style_key: String,
    pub description: String,
    pub syntax: String,
    /// What the copy affordance places on the clipboard, verbatim.
    pub copy_payload: String,
    pub example: String,
}

/// Projection of the filtered sequence into one of the two layouts, or the
/// empty-state sentinel when nothing matched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Projection {
    Cards(Vec<RenderItem>),
    List(Vec<RenderItem>),
    /// Single "no results" sentinel so the renderer shows an empty-state
    /// message rather than nothing.
    Empty,
}

impl Projection {
    pub fn items(&self) -> &[RenderItem] {
        match self {
            Projection::Cards(items) | Projection::List(items) => items,
            Projection::Empty => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Projection::Empty)
    }
}

/// Project the filtered sequence into render items for the given mode.
pub fn project(filtered: &[&PredicateRecord], mode: ViewMode) -> Projection {
    if filtered.is_empty() {
        return Projection::Empty;
    }
    let items: Vec<RenderItem> = filtered.iter().map(|r| render_item(r)).collect();
    match mode {
        ViewMode::Cards => Projection::Cards(items),
        ViewMode::List => Projection::List(items),
    }
}

fn render_item(record: &PredicateRecord) -> RenderItem {
    RenderItem {
        name: record.name.clone(),
        category: record.category,
        category_label: record.category.label(),
        style_key: style_key(record.category),
        description: record.description.clone(),
        syntax: record.syntax.clone(),
        copy_payload: copy_payload(&record.syntax),
        example: record.example.clone(),
    }
}

/// Category label lower-cased with spaces hyphenated. Presentation only.
pub fn style_key(category: Category) -> String {
    category.label().to_lowercase().replace(' ', "-")
}

/// Strip the leading attribute marker so the user copies the bare filter
/// suffix (`attribute_eq` → `_eq`). First occurrence only; strings without
/// the marker pass through unchanged.
pub fn copy_payload(syntax: &str) -> String {
    syntax.replacen(ATTRIBUTE_MARKER, "_", 1)
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn record(name: &str, category: Category) -> PredicateRecord {
        PredicateRecord {
            name: name.to_string(),
            category,
            description: format!("{name} description"),
            syntax: format!("attribute_{name}"),
            example: format!("User.ransack({name}: true)"),
        }
    }

    #[test]
    fn test_empty_input_yields_sentinel() {
        assert_eq!(project(&[], ViewMode::Cards), Projection::Empty);
        assert_eq!(project(&[], ViewMode::List), Projection::Empty);
    }

    #[test]
    fn test_one_item_per_record_in_order() {
        let a = record("eq", Category::Equality);
        let b = record("cont", Category::Pattern);
        let projection = project(&[&a, &b], ViewMode::Cards);
        let items = projection.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "eq");
        assert_eq!(items[1].name, "cont");
    }

    #[test]
    fn test_mode_selects_variant_with_identical_content() {
        let a = record("eq", Category::Equality);
        let cards = project(&[&a], ViewMode::Cards);
        let list = project(&[&a], ViewMode::List);
        assert!(matches!(cards, Projection::Cards(_)));
        assert!(matches!(list, Projection::List(_)));
        assert_eq!(cards.items(), list.items());
    }

    #[test]
    fn test_item_fields_mapped() {
        let r = record("eq", Category::Equality);
        let projection = project(&[&r], ViewMode::List);
        let item = &projection.items()[0];
        assert_eq!(item.category_label, "Equality");
        assert_eq!(item.style_key, "equality");
        assert_eq!(item.syntax, "attribute_eq");
        assert_eq!(item.copy_payload, "_eq");
        assert_eq!(item.example, "User.ransack(eq: true)");
    }

    #[rstest]
    #[case("attribute_eq", "_eq")]
    #[case("attribute_not_eq_all", "_not_eq_all")]
    #[case("attribute_does_not_match", "_does_not_match")]
    #[case("no_marker_here", "no_marker_here")]
    #[case("", "")]
    fn test_copy_payload(#[case] syntax: &str, #[case] expected: &str) {
        assert_eq!(copy_payload(syntax), expected);
    }

    #[test]
    fn test_copy_payload_replaces_first_occurrence_only() {
        assert_eq!(
            copy_payload("attribute_attribute_eq"),
            "_attribute_eq"
        );
    }

    #[test]
    fn test_style_keys() {
        for category in Category::ALL {
            let key = style_key(category);
            assert_eq!(key, key.to_lowercase());
            assert!(!key.contains(' '));
        }
        assert_eq!(style_key(Category::Comparison), "comparison");
    }
}
