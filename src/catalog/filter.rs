//! # Catalog Filter
//!
//! Computes which tools are visible for the active query. The result is a
//! pure function of the records and the query; applying it to the screen is
//! left to the caller.

use super::record::ToolRecord;
use serde::{Deserialize, Serialize};

/// Reserved category key that matches every tool.
pub const ALL_CATEGORIES: &str = "all";

/// The single active query. A new query replaces the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FilterQuery {
    /// Case-insensitive substring match on title, description and category.
    Text { term: String },
    /// Exact category match, or [`ALL_CATEGORIES`].
    Category { key: String },
}

impl FilterQuery {
    pub fn text(term: impl Into<String>) -> Self {
        Self::Text { term: term.into() }
    }

    pub fn category(key: impl Into<String>) -> Self {
        Self::Category { key: key.into() }
    }

    pub fn all() -> Self {
        Self::category(ALL_CATEGORIES)
    }
}

impl Default for FilterQuery {
    fn default() -> Self {
        Self::all()
    }
}

/// Ids of the tools matching the active query, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilitySet {
    ids: Vec<String>,
}

impl VisibilitySet {
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|i| i == id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl FromIterator<String> for VisibilitySet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    pub visible: VisibilitySet,
    /// A non-empty text term matched nothing.
    pub no_results: bool,
}

pub fn filter(records: &[ToolRecord], query: &FilterQuery) -> FilterOutcome {
    match query {
        FilterQuery::Text { term } => {
            let term = term.trim().to_lowercase();
            let visible: VisibilitySet = records
                .iter()
                .filter(|r| term.is_empty() || matches_text(r, &term))
                .map(|r| r.id.clone())
                .collect();
            let no_results = visible.is_empty() && !term.is_empty();
            FilterOutcome {
                visible,
                no_results,
            }
        }
        FilterQuery::Category { key } => FilterOutcome {
            visible: records
                .iter()
                .filter(|r| key == ALL_CATEGORIES || &r.category == key)
                .map(|r| r.id.clone())
                .collect(),
            no_results: false,
        },
    }
}

/// `term` must already be trimmed and lowercased.
fn matches_text(record: &ToolRecord, term: &str) -> bool {
    record.title.to_lowercase().contains(term)
        || record.description.to_lowercase().contains(term)
        || record.category.to_lowercase().contains(term)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, title: &str, description: &str, category: &str) -> ToolRecord {
        ToolRecord {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            url: None,
        }
    }

    fn sample() -> Vec<ToolRecord> {
        vec![
            record("bmi", "BMI Calculator", "Body mass index", "calculators"),
            record("units", "Unit Converter", "Length and mass", "converters"),
            record("pw", "Password Generator", "Random passwords", "generators"),
        ]
    }

    #[test]
    fn test_text_matches_title_case_insensitive() {
        let outcome = filter(&sample(), &FilterQuery::text("CALC"));
        assert_eq!(outcome.visible.ids(), ["bmi"]);
        assert!(!outcome.no_results);
    }

    #[test]
    fn test_text_matches_description_and_category() {
        let outcome = filter(&sample(), &FilterQuery::text("mass"));
        assert_eq!(outcome.visible.ids(), ["bmi", "units"]);

        let outcome = filter(&sample(), &FilterQuery::text("generators"));
        assert_eq!(outcome.visible.ids(), ["pw"]);
    }

    #[test]
    fn test_text_term_is_trimmed() {
        let outcome = filter(&sample(), &FilterQuery::text("  unit  "));
        assert_eq!(outcome.visible.ids(), ["units"]);
    }

    #[test]
    fn test_whitespace_only_term_matches_all() {
        let outcome = filter(&sample(), &FilterQuery::text("   "));
        assert_eq!(outcome.visible.len(), 3);
        assert!(!outcome.no_results);
    }

    #[test]
    fn test_no_results_flag() {
        let outcome = filter(&sample(), &FilterQuery::text("spreadsheet"));
        assert!(outcome.visible.is_empty());
        assert!(outcome.no_results);
    }

    #[test]
    fn test_category_exact_match() {
        let outcome = filter(&sample(), &FilterQuery::category("converters"));
        assert_eq!(outcome.visible.ids(), ["units"]);

        // Category queries do not do substring matching.
        let outcome = filter(&sample(), &FilterQuery::category("convert"));
        assert!(outcome.visible.is_empty());
        assert!(!outcome.no_results);
    }

    #[test]
    fn test_all_category() {
        let outcome = filter(&sample(), &FilterQuery::all());
        assert_eq!(outcome.visible.ids(), ["bmi", "units", "pw"]);
    }

    #[test]
    fn test_query_serde_shape() {
        let json = serde_json::to_string(&FilterQuery::text("abc")).unwrap();
        assert_eq!(json, r#"{"kind":"text","term":"abc"}"#);

        let parsed: FilterQuery =
            serde_json::from_str(r#"{"kind":"category","key":"all"}"#).unwrap();
        assert_eq!(parsed, FilterQuery::all());
    }
}
