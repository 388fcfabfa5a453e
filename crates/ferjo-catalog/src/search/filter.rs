//! Filter types.

use crate::catalog::ProductRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category selector state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CategorySelection {
    /// No category restriction.
    #[default]
    Any,
    /// Exact, case-sensitive category match.
    Exact(String),
}

impl CategorySelection {
    /// Build from a selector value; the empty value is the "any" option.
    pub fn from_select_value(value: &str) -> Self {
        if value.is_empty() {
            CategorySelection::Any
        } else {
            CategorySelection::Exact(value.to_string())
        }
    }

    /// Value to put back into a selector.
    pub fn as_select_value(&self) -> &str {
        match self {
            CategorySelection::Any => "",
            CategorySelection::Exact(c) => c,
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, CategorySelection::Any)
    }
}

impl fmt::Display for CategorySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategorySelection::Any => write!(f, "any"),
            CategorySelection::Exact(c) => write!(f, "{}", c),
        }
    }
}

/// Whether out-of-stock items take part in filtered results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StockPolicy {
    /// Out-of-stock items stay in results and are only flagged on the card.
    #[default]
    FlagOnly,
    /// Out-of-stock items are dropped from results.
    ExcludeOutOfStock,
}

impl StockPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockPolicy::FlagOnly => "flag_only",
            StockPolicy::ExcludeOutOfStock => "exclude_out_of_stock",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "flag_only" | "flag" => Some(StockPolicy::FlagOnly),
            "exclude_out_of_stock" | "exclude" => Some(StockPolicy::ExcludeOutOfStock),
            _ => None,
        }
    }
}

/// A single product predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Filter {
    /// Lower-cased substring of name, article code or barcode.
    Text(String),
    /// Exact category.
    Category(String),
    /// Only items that are not flagged out of stock.
    InStock,
}

impl Filter {
    /// Create a text filter. The query is lower-cased and trimmed.
    pub fn text(query: impl AsRef<str>) -> Self {
        Filter::Text(query.as_ref().trim().to_lowercase())
    }

    /// Create a category filter.
    pub fn category(category: impl Into<String>) -> Self {
        Filter::Category(category.into())
    }

    /// Create an in-stock filter.
    pub fn in_stock() -> Self {
        Filter::InStock
    }

    /// Check whether a product passes this filter.
    pub fn matches(&self, product: &ProductRecord) -> bool {
        match self {
            Filter::Text(query) => {
                query.is_empty()
                    || product
                        .search_haystacks()
                        .iter()
                        .any(|field| field.contains(query.as_str()))
            }
            Filter::Category(category) => product.category() == category,
            Filter::InStock => !product.is_out_of_stock(),
        }
    }
}

/// Current search box and category selector state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    query: String,
    category: CategorySelection,
}

impl FilterCriteria {
    /// Create criteria from raw input values.
    pub fn new(query: &str, category: CategorySelection) -> Self {
        Self {
            query: normalize_query(query),
            category,
        }
    }

    /// Normalized (trimmed, lower-cased) query.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn category(&self) -> &CategorySelection {
        &self.category
    }

    pub fn set_query(&mut self, raw: &str) {
        self.query = normalize_query(raw);
    }

    pub fn set_category(&mut self, category: CategorySelection) {
        self.category = category;
    }

    /// True when neither the query nor the category restrict anything.
    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.category.is_any()
    }

    /// Expand into the filters to apply under a stock policy.
    pub fn filters(&self, policy: StockPolicy) -> Vec<Filter> {
        let mut filters = Vec::new();
        if !self.query.is_empty() {
            filters.push(Filter::Text(self.query.clone()));
        }
        if let CategorySelection::Exact(category) = &self.category {
            filters.push(Filter::category(category.clone()));
        }
        if policy == StockPolicy::ExcludeOutOfStock {
            filters.push(Filter::in_stock());
        }
        filters
    }
}

fn normalize_query(raw: &str) -> String {
    raw.to_lowercase().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn llaves() -> ProductRecord {
        ProductRecord::new("Juego de llaves")
            .with_code("JL-10")
            .with_secondary_code("7401234567890")
            .with_category("Herramientas")
            .with_quantity(2.0)
    }

    #[test]
    fn test_text_filter_substring() {
        let p = llaves();
        assert!(Filter::text("juego").matches(&p));
        assert!(Filter::text("  LLAVES ").matches(&p));
        assert!(Filter::text("jl-1").matches(&p));
        assert!(Filter::text("740123").matches(&p));
        assert!(!Filter::text("jdl").matches(&p));
        assert!(Filter::text("").matches(&p));
    }

    #[test]
    fn test_category_filter_is_case_sensitive() {
        let p = llaves();
        assert!(Filter::category("Herramientas").matches(&p));
        assert!(!Filter::category("herramientas").matches(&p));
    }

    #[test]
    fn test_criteria_filters() {
        let criteria = FilterCriteria::new(" Mart ", CategorySelection::from_select_value(""));
        assert_eq!(criteria.query(), "mart");
        assert_eq!(criteria.filters(StockPolicy::FlagOnly), vec![Filter::Text("mart".into())]);
        assert_eq!(criteria.filters(StockPolicy::ExcludeOutOfStock).len(), 2);

        let empty = FilterCriteria::default();
        assert!(empty.is_empty());
        assert!(empty.filters(StockPolicy::FlagOnly).is_empty());
    }

    #[test]
    fn test_stock_policy_parse() {
        assert_eq!(StockPolicy::from_str("flag_only"), Some(StockPolicy::FlagOnly));
        assert_eq!(StockPolicy::from_str("EXCLUDE"), Some(StockPolicy::ExcludeOutOfStock));
        assert_eq!(StockPolicy::from_str("hide"), None);
    }
}
