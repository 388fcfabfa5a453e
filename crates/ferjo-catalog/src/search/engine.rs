//! Catalog filter engine.

use crate::catalog::{CatalogStore, ProductRecord};
use crate::search::{CatalogView, CategorySelection, FilterCriteria, StockPolicy};

/// Filter products by a free-text query and a category selection.
///
/// Out-of-stock items are kept; see [`apply_with_policy`] to drop them.
pub fn apply<'a>(
    products: &'a [ProductRecord],
    query: &str,
    category: &CategorySelection,
) -> Vec<&'a ProductRecord> {
    apply_with_policy(products, query, category, StockPolicy::FlagOnly)
}

/// Filter products under an explicit stock policy.
pub fn apply_with_policy<'a>(
    products: &'a [ProductRecord],
    query: &str,
    category: &CategorySelection,
    policy: StockPolicy,
) -> Vec<&'a ProductRecord> {
    let criteria = FilterCriteria::new(query, category.clone());
    filter_products(products, &criteria, policy)
}

fn filter_products<'a>(
    products: &'a [ProductRecord],
    criteria: &FilterCriteria,
    policy: StockPolicy,
) -> Vec<&'a ProductRecord> {
    let filters = criteria.filters(policy);
    products
        .iter()
        .filter(|p| filters.iter().all(|f| f.matches(p)))
        .collect()
}

/// Holds the catalog store and the current criteria, and recomputes the
/// view whenever an input changes.
#[derive(Debug, Clone)]
pub struct CatalogFilterEngine {
    store: CatalogStore,
    criteria: FilterCriteria,
    policy: StockPolicy,
}

impl CatalogFilterEngine {
    /// Create an engine over a store with empty criteria.
    pub fn new(store: CatalogStore) -> Self {
        Self {
            store,
            criteria: FilterCriteria::default(),
            policy: StockPolicy::default(),
        }
    }

    /// Set the stock policy.
    pub fn with_stock_policy(mut self, policy: StockPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Search box changed.
    pub fn set_query(&mut self, raw: &str) {
        self.criteria.set_query(raw);
    }

    /// Category selector changed.
    pub fn set_category(&mut self, category: CategorySelection) {
        self.criteria.set_category(category);
    }

    /// Replace both inputs at once.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn stock_policy(&self) -> StockPolicy {
        self.policy
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// Compute the view for the current criteria.
    pub fn view(&self) -> CatalogView<'_> {
        let products = self.store.products();
        CatalogView::new(
            filter_products(products, &self.criteria, self.policy),
            products.len(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<ProductRecord> {
        vec![
            ProductRecord::new("Martillo")
                .with_code("A1")
                .with_category("Herramientas")
                .with_quantity(5.0),
            ProductRecord::new("Clavo")
                .with_code("B2")
                .with_category("Herramientas")
                .with_quantity(0.0),
            ProductRecord::new("Brocha")
                .with_code("C3")
                .with_category("Pinturas")
                .with_quantity(4.0)
                .with_status("SIN_STOCK"),
            ProductRecord::default(),
        ]
    }

    #[test]
    fn test_empty_criteria_is_identity() {
        let products = sample();
        let out = apply(&products, "", &CategorySelection::Any);
        assert_eq!(out.len(), products.len());
        assert!(out.iter().zip(&products).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    #[test]
    fn test_results_are_subset_in_order() {
        let products = sample();
        for query in ["", "a", "mart", "zz", "b2"] {
            for category in [
                CategorySelection::Any,
                CategorySelection::Exact("Herramientas".into()),
                CategorySelection::Exact("Nada".into()),
            ] {
                let out = apply(&products, query, &category);
                let positions: Vec<usize> = out
                    .iter()
                    .map(|p| products.iter().position(|q| std::ptr::eq(*p, q)).unwrap())
                    .collect();
                assert!(positions.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let products = sample();
        let category = CategorySelection::Exact("Herramientas".into());
        let first: Vec<ProductRecord> =
            apply(&products, "a", &category).into_iter().cloned().collect();
        let second = apply(&first, "a", &category);
        assert_eq!(first.len(), second.len());
        assert_eq!(apply(&products, "a", &category).len(), first.len());
    }

    #[test]
    fn test_flag_only_keeps_out_of_stock() {
        let products = sample();
        let out = apply(&products, "", &CategorySelection::Exact("Herramientas".into()));
        assert_eq!(out.len(), 2);
        assert!(out[1].is_out_of_stock());
    }

    #[test]
    fn test_exclude_policy_drops_out_of_stock() {
        let products = sample();
        let out = apply_with_policy(
            &products,
            "",
            &CategorySelection::Any,
            StockPolicy::ExcludeOutOfStock,
        );
        let names: Vec<&str> = out.iter().map(|p| p.display_name()).collect();
        assert_eq!(names, vec!["Martillo"]);
    }

    #[test]
    fn test_engine_recomputes_on_input() {
        let mut engine = CatalogFilterEngine::new(CatalogStore::new(sample()));

        engine.set_query("mart");
        assert_eq!(engine.view().len(), 1);

        engine.set_query("");
        engine.set_category(CategorySelection::Exact("Herramientas".into()));
        let view = engine.view();
        assert_eq!(view.len(), 2);
        assert_eq!(view.total(), 4);
        assert_eq!(view.out_of_stock_count(), 1);

        engine.set_category(CategorySelection::Any);
        assert_eq!(engine.view().len(), 4);
        assert_eq!(engine.store().len(), 4);
    }
}
