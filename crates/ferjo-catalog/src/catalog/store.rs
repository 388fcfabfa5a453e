//! Shared catalog store.

use crate::catalog::{category_options, ProductRecord};
use std::sync::Arc;

/// The authoritative product list.
///
/// Written once when the catalog loads and shared read-only afterwards.
/// Cloning a store is cheap and every clone sees the same list.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    products: Arc<[ProductRecord]>,
    categories: Arc<[String]>,
}

impl CatalogStore {
    /// Create a store from a freshly loaded product list.
    pub fn new(products: Vec<ProductRecord>) -> Self {
        let categories = category_options(&products);
        Self {
            products: products.into(),
            categories: categories.into(),
        }
    }

    /// All products, in load order.
    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }

    /// Shared handle to the product list.
    pub fn shared(&self) -> Arc<[ProductRecord]> {
        Arc::clone(&self.products)
    }

    /// Category options derived once at load time.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_shares_products() {
        let store = CatalogStore::new(vec![
            ProductRecord::new("Martillo").with_category("Herramientas"),
            ProductRecord::new("Brocha").with_category("Pinturas"),
        ]);
        let reader = store.clone();

        assert_eq!(store.len(), 2);
        assert!(Arc::ptr_eq(&store.shared(), &reader.shared()));
        assert_eq!(reader.categories(), ["Herramientas", "Pinturas"]);
    }

    #[test]
    fn test_empty_store() {
        let store = CatalogStore::default();
        assert!(store.is_empty());
        assert!(store.categories().is_empty());
    }
}
