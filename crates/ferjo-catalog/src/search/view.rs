//! Derived catalog view.

use crate::catalog::ProductRecord;

/// A filtered subset of the catalog, in catalog order.
///
/// Borrows from the store; the store itself is never touched.
#[derive(Debug, Clone)]
pub struct CatalogView<'a> {
    items: Vec<&'a ProductRecord>,
    total: usize,
}

impl<'a> CatalogView<'a> {
    /// Create a view over matched items out of `total` products.
    pub fn new(items: Vec<&'a ProductRecord>, total: usize) -> Self {
        Self { items, total }
    }

    pub fn items(&self) -> &[&'a ProductRecord] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a ProductRecord> + '_ {
        self.items.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of products in the unfiltered catalog.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of matched items flagged out of stock.
    pub fn out_of_stock_count(&self) -> usize {
        self.items.iter().filter(|p| p.is_out_of_stock()).count()
    }

    /// Clone the matched records out of the store.
    pub fn to_owned_records(&self) -> Vec<ProductRecord> {
        self.items.iter().map(|p| (*p).clone()).collect()
    }
}

impl<'a> IntoIterator for CatalogView<'a> {
    type Item = &'a ProductRecord;
    type IntoIter = std::vec::IntoIter<&'a ProductRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
