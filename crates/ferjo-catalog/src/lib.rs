//! Catalog domain types and filter engine for the FERJO storefront.
//!
//! This crate provides the parts of the storefront that work on product data
//! alone:
//!
//! - **Catalog**: Product records as delivered by the spreadsheet API, stock
//!   inference, category options, and the shared read-only store
//! - **Search**: Free-text and category filtering over the store
//! - **Money**: Currency-aware price formatting
//!
//! # Example
//!
//! ```rust
//! use ferjo_catalog::prelude::*;
//!
//! let store = CatalogStore::new(vec![
//!     ProductRecord::new("Martillo").with_code("A1").with_category("Herramientas").with_quantity(5.0),
//!     ProductRecord::new("Clavo").with_code("B2").with_category("Herramientas").with_quantity(0.0),
//! ]);
//!
//! let mut engine = CatalogFilterEngine::new(store);
//! engine.set_query("mart");
//!
//! let view = engine.view();
//! assert_eq!(view.len(), 1);
//! assert_eq!(view.items()[0].display_name(), "Martillo");
//! ```

pub mod catalog;
pub mod money;
pub mod search;
mod wire;

pub use money::{format_price, Currency, InvalidCurrency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::money::{format_price, Currency, Money};

    // Catalog
    pub use crate::catalog::{
        category_options, CatalogStore, ProductRecord, StockStatus, NO_STOCK_TOKEN,
    };

    // Search
    pub use crate::search::{
        apply, apply_with_policy, CatalogFilterEngine, CatalogView, CategorySelection, Filter,
        FilterCriteria, StockPolicy,
    };
}
