//! Product catalog module.
//!
//! Contains the product record, stock inference, category options and the
//! shared catalog store.

mod category;
mod product;
mod stock;
mod store;

pub use category::category_options;
pub use product::{ProductRecord, MAX_IMAGE_SOURCES, MISSING_CODE, MISSING_NAME};
pub use stock::{is_out_of_stock, StockStatus, NO_STOCK_TOKEN};
pub use store::CatalogStore;
