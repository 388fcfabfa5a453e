//! Search module.
//!
//! Contains the filter criteria, the filter engine and the derived view.

mod engine;
mod filter;
mod view;

pub use engine::{apply, apply_with_policy, CatalogFilterEngine};
pub use filter::{CategorySelection, Filter, FilterCriteria, StockPolicy};
pub use view::CatalogView;
