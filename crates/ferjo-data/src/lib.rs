//! Product sources for the FERJO catalog.
//!
//! A [`ProductSource`] yields the raw product list once per page load. The
//! HTTP source talks to the catalog sheet's web endpoint; the file and static
//! sources serve exported snapshots and tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use ferjo_data::{ApiEndpoint, HttpProductSource, ProductSource};
//!
//! let endpoint = ApiEndpoint::resolve(None, Some("https://script.google.com/macros/s/XYZ/exec"))
//!     .ok_or(ferjo_data::LoadError::NotConfigured)?;
//! let products = HttpProductSource::new(endpoint, None)?.fetch_products().await?;
//! ```

mod endpoint;
mod error;
mod http;
mod source;

pub use endpoint::{ApiEndpoint, API_BASE_ENV};
pub use error::{LoadError, LOAD_FAILURE_MESSAGE};
pub use http::HttpProductSource;
pub use source::{decode_products, FileProductSource, ProductSource, StaticProductSource};
