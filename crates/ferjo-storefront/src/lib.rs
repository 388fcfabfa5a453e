//! Catalog page orchestration for the FERJO storefront.
//!
//! [`CatalogPage`] wires the pieces together the way the storefront page
//! does: one initial load into a [`CatalogStore`](ferjo_catalog::catalog::CatalogStore),
//! a full grid render on every filter input, and image callbacks routed to
//! the card carousels. Everything it produces is a plain view model
//! ([`GridView`], [`CardView`]) that a presentation layer, or
//! [`render_grid_html`], turns into markup.
//!
//! # Example
//!
//! ```rust,ignore
//! use ferjo_storefront::{CatalogPage, StorefrontConfig};
//!
//! let mut page = CatalogPage::new(StorefrontConfig::default(), logger);
//! page.load(&source).await?;
//! page.on_search_input("mart");
//! page.on_category_change("Herramientas");
//! println!("{}", ferjo_storefront::render_grid_html(page.grid()));
//! ```

mod config;
mod error;
mod html;
mod page;
mod view;

pub use config::{StorefrontConfig, PLACEHOLDER_IMAGE};
pub use error::StorefrontError;
pub use html::{html_escape, render_card_html, render_grid_html};
pub use page::CatalogPage;
pub use view::{CardView, GridView, ImageView};
