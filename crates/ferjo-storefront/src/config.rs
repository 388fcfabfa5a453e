//! Storefront settings.

use ferjo_catalog::money::DEFAULT_CURRENCY_CODE;
use ferjo_catalog::search::StockPolicy;
use ferjo_media::{ImageResolver, DEFAULT_THUMBNAIL_WIDTH};

/// Image shown when a card has no image or every variant failed.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/600x450?text=FERJO";

/// Settings for a [`CatalogPage`](crate::CatalogPage).
#[derive(Debug, Clone, PartialEq)]
pub struct StorefrontConfig {
    /// Placeholder image URL.
    pub placeholder: String,
    /// Width requested from the thumbnail services.
    pub thumbnail_width: u32,
    /// Currency used when a product has none.
    pub default_currency: String,
    /// Whether out-of-stock products stay in the grid.
    pub stock_policy: StockPolicy,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            placeholder: PLACEHOLDER_IMAGE.to_string(),
            thumbnail_width: DEFAULT_THUMBNAIL_WIDTH,
            default_currency: DEFAULT_CURRENCY_CODE.to_string(),
            stock_policy: StockPolicy::default(),
        }
    }
}

impl StorefrontConfig {
    pub fn with_placeholder(mut self, url: impl Into<String>) -> Self {
        self.placeholder = url.into();
        self
    }

    pub fn with_thumbnail_width(mut self, width: u32) -> Self {
        self.thumbnail_width = width;
        self
    }

    pub fn with_default_currency(mut self, code: impl Into<String>) -> Self {
        self.default_currency = code.into();
        self
    }

    pub fn with_stock_policy(mut self, policy: StockPolicy) -> Self {
        self.stock_policy = policy;
        self
    }

    /// Resolver for these settings.
    pub fn resolver(&self) -> ImageResolver {
        ImageResolver::with_thumbnail_width(self.thumbnail_width)
    }
}
