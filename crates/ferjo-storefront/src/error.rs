//! Storefront error types.

use ferjo_data::LoadError;

/// Errors surfaced by the catalog page.
#[derive(Debug, thiserror::Error)]
pub enum StorefrontError {
    /// The initial catalog load failed. The grid already shows the
    /// user-facing message when this is returned.
    #[error("Catalog load failed: {0}")]
    Load(#[from] LoadError),
}

impl StorefrontError {
    /// Text shown to the shopper.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Load(e) => e.user_message(),
        }
    }
}
