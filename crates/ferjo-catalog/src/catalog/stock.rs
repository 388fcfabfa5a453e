//! Stock inference.

use serde::{Deserialize, Serialize};

/// Status value the sheet uses to mark an item as unavailable.
pub const NO_STOCK_TOKEN: &str = "sin_stock";

/// Stock status of a product, as shown on its card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StockStatus {
    /// Item can be ordered; carries the quantity on hand.
    InStock(f64),
    /// Item is flagged as unavailable.
    OutOfStock,
}

impl StockStatus {
    /// Infer stock status from a quantity and a status flag.
    pub fn infer(quantity: Option<f64>, status: Option<&str>) -> Self {
        if is_out_of_stock(quantity, status) {
            StockStatus::OutOfStock
        } else {
            StockStatus::InStock(quantity.unwrap_or(0.0))
        }
    }

    pub fn is_out_of_stock(&self) -> bool {
        matches!(self, StockStatus::OutOfStock)
    }

    /// Card label ("Sin stock" or "Stock: 5").
    pub fn label(&self) -> String {
        match self {
            StockStatus::OutOfStock => "Sin stock".to_string(),
            StockStatus::InStock(q) if q.fract() == 0.0 => format!("Stock: {}", *q as i64),
            StockStatus::InStock(q) => format!("Stock: {}", q),
        }
    }
}

/// Out of stock iff the quantity is zero, negative or missing, or the
/// status equals [`NO_STOCK_TOKEN`] ignoring case.
pub fn is_out_of_stock(quantity: Option<f64>, status: Option<&str>) -> bool {
    let no_quantity = quantity.map_or(true, |q| q.is_nan() || q <= 0.0);
    let flagged = status.is_some_and(|s| s.to_lowercase() == NO_STOCK_TOKEN);
    no_quantity || flagged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_drives_stock() {
        assert!(is_out_of_stock(Some(0.0), None));
        assert!(is_out_of_stock(Some(-2.0), None));
        assert!(is_out_of_stock(None, None));
        assert!(!is_out_of_stock(Some(1.0), None));
        assert!(!is_out_of_stock(Some(0.5), Some("activo")));
    }

    #[test]
    fn test_status_token_is_case_insensitive() {
        assert!(is_out_of_stock(Some(10.0), Some("sin_stock")));
        assert!(is_out_of_stock(Some(10.0), Some("SIN_STOCK")));
        assert!(is_out_of_stock(Some(10.0), Some("Sin_Stock")));
        assert!(!is_out_of_stock(Some(10.0), Some("sin stock")));
    }

    #[test]
    fn test_labels() {
        assert_eq!(StockStatus::infer(Some(5.0), None).label(), "Stock: 5");
        assert_eq!(StockStatus::infer(Some(2.5), None).label(), "Stock: 2.5");
        assert_eq!(StockStatus::infer(Some(5.0), Some("sin_stock")).label(), "Sin stock");
    }
}
