//! Product record as delivered by the catalog API.

use crate::catalog::stock::StockStatus;
use crate::money::format_price;
use crate::wire;
use serde::{Deserialize, Serialize};

/// Text shown when a product has no name.
pub const MISSING_NAME: &str = "(Sin nombre)";

/// Text shown when a product has neither code.
pub const MISSING_CODE: &str = "-";

/// Maximum number of image sources a product row can carry.
pub const MAX_IMAGE_SOURCES: usize = 3;

/// A product row from the spreadsheet-backed API.
///
/// Every field is optional. Field names on the wire are the sheet's column
/// headers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ProductRecord {
    /// Product name.
    #[serde(rename = "nombre", default, deserialize_with = "wire::text")]
    pub name: Option<String>,
    /// Internal article code.
    #[serde(rename = "id_del_articulo", default, deserialize_with = "wire::text")]
    pub primary_code: Option<String>,
    /// Barcode (UPC/EAN/ISBN).
    #[serde(rename = "upc_ean_isbn", default, deserialize_with = "wire::text")]
    pub secondary_code: Option<String>,
    /// Free-text category.
    #[serde(rename = "categoria", default, deserialize_with = "wire::text")]
    pub category: Option<String>,
    /// Sale price.
    #[serde(rename = "precio_de_venta", default, deserialize_with = "wire::number")]
    pub price: Option<f64>,
    /// Currency code (GTQ when absent).
    #[serde(rename = "moneda", default, deserialize_with = "wire::text")]
    pub currency: Option<String>,
    /// Quantity on hand.
    #[serde(rename = "cantidad", default, deserialize_with = "wire::number")]
    pub quantity: Option<f64>,
    /// Status flag (e.g., "sin_stock").
    #[serde(default, deserialize_with = "wire::text")]
    pub status: Option<String>,
    /// First image source.
    #[serde(default, deserialize_with = "wire::text")]
    pub image_url: Option<String>,
    /// Second image source.
    #[serde(default, deserialize_with = "wire::text")]
    pub image_url_2: Option<String>,
    /// Third image source.
    #[serde(default, deserialize_with = "wire::text")]
    pub image_url_3: Option<String>,
}

impl ProductRecord {
    /// Create a record with only a name set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.primary_code = Some(code.into());
        self
    }

    pub fn with_secondary_code(mut self, code: impl Into<String>) -> Self {
        self.secondary_code = Some(code.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_currency(mut self, code: impl Into<String>) -> Self {
        self.currency = Some(code.into());
        self
    }

    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Append an image source into the first free slot. Extra sources beyond
    /// the third are dropped.
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        let url = Some(url.into());
        if self.image_url.is_none() {
            self.image_url = url;
        } else if self.image_url_2.is_none() {
            self.image_url_2 = url;
        } else if self.image_url_3.is_none() {
            self.image_url_3 = url;
        }
        self
    }

    /// Name for display, or the placeholder text.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(MISSING_NAME)
    }

    /// Code for display: the article code, else the barcode, else "-".
    pub fn display_code(&self) -> &str {
        self.primary_code
            .as_deref()
            .or(self.secondary_code.as_deref())
            .unwrap_or(MISSING_CODE)
    }

    /// Formatted price in the record's currency.
    pub fn display_price(&self) -> String {
        format_price(self.price, self.currency.as_deref())
    }

    /// Category, exactly as sent.
    pub fn category(&self) -> &str {
        self.category.as_deref().unwrap_or("")
    }

    /// Non-empty image sources in slot order.
    pub fn image_sources(&self) -> Vec<&str> {
        [&self.image_url, &self.image_url_2, &self.image_url_3]
            .into_iter()
            .filter_map(|s| s.as_deref())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Stock status inferred from quantity and status flag.
    pub fn stock(&self) -> StockStatus {
        StockStatus::infer(self.quantity, self.status.as_deref())
    }

    /// Check if the product should be flagged as out of stock.
    pub fn is_out_of_stock(&self) -> bool {
        self.stock().is_out_of_stock()
    }

    /// Lower-cased fields the free-text search looks at.
    pub(crate) fn search_haystacks(&self) -> [String; 3] {
        [
            self.name.as_deref().unwrap_or("").to_lowercase(),
            self.primary_code.as_deref().unwrap_or("").to_lowercase(),
            self.secondary_code.as_deref().unwrap_or("").to_lowercase(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_sheet_row() {
        let json = r#"{
            "nombre": "Juego de llaves",
            "id_del_articulo": "JL-10",
            "upc_ean_isbn": 7401234567890,
            "categoria": "Herramientas",
            "precio_de_venta": "149.99",
            "moneda": "GTQ",
            "cantidad": 3,
            "status": "activo",
            "image_url": "https://drive.google.com/file/d/abc123/view",
            "image_url_2": "",
            "extra_column": true
        }"#;

        let p: ProductRecord = serde_json::from_str(json).unwrap();
        assert_eq!(p.display_name(), "Juego de llaves");
        assert_eq!(p.secondary_code.as_deref(), Some("7401234567890"));
        assert_eq!(p.price, Some(149.99));
        assert_eq!(p.quantity, Some(3.0));
        assert_eq!(p.image_sources(), vec!["https://drive.google.com/file/d/abc123/view"]);
    }

    #[test]
    fn test_empty_row_degrades() {
        let p: ProductRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(p.display_name(), MISSING_NAME);
        assert_eq!(p.display_code(), MISSING_CODE);
        assert_eq!(p.display_price(), "Q0.00");
        assert!(p.image_sources().is_empty());
        assert!(p.is_out_of_stock());
    }

    #[test]
    fn test_display_code_fallback() {
        let p = ProductRecord::new("Clavo").with_secondary_code("0001");
        assert_eq!(p.display_code(), "0001");

        let p = p.with_code("B2");
        assert_eq!(p.display_code(), "B2");
    }

    #[test]
    fn test_with_image_fills_slots() {
        let p = ProductRecord::new("Sierra")
            .with_image("a")
            .with_image("b")
            .with_image("c")
            .with_image("d");
        assert_eq!(p.image_sources(), vec!["a", "b", "c"]);
    }
}
