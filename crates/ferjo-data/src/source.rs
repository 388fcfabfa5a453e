//! The product source seam and its non-HTTP implementations.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use ferjo_catalog::catalog::ProductRecord;
use serde_json::Value;

use crate::error::LoadError;

/// Supplies the product list for one page load.
#[async_trait]
pub trait ProductSource: Send + Sync {
    async fn fetch_products(&self) -> Result<Vec<ProductRecord>, LoadError>;
}

/// Pull products out of a catalog response document.
///
/// Reads the top-level `products` array. A missing or non-array value is an
/// empty catalog; entries that are not objects are skipped.
pub fn decode_products(document: Value) -> Vec<ProductRecord> {
    let entries = match document {
        Value::Object(mut map) => match map.remove("products") {
            Some(Value::Array(entries)) => entries,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };

    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            if !entry.is_object() {
                tracing::warn!(index, "skipping non-object product entry");
                return None;
            }
            match serde_json::from_value::<ProductRecord>(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(index, error = %e, "skipping unreadable product entry");
                    None
                }
            }
        })
        .collect()
}

/// Parse a response body as a catalog document.
pub(crate) fn parse_body(body: &str) -> Result<Vec<ProductRecord>, LoadError> {
    let document: Value = serde_json::from_str(body)?;
    Ok(decode_products(document))
}

/// Source backed by an exported JSON file.
#[derive(Debug, Clone)]
pub struct FileProductSource {
    path: PathBuf,
}

impl FileProductSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ProductSource for FileProductSource {
    async fn fetch_products(&self) -> Result<Vec<ProductRecord>, LoadError> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| LoadError::Network(format!("{}: {}", self.path.display(), e)))?;
        let products = parse_body(&body)?;
        tracing::info!(path = %self.path.display(), count = products.len(), "catalog loaded from file");
        Ok(products)
    }
}

/// In-memory source.
#[derive(Debug, Clone, Default)]
pub struct StaticProductSource {
    products: Vec<ProductRecord>,
}

impl StaticProductSource {
    pub fn new(products: Vec<ProductRecord>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl ProductSource for StaticProductSource {
    async fn fetch_products(&self) -> Result<Vec<ProductRecord>, LoadError> {
        Ok(self.products.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_decode_reads_products_array() {
        let products = decode_products(json!({
            "products": [
                {"nombre": "Martillo", "precio_de_venta": "45.5", "cantidad": 3},
                "garbage",
                {"nombre": "Clavo", "cantidad": 0, "status": "sin_stock"}
            ]
        }));

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name.as_deref(), Some("Martillo"));
        assert_eq!(products[0].price, Some(45.5));
        assert!(products[1].is_out_of_stock());
    }

    #[test]
    fn test_decode_missing_products_is_empty() {
        assert!(decode_products(json!({"ok": true})).is_empty());
        assert!(decode_products(json!({"products": null})).is_empty());
        assert!(decode_products(json!([1, 2, 3])).is_empty());
    }

    #[test]
    fn test_parse_body_rejects_non_json() {
        let err = parse_body("<!DOCTYPE html>").unwrap_err();
        assert!(matches!(err, LoadError::Format(_)));
    }

    #[tokio::test]
    async fn test_file_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"products": [{{"nombre": "Brocha"}}]}}"#).unwrap();

        let source = FileProductSource::new(file.path());
        let products = source.fetch_products().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].display_name(), "Brocha");
    }

    #[tokio::test]
    async fn test_missing_file_is_error() {
        let source = FileProductSource::new("/definitely/not/here.json");
        assert!(source.fetch_products().await.is_err());
    }

    #[tokio::test]
    async fn test_static_source() {
        let source = StaticProductSource::new(vec![ProductRecord::new("Clavo")]);
        assert_eq!(source.fetch_products().await.unwrap().len(), 1);
    }
}
