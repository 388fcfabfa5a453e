//! Lenient decoding of spreadsheet cells.
//!
//! The catalog API serializes sheet rows as-is, so a numeric column may
//! arrive as a number, a numeric string, an empty string or `null`, and a
//! code column may arrive as a number. Nothing here ever fails: a cell that
//! cannot be read is treated as absent.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode a text cell. Numbers and booleans are stringified; empty strings
/// count as absent.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Decode a numeric cell.
pub(crate) fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "super::text")]
        code: Option<String>,
        #[serde(default, deserialize_with = "super::number")]
        qty: Option<f64>,
    }

    fn row(json: &str) -> Row {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_text_cells() {
        assert_eq!(row(r#"{"code": "A1"}"#).code.as_deref(), Some("A1"));
        assert_eq!(row(r#"{"code": 7501031311309}"#).code.as_deref(), Some("7501031311309"));
        assert_eq!(row(r#"{"code": ""}"#).code, None);
        assert_eq!(row(r#"{"code": null}"#).code, None);
        assert_eq!(row(r#"{}"#).code, None);
    }

    #[test]
    fn test_number_cells() {
        assert_eq!(row(r#"{"qty": 5}"#).qty, Some(5.0));
        assert_eq!(row(r#"{"qty": " 12 "}"#).qty, Some(12.0));
        assert_eq!(row(r#"{"qty": ""}"#).qty, None);
        assert_eq!(row(r#"{"qty": "muchos"}"#).qty, None);
        assert_eq!(row(r#"{"qty": [1]}"#).qty, None);
    }
}
