//! Money type and price formatting.
//!
//! Amounts are held in cents to avoid floating-point drift, and rendered
//! in the es-GT style the storefront uses (`Q1,234.50`).

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Currency code assumed when a product row does not carry one.
pub const DEFAULT_CURRENCY_CODE: &str = "GTQ";

/// A currency code that is not shaped like an ISO 4217 code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid currency code: {0:?}")]
pub struct InvalidCurrency(pub String);

/// Currencies the catalog knows a local symbol for.
///
/// Any other well-formed three-letter code is carried as [`Currency::Other`]
/// and rendered with its code instead of a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    GTQ,
    USD,
    EUR,
    MXN,
    HNL,
    CRC,
    Other(String),
}

impl Currency {
    /// Get the currency code (e.g., "GTQ").
    pub fn code(&self) -> &str {
        match self {
            Currency::GTQ => "GTQ",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::MXN => "MXN",
            Currency::HNL => "HNL",
            Currency::CRC => "CRC",
            Currency::Other(code) => code,
        }
    }

    /// Get the local currency symbol, if there is one.
    pub fn symbol(&self) -> Option<&'static str> {
        match self {
            Currency::GTQ => Some("Q"),
            Currency::USD => Some("US$"),
            Currency::EUR => Some("\u{20ac}"),
            Currency::MXN => Some("MX$"),
            Currency::HNL => Some("L"),
            Currency::CRC => Some("\u{20a1}"),
            Currency::Other(_) => None,
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Parse a currency code string.
    ///
    /// Codes are case-insensitive. Unknown but well-formed codes parse to
    /// [`Currency::Other`]; anything that is not three ASCII letters fails.
    pub fn parse(code: &str) -> Result<Self, InvalidCurrency> {
        let upper = code.trim().to_ascii_uppercase();
        if upper.len() != 3 || !upper.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(InvalidCurrency(code.to_string()));
        }
        Ok(match upper.as_str() {
            "GTQ" => Currency::GTQ,
            "USD" => Currency::USD,
            "EUR" => Currency::EUR,
            "MXN" => Currency::MXN,
            "HNL" => Currency::HNL,
            "CRC" => Currency::CRC,
            _ => Currency::Other(upper),
        })
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., centavos).
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use ferjo_catalog::money::{Money, Currency};
    /// let price = Money::from_decimal(49.99, Currency::GTQ);
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        let amount_cents = (amount * multiplier as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_cents as f64 / divisor as f64
    }

    /// Format as a display string (e.g., "Q1,234.50" or "JPY 1,200.00").
    pub fn display(&self) -> String {
        let amount = self.display_amount();
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        match self.currency.symbol() {
            Some(symbol) => format!("{}{}{}", sign, symbol, amount),
            None => format!("{}{} {}", sign, self.currency.code(), amount),
        }
    }

    /// Format the absolute amount with grouping and no symbol (e.g., "1,234.50").
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places();
        let divisor = 10_u64.pow(places);
        let abs = self.amount_cents.unsigned_abs();
        let whole = group_thousands(abs / divisor);
        if places == 0 {
            whole
        } else {
            format!(
                "{}.{:0width$}",
                whole,
                abs % divisor,
                width = places as usize
            )
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Format a product price for display.
///
/// A missing amount renders as zero and a missing code means GTQ. A code
/// that is not a valid currency falls back to a plain quetzal rendering
/// without grouping (`Q 12.50`).
pub fn format_price(amount: Option<f64>, currency_code: Option<&str>) -> String {
    let amount = amount.filter(|a| a.is_finite()).unwrap_or(0.0);
    match Currency::parse(currency_code.unwrap_or(DEFAULT_CURRENCY_CODE)) {
        Ok(currency) => Money::from_decimal(amount, currency).display(),
        Err(_) => format!("Q {:.2}", amount),
    }
}

fn group_thousands(mut n: u64) -> String {
    let mut groups = Vec::new();
    loop {
        if n < 1000 {
            groups.push(n.to_string());
            break;
        }
        groups.push(format!("{:03}", n % 1000));
        n /= 1000;
    }
    groups.reverse();
    groups.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::GTQ);
        assert_eq!(m.amount_cents, 4999);
        assert!((m.to_decimal() - 49.99).abs() < 0.001);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(4999, Currency::GTQ).display(), "Q49.99");
        assert_eq!(Money::new(123_456_789, Currency::GTQ).display(), "Q1,234,567.89");
        assert_eq!(Money::new(-150, Currency::USD).display(), "-US$1.50");
        assert_eq!(
            Money::new(100_000, Currency::Other("JPY".into())).display(),
            "JPY 1,000.00"
        );
    }

    #[test]
    fn test_currency_parse() {
        assert_eq!(Currency::parse("GTQ"), Ok(Currency::GTQ));
        assert_eq!(Currency::parse("usd"), Ok(Currency::USD));
        assert_eq!(Currency::parse("cop"), Ok(Currency::Other("COP".into())));
        assert!(Currency::parse("Q").is_err());
        assert!(Currency::parse("").is_err());
        assert!(Currency::parse("US$").is_err());
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Some(1250.5), None), "Q1,250.50");
        assert_eq!(format_price(Some(10.0), Some("EUR")), "\u{20ac}10.00");
        assert_eq!(format_price(None, None), "Q0.00");
        assert_eq!(format_price(Some(12.5), Some("quetzales")), "Q 12.50");
    }
}
