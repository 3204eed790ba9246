//! Display currencies
//!
//! Rates are static, quoted against the US dollar, and only used to show a
//! computed price in another currency. Estimates themselves are currency
//! agnostic.

use serde::Serialize;

use crate::errors::{CostError, CostResult};

/// A display currency with its static exchange rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Currency {
    /// ISO 4217 code
    pub code: &'static str,
    /// Symbol used when formatting amounts
    pub symbol: &'static str,
    /// Units of this currency per US dollar
    pub rate: f64,
    /// English display name
    pub name: &'static str,
}

/// Supported currencies, USD first
pub const CURRENCIES: [Currency; 10] = [
    Currency { code: "USD", symbol: "$", rate: 1.0, name: "US Dollar" },
    Currency { code: "EUR", symbol: "€", rate: 0.92, name: "Euro" },
    Currency { code: "GBP", symbol: "£", rate: 0.79, name: "British Pound" },
    Currency { code: "AED", symbol: "د.إ", rate: 3.67, name: "UAE Dirham" },
    Currency { code: "SAR", symbol: "ر.س", rate: 3.75, name: "Saudi Riyal" },
    Currency { code: "EGP", symbol: "ج.م", rate: 30.90, name: "Egyptian Pound" },
    Currency { code: "JPY", symbol: "¥", rate: 149.50, name: "Japanese Yen" },
    Currency { code: "CNY", symbol: "¥", rate: 7.24, name: "Chinese Yuan" },
    Currency { code: "INR", symbol: "₹", rate: 83.12, name: "Indian Rupee" },
    Currency { code: "TRY", symbol: "₺", rate: 28.50, name: "Turkish Lira" },
];

impl Currency {
    /// Look up a currency by code (case-insensitive)
    pub fn by_code(code: &str) -> CostResult<&'static Currency> {
        CURRENCIES
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code.trim()))
            .ok_or_else(|| CostError::invalid_input("currency", code, "Unknown currency code"))
    }

    /// Convert a US dollar amount into this currency
    pub fn convert_from_usd(&self, amount_usd: f64) -> f64 {
        amount_usd * self.rate
    }

    /// Format an amount already expressed in this currency
    pub fn format(&self, amount: f64) -> String {
        format!("{}{:.2}", self.symbol, amount)
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(Currency::by_code("eur").unwrap().symbol, "€");
        assert_eq!(Currency::by_code("USD").unwrap().rate, 1.0);
        assert!(Currency::by_code("XYZ").is_err());
    }

    #[test]
    fn test_conversion() {
        let egp = Currency::by_code("EGP").unwrap();
        assert!((egp.convert_from_usd(10.0) - 309.0).abs() < 1e-9);
        assert_eq!(egp.format(309.0), "ج.م309.00");
    }

    #[test]
    fn test_codes_unique() {
        for (i, a) in CURRENCIES.iter().enumerate() {
            for b in &CURRENCIES[i + 1..] {
                assert_ne!(a.code, b.code);
            }
        }
    }
}
