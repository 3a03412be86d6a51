//! Display currency conversion.
//!
//! Every stored price is in the reference currency (PEN). Converting to the
//! display currency is a pure presentation step: multiply by a fixed rate,
//! round to two decimals, prefix the symbol.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::{CatalogError, Result};

/// Supported display currencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Peruvian sol, the reference currency
    #[default]
    Pen,
    Usd,
    Eur,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Pen, Currency::Usd, Currency::Eur];

    /// Multiplicative rate relative to PEN
    pub fn rate(&self) -> f64 {
        match self {
            Currency::Pen => 1.0,
            Currency::Usd => 0.297,
            Currency::Eur => 0.255,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Pen => "S/",
            Currency::Usd => "US$",
            Currency::Eur => "€",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Pen => "PEN",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }

    /// Convert a reference-currency amount and render it as `"<symbol> <amount>"`
    pub fn format(&self, amount: f64) -> String {
        // adding 0.0 turns -0.0 into 0.0
        let value = amount * self.rate() + 0.0;
        format!("{} {:.2}", self.symbol(), value)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PEN" => Ok(Currency::Pen),
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            _ => Err(CatalogError::InvalidCurrency(s.to_string())),
        }
    }
}

/// Format `amount` (PEN) in the currency named by `currency_code`
pub fn format_price(amount: f64, currency_code: &str) -> Result<String> {
    Ok(currency_code.parse::<Currency>()?.format(amount))
}
