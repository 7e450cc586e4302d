use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_SYMBOL_LEN: usize = 5;

/// Symbols offered as one-click shortcuts next to the search box.
pub const POPULAR_SYMBOLS: [&str; 5] = ["AAPL", "GOOGL", "MSFT", "TSLA", "AMZN"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SymbolError {
    #[error("Symbol is required")]
    Required,
    #[error("Symbol cannot be empty")]
    Empty,
    #[error("Symbol must be 5 characters or less")]
    TooLong,
    #[error("Symbol must contain only letters")]
    NotAlphabetic,
}

/// Normalized ticker: 1 to 5 uppercase ASCII letters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TickerSymbol(String);

impl TickerSymbol {
    /// Validates raw user input; `None` models a missing form value.
    pub fn parse_optional(input: Option<&str>) -> Result<Self, SymbolError> {
        input.ok_or(SymbolError::Required).and_then(Self::parse)
    }

    /// Trims and uppercases `input`, then checks length and alphabet.
    pub fn parse(input: &str) -> Result<Self, SymbolError> {
        let clean = input.trim().to_uppercase();
        if clean.is_empty() {
            return Err(SymbolError::Empty);
        }
        if clean.chars().count() > MAX_SYMBOL_LEN {
            return Err(SymbolError::TooLong);
        }
        if !clean.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(SymbolError::NotAlphabetic);
        }
        Ok(Self(clean))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TickerSymbol {
    type Err = SymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TickerSymbol {
    type Error = SymbolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TickerSymbol> for String {
    fn from(value: TickerSymbol) -> Self {
        value.0
    }
}

impl fmt::Display for TickerSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
