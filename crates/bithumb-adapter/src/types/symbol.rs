/*
[INPUT]:  User-supplied `BASE/QUOTE` pairs and vendor `QUOTE-BASE` market codes
[OUTPUT]: Validated canonical symbols and derived market codes
[POS]:    Data layer - symbol codec
[UPDATE]: When the vendor changes its market code layout
*/

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::http::{BithumbError, Result};

const CANONICAL_SEPARATOR: char = '/';
const MARKET_SEPARATOR: char = '-';

/// Exchange-agnostic currency pair, e.g. `BTC/KRW`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CanonicalSymbol {
    base: String,
    quote: String,
}

impl CanonicalSymbol {
    /// Parse `BASE/QUOTE`. Exactly one separator with two non-empty sides is required.
    pub fn parse(input: &str) -> Result<Self> {
        let (base, quote) = split_pair(input, CANONICAL_SEPARATOR)?;
        Ok(Self { base, quote })
    }

    /// Decode a vendor `QUOTE-BASE` market code
    pub fn from_market_code(code: &str) -> Result<Self> {
        let (quote, base) = split_pair(code, MARKET_SEPARATOR)?;
        Ok(Self { base, quote })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn quote(&self) -> &str {
        &self.quote
    }

    /// Vendor market code. Recomputed on every call.
    pub fn market_code(&self) -> MarketCode {
        MarketCode(format!("{}{MARKET_SEPARATOR}{}", self.quote, self.base))
    }
}

fn split_pair(input: &str, separator: char) -> Result<(String, String)> {
    let invalid = || BithumbError::InvalidSymbolFormat(input.to_string());

    let mut parts = input.trim().split(separator);
    let (Some(left), Some(right), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };

    let left = normalize_code(left).ok_or_else(invalid)?;
    let right = normalize_code(right).ok_or_else(invalid)?;
    Ok((left, right))
}

fn normalize_code(raw: &str) -> Option<String> {
    let code = raw.trim();
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(code.to_ascii_uppercase())
}

impl fmt::Display for CanonicalSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{CANONICAL_SEPARATOR}{}", self.base, self.quote)
    }
}

impl FromStr for CanonicalSymbol {
    type Err = BithumbError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CanonicalSymbol {
    type Error = BithumbError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<CanonicalSymbol> for String {
    fn from(symbol: CanonicalSymbol) -> Self {
        symbol.to_string()
    }
}

/// Vendor market code, e.g. `KRW-BTC`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MarketCode(String);

impl MarketCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MarketCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MarketCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("BTC/KRW", "KRW-BTC")]
    #[case("eth/krw", "KRW-ETH")]
    #[case(" XRP / BTC ", "BTC-XRP")]
    #[case("1INCH/KRW", "KRW-1INCH")]
    fn encode_then_split_recovers_quote_and_base(#[case] input: &str, #[case] expected: &str) {
        let symbol = CanonicalSymbol::parse(input).unwrap();
        let code = symbol.market_code();
        assert_eq!(code.as_str(), expected);

        let parts: Vec<&str> = code.as_str().split('-').collect();
        assert_eq!(parts, vec![symbol.quote(), symbol.base()]);
    }

    #[rstest]
    #[case("BTCKRW")]
    #[case("BTC/KRW/USDT")]
    #[case("/KRW")]
    #[case("BTC/")]
    #[case("")]
    #[case("BTC-KRW")]
    #[case("BT C/KRW")]
    fn malformed_symbols_are_rejected(#[case] input: &str) {
        let err = CanonicalSymbol::parse(input).unwrap_err();
        assert!(matches!(err, BithumbError::InvalidSymbolFormat(raw) if raw == input));
    }

    #[test]
    fn market_code_decodes_back_to_canonical() {
        let symbol = CanonicalSymbol::from_market_code("KRW-BTC").unwrap();
        assert_eq!(symbol.to_string(), "BTC/KRW");
        assert!(CanonicalSymbol::from_market_code("KRW/BTC").is_err());
    }

    #[test]
    fn symbol_serializes_as_string() {
        let symbol: CanonicalSymbol = "btc/krw".parse().unwrap();
        let json = serde_json::to_string(&symbol).unwrap();
        assert_eq!(json, "\"BTC/KRW\"");

        let back: CanonicalSymbol = serde_json::from_str(&json).unwrap();
        assert_eq!(back, symbol);
    }
}
