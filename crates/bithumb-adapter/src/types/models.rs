/*
[INPUT]:  Normalized vendor payloads
[OUTPUT]: Canonical records returned to callers
[POS]:    Data layer - exchange-agnostic domain records
[UPDATE]: When the public record shapes change
*/

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::enums::Side;
use super::symbol::CanonicalSymbol;

/// `(price, size)` pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceLevel(pub f64, pub f64);

impl PriceLevel {
    pub fn price(&self) -> f64 {
        self.0
    }

    pub fn size(&self) -> f64 {
        self.1
    }
}

/// Order book snapshot. Levels keep vendor order; crossed books are not rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBook {
    pub symbol: CanonicalSymbol,
    /// Epoch millis
    pub timestamp: i64,
    pub bids: Vec<PriceLevel>,
    pub asks: Vec<PriceLevel>,
}

/// Account balances keyed by currency code
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Balances {
    pub free: BTreeMap<String, f64>,
    /// Amounts locked in open orders, when the vendor reports them
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub used: BTreeMap<String, f64>,
}

impl Balances {
    pub fn free(&self, currency: &str) -> Option<f64> {
        self.free.get(currency).copied()
    }

    pub fn total(&self, currency: &str) -> Option<f64> {
        let free = self.free(currency)?;
        Some(free + self.used.get(currency).copied().unwrap_or(0.0))
    }

    pub fn currencies(&self) -> impl Iterator<Item = &str> {
        self.free.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fee {
    pub cost: f64,
    pub currency: String,
}

/// One of the account's own orders, viewed as a trade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: String,
    /// Epoch millis
    pub timestamp: i64,
    pub symbol: CanonicalSymbol,
    pub side: Side,
    pub price: f64,
    pub amount: f64,
    /// amount * price, net of fee in the direction of the side
    pub cost: f64,
    pub fee: Fee,
}

/// Acknowledgment of a placed order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderHandle {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balances_total_adds_locked_amount() {
        let mut balances = Balances::default();
        balances.free.insert("KRW".to_string(), 1000.0);
        balances.free.insert("BTC".to_string(), 0.5);
        balances.used.insert("KRW".to_string(), 250.0);

        assert_eq!(balances.total("KRW"), Some(1250.0));
        assert_eq!(balances.total("BTC"), Some(0.5));
        assert_eq!(balances.total("ETH"), None);
        assert_eq!(balances.currencies().collect::<Vec<_>>(), vec!["BTC", "KRW"]);
    }

    #[test]
    fn price_level_serializes_as_pair() {
        let level = PriceLevel(100.0, 1.5);
        assert_eq!(serde_json::to_string(&level).unwrap(), "[100.0,1.5]");
    }
}
