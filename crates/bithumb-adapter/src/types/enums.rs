/*
[INPUT]:  Vendor vocabulary (bid/ask, ord_type, order state) and serde requirements
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions shared by builder and normalizer
[UPDATE]: When the vendor adds order types or states
*/

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::http::BithumbError;

/// Canonical trade direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Vendor label for this direction: buy -> bid, sell -> ask
    pub fn vendor_side(self) -> VendorSide {
        match self {
            Side::Buy => VendorSide::Bid,
            Side::Sell => VendorSide::Ask,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = BithumbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(Side::Buy),
            "sell" => Ok(Side::Sell),
            other => Err(BithumbError::InvalidOrder(format!("unknown side {other:?}"))),
        }
    }
}

/// Side as the vendor spells it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VendorSide {
    Bid,
    Ask,
}

impl VendorSide {
    pub fn as_str(self) -> &'static str {
        match self {
            VendorSide::Bid => "bid",
            VendorSide::Ask => "ask",
        }
    }

    /// Canonical label: bid -> buy, ask -> sell
    pub fn canonical(self) -> Side {
        match self {
            VendorSide::Bid => Side::Buy,
            VendorSide::Ask => Side::Sell,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Limit,
    Market,
    /// Market buy sized by quote amount
    Price,
}

impl OrderType {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderType::Limit => "limit",
            OrderType::Market => "market",
            OrderType::Price => "price",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = BithumbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "limit" => Ok(OrderType::Limit),
            "market" => Ok(OrderType::Market),
            "price" => Ok(OrderType::Price),
            other => Err(BithumbError::UnsupportedOrderType(other.to_string())),
        }
    }
}

/// Order state filter understood by `GET orders`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderState {
    Done,
    Cancel,
    Wait,
}

impl OrderState {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderState::Done => "done",
            OrderState::Cancel => "cancel",
            OrderState::Wait => "wait",
        }
    }
}

impl FromStr for OrderState {
    type Err = BithumbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "done" => Ok(OrderState::Done),
            "cancel" => Ok(OrderState::Cancel),
            "wait" => Ok(OrderState::Wait),
            other => Err(BithumbError::Config(format!("unknown order state {other:?}"))),
        }
    }
}
