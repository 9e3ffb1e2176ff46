/*
[INPUT]:  Raw vendor JSON payloads
[OUTPUT]: Typed vendor records with lenient numeric parsing
[POS]:    Data layer - wire shapes consumed by the normalizer
[UPDATE]: When the vendor changes a response schema or a field's encoding
*/

use serde::Deserialize;

use super::enums::VendorSide;

/// One row of the unit-array order book: a bid and an ask side by side
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderbookUnit {
    #[serde(deserialize_with = "serde_helpers::deserialize_f64")]
    pub bid_price: f64,
    #[serde(deserialize_with = "serde_helpers::deserialize_f64")]
    pub bid_size: f64,
    #[serde(deserialize_with = "serde_helpers::deserialize_f64")]
    pub ask_price: f64,
    #[serde(deserialize_with = "serde_helpers::deserialize_f64")]
    pub ask_size: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderbookSnapshot {
    #[serde(default)]
    pub market: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::deserialize_opt_millis")]
    pub timestamp: Option<i64>,
    pub orderbook_units: Vec<OrderbookUnit>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KeyedLevel {
    #[serde(deserialize_with = "serde_helpers::deserialize_f64")]
    pub price: f64,
    #[serde(deserialize_with = "serde_helpers::deserialize_f64")]
    pub quantity: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KeyedOrderbook {
    #[serde(default, deserialize_with = "serde_helpers::deserialize_opt_millis")]
    pub timestamp: Option<i64>,
    pub bids: Vec<KeyedLevel>,
    pub asks: Vec<KeyedLevel>,
}

/// The two order book layouts the vendor has served
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OrderbookPayload {
    Units(Vec<OrderbookSnapshot>),
    Keyed { data: KeyedOrderbook },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AccountEntry {
    pub currency: String,
    #[serde(deserialize_with = "serde_helpers::deserialize_f64")]
    pub balance: f64,
    #[serde(default, deserialize_with = "serde_helpers::deserialize_opt_f64")]
    pub locked: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VendorOrder {
    pub uuid: String,
    pub side: VendorSide,
    #[serde(default)]
    pub ord_type: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::deserialize_opt_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "serde_helpers::deserialize_opt_f64")]
    pub avg_price: Option<f64>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub market: Option<String>,
    #[serde(deserialize_with = "serde_helpers::deserialize_millis")]
    pub created_at: i64,
    #[serde(default, deserialize_with = "serde_helpers::deserialize_opt_f64")]
    pub volume: Option<f64>,
    #[serde(deserialize_with = "serde_helpers::deserialize_f64")]
    pub executed_volume: f64,
    #[serde(default, deserialize_with = "serde_helpers::deserialize_f64_or_zero")]
    pub paid_fee: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderAck {
    pub uuid: String,
}

mod serde_helpers {
    use chrono::DateTime;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    const MILLIS_THRESHOLD: f64 = 1e11;
    const MICROS_THRESHOLD: f64 = 1e14;

    fn value_to_f64(value: &Value) -> Result<Option<f64>, String> {
        match value {
            Value::Null => Ok(None),
            Value::Number(n) => n
                .as_f64()
                .map(Some)
                .ok_or_else(|| format!("number {n} out of range")),
            Value::String(raw) => {
                let raw = raw.trim();
                if raw.is_empty() {
                    return Ok(None);
                }
                raw.parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .map(Some)
                    .ok_or_else(|| format!("non-numeric value {raw:?}"))
            }
            other => Err(format!("expected number, got {other}")),
        }
    }

    pub fn deserialize_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        value_to_f64(&value)
            .map_err(serde::de::Error::custom)?
            .ok_or_else(|| serde::de::Error::custom("missing numeric value"))
    }

    pub fn deserialize_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        value_to_f64(&value).map_err(serde::de::Error::custom)
    }

    pub fn deserialize_f64_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(deserialize_opt_f64(deserializer)?.unwrap_or(0.0))
    }

    /// Epoch seconds, millis and micros are all scaled to millis
    fn scale_to_millis(raw: f64) -> i64 {
        if raw >= MICROS_THRESHOLD {
            (raw / 1000.0) as i64
        } else if raw >= MILLIS_THRESHOLD {
            raw as i64
        } else {
            (raw * 1000.0) as i64
        }
    }

    fn value_to_millis(value: &Value) -> Result<Option<i64>, String> {
        match value {
            Value::Null => Ok(None),
            Value::String(raw) if raw.trim().is_empty() => Ok(None),
            Value::String(raw) => {
                if let Ok(parsed) = DateTime::parse_from_rfc3339(raw.trim()) {
                    return Ok(Some(parsed.timestamp_millis()));
                }
                raw.trim()
                    .parse::<f64>()
                    .map(|n| Some(scale_to_millis(n)))
                    .map_err(|_| format!("unrecognized timestamp {raw:?}"))
            }
            Value::Number(n) => n
                .as_f64()
                .map(|n| Some(scale_to_millis(n)))
                .ok_or_else(|| format!("timestamp {n} out of range")),
            other => Err(format!("expected timestamp, got {other}")),
        }
    }

    pub fn deserialize_millis<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        value_to_millis(&value)
            .map_err(serde::de::Error::custom)?
            .ok_or_else(|| serde::de::Error::custom("missing timestamp"))
    }

    pub fn deserialize_opt_millis<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        value_to_millis(&value).map_err(serde::de::Error::custom)
    }
}
