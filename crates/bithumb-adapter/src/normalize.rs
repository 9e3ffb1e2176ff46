/*
[INPUT]:  Classified vendor JSON values
[OUTPUT]: Canonical order books, balances, trades and order handles
[POS]:    Normalization layer - vendor shapes to canonical records
[UPDATE]: When a vendor payload shape or a derived field changes
*/

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::http::{BithumbError, Result};
use crate::types::vendor::{AccountEntry, OrderAck, OrderbookPayload, VendorOrder};
use crate::types::{
    Balances, CanonicalSymbol, Fee, OrderBook, OrderHandle, PriceLevel, Trade, VendorSide,
};

fn decode<T: DeserializeOwned>(what: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| BithumbError::malformed(format!("{what}: {e}")))
}

/// Older revisions wrap payloads as `{"status": "0000", "data": ...}`
fn unwrap_data(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("status") && map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Order book in vendor level order. `fallback_timestamp` is used when the
/// payload carries none.
pub fn order_book(symbol: &CanonicalSymbol, value: Value, fallback_timestamp: i64) -> Result<OrderBook> {
    match decode::<OrderbookPayload>("order book", value)? {
        OrderbookPayload::Units(snapshots) => {
            let market = symbol.market_code();
            let position = snapshots
                .iter()
                .position(|s| s.market.as_deref() == Some(market.as_str()))
                .unwrap_or(0);
            let snapshot = snapshots
                .into_iter()
                .nth(position)
                .ok_or_else(|| BithumbError::malformed("order book: empty snapshot list"))?;

            let (bids, asks): (Vec<PriceLevel>, Vec<PriceLevel>) = snapshot
                .orderbook_units
                .iter()
                .map(|unit| {
                    (
                        PriceLevel(unit.bid_price, unit.bid_size),
                        PriceLevel(unit.ask_price, unit.ask_size),
                    )
                })
                .unzip();

            Ok(OrderBook {
                symbol: symbol.clone(),
                timestamp: snapshot.timestamp.unwrap_or(fallback_timestamp),
                bids,
                asks,
            })
        }
        OrderbookPayload::Keyed { data } => Ok(OrderBook {
            symbol: symbol.clone(),
            timestamp: data.timestamp.unwrap_or(fallback_timestamp),
            bids: data.bids.iter().map(|l| PriceLevel(l.price, l.quantity)).collect(),
            asks: data.asks.iter().map(|l| PriceLevel(l.price, l.quantity)).collect(),
        }),
    }
}

/// Balances keyed by currency. Any unparseable entry fails the whole call.
pub fn balances(value: Value) -> Result<Balances> {
    let entries: Vec<AccountEntry> = decode("balances", unwrap_data(value))?;

    let mut balances = Balances::default();
    for entry in entries {
        let currency = entry.currency.trim().to_ascii_uppercase();
        if currency.is_empty() {
            return Err(BithumbError::malformed("balances: entry without currency"));
        }
        if let Some(locked) = entry.locked {
            balances.used.insert(currency.clone(), locked);
        }
        balances.free.insert(currency, entry.balance);
    }
    Ok(balances)
}

/// One vendor order record as a canonical trade.
///
/// Unfilled orders without any price (cancelled market orders) get price 0;
/// a fill without a price is malformed.
pub fn trade(symbol: &CanonicalSymbol, order: &VendorOrder) -> Result<Trade> {
    let amount = order.executed_volume;
    let price = match order.avg_price.filter(|avg| *avg != 0.0).or(order.price) {
        Some(price) => price,
        None if amount == 0.0 => 0.0,
        None => {
            return Err(BithumbError::malformed(format!(
                "order {}: filled without a price",
                order.uuid
            )));
        }
    };
    let fee = order.paid_fee;

    let gross = amount * price;
    let cost = match order.side {
        VendorSide::Ask => gross - fee,
        VendorSide::Bid => gross + fee,
    };

    Ok(Trade {
        id: order.uuid.clone(),
        timestamp: order.created_at,
        symbol: symbol.clone(),
        side: order.side.canonical(),
        price,
        amount,
        cost,
        fee: Fee {
            cost: fee,
            currency: symbol.quote().to_string(),
        },
    })
}

pub fn trades(symbol: &CanonicalSymbol, value: Value) -> Result<Vec<Trade>> {
    let orders: Vec<VendorOrder> = decode("trades", unwrap_data(value))?;
    orders.iter().map(|order| trade(symbol, order)).collect()
}

/// Concatenate batches, drop repeated ids (first wins), newest first
pub fn merge_trades(batches: impl IntoIterator<Item = Vec<Trade>>) -> Vec<Trade> {
    let mut seen = HashSet::new();
    let mut merged: Vec<Trade> = batches
        .into_iter()
        .flatten()
        .filter(|trade| seen.insert(trade.id.clone()))
        .collect();
    merged.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    merged
}

pub fn order_handle(value: Value) -> Result<OrderHandle> {
    let ack: OrderAck = decode("order ack", unwrap_data(value))?;
    Ok(OrderHandle { id: ack.uuid })
}
