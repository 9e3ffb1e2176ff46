/*
[INPUT]:  Logical operations and their parameters
[OUTPUT]: Canonical request descriptors (path, method, params, auth requirement)
[POS]:    HTTP layer - request building, independent of signing and transport
[UPDATE]: When adding endpoints or changing parameter placement
*/

use std::collections::BTreeMap;

use reqwest::Method;
use rust_decimal::Decimal;
use url::form_urlencoded;

use crate::http::{BithumbError, Result};
use crate::types::{CanonicalSymbol, OrderState, OrderType, Side};

/// Request parameters in stable (sorted) key order
pub type Params = BTreeMap<String, String>;

/// Transport-agnostic description of one vendor call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub path: String,
    pub method: Method,
    pub query: Params,
    pub body: Option<Params>,
    pub requires_auth: bool,
}

impl RequestDescriptor {
    /// GET places `params` in the query string, every other method in the body.
    pub fn new(method: Method, path: &str, params: Params, requires_auth: bool) -> Self {
        let (query, body) = if method == Method::GET || params.is_empty() {
            (params, None)
        } else {
            (Params::new(), Some(params))
        };

        Self {
            path: path.to_string(),
            method,
            query,
            body,
            requires_auth,
        }
    }

    /// Query and body parameters merged; keys never collide since only one is populated
    pub fn params(&self) -> Params {
        let mut merged = self.query.clone();
        if let Some(body) = &self.body {
            merged.extend(body.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        merged
    }

    pub fn encoded_query(&self) -> Option<String> {
        (!self.query.is_empty()).then(|| encode_params(&self.query))
    }

    pub fn encoded_body(&self) -> Option<String> {
        self.body.as_ref().map(encode_params)
    }
}

/// `application/x-www-form-urlencoded` serialization in key order
pub fn encode_params(params: &Params) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

fn params<const N: usize>(pairs: [(&str, String); N]) -> Params {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

/// GET orderbook?markets={code}
pub fn order_book(symbol: &CanonicalSymbol) -> RequestDescriptor {
    RequestDescriptor::new(
        Method::GET,
        "orderbook",
        params([("markets", symbol.market_code().to_string())]),
        false,
    )
}

/// GET accounts
pub fn balance() -> RequestDescriptor {
    RequestDescriptor::new(Method::GET, "accounts", Params::new(), true)
}

/// GET orders?market={code}&state={state}&order_by=desc
pub fn my_trades(symbol: &CanonicalSymbol, state: OrderState) -> RequestDescriptor {
    RequestDescriptor::new(
        Method::GET,
        "orders",
        params([
            ("market", symbol.market_code().to_string()),
            ("state", state.as_str().to_string()),
            ("order_by", "desc".to_string()),
        ]),
        true,
    )
}

/// POST orders with a limit order body.
///
/// Buy volume is reduced by `buy_fee_rate` because the vendor withholds the fee
/// from the quote balance rather than from the filled amount.
pub fn create_order(
    symbol: &CanonicalSymbol,
    order_type: OrderType,
    side: Side,
    amount: Decimal,
    price: Decimal,
    buy_fee_rate: Decimal,
) -> Result<RequestDescriptor> {
    if order_type != OrderType::Limit {
        return Err(BithumbError::UnsupportedOrderType(order_type.to_string()));
    }
    if amount <= Decimal::ZERO {
        return Err(BithumbError::InvalidOrder(format!(
            "amount must be positive, got {amount}"
        )));
    }
    if price <= Decimal::ZERO {
        return Err(BithumbError::InvalidOrder(format!(
            "price must be positive, got {price}"
        )));
    }

    let volume = match side {
        Side::Buy => amount * (Decimal::ONE - buy_fee_rate),
        Side::Sell => amount,
    };

    Ok(RequestDescriptor::new(
        Method::POST,
        "orders",
        params([
            ("market", symbol.market_code().to_string()),
            ("side", side.vendor_side().as_str().to_string()),
            ("volume", volume.normalize().to_string()),
            ("price", price.normalize().to_string()),
            ("ord_type", OrderType::Limit.as_str().to_string()),
        ]),
        true,
    ))
}

/// DELETE order?uuid={id}
pub fn cancel_order(id: &str) -> Result<RequestDescriptor> {
    let id = id.trim();
    if id.is_empty() {
        return Err(BithumbError::InvalidOrder("order id must not be empty".to_string()));
    }
    Ok(RequestDescriptor::new(
        Method::DELETE,
        "order",
        params([("uuid", id.to_string())]),
        true,
    ))
}
