/*
[INPUT]:  Parsed subcommands and a configured adapter
[OUTPUT]: JSON documents for stdout
[POS]:    Command layer - one subcommand per adapter operation
[UPDATE]: When adapter operations are added or change shape
*/

use anyhow::{Context, Result};
use bithumb_adapter::http::request::{self, RequestDescriptor};
use bithumb_adapter::{BithumbAdapter, CanonicalSymbol, OrderState, OrderType, Side};
use clap::Subcommand;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Order book for a symbol such as BTC/KRW
    Orderbook { symbol: String },
    /// Account balances
    Balance,
    /// Own order history as trades
    Trades {
        symbol: String,
        /// done, cancel or wait; omit to merge done and cancel
        #[arg(long)]
        state: Option<OrderState>,
    },
    /// Place a limit order
    Order {
        symbol: String,
        #[arg(long)]
        side: Side,
        #[arg(long)]
        amount: Decimal,
        #[arg(long)]
        price: Decimal,
        #[arg(long = "type", default_value = "limit")]
        order_type: OrderType,
    },
    /// Cancel an order by id
    Cancel { id: String },
}

/// Execute one subcommand and render its result as JSON
pub async fn run(adapter: &BithumbAdapter, command: &Command) -> Result<Value> {
    let value = match command {
        Command::Orderbook { symbol } => {
            serde_json::to_value(adapter.fetch_order_book(symbol).await?)?
        }
        Command::Balance => serde_json::to_value(adapter.fetch_balance().await?)?,
        Command::Trades { symbol, state } => {
            serde_json::to_value(adapter.fetch_my_trades(symbol, *state).await?)?
        }
        Command::Order {
            symbol,
            side,
            amount,
            price,
            order_type,
        } => serde_json::to_value(
            adapter
                .create_order(symbol, *order_type, *side, *amount, *price)
                .await?,
        )?,
        Command::Cancel { id } => adapter.cancel_order(id).await?,
    };
    Ok(value)
}

/// A request the command would send, with header values withheld
#[derive(Debug, Clone, Serialize)]
pub struct PlannedRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<String>,
    pub body: Option<String>,
}

/// Build and sign the requests for `command` without dispatching them
pub fn plan(adapter: &BithumbAdapter, command: &Command) -> Result<Vec<PlannedRequest>> {
    let requests = descriptors(command, adapter.buy_fee_rate())?;
    requests
        .iter()
        .map(|request| {
            let envelope = adapter.sign(request).context("sign request")?;
            Ok(PlannedRequest {
                method: envelope.method.to_string(),
                url: envelope.url.to_string(),
                headers: envelope.headers.keys().cloned().collect(),
                body: envelope.body,
            })
        })
        .collect()
}

fn descriptors(command: &Command, buy_fee_rate: Decimal) -> Result<Vec<RequestDescriptor>> {
    let requests = match command {
        Command::Orderbook { symbol } => vec![request::order_book(&CanonicalSymbol::parse(symbol)?)],
        Command::Balance => vec![request::balance()],
        Command::Trades { symbol, state } => {
            let symbol = CanonicalSymbol::parse(symbol)?;
            match state {
                Some(state) => vec![request::my_trades(&symbol, *state)],
                None => vec![
                    request::my_trades(&symbol, OrderState::Done),
                    request::my_trades(&symbol, OrderState::Cancel),
                ],
            }
        }
        Command::Order {
            symbol,
            side,
            amount,
            price,
            order_type,
        } => vec![request::create_order(
            &CanonicalSymbol::parse(symbol)?,
            *order_type,
            *side,
            *amount,
            *price,
            buy_fee_rate,
        )?],
        Command::Cancel { id } => vec![request::cancel_order(id)?],
    };
    Ok(requests)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bithumb_adapter::{AdapterConfig, Credentials};

    fn adapter() -> BithumbAdapter {
        BithumbAdapter::new(AdapterConfig::default(), Credentials::new("key", "secret")).unwrap()
    }

    #[test]
    fn plan_for_unfiltered_trades_has_two_requests() {
        let command = Command::Trades {
            symbol: "BTC/KRW".to_string(),
            state: None,
        };
        let planned = plan(&adapter(), &command).unwrap();
        assert_eq!(planned.len(), 2);
        assert!(planned[0].url.contains("state=done"));
        assert!(planned[1].url.contains("state=cancel"));
        assert!(planned[0].headers.contains(&"Authorization".to_string()));
    }

    #[test]
    fn plan_uses_adapter_fee_rate() {
        let config = AdapterConfig {
            buy_fee_rate: Decimal::new(1, 2),
            ..AdapterConfig::default()
        };
        let adapter = BithumbAdapter::new(config, Credentials::new("key", "secret")).unwrap();
        let command = Command::Order {
            symbol: "BTC/KRW".to_string(),
            side: Side::Buy,
            amount: Decimal::ONE,
            price: Decimal::new(100, 0),
            order_type: OrderType::Limit,
        };

        let planned = plan(&adapter, &command).unwrap();
        let body = planned[0].body.as_deref().unwrap_or_default();
        assert!(body.contains("volume=0.99"), "unexpected body {body}");
    }

    #[test]
    fn plan_rejects_market_orders() {
        let command = Command::Order {
            symbol: "BTC/KRW".to_string(),
            side: Side::Buy,
            amount: Decimal::ONE,
            price: Decimal::ONE,
            order_type: OrderType::Market,
        };
        assert!(plan(&adapter(), &command).is_err());
    }
}
