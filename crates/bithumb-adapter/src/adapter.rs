/*
[INPUT]:  Adapter configuration, credentials, transport and clock capabilities
[OUTPUT]: The five public operations returning canonical records
[POS]:    Orchestration layer - build, sign, dispatch, classify, normalize
[UPDATE]: When adding operations or changing the pipeline order
*/

use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::auth::{AuthScheme, AuthStrategy, Clock, Credentials, SystemClock};
use crate::http::envelope::{self, Headers, SignedEnvelope};
use crate::http::request::{self, RequestDescriptor};
use crate::http::{BithumbError, ClientConfig, ReqwestTransport, Result, Transport, classify};
use crate::normalize;
use crate::types::{
    Balances, CanonicalSymbol, OrderBook, OrderHandle, OrderState, OrderType, Side, Trade,
};

pub const DEFAULT_BASE_URL: &str = "https://api.bithumb.com/v1/";

/// Standard maker/taker rate, withheld from the quote balance on buys
pub fn default_buy_fee_rate() -> Decimal {
    Decimal::new(25, 4)
}

#[derive(Debug, Clone)]
pub struct AdapterConfig {
    pub base_url: String,
    pub auth_scheme: AuthScheme,
    pub buy_fee_rate: Decimal,
    pub client: ClientConfig,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            auth_scheme: AuthScheme::default(),
            buy_fee_rate: default_buy_fee_rate(),
            client: ClientConfig::default(),
        }
    }
}

/// Bithumb exchange adapter.
///
/// Holds only immutable state, so one instance can serve concurrent calls.
#[derive(Debug, Clone)]
pub struct BithumbAdapter {
    base_url: Url,
    credentials: Credentials,
    auth: Arc<dyn AuthStrategy>,
    transport: Arc<dyn Transport>,
    clock: Arc<dyn Clock>,
    buy_fee_rate: Decimal,
}

impl BithumbAdapter {
    /// Adapter over the reqwest transport and the system clock
    pub fn new(config: AdapterConfig, credentials: Credentials) -> Result<Self> {
        let transport = Arc::new(ReqwestTransport::with_config(config.client.clone())?);
        Self::with_parts(config, credentials, transport, Arc::new(SystemClock))
    }

    pub fn with_parts(
        config: AdapterConfig,
        credentials: Credentials,
        transport: Arc<dyn Transport>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        if config.buy_fee_rate < Decimal::ZERO || config.buy_fee_rate >= Decimal::ONE {
            return Err(BithumbError::Config(format!(
                "buy fee rate must be in [0, 1), got {}",
                config.buy_fee_rate
            )));
        }

        Ok(Self {
            base_url: parse_base_url(&config.base_url)?,
            credentials,
            auth: config.auth_scheme.strategy(),
            transport,
            clock,
            buy_fee_rate: config.buy_fee_rate,
        })
    }

    /// Replace the signing strategy chosen by configuration
    pub fn with_auth_strategy(mut self, auth: Arc<dyn AuthStrategy>) -> Self {
        self.auth = auth;
        self
    }

    pub fn auth_scheme(&self) -> AuthScheme {
        self.auth.scheme()
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fraction withheld from buy volume when building orders
    pub fn buy_fee_rate(&self) -> Decimal {
        self.buy_fee_rate
    }

    /// GET orderbook for one market
    #[instrument(skip(self))]
    pub async fn fetch_order_book(&self, symbol: &str) -> Result<OrderBook> {
        let symbol = CanonicalSymbol::parse(symbol)?;
        let value = self.execute(request::order_book(&symbol)).await?;
        normalize::order_book(&symbol, value, self.clock.now_millis() as i64)
    }

    /// Free (and locked, when reported) amounts per currency
    #[instrument(skip(self))]
    pub async fn fetch_balance(&self) -> Result<Balances> {
        let value = self.execute(request::balance()).await?;
        normalize::balances(value)
    }

    /// Own orders as trades, newest first.
    ///
    /// Without a state filter, `done` and `cancel` are fetched in turn and
    /// merged; a failure of either fails the call.
    #[instrument(skip(self))]
    pub async fn fetch_my_trades(&self, symbol: &str, state: Option<OrderState>) -> Result<Vec<Trade>> {
        let symbol = CanonicalSymbol::parse(symbol)?;
        let states = match state {
            Some(state) => vec![state],
            None => vec![OrderState::Done, OrderState::Cancel],
        };

        let mut batches = Vec::with_capacity(states.len());
        for state in states {
            let value = self.execute(request::my_trades(&symbol, state)).await?;
            batches.push(normalize::trades(&symbol, value)?);
        }

        let trades = normalize::merge_trades(batches);
        debug!(count = trades.len(), market = %symbol.market_code(), "trades merged");
        Ok(trades)
    }

    /// Place a limit order. Other order types are rejected before any network call.
    #[instrument(skip(self))]
    pub async fn create_order(
        &self,
        symbol: &str,
        order_type: OrderType,
        side: Side,
        amount: Decimal,
        price: Decimal,
    ) -> Result<OrderHandle> {
        let symbol = CanonicalSymbol::parse(symbol)?;
        let request =
            request::create_order(&symbol, order_type, side, amount, price, self.buy_fee_rate)?;
        let value = self.execute(request).await?;
        normalize::order_handle(value)
    }

    /// Cancel by vendor order id; returns the vendor acknowledgment unchanged
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, id: &str) -> Result<Value> {
        let request = request::cancel_order(id)?;
        self.execute(request).await
    }

    /// Build the transport-ready request, signing it when the endpoint is private
    pub fn sign(&self, request: &RequestDescriptor) -> Result<SignedEnvelope> {
        let auth_headers = if request.requires_auth {
            let endpoint = envelope::request_url(&self.base_url, request)?;
            let nonce = self.clock.now_millis();
            self.auth
                .authorize(request, endpoint.path(), &self.credentials, nonce)?
        } else {
            Headers::new()
        };
        SignedEnvelope::build(&self.base_url, request, auth_headers)
    }

    async fn execute(&self, request: RequestDescriptor) -> Result<Value> {
        let envelope = self.sign(&request)?;
        debug!(
            method = %envelope.method,
            path = envelope.url.path(),
            auth = request.requires_auth,
            "dispatching request"
        );

        let response = self.transport.perform(&envelope).await?;

        if let Some(Err(err)) = classify::classify_body(&response.body) {
            warn!(status = response.status, error = %err, "vendor rejected request");
            return Err(err);
        }
        if let Some(err) = self.transport.default_error(&response) {
            warn!(status = response.status, error = %err, "request failed");
            return Err(err);
        }

        let value: Value = serde_json::from_str(&response.body)
            .map_err(|e| BithumbError::malformed(format!("invalid JSON body: {e}")))?;
        classify::classify_value(&value)?;
        Ok(value)
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    if raw.ends_with('/') {
        Ok(Url::parse(raw)?)
    } else {
        Ok(Url::parse(&format!("{raw}/"))?)
    }
}
