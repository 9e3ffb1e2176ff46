/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for bithumb-adapter tests

use std::sync::Arc;

use bithumb_adapter::{
    AdapterConfig, AuthScheme, BithumbAdapter, Credentials, FixedClock, ReqwestTransport,
};
use serde_json::{Value, json};
use wiremock::MockServer;

pub const TEST_NOW_MS: u64 = 1_700_000_000_000;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

pub fn test_credentials() -> Credentials {
    Credentials::new("test-access-key", "test-secret")
}

/// Adapter pointed at the mock server with a frozen clock
pub fn adapter_for(server: &MockServer, scheme: AuthScheme, credentials: Credentials) -> BithumbAdapter {
    let config = AdapterConfig {
        base_url: format!("{}/v1/", server.uri()),
        auth_scheme: scheme,
        ..AdapterConfig::default()
    };
    let transport = ReqwestTransport::with_config(config.client.clone()).expect("transport");
    BithumbAdapter::with_parts(
        config,
        credentials,
        Arc::new(transport),
        Arc::new(FixedClock(TEST_NOW_MS)),
    )
    .expect("adapter")
}

#[allow(dead_code)]
pub fn orderbook_fixture() -> Value {
    json!([{
        "market": "KRW-BTC",
        "timestamp": 1_700_000_000_123_i64,
        "total_ask_size": 2.0,
        "total_bid_size": 1.0,
        "orderbook_units": [
            {"ask_price": 101.0, "bid_price": 100.0, "ask_size": 2.0, "bid_size": 1.0}
        ]
    }])
}

#[allow(dead_code)]
pub fn accounts_fixture() -> Value {
    json!([
        {"currency": "KRW", "balance": "1000000.0", "locked": "0.0", "avg_buy_price": "0"},
        {"currency": "BTC", "balance": "0.5", "locked": "0.25", "avg_buy_price": "50000000"}
    ])
}

/// Vendor order record as returned by the order history endpoint
#[allow(dead_code)]
pub fn order_fixture(id: &str, side: &str, created_at: &str, volume: &str, price: &str, fee: &str) -> Value {
    json!({
        "uuid": id,
        "side": side,
        "ord_type": "limit",
        "price": price,
        "state": "done",
        "market": "KRW-BTC",
        "created_at": created_at,
        "volume": volume,
        "remaining_volume": "0",
        "executed_volume": volume,
        "paid_fee": fee,
        "trades_count": 1
    })
}
