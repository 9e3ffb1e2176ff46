use std::process::Command;

use bithumb_cli::commands;
use bithumb_cli::Command as CliCommand;
use bithumb_adapter::{AdapterConfig, BithumbAdapter, Credentials};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn run_cli(args: &[&str]) -> std::process::Output {
    let binary_path = env!("CARGO_BIN_EXE_bithumb-cli");
    let config_path = format!("{}/config/sample.yaml", env!("CARGO_MANIFEST_DIR"));

    Command::new(binary_path)
        .arg("--config")
        .arg(config_path)
        .args(args)
        .env_remove("BITHUMB_ACCESS_KEY")
        .env_remove("BITHUMB_SECRET_KEY")
        .output()
        .expect("Failed to start bithumb-cli binary")
}

#[test]
fn dry_run_prints_signed_request_without_secrets() {
    let output = run_cli(&["--dry-run", "balance"]);
    assert!(
        output.status.success(),
        "Process exited with non-zero status: {}\nStderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let planned: Value = serde_json::from_str(&stdout).expect("stdout is json");
    assert_eq!(planned[0]["method"], "GET");
    assert_eq!(planned[0]["url"], "https://api.bithumb.com/v1/accounts");
    assert!(!stdout.contains("sample-secret-key"));
}

#[test]
fn dry_run_rejects_market_order() {
    let output = run_cli(&[
        "--dry-run", "order", "BTC/KRW", "--side", "buy", "--amount", "1", "--price", "1",
        "--type", "market",
    ]);
    assert!(!output.status.success());
}

#[tokio::test]
async fn orderbook_command_renders_canonical_book() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/orderbook"))
        .and(query_param("markets", "KRW-ETH"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "market": "KRW-ETH",
            "timestamp": 1_700_000_000_000_i64,
            "orderbook_units": [{"bid_price": 10, "bid_size": 1, "ask_price": 11, "ask_size": 2}]
        }])))
        .mount(&server)
        .await;

    let config = AdapterConfig {
        base_url: format!("{}/v1", server.uri()),
        ..AdapterConfig::default()
    };
    let adapter = BithumbAdapter::new(config, Credentials::anonymous()).unwrap();
    let command = CliCommand::Orderbook {
        symbol: "ETH/KRW".to_string(),
    };

    let value = commands::run(&adapter, &command).await.unwrap();
    assert_eq!(value["symbol"], "ETH/KRW");
    assert_eq!(value["bids"], json!([[10.0, 1.0]]));
    assert_eq!(value["asks"], json!([[11.0, 2.0]]));
}
