/*
[INPUT]:  CLI arguments, optional YAML configuration file, BITHUMB_* environment
[OUTPUT]: Pretty-printed JSON results on stdout
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags or startup flow
*/

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bithumb_adapter::BithumbAdapter;
use bithumb_cli::{CliConfig, Command, commands};

#[derive(Parser, Debug)]
#[command(name = "bithumb-cli", version, about = "Bithumb signed request client")]
struct Cli {
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
    /// Print the signed requests instead of sending them
    #[arg(long = "dry-run")]
    dry_run: bool,
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    let config = match &args.config_path {
        Some(path) => load_config(path)?,
        None => CliConfig::default(),
    };
    info!(
        base_url = %config.exchange.base_url,
        auth_scheme = %config.exchange.auth_scheme,
        dry_run = args.dry_run,
        "configuration loaded"
    );

    let adapter = BithumbAdapter::new(config.adapter_config(), config.credentials())
        .context("build adapter")?;

    let output = if args.dry_run {
        let planned = commands::plan(&adapter, &args.command)?;
        serde_json::to_value(planned)?
    } else {
        commands::run(&adapter, &args.command)
            .await
            .with_context(|| format!("{:?} failed", args.command))?
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn load_config(path: &PathBuf) -> Result<CliConfig> {
    let path_str = path
        .to_str()
        .context("config path must be valid utf-8")?;
    CliConfig::from_file(path_str).context("load config")
}
