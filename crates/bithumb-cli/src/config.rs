/*
[INPUT]:  YAML configuration file, process environment
[OUTPUT]: Adapter configuration and resolved credentials
[POS]:    Configuration layer - exchange connection setup
[UPDATE]: When adding new configuration options
*/

use std::time::Duration;

use bithumb_adapter::{AdapterConfig, AuthScheme, ClientConfig, Credentials, DEFAULT_BASE_URL};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Top-level CLI configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default)]
    pub exchange: ExchangeConfig,
    /// API keys. Environment variables take precedence.
    #[serde(default)]
    pub credentials: CredentialsConfig,
}

/// Exchange connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExchangeConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// "bearer" (default) or "hmac"
    #[serde(default)]
    pub auth_scheme: AuthScheme,
    /// Fraction withheld from buy volume
    #[serde(default = "bithumb_adapter::default_buy_fee_rate")]
    pub buy_fee_rate: Decimal,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            auth_scheme: AuthScheme::default(),
            buy_fee_rate: bithumb_adapter::default_buy_fee_rate(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CredentialsConfig {
    #[serde(default)]
    pub access_key: Option<String>,
    #[serde(default)]
    pub secret_key: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl CliConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        Ok(config)
    }

    pub fn adapter_config(&self) -> AdapterConfig {
        AdapterConfig {
            base_url: self.exchange.base_url.clone(),
            auth_scheme: self.exchange.auth_scheme,
            buy_fee_rate: self.exchange.buy_fee_rate,
            client: ClientConfig {
                timeout: Duration::from_secs(self.exchange.timeout_secs),
                connect_timeout: Duration::from_secs(self.exchange.connect_timeout_secs),
            },
        }
    }

    /// Environment credentials, with gaps filled from the file
    pub fn credentials(&self) -> Credentials {
        self.credentials_over(Credentials::from_env())
    }

    pub fn credentials_over(&self, env: Credentials) -> Credentials {
        let file = Credentials::new(
            self.credentials.access_key.clone().unwrap_or_default(),
            self.credentials.secret_key.clone().unwrap_or_default(),
        );
        env.or(file)
    }
}
