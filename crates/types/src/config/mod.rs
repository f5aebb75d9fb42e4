// Path: crates/types/src/config/mod.rs

//! Configuration structures for the CFP registry client.
use crate::error::ConfigError;
use crate::prelude::OptionExt;
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level client configuration.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Base URL of the registry REST backend.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// URL of the wallet JSON-RPC endpoint.
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    /// Addresses of the deployed contracts.
    #[serde(default)]
    pub contracts: ContractAddresses,
    /// Retry and timeout settings for the REST backend.
    #[serde(default)]
    pub http: HttpConfig,
    /// Wallet polling and transaction confirmation settings.
    #[serde(default)]
    pub wallet: WalletConfig,
    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_api_url() -> String {
    "http://127.0.0.1:5000/".to_string()
}
fn default_rpc_url() -> String {
    "http://127.0.0.1:7545".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            rpc_url: default_rpc_url(),
            contracts: ContractAddresses::default(),
            http: HttpConfig::default(),
            wallet: WalletConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Reads and parses a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }
}

/// Addresses of the contracts the client talks to.
///
/// Every address is optional; actions that need a missing one fail with
/// `ConfigError::MissingContract` before any network call.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ContractAddresses {
    /// The CFP factory (`create`, `registerProposal`, `register`, `authorize`).
    #[serde(default)]
    pub cfp_factory: Option<Address>,
    /// The public resolver (`name`, `addr`, `setAddr`).
    #[serde(default)]
    pub public_resolver: Option<Address>,
    /// The ENS registry (`resolver`, `setResolver`).
    #[serde(default)]
    pub ens_registry: Option<Address>,
    /// The reverse registrar (`setName`).
    #[serde(default)]
    pub reverse_registrar: Option<Address>,
    /// The FIFS registrar for `users.eth`.
    #[serde(default)]
    pub user_registrar: Option<Address>,
}

impl ContractAddresses {
    /// The factory address, or the error naming the missing setting.
    pub fn cfp_factory(&self) -> Result<Address, ConfigError> {
        self.cfp_factory
            .required(ConfigError::MissingContract("cfp_factory"))
    }

    /// The public resolver address, or the error naming the missing setting.
    pub fn public_resolver(&self) -> Result<Address, ConfigError> {
        self.public_resolver
            .required(ConfigError::MissingContract("public_resolver"))
    }

    /// The ENS registry address, or the error naming the missing setting.
    pub fn ens_registry(&self) -> Result<Address, ConfigError> {
        self.ens_registry
            .required(ConfigError::MissingContract("ens_registry"))
    }

    /// The reverse registrar address, or the error naming the missing setting.
    pub fn reverse_registrar(&self) -> Result<Address, ConfigError> {
        self.reverse_registrar
            .required(ConfigError::MissingContract("reverse_registrar"))
    }

    /// The `users.eth` registrar address, or the error naming the missing setting.
    pub fn user_registrar(&self) -> Result<Address, ConfigError> {
        self.user_registrar
            .required(ConfigError::MissingContract("user_registrar"))
    }
}

/// Retry and timeout settings for REST requests.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {
    /// How many times an idempotent request is retried on 429/5xx or transport errors.
    #[serde(default = "default_http_retries")]
    pub retries: usize,
    /// The first backoff delay; each retry doubles it.
    #[serde(default = "default_base_backoff_ms")]
    pub base_backoff_ms: u64,
    /// The upper bound on a single backoff delay.
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
    /// Per-request timeout.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_http_retries() -> usize {
    3
}
fn default_base_backoff_ms() -> u64 {
    200
}
fn default_max_backoff_ms() -> u64 {
    2_000
}
fn default_request_timeout_secs() -> u64 {
    15
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            retries: default_http_retries(),
            base_backoff_ms: default_base_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Wallet session and transaction confirmation settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WalletConfig {
    /// How often the session polls `eth_accounts` for account changes.
    #[serde(default = "default_account_poll_ms")]
    pub account_poll_ms: u64,
    /// How often a pending transaction's receipt is polled.
    #[serde(default = "default_receipt_poll_ms")]
    pub receipt_poll_ms: u64,
    /// How long to wait for a receipt before giving up.
    #[serde(default = "default_receipt_timeout_secs")]
    pub receipt_timeout_secs: u64,
}

fn default_account_poll_ms() -> u64 {
    1_000
}
fn default_receipt_poll_ms() -> u64 {
    500
}
fn default_receipt_timeout_secs() -> u64 {
    120
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            account_poll_ms: default_account_poll_ms(),
            receipt_poll_ms: default_receipt_poll_ms(),
            receipt_timeout_secs: default_receipt_timeout_secs(),
        }
    }
}

/// Selects the log line format.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Log output settings.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// The output format.
    #[serde(default)]
    pub format: LogFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let cfg = ClientConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, ClientConfig::default());
        assert_eq!(cfg.api_url, "http://127.0.0.1:5000/");
        assert_eq!(cfg.http.retries, 3);
        assert!(cfg.contracts.cfp_factory().is_err());
    }

    #[test]
    fn parses_contract_addresses_and_sections() {
        let cfg = ClientConfig::from_toml_str(
            r#"
            api_url = "http://registry.local/"

            [contracts]
            cfp_factory = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"

            [wallet]
            receipt_timeout_secs = 5

            [logging]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.api_url, "http://registry.local/");
        assert!(cfg.contracts.cfp_factory().is_ok());
        assert_eq!(
            cfg.contracts.public_resolver(),
            Err(ConfigError::MissingContract("public_resolver"))
        );
        assert_eq!(cfg.wallet.receipt_timeout_secs, 5);
        assert_eq!(cfg.wallet.receipt_poll_ms, 500);
        assert_eq!(cfg.logging.format, LogFormat::Json);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            ClientConfig::from_toml_str("api_uri = \"x\""),
            Err(ConfigError::Parse(_))
        ));
    }
}
