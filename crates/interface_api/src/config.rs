//! API configuration

use serde::Deserialize;

use insurance_contract::ContractConfig;

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-line output
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// PostgreSQL URL; the ledger is kept in memory when unset
    pub database_url: Option<String>,
    /// Upper bound of the database pool
    pub max_connections: u32,
    /// Log level, used when `RUST_LOG` is unset
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
    /// Reject unparsable claim amounts instead of recording 0
    pub strict_claim_amount: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: None,
            max_connections: 10,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            strict_claim_amount: false,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_`-prefixed environment variables
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Contract settings carried by this configuration
    pub fn contract_config(&self) -> ContractConfig {
        ContractConfig {
            strict_claim_amount: self.strict_claim_amount,
        }
    }
}
