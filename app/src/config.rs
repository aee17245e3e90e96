//! Application configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use estate_types::{ChainId, WalletAddress};
use estate_wallet_core::{PaymentConfig, WalletBrand, DEFAULT_GAS_LIMIT, TREASURY_ADDRESS};

use crate::geo::OLA_MAPS_BASE_URL;
use crate::AppError;

/// Configuration for a TokenEstate client.
///
/// Loaded from a TOML file via [`AppConfig::from_toml_file`]; every field has
/// a default so a partial file is fine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory for locally persisted preferences.
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub wallet: WalletConfig,

    #[serde(default)]
    pub geocoder: GeocoderConfig,
}

/// Hosted listing database.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DataConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`.
    #[serde(default)]
    pub url: String,

    /// Public anon key.
    #[serde(default)]
    pub api_key: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WalletConfig {
    /// JSON-RPC endpoint of the wallet. Empty means no wallet installed.
    #[serde(default)]
    pub rpc_url: String,

    #[serde(default)]
    pub brand: WalletBrand,

    #[serde(default = "default_chain_id")]
    pub chain_id: u64,

    #[serde(default = "default_treasury")]
    pub treasury: String,

    #[serde(default = "default_gas_limit")]
    pub gas_limit: u64,

    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    #[serde(default = "default_confirmation_timeout_secs")]
    pub confirmation_timeout_secs: u64,

    /// How long the success screen shows before the purchase is recorded.
    #[serde(default = "default_success_delay_ms")]
    pub success_delay_ms: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeocoderConfig {
    #[serde(default = "default_geocoder_url")]
    pub base_url: String,

    /// Empty disables maps.
    #[serde(default)]
    pub api_key: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_state_dir() -> PathBuf {
    PathBuf::from("./tokenestate_data")
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_chain_id() -> u64 {
    ChainId::SEPOLIA.value()
}

fn default_treasury() -> String {
    TREASURY_ADDRESS.to_string()
}

fn default_gas_limit() -> u64 {
    DEFAULT_GAS_LIMIT
}

fn default_poll_interval_secs() -> u64 {
    2
}

fn default_confirmation_timeout_secs() -> u64 {
    300
}

fn default_success_delay_ms() -> u64 {
    2000
}

fn default_geocoder_url() -> String {
    OLA_MAPS_BASE_URL.to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, AppError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| AppError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, AppError> {
        toml::from_str(s).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, AppError> {
        toml::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// File holding persisted preferences.
    pub fn preferences_path(&self) -> PathBuf {
        self.state_dir.join("preferences.json")
    }
}

impl WalletConfig {
    pub fn payment_config(&self) -> Result<PaymentConfig, AppError> {
        let treasury = WalletAddress::parse(&self.treasury)
            .map_err(|e| AppError::Config(format!("treasury: {e}")))?;
        Ok(PaymentConfig {
            required_chain: ChainId::new(self.chain_id),
            treasury,
            gas_limit: self.gas_limit,
            success_delay: Duration::from_millis(self.success_delay_ms),
        })
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn confirmation_timeout(&self) -> Duration {
        Duration::from_secs(self.confirmation_timeout_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            state_dir: default_state_dir(),
            log_format: default_log_format(),
            log_level: default_log_level(),
            data: DataConfig::default(),
            wallet: WalletConfig::default(),
            geocoder: GeocoderConfig::default(),
        }
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            rpc_url: String::new(),
            brand: WalletBrand::default(),
            chain_id: default_chain_id(),
            treasury: default_treasury(),
            gas_limit: default_gas_limit(),
            poll_interval_secs: default_poll_interval_secs(),
            confirmation_timeout_secs: default_confirmation_timeout_secs(),
            success_delay_ms: default_success_delay_ms(),
        }
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoder_url(),
            api_key: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.wallet.chain_id, 11_155_111);
        let payment = config.wallet.payment_config().unwrap();
        assert_eq!(payment, PaymentConfig::default());
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            log_format = "json"

            [data]
            url = "https://project.example.co"
            api_key = "anon"

            [wallet]
            rpc_url = "http://127.0.0.1:8545"
            brand = "metamask"
            success_delay_ms = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.log_format, "json");
        assert_eq!(config.data.api_key, "anon");
        assert_eq!(config.wallet.brand, WalletBrand::MetaMask);
        assert_eq!(config.wallet.gas_limit, 100_000);
        assert!(config.wallet.payment_config().unwrap().success_delay.is_zero());
    }

    #[test]
    fn bad_treasury_is_a_config_error() {
        let config = AppConfig::from_toml_str("[wallet]\ntreasury = \"0x12\"").unwrap();
        assert!(matches!(
            config.wallet.payment_config(),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokenestate.toml");
        std::fs::write(&path, "state_dir = \"/var/lib/tokenestate\"\n[geocoder]\napi_key = \"k\"").unwrap();

        let config = AppConfig::from_toml_file(path.to_str().unwrap()).unwrap();
        assert_eq!(
            config.preferences_path(),
            PathBuf::from("/var/lib/tokenestate/preferences.json")
        );
        assert_eq!(config.geocoder.base_url, OLA_MAPS_BASE_URL);
        assert!(AppConfig::from_toml_file(dir.path().join("missing.toml").to_str().unwrap()).is_err());
    }

    #[test]
    fn round_trips_through_toml() {
        let config = AppConfig::default();
        let text = config.to_toml_string().unwrap();
        let back = AppConfig::from_toml_str(&text).unwrap();
        assert_eq!(back.state_dir, config.state_dir);
        assert_eq!(back.wallet.treasury, TREASURY_ADDRESS);
    }
}
