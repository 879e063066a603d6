//! # Configuration State
//!
//! Storefront configuration loaded at startup.
//!
//! ## Configuration Sources (later wins)
//! 1. Defaults (this file)
//! 2. Config file (`storefront.toml`, or the path in `BLIN_CONFIG`)
//! 3. Environment variables (`BLIN_*`)
//!
//! Read-only after load; `validate` runs once at the end.

use std::path::{Path, PathBuf};

use blin_core::{
    Money, CART_NOTICE_MS, CONSENT_PROMPT_DELAY_MS, CONSENT_VALIDITY_DAYS, DEFAULT_CART_SLOT,
    DEFAULT_CONSENT_SLOT, FORM_NOTICE_MS,
};
use blin_storage::StorageConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Longest consent window a config may ask for (100 years).
pub const MAX_CONSENT_VALIDITY_DAYS: i64 = 36_500;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file exists but could not be read.
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema.
    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// An environment override could not be parsed.
    #[error("Invalid value for {var}: '{value}'")]
    InvalidEnv { var: &'static str, value: String },

    /// A value is outside what the storefront accepts.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    /// Site name, used in log lines
    pub site_name: String,

    /// Cart button label, e.g. "Корзина (3)"
    pub cart_label: String,

    /// Text shown by an empty cart detail view
    pub empty_cart_text: String,

    /// Appended to every formatted price
    pub currency_suffix: String,

    /// Slot directory. Defaults to the platform data dir.
    pub data_dir: Option<PathBuf>,

    /// Keep slots in memory only
    pub ephemeral: bool,

    /// Slot key of the cart
    pub cart_slot: String,

    /// Slot key of the consent flag
    pub consent_slot: String,

    /// How long an accepted consent stays valid
    pub consent_validity_days: i64,

    /// Delay before the consent prompt appears
    pub consent_prompt_delay_ms: u64,

    /// Auto-dismiss delay of "added to cart" notices
    pub cart_notice_ms: u64,

    /// Auto-dismiss delay of hotline form notices
    pub form_notice_ms: u64,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            site_name: "Блинная".to_string(),
            cart_label: "Корзина".to_string(),
            empty_cart_text: "Корзина пуста".to_string(),
            currency_suffix: "руб.".to_string(),
            data_dir: None,
            ephemeral: false,
            cart_slot: DEFAULT_CART_SLOT.to_string(),
            consent_slot: DEFAULT_CONSENT_SLOT.to_string(),
            consent_validity_days: CONSENT_VALIDITY_DAYS,
            consent_prompt_delay_ms: CONSENT_PROMPT_DELAY_MS,
            cart_notice_ms: CART_NOTICE_MS,
            form_notice_ms: FORM_NOTICE_MS,
        }
    }
}

impl ConfigState {
    // =========================================================================
    // Loading
    // =========================================================================

    /// Loads configuration: defaults, then the file, then `BLIN_*` env vars.
    ///
    /// `path = None` uses the platform config dir. A missing file is fine.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(Self::default_config_path);

        let mut config = match &path {
            Some(path) if path.exists() => Self::from_file(path)?,
            Some(path) => {
                debug!(?path, "No config file, using defaults");
                ConfigState::default()
            }
            None => ConfigState::default(),
        };

        config.apply_overrides(|var| std::env::var(var).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(?path, "Loaded config file");
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Applies `BLIN_*` overrides. `lookup` is `std::env::var` outside tests.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("BLIN_DATA_DIR") {
            debug!(data_dir = %dir, "Overriding data dir from environment");
            self.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(value) = lookup("BLIN_EPHEMERAL") {
            self.ephemeral = match value.to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        var: "BLIN_EPHEMERAL",
                        value,
                    })
                }
            };
        }

        if let Some(key) = lookup("BLIN_CART_SLOT") {
            self.cart_slot = key;
        }

        if let Some(key) = lookup("BLIN_CONSENT_SLOT") {
            self.consent_slot = key;
        }

        if let Some(label) = lookup("BLIN_CART_LABEL") {
            self.cart_label = label;
        }

        if let Some(suffix) = lookup("BLIN_CURRENCY_SUFFIX") {
            self.currency_suffix = suffix;
        }

        if let Some(days) = parse_env(&lookup, "BLIN_CONSENT_DAYS")? {
            self.consent_validity_days = days;
        }

        if let Some(ms) = parse_env(&lookup, "BLIN_CONSENT_DELAY_MS")? {
            self.consent_prompt_delay_ms = ms;
        }

        if let Some(ms) = parse_env(&lookup, "BLIN_CART_NOTICE_MS")? {
            self.cart_notice_ms = ms;
        }

        if let Some(ms) = parse_env(&lookup, "BLIN_FORM_NOTICE_MS")? {
            self.form_notice_ms = ms;
        }

        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cart_slot.trim().is_empty() || self.consent_slot.trim().is_empty() {
            return Err(ConfigError::Invalid("slot keys must not be empty".into()));
        }

        if self.cart_slot == self.consent_slot {
            return Err(ConfigError::Invalid(format!(
                "cart and consent share the slot '{}'",
                self.cart_slot
            )));
        }

        if !(1..=MAX_CONSENT_VALIDITY_DAYS).contains(&self.consent_validity_days) {
            return Err(ConfigError::Invalid(format!(
                "consent_validity_days must be between 1 and {}",
                MAX_CONSENT_VALIDITY_DAYS
            )));
        }

        if self.cart_label.trim().is_empty() {
            return Err(ConfigError::Invalid("cart_label must not be empty".into()));
        }

        Ok(())
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("ru", "blin", "storefront")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    // =========================================================================
    // Derived Settings
    // =========================================================================

    /// Storage settings. `default_dir` is used when no data dir is configured.
    pub fn storage_config(&self, default_dir: Option<PathBuf>) -> StorageConfig {
        let base = match (self.ephemeral, self.data_dir.clone().or(default_dir)) {
            (false, Some(dir)) => StorageConfig::new(dir),
            _ => StorageConfig::in_memory(),
        };
        base.cart_key(self.cart_slot.clone())
            .consent_key(self.consent_slot.clone())
    }

    /// Formats a price for display.
    ///
    /// ## Example
    /// ```rust,ignore
    /// assert_eq!(config.format_price(Money::from_units(250)), "250 руб.");
    /// ```
    pub fn format_price(&self, amount: Money) -> String {
        if self.currency_suffix.is_empty() {
            amount.to_string()
        } else {
            format!("{} {}", amount, self.currency_suffix)
        }
    }
}

fn parse_env<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { var, value }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ConfigState::default();
        assert_eq!(config.cart_slot, "blinCart");
        assert_eq!(config.consent_slot, "blin_cookie_consent");
        assert_eq!(config.consent_validity_days, 90);
        assert_eq!(config.cart_notice_ms, 2000);
        assert_eq!(config.form_notice_ms, 5000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_format_price() {
        let mut config = ConfigState::default();
        assert_eq!(config.format_price(Money::from_units(250)), "250 руб.");

        config.currency_suffix.clear();
        assert_eq!(config.format_price(Money::from_units(250)), "250");
    }

    #[test]
    fn test_toml_partial_file() {
        let config = ConfigState::from_toml(
            r#"
            cart_label = "Cart"
            cart_notice_ms = 500
            "#,
        )
        .unwrap();

        assert_eq!(config.cart_label, "Cart");
        assert_eq!(config.cart_notice_ms, 500);
        assert_eq!(config.form_notice_ms, 5000);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        std::fs::write(&path, "consent_validity_days = 30\n").unwrap();

        let config = ConfigState::from_file(&path).unwrap();
        assert_eq!(config.consent_validity_days, 30);
    }

    #[test]
    fn test_bad_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        std::fs::write(&path, "cart_notice_ms = \"soon\"\n").unwrap();

        assert!(matches!(
            ConfigState::from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ConfigState::default();
        config
            .apply_overrides(env(&[
                ("BLIN_DATA_DIR", "/tmp/blin"),
                ("BLIN_EPHEMERAL", "true"),
                ("BLIN_CONSENT_DAYS", "7"),
                ("BLIN_CART_NOTICE_MS", "100"),
            ]))
            .unwrap();

        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/blin")));
        assert!(config.ephemeral);
        assert_eq!(config.consent_validity_days, 7);
        assert_eq!(config.cart_notice_ms, 100);
    }

    #[test]
    fn test_invalid_env_value() {
        let mut config = ConfigState::default();
        let err = config
            .apply_overrides(env(&[("BLIN_FORM_NOTICE_MS", "later")]))
            .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidEnv {
                var: "BLIN_FORM_NOTICE_MS",
                ..
            }
        ));
    }

    #[test]
    fn test_validation() {
        let mut config = ConfigState::default();
        config.consent_slot = config.cart_slot.clone();
        assert!(config.validate().is_err());

        let mut config = ConfigState::default();
        config.consent_validity_days = 0;
        assert!(config.validate().is_err());

        config.consent_validity_days = MAX_CONSENT_VALIDITY_DAYS;
        assert!(config.validate().is_ok());
        config.consent_validity_days = MAX_CONSENT_VALIDITY_DAYS + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_huge_consent_days_from_env_fail_validation() {
        let mut config = ConfigState::default();
        config
            .apply_overrides(env(&[("BLIN_CONSENT_DAYS", "9223372036854775807")]))
            .unwrap();

        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_storage_config() {
        let mut config = ConfigState::default();
        let storage = config.storage_config(Some(PathBuf::from("/data")));
        assert_eq!(storage.data_dir, Some(PathBuf::from("/data")));

        config.ephemeral = true;
        assert_eq!(config.storage_config(Some(PathBuf::from("/data"))).data_dir, None);
    }
}
