//! # Configuration State
//!
//! Storefront configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BOOKSTORE_CURRENCY_CODE=USD                                        │
//! │     BOOKSTORE_CURRENCY_DECIMALS=2                                      │
//! │                                                                         │
//! │  2. TOML Config File (path in BOOKSTORE_CONFIG)                        │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     VND, no decimals, "₫" suffix                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! store_name = "Bookstore"
//! api_base_url = "https://api.bookstore.example/v1"
//! currency_code = "VND"
//! currency_symbol = "₫"
//! currency_decimals = 0
//! symbol_position = "suffix"
//! thousands_separator = "."
//! decimal_separator = ","
//! ```
//!
//! Configuration is read-only after loading, so no lock is needed.

use std::path::{Path, PathBuf};

use bookstore_core::Money;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Environment variable naming the TOML config file.
pub const CONFIG_PATH_VAR: &str = "BOOKSTORE_CONFIG";

const MAX_CURRENCY_DECIMALS: u32 = 4;

/// Where the currency symbol goes when formatting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPosition {
    /// `$10.00`
    Prefix,
    /// `200.000 ₫`
    #[default]
    Suffix,
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    /// Store name shown in the checkout header.
    pub store_name: String,

    /// Base URL of the bookstore REST API.
    pub api_base_url: String,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Decimal places shown. Amounts are rounded to this only when formatted.
    pub currency_decimals: u32,

    pub symbol_position: SymbolPosition,

    pub thousands_separator: char,

    pub decimal_separator: char,
}

impl Default for ConfigState {
    /// Returns default configuration suitable for development.
    fn default() -> Self {
        ConfigState {
            store_name: "Bookstore Dev".to_string(),
            api_base_url: "http://localhost:8080/api".to_string(),
            currency_code: "VND".to_string(),
            currency_symbol: "₫".to_string(),
            currency_decimals: 0,
            symbol_position: SymbolPosition::Suffix,
            thousands_separator: '.',
            decimal_separator: ',',
        }
    }
}

impl ConfigState {
    /// Loads configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(|key| std::env::var(key).ok())
    }

    /// Loads configuration using `lookup` for environment variables.
    pub fn load_from<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_PATH_VAR) {
            Some(path) => {
                info!(%path, "Loading config file");
                Self::from_file(Path::new(&path))?
            }
            None => Self::default(),
        };

        config.apply_env(&lookup)?;
        config.validate()?;

        debug!(
            currency = %config.currency_code,
            decimals = config.currency_decimals,
            api = %config.api_base_url,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Reads a TOML config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parses TOML config text. Missing keys keep their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    fn apply_env<F>(&mut self, lookup: &F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("BOOKSTORE_STORE_NAME") {
            self.store_name = name;
        }
        if let Some(url) = lookup("BOOKSTORE_API_BASE_URL") {
            self.api_base_url = url;
        }
        if let Some(code) = lookup("BOOKSTORE_CURRENCY_CODE") {
            self.currency_code = code;
        }
        if let Some(symbol) = lookup("BOOKSTORE_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }
        if let Some(decimals) = lookup("BOOKSTORE_CURRENCY_DECIMALS") {
            self.currency_decimals = decimals.trim().parse().map_err(|_| {
                ConfigError::InvalidValue("BOOKSTORE_CURRENCY_DECIMALS".to_string())
            })?;
        }
        if let Some(position) = lookup("BOOKSTORE_SYMBOL_POSITION") {
            self.symbol_position = match position.trim() {
                "prefix" => SymbolPosition::Prefix,
                "suffix" => SymbolPosition::Suffix,
                _ => {
                    return Err(ConfigError::InvalidValue(
                        "BOOKSTORE_SYMBOL_POSITION".to_string(),
                    ))
                }
            };
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.currency_decimals > MAX_CURRENCY_DECIMALS {
            return Err(ConfigError::InvalidValue("currency_decimals".to_string()));
        }
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://"))
        {
            return Err(ConfigError::InvalidValue("api_base_url".to_string()));
        }
        if self.thousands_separator == self.decimal_separator {
            return Err(ConfigError::InvalidValue("thousands_separator".to_string()));
        }
        Ok(())
    }

    /// Formats money for display.
    ///
    /// This is the only place amounts are rounded: to `currency_decimals`,
    /// midpoints away from zero.
    pub fn format_money(&self, money: Money) -> String {
        let rounded = money.round_dp(self.currency_decimals).amount();
        let text = format!("{:.*}", self.currency_decimals as usize, rounded.abs());
        let (whole, fraction) = match text.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (text.as_str(), None),
        };

        let mut number = group_thousands(whole, self.thousands_separator);
        if let Some(fraction) = fraction {
            number.push(self.decimal_separator);
            number.push_str(fraction);
        }

        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        match self.symbol_position {
            SymbolPosition::Prefix => format!("{sign}{}{number}", self.currency_symbol),
            SymbolPosition::Suffix => format!("{sign}{number} {}", self.currency_symbol),
        }
    }
}

fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.chars().count();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(c);
    }
    grouped
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Failed to read config file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}
