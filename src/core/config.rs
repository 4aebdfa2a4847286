//! Configuration management for Cartwright
//!
//! Two configuration records with different lifetimes:
//!
//! - [`CheckoutConfig`] holds the purchase data (contact, shipping, card).
//!   It is read from the process environment exactly once at startup,
//!   validated as a whole, and never mutated afterwards.
//! - [`RunnerConfig`] holds everything about *how* the run is driven:
//!   storefront URL, product title, WebDriver endpoint, and timings.
//!   Priority: CLI args > env vars > config file > defaults.
//!
//! Config file location: ~/.config/cartwright/config.toml

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::error::{CartwrightError, Result};

/// Environment variable names for the required checkout fields, in the
/// order they are reported when missing.
const REQUIRED_VARS: [&str; 9] = [
    "EMAIL",
    "FULL_NAME",
    "ADDRESS",
    "CITY",
    "STATE",
    "ZIP_CODE",
    "CARD_NUMBER",
    "CARD_EXPIRY",
    "CARD_CVC",
];

/// Raw capture of the checkout environment variables before validation.
///
/// Splitting capture from validation keeps the missing/present
/// classification a pure function of this record.
#[derive(Debug, Clone, Default)]
pub struct RawCheckoutEnv {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub card_number: Option<String>,
    pub card_expiry: Option<String>,
    pub card_cvc: Option<String>,
}

impl RawCheckoutEnv {
    /// Capture the checkout variables from the process environment.
    ///
    /// Loads a `.env` file first if one exists. Empty values are treated
    /// the same as unset.
    pub fn capture() -> Self {
        let _ = dotenvy::dotenv();

        Self {
            email: non_empty_var("EMAIL"),
            full_name: non_empty_var("FULL_NAME"),
            address: non_empty_var("ADDRESS"),
            city: non_empty_var("CITY"),
            state: non_empty_var("STATE"),
            zip_code: non_empty_var("ZIP_CODE"),
            country: non_empty_var("COUNTRY"),
            phone: non_empty_var("PHONE"),
            card_number: non_empty_var("CARD_NUMBER"),
            card_expiry: non_empty_var("CARD_EXPIRY"),
            card_cvc: non_empty_var("CARD_CVC"),
        }
    }

    /// Names of every required variable absent from this capture.
    ///
    /// Returns the complete list in declaration order, never a prefix.
    pub fn missing_required(&self) -> Vec<String> {
        let fields: [(&str, &Option<String>); 9] = [
            ("EMAIL", &self.email),
            ("FULL_NAME", &self.full_name),
            ("ADDRESS", &self.address),
            ("CITY", &self.city),
            ("STATE", &self.state),
            ("ZIP_CODE", &self.zip_code),
            ("CARD_NUMBER", &self.card_number),
            ("CARD_EXPIRY", &self.card_expiry),
            ("CARD_CVC", &self.card_cvc),
        ];

        fields
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| name.to_string())
            .collect()
    }

    /// Validate the capture into an immutable [`CheckoutConfig`].
    pub fn validate(self) -> Result<CheckoutConfig> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(CartwrightError::MissingConfig(missing));
        }

        // Unwraps guarded by the missing_required check above.
        Ok(CheckoutConfig {
            email: self.email.unwrap(),
            full_name: self.full_name.unwrap(),
            address: self.address.unwrap(),
            city: self.city.unwrap(),
            state: self.state.unwrap(),
            zip_code: self.zip_code.unwrap(),
            country: self.country,
            phone: self.phone,
            card_number: self.card_number.unwrap(),
            card_expiry: self.card_expiry.unwrap(),
            card_cvc: self.card_cvc.unwrap(),
        })
    }
}

/// Validated purchase data for one checkout run.
///
/// Immutable once constructed; lives for the whole process.
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    pub email: String,
    pub full_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    /// Optional; country selection is skipped when absent
    pub country: Option<String>,
    /// Optional; phone field is skipped when absent
    pub phone: Option<String>,
    pub card_number: String,
    pub card_expiry: String,
    pub card_cvc: String,
}

impl CheckoutConfig {
    /// Load and validate the checkout configuration from the environment.
    ///
    /// Fails with the complete list of missing required variable names
    /// before any browser action happens.
    pub fn from_env() -> Result<Self> {
        RawCheckoutEnv::capture().validate()
    }

    /// The environment variable names this configuration requires.
    pub fn required_vars() -> &'static [&'static str] {
        &REQUIRED_VARS
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Runner configuration - where to go and how long to wait
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Storefront landing page URL
    pub storefront_url: String,
    /// Visible product title matched inside a heading element
    pub product_title: String,
    /// Href fragment identifying the product detail page link
    pub product_detail_href: String,
    /// WebDriver endpoint (geckodriver / Selenium)
    pub webdriver_url: String,
    /// Whether to run the browser headless
    pub headless: bool,
    /// Accept self-signed certificates on test storefronts
    pub accept_insecure_certs: bool,
    /// Pause between individual card-field keystrokes in ms
    pub typing_interval_ms: u64,
    /// Wait and settle timings
    #[serde(default)]
    pub timeouts: Timeouts,
}

/// Bounded waits and settle delays, all in seconds unless noted.
///
/// The settle delays mirror the fixed sleeps the hosted payment form was
/// tuned against; they are configuration, not derived values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeouts {
    /// Bounded wait for required elements
    pub element_wait_secs: u64,
    /// Bounded wait for individually optional fields
    pub optional_wait_secs: u64,
    /// Polling interval for all bounded waits, in ms
    pub poll_interval_ms: u64,
    /// Settle delay after opening the storefront
    pub page_settle_secs: u64,
    /// Settle delay after hovering the product card
    pub hover_settle_secs: u64,
    /// Settle delay after the payment form appears
    pub form_settle_secs: u64,
    /// Settle delay for the address-suggestion widget
    pub suggestion_settle_secs: u64,
    /// Settle delay before the submit click
    pub submit_settle_secs: u64,
    /// How long the browser stays open after the run, for inspection
    pub observation_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            element_wait_secs: 10,
            optional_wait_secs: 10,
            poll_interval_ms: 250,
            page_settle_secs: 3,
            hover_settle_secs: 2,
            form_settle_secs: 2,
            suggestion_settle_secs: 3,
            submit_settle_secs: 3,
            observation_secs: 10,
        }
    }
}

impl Timeouts {
    /// Bounded wait for required elements
    pub fn element_wait(&self) -> Duration {
        Duration::from_secs(self.element_wait_secs)
    }

    /// Bounded wait for optional fields
    pub fn optional_wait(&self) -> Duration {
        Duration::from_secs(self.optional_wait_secs)
    }

    /// Polling interval for bounded waits
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            storefront_url: env::var("CARTWRIGHT_STOREFRONT_URL")
                .unwrap_or_else(|_| "https://p0nder.com/".to_string()),
            product_title: env::var("CARTWRIGHT_PRODUCT_TITLE")
                .unwrap_or_else(|_| "Spider T-Shirt Purple".to_string()),
            product_detail_href: env::var("CARTWRIGHT_PRODUCT_DETAIL_HREF")
                .unwrap_or_else(|_| "inStock-pages/stock3.html".to_string()),
            webdriver_url: env::var("CARTWRIGHT_WEBDRIVER_URL")
                .unwrap_or_else(|_| "http://localhost:4444".to_string()),
            headless: env::var("CARTWRIGHT_HEADLESS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            accept_insecure_certs: false,
            typing_interval_ms: env::var("CARTWRIGHT_TYPING_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(50),
            timeouts: Timeouts::default(),
        }
    }
}

impl RunnerConfig {
    /// Get the config directory path
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cartwright")
    }

    /// Get the config file path
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from file, environment, and defaults
    pub fn load() -> Self {
        let _ = dotenvy::dotenv();

        if let Ok(config) = Self::load_from_file() {
            return config;
        }

        // Fall back to defaults (which respect env vars)
        Self::default()
    }

    /// Load configuration from file only
    pub fn load_from_file() -> Result<Self> {
        let config_path = Self::config_file();

        if !config_path.exists() {
            return Err(CartwrightError::config("Config file not found"));
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|e| CartwrightError::config(format!("Failed to read config: {}", e)))?;

        let config: RunnerConfig = toml::from_str(&content)
            .map_err(|e| CartwrightError::config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir();
        let config_path = Self::config_file();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir).map_err(|e| {
                CartwrightError::config(format!("Failed to create config dir: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| CartwrightError::config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, content)
            .map_err(|e| CartwrightError::config(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Pause between individual card-field keystrokes
    pub fn typing_interval(&self) -> Duration {
        Duration::from_millis(self.typing_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_capture() -> RawCheckoutEnv {
        RawCheckoutEnv {
            email: Some("buyer@example.com".to_string()),
            full_name: Some("Test Buyer".to_string()),
            address: Some("1 Main St".to_string()),
            city: Some("Springfield".to_string()),
            state: Some("Illinois".to_string()),
            zip_code: Some("62701".to_string()),
            country: Some("United States".to_string()),
            phone: None,
            card_number: Some("4242424242424242".to_string()),
            card_expiry: Some("12/34".to_string()),
            card_cvc: Some("123".to_string()),
        }
    }

    #[test]
    fn test_complete_capture_validates() {
        let config = full_capture().validate().unwrap();
        assert_eq!(config.email, "buyer@example.com");
        assert_eq!(config.country.as_deref(), Some("United States"));
        assert!(config.phone.is_none());
    }

    #[test]
    fn test_missing_fields_listed_exactly() {
        let mut capture = full_capture();
        capture.email = None;
        capture.zip_code = None;
        capture.card_cvc = None;

        let missing = capture.missing_required();
        assert_eq!(missing, vec!["EMAIL", "ZIP_CODE", "CARD_CVC"]);
    }

    #[test]
    fn test_all_missing_lists_every_required_name() {
        let missing = RawCheckoutEnv::default().missing_required();
        assert_eq!(missing.len(), REQUIRED_VARS.len());
        for name in REQUIRED_VARS {
            assert!(missing.iter().any(|m| m == name), "missing {}", name);
        }
    }

    #[test]
    fn test_optional_fields_never_reported() {
        let mut capture = full_capture();
        capture.country = None;
        capture.phone = None;
        assert!(capture.missing_required().is_empty());
        assert!(capture.validate().is_ok());
    }

    #[test]
    fn test_validation_is_idempotent() {
        let mut capture = full_capture();
        capture.state = None;

        let first = capture.missing_required();
        let second = capture.missing_required();
        assert_eq!(first, second);
    }

    #[test]
    fn test_validate_error_carries_names() {
        let mut capture = full_capture();
        capture.card_number = None;

        match capture.validate() {
            Err(CartwrightError::MissingConfig(names)) => {
                assert_eq!(names, vec!["CARD_NUMBER"]);
            }
            other => panic!("expected MissingConfig, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_default_runner_config() {
        let config = RunnerConfig::default();
        assert_eq!(config.product_title, "Spider T-Shirt Purple");
        assert_eq!(config.typing_interval_ms, 50);
        assert_eq!(config.timeouts.element_wait_secs, 10);
        assert_eq!(config.timeouts.submit_settle_secs, 3);
        assert_eq!(config.timeouts.observation_secs, 10);
    }

    #[test]
    fn test_runner_config_serialization() {
        let config = RunnerConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("storefront_url"));
        assert!(toml_str.contains("typing_interval_ms"));

        let parsed: RunnerConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.product_title, config.product_title);
    }

    #[test]
    fn test_config_dir() {
        let dir = RunnerConfig::config_dir();
        assert!(dir.to_string_lossy().contains("cartwright"));
    }
}
