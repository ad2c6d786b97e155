//! # Pricing Configuration
//!
//! Loads the venue tariff from defaults, a TOML file and the environment.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     VENUE_SERVICE_TAX_BPS=2000                                         │
//! │     VENUE_HOUSE_FEE=2000                                               │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/backoffice/pricing.toml (Linux)                          │
//! │     ~/Library/Application Support/com.venue.backoffice/pricing.toml    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     The house tariff: BAR, COUNTER, VIP_A, VIP_B at 20% service tax    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # pricing.toml
//! [venue]
//! name = "Main Floor"
//!
//! [tariff]
//! service_tax = 2000  # basis points
//!
//! [tariff.surcharges]
//! nomination_unit_price = 1000
//! inhouse_unit_price = 1000
//! house_fee = 2000
//! single_charge = 2000
//!
//! [[tariff.plans]]
//! plan = "BAR"
//! set = { base_price = 3000, base_duration_minutes = 90, extension_unit_minutes = 30, extension_price = 1000 }
//!
//! [[tariff.plans]]
//! plan = "COUNTER"
//! set = { base_price = 8000, base_duration_minutes = 60, extension_unit_minutes = 10, extension_price = 1000 }
//!
//! [[tariff.plans]]
//! plan = "VIP_A"
//! set = { base_price = 12000, base_duration_minutes = 120, extension_unit_minutes = 30, extension_price = 10000 }
//! room = { base_price = 10000, base_duration_minutes = 120, extension_unit_minutes = 60, extension_price = 10000 }
//!
//! [[tariff.plans]]
//! plan = "VIP_B"
//! set = { base_price = 15000, base_duration_minutes = 120, extension_unit_minutes = 30, extension_price = 12000 }
//! room = { base_price = 12000, base_duration_minutes = 120, extension_unit_minutes = 60, extension_price = 12000 }
//! ```
//!
//! Every key is optional. A file without `[[tariff.plans]]` keeps the house
//! plans; a file that lists any plan must list every plan, and a partial
//! table is rejected rather than silently mixed with defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use venue_core::validation::validate_tax_rate_bps;
use venue_core::{Money, Tariff, TaxRate};

use crate::error::{CheckoutError, CheckoutResult};

/// Environment variable overriding the service tax, in basis points.
pub const ENV_SERVICE_TAX_BPS: &str = "VENUE_SERVICE_TAX_BPS";
/// Environment variable overriding the per-nomination price.
pub const ENV_NOMINATION_PRICE: &str = "VENUE_NOMINATION_PRICE";
/// Environment variable overriding the per-in-house-nomination price.
pub const ENV_INHOUSE_PRICE: &str = "VENUE_INHOUSE_PRICE";
/// Environment variable overriding the flat house fee.
pub const ENV_HOUSE_FEE: &str = "VENUE_HOUSE_FEE";
/// Environment variable overriding the flat single-guest charge.
pub const ENV_SINGLE_CHARGE: &str = "VENUE_SINGLE_CHARGE";
/// Environment variable overriding the venue display name.
pub const ENV_VENUE_NAME: &str = "VENUE_NAME";

const CONFIG_FILE_NAME: &str = "pricing.toml";

// =============================================================================
// Venue Settings
// =============================================================================

/// Display settings for the venue printed on receipts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueSettings {
    #[serde(default = "default_venue_name")]
    pub name: String,
}

fn default_venue_name() -> String {
    "Venue".to_string()
}

impl Default for VenueSettings {
    fn default() -> Self {
        VenueSettings {
            name: default_venue_name(),
        }
    }
}

// =============================================================================
// Main Pricing Configuration
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Venue display settings.
    #[serde(default)]
    pub venue: VenueSettings,

    /// The tariff handed to the quotation engine.
    #[serde(default)]
    pub tariff: Tariff,
}

impl PricingConfig {
    /// Creates a config holding the house tariff.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (pricing.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> CheckoutResult<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// Loads configuration with overrides taken from `lookup` instead of the
    /// process environment.
    pub fn load_with<F>(config_path: Option<PathBuf>, lookup: F) -> CheckoutResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading pricing config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using house tariff");
            }
        }

        config.apply_overrides(lookup)?;
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns the house tariff if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load pricing config: {}. Using house tariff.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> CheckoutResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| CheckoutError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CheckoutError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| CheckoutError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Pricing config saved");
        Ok(())
    }

    /// Validates the configuration.
    ///
    /// The tariff must be internally consistent and cover every plan.
    pub fn validate(&self) -> CheckoutResult<()> {
        if self.venue.name.trim().is_empty() {
            return Err(CheckoutError::InvalidConfig(
                "venue name must not be empty".into(),
            ));
        }

        self.tariff.validate_complete()?;
        Ok(())
    }

    /// Applies overrides from an arbitrary lookup.
    ///
    /// Unlike display settings, a malformed price is an error: falling back
    /// to the file value would quote the wrong amount.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> CheckoutResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup(ENV_VENUE_NAME) {
            self.venue.name = name;
        }

        if let Some(raw) = lookup(ENV_SERVICE_TAX_BPS) {
            let bps: u32 = parse_override(ENV_SERVICE_TAX_BPS, &raw)?;
            validate_tax_rate_bps(bps)
                .map_err(|e| CheckoutError::InvalidConfig(format!("{}: {}", ENV_SERVICE_TAX_BPS, e)))?;
            debug!(bps, "Overriding service tax from environment");
            self.tariff.service_tax = TaxRate::from_bps(bps);
        }

        let surcharges = &mut self.tariff.surcharges;
        let prices = [
            (ENV_NOMINATION_PRICE, &mut surcharges.nomination_unit_price),
            (ENV_INHOUSE_PRICE, &mut surcharges.inhouse_unit_price),
            (ENV_HOUSE_FEE, &mut surcharges.house_fee),
            (ENV_SINGLE_CHARGE, &mut surcharges.single_charge),
        ];
        for (key, slot) in prices {
            if let Some(raw) = lookup(key) {
                let yen: i64 = parse_override(key, &raw)?;
                if yen < 0 {
                    return Err(CheckoutError::InvalidConfig(format!(
                        "{} must not be negative, got {}",
                        key, yen
                    )));
                }
                debug!(key, yen, "Overriding surcharge from environment");
                *slot = Money::from_yen(yen);
            }
        }

        Ok(())
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "venue", "backoffice")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

fn parse_override<T: std::str::FromStr>(key: &str, raw: &str) -> CheckoutResult<T> {
    raw.trim().parse().map_err(|_| {
        CheckoutError::InvalidConfig(format!("{} is not a whole number: '{}'", key, raw))
    })
}
