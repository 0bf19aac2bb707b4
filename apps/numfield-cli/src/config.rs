//! # CLI Configuration
//!
//! Loads the field configuration the replayed field is built from.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     NUMFIELD_LOCALE=de-DE                                              │
//! │     NUMFIELD_MAX=100                                                   │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or                                                │
//! │     ~/.config/numfield/numfield.toml (Linux)                           │
//! │     ~/Library/Application Support/dev.numfield.numfield/... (macOS)    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     en-US, no grouping, ±(2^53 - 1)                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # numfield.toml
//! [field]
//! locale = "de-DE"
//! minimumValue = 0
//! maximumValue = 100
//! maximumFractionDigits = 2
//! useGrouping = true
//! currency = "EUR"
//! ```

use numfield_core::NumericFieldConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::AppResult;

/// Root of `numfield.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub field: NumericFieldConfig,
}

impl CliConfig {
    /// Loads configuration from file and environment, then validates it.
    ///
    /// ## Loading Order
    /// 1. Start with defaults
    /// 2. Override with config file (if exists)
    /// 3. Override with environment variables
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let explicit = config_path.is_some();
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading field config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else if explicit {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("config file not found: {}", path.display()),
                )
                .into());
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.field.validate()?;

        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies `NUMFIELD_*` overrides from `lookup`. Unparsable values are
    /// logged and skipped.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let field = &mut self.field;

        if let Some(locale) = lookup("NUMFIELD_LOCALE") {
            debug!(locale = %locale, "Overriding locale from environment");
            field.locale = locale;
        }

        if let Some(currency) = lookup("NUMFIELD_CURRENCY") {
            field.currency = if currency.is_empty() {
                None
            } else {
                Some(currency)
            };
        }

        if let Some(min) = lookup("NUMFIELD_MIN") {
            match min.parse::<f64>() {
                Ok(v) => field.minimum_value = v,
                Err(_) => warn!(value = %min, "Ignoring invalid NUMFIELD_MIN"),
            }
        }

        if let Some(max) = lookup("NUMFIELD_MAX") {
            match max.parse::<f64>() {
                Ok(v) => field.maximum_value = v,
                Err(_) => warn!(value = %max, "Ignoring invalid NUMFIELD_MAX"),
            }
        }

        if let Some(digits) = lookup("NUMFIELD_MAX_FRACTION_DIGITS") {
            match digits.parse::<u8>() {
                Ok(d) => {
                    debug!(digits = d, "Overriding maximum fraction digits from environment");
                    field.maximum_fraction_digits = Some(d);
                }
                Err(_) => warn!(value = %digits, "Ignoring invalid NUMFIELD_MAX_FRACTION_DIGITS"),
            }
        }

        if let Some(grouping) = lookup("NUMFIELD_USE_GROUPING") {
            match grouping.to_lowercase().as_str() {
                "1" | "true" | "yes" => field.use_grouping = true,
                "0" | "false" | "no" => field.use_grouping = false,
                _ => warn!(value = %grouping, "Ignoring invalid NUMFIELD_USE_GROUPING"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "numfield", "numfield")
            .map(|dirs| dirs.config_dir().join("numfield.toml"))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn overridden(vars: &[(&str, &str)]) -> CliConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let mut config = CliConfig::default();
        config.apply_overrides(|name| vars.get(name).cloned());
        config
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.field.locale, "en-US");
        assert!(!config.field.use_grouping);
        assert!(config.field.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let config = overridden(&[
            ("NUMFIELD_LOCALE", "de-DE"),
            ("NUMFIELD_CURRENCY", "EUR"),
            ("NUMFIELD_MIN", "0"),
            ("NUMFIELD_MAX", "100.5"),
            ("NUMFIELD_MAX_FRACTION_DIGITS", "2"),
            ("NUMFIELD_USE_GROUPING", "true"),
        ]);

        assert_eq!(config.field.locale, "de-DE");
        assert_eq!(config.field.currency.as_deref(), Some("EUR"));
        assert_eq!(config.field.minimum_value, 0.0);
        assert_eq!(config.field.maximum_value, 100.5);
        assert_eq!(config.field.maximum_fraction_digits, Some(2));
        assert!(config.field.use_grouping);
    }

    #[test]
    fn test_invalid_env_values_are_skipped() {
        let config = overridden(&[
            ("NUMFIELD_MAX", "lots"),
            ("NUMFIELD_MAX_FRACTION_DIGITS", "-1"),
            ("NUMFIELD_USE_GROUPING", "maybe"),
        ]);
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_empty_currency_clears_it() {
        let mut config = CliConfig::default();
        config.field.currency = Some("USD".into());
        config.apply_overrides(|name| (name == "NUMFIELD_CURRENCY").then(String::new));
        assert_eq!(config.field.currency, None);
    }

    #[test]
    fn test_toml_file_format() {
        let config: CliConfig = toml::from_str(
            r#"
            [field]
            locale = "de-DE"
            minimumValue = 0
            maximumValue = 100
            maximumFractionDigits = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.field.locale, "de-DE");
        assert_eq!(config.field.maximum_value, 100.0);
        assert_eq!(config.field.maximum_fraction_digits, Some(2));
        assert_eq!(config.field.max_length, 18);
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let result = CliConfig::load(Some(PathBuf::from("/nonexistent/numfield.toml")));
        assert!(result.is_err());
    }
}
