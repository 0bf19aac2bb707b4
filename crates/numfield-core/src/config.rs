//! # Field Configuration
//!
//! The recognized options of a numeric field, their defaults, and the two
//! formatter option sets derived from them.
//!
//! ## Derived Formatters
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  NumericFieldConfig → FormatOptions                     │
//! │                                                                         │
//! │  EDIT (while typing)                 DISPLAY (at rest)                 │
//! │  ───────────────────                 ─────────────────                 │
//! │  • maximumFractionDigits             • every digit option              │
//! │  • currency (digit rules only)       • useGrouping                     │
//! │  • NO grouping                       • currency code decoration        │
//! │  • NO padding                                                          │
//! │                                                                         │
//! │  Grouping would move while typing, padding would fight the cursor.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## File Format
//! ```toml
//! minimumValue = 0
//! maximumValue = 100
//! maximumFractionDigits = 2
//! useGrouping = true
//! currency = "EUR"
//! locale = "de-DE"
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::format::FormatOptions;
use crate::{DEFAULT_LOCALE, DEFAULT_MAX_LENGTH, MAX_SAFE_INTEGER};

// =============================================================================
// Digit Ranges
// =============================================================================

const INTEGER_DIGITS: (u8, u8) = (1, 21);
const FRACTION_DIGITS: (u8, u8) = (0, 20);
const SIGNIFICANT_DIGITS: (u8, u8) = (1, 21);

// =============================================================================
// Numeric Field Config
// =============================================================================

/// Configuration of one numeric input field.
///
/// ## Invariants (checked by [`validate`](Self::validate))
/// - `minimum_value <= 1` and `maximum_value >= -1`
/// - `minimum_value <= maximum_value`
/// - digit options within the formatter's ranges, lower <= upper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NumericFieldConfig {
    #[serde(default = "default_minimum_value")]
    pub minimum_value: f64,

    #[serde(default = "default_maximum_value")]
    pub maximum_value: f64,

    #[serde(default)]
    pub minimum_integer_digits: Option<u8>,

    #[serde(default)]
    pub minimum_fraction_digits: Option<u8>,

    #[serde(default)]
    pub maximum_fraction_digits: Option<u8>,

    #[serde(default)]
    pub minimum_significant_digits: Option<u8>,

    #[serde(default)]
    pub maximum_significant_digits: Option<u8>,

    /// Group thousands in the display form. Off by default.
    #[serde(default)]
    pub use_grouping: bool,

    /// ISO 4217 currency code.
    #[serde(default)]
    pub currency: Option<String>,

    /// BCP 47 locale tag.
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Maximum length of the edit text, in characters.
    #[serde(default = "default_max_length")]
    pub max_length: usize,
}

fn default_minimum_value() -> f64 {
    -MAX_SAFE_INTEGER
}

fn default_maximum_value() -> f64 {
    MAX_SAFE_INTEGER
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

fn default_max_length() -> usize {
    DEFAULT_MAX_LENGTH
}

impl Default for NumericFieldConfig {
    fn default() -> Self {
        NumericFieldConfig {
            minimum_value: default_minimum_value(),
            maximum_value: default_maximum_value(),
            minimum_integer_digits: None,
            minimum_fraction_digits: None,
            maximum_fraction_digits: None,
            minimum_significant_digits: None,
            maximum_significant_digits: None,
            use_grouping: false,
            currency: None,
            locale: default_locale(),
            max_length: default_max_length(),
        }
    }
}

impl NumericFieldConfig {
    /// Creates a default config for a locale.
    pub fn for_locale(locale: impl Into<String>) -> Self {
        NumericFieldConfig {
            locale: locale.into(),
            ..Default::default()
        }
    }

    pub fn with_bounds(mut self, minimum_value: f64, maximum_value: f64) -> Self {
        self.minimum_value = minimum_value;
        self.maximum_value = maximum_value;
        self
    }

    pub fn with_maximum_fraction_digits(mut self, digits: u8) -> Self {
        self.maximum_fraction_digits = Some(digits);
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn with_grouping(mut self, use_grouping: bool) -> Self {
        self.use_grouping = use_grouping;
        self
    }

    /// Validates the configuration.
    ///
    /// ## Rules
    /// ```text
    /// minimumValue ∈ [-MAX_SAFE_INTEGER, 1]   else MinimumValueTooLarge
    /// maximumValue ∈ [-1, MAX_SAFE_INTEGER]   else MaximumValueTooSmall
    /// minimumValue <= maximumValue            else InvertedBounds
    /// ```
    /// Bounds outside the "around zero" window are rejected, never clamped.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.minimum_value.is_finite() {
            return Err(CoreError::NonFiniteBound {
                field: "minimumValue",
            });
        }
        if !self.maximum_value.is_finite() {
            return Err(CoreError::NonFiniteBound {
                field: "maximumValue",
            });
        }
        if self.minimum_value > 1.0 {
            return Err(CoreError::MinimumValueTooLarge(self.minimum_value));
        }
        if self.maximum_value < -1.0 {
            return Err(CoreError::MaximumValueTooSmall(self.maximum_value));
        }
        if self.minimum_value > self.maximum_value {
            return Err(CoreError::InvertedBounds {
                min: self.minimum_value,
                max: self.maximum_value,
            });
        }

        check_digits(
            "minimumIntegerDigits",
            self.minimum_integer_digits,
            INTEGER_DIGITS,
        )?;
        check_digits(
            "minimumFractionDigits",
            self.minimum_fraction_digits,
            FRACTION_DIGITS,
        )?;
        check_digits(
            "maximumFractionDigits",
            self.maximum_fraction_digits,
            FRACTION_DIGITS,
        )?;
        check_digits(
            "minimumSignificantDigits",
            self.minimum_significant_digits,
            SIGNIFICANT_DIGITS,
        )?;
        check_digits(
            "maximumSignificantDigits",
            self.maximum_significant_digits,
            SIGNIFICANT_DIGITS,
        )?;

        check_order(
            ("minimumFractionDigits", self.minimum_fraction_digits),
            ("maximumFractionDigits", self.maximum_fraction_digits),
        )?;
        check_order(
            ("minimumSignificantDigits", self.minimum_significant_digits),
            ("maximumSignificantDigits", self.maximum_significant_digits),
        )?;

        if let Some(currency) = &self.currency {
            if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(CoreError::InvalidCurrency(currency.clone()));
            }
        }

        if self.locale.trim().is_empty() {
            return Err(CoreError::EmptyLocale);
        }

        Ok(())
    }

    /// Options for the edit formatter: no grouping, no padding.
    pub fn edit_options(&self) -> FormatOptions {
        FormatOptions {
            minimum_fraction_digits: Some(0),
            maximum_fraction_digits: self.maximum_fraction_digits,
            currency: self.currency.clone(),
            ..Default::default()
        }
    }

    /// Options for the display formatter: every configured option.
    pub fn display_options(&self) -> FormatOptions {
        FormatOptions {
            minimum_integer_digits: self.minimum_integer_digits,
            minimum_fraction_digits: self.minimum_fraction_digits,
            maximum_fraction_digits: self.maximum_fraction_digits,
            minimum_significant_digits: self.minimum_significant_digits,
            maximum_significant_digits: self.maximum_significant_digits,
            use_grouping: self.use_grouping,
            currency: self.currency.clone(),
            currency_display: self.currency.is_some(),
        }
    }

    /// The subset of options that affects the derived formatters.
    pub fn format_key(&self) -> FormatKey {
        FormatKey {
            locale: self.locale.clone(),
            edit: self.edit_options(),
            display: self.display_options(),
        }
    }
}

/// Identity of the derived formatters; equal keys mean no rebuild is needed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FormatKey {
    pub locale: String,
    pub edit: FormatOptions,
    pub display: FormatOptions,
}

fn check_digits(option: &'static str, value: Option<u8>, (min, max): (u8, u8)) -> CoreResult<()> {
    match value {
        Some(value) if value < min || value > max => Err(CoreError::DigitsOutOfRange {
            option,
            value,
            min,
            max,
        }),
        _ => Ok(()),
    }
}

fn check_order(
    (lower, lower_value): (&'static str, Option<u8>),
    (upper, upper_value): (&'static str, Option<u8>),
) -> CoreResult<()> {
    match (lower_value, upper_value) {
        (Some(l), Some(u)) if l > u => Err(CoreError::InvertedDigitRange { lower, upper }),
        _ => Ok(()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
