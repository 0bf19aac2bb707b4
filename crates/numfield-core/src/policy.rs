//! # Bounds & Precision Policy
//!
//! Pure functions that derive the effective fraction-digit limit from the
//! configuration and keep parsed numbers inside `[minimumValue, maximumValue]`.
//!
//! ## Normalization Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  parse_and_normalize("1.2345")   (maximumFractionDigits = 2)            │
//! │                                                                         │
//! │   "1.2345" ──parse──► 1.2345 ──format_edit──► "1.23" ──parse──► 1.23    │
//! │                                                              │          │
//! │                                                           clamp         │
//! │                                                              ▼          │
//! │                                                           Some(1.23)    │
//! │                                                                         │
//! │  The second parse guarantees the number is exactly what the edit       │
//! │  formatter can show, so normalizing twice changes nothing.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::config::{FormatKey, NumericFieldConfig};
use crate::error::{CoreError, CoreResult};
use crate::format::{to_decimal, FormatOptions, FromLocale, NumberFormatter};
use crate::FRACTION_SAMPLE;

// =============================================================================
// Input Mode
// =============================================================================

/// Virtual keyboard hint for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum InputMode {
    /// Digits only, the field allows no fraction.
    Numeric,
    /// Digits plus a decimal separator.
    Decimal,
}

// =============================================================================
// Bounds
// =============================================================================

/// Inclusive numeric range of a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub minimum_value: f64,
    pub maximum_value: f64,
}

impl Bounds {
    pub fn from_config(config: &NumericFieldConfig) -> Self {
        Bounds {
            minimum_value: config.minimum_value,
            maximum_value: config.maximum_value,
        }
    }

    /// Shrinks the range to values with at most `digits` fraction digits:
    /// the minimum is rounded up, the maximum down.
    ///
    /// A clamped value is then always something the edit formatter shows
    /// verbatim. Returns `None` if no such value lies in the range.
    pub fn rounded_inward(&self, digits: usize) -> Option<Self> {
        let digits = u32::try_from(digits).unwrap_or(u32::MAX);
        let minimum_value =
            round_bound(self.minimum_value, digits, RoundingStrategy::ToPositiveInfinity);
        let maximum_value =
            round_bound(self.maximum_value, digits, RoundingStrategy::ToNegativeInfinity);
        (minimum_value <= maximum_value).then_some(Bounds {
            minimum_value,
            maximum_value,
        })
    }

    /// Clips a value into the range; `None` passes through unchanged.
    pub fn clamp(&self, value: Option<f64>) -> Option<f64> {
        value.map(|v| {
            if v > self.maximum_value {
                self.maximum_value
            } else if v < self.minimum_value {
                self.minimum_value
            } else {
                v
            }
        })
    }

    /// Returns true if no negative value can ever be valid.
    pub fn is_non_negative(&self) -> bool {
        self.minimum_value >= 0.0
    }
}

fn round_bound(bound: f64, digits: u32, strategy: RoundingStrategy) -> f64 {
    to_decimal(bound)
        .map(|d: Decimal| d.round_dp_with_strategy(digits, strategy).normalize())
        .and_then(|d| d.to_string().parse::<f64>().ok())
        // folds -0 into 0
        .map(|v| v + 0.0)
        .unwrap_or(bound)
}

/// Bounds of `config`, rounded inward to what `derived` can show.
fn effective_bounds(config: &NumericFieldConfig, derived: &DerivedFormatters) -> CoreResult<Bounds> {
    Bounds::from_config(config)
        .rounded_inward(derived.max_fraction_digits)
        .ok_or(CoreError::NoRepresentableValue {
            min: config.minimum_value,
            max: config.maximum_value,
            digits: derived.max_fraction_digits,
        })
}

// =============================================================================
// Derived Formatters
// =============================================================================

/// Edit and display option sets plus the measured fraction-digit limit.
///
/// Recomputed only when the [`FormatKey`] changes.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedFormatters {
    pub edit: FormatOptions,
    pub display: FormatOptions,
    pub max_fraction_digits: usize,
    key: FormatKey,
}

impl DerivedFormatters {
    pub fn derive<F: NumberFormatter>(config: &NumericFieldConfig, formatter: &F) -> Self {
        let key = config.format_key();
        let max_fraction_digits = derive_max_fraction_digits(formatter, &key.edit);
        DerivedFormatters {
            edit: key.edit.clone(),
            display: key.display.clone(),
            max_fraction_digits,
            key,
        }
    }

    pub fn key(&self) -> &FormatKey {
        &self.key
    }
}

/// Measures how many fraction digits the edit formatter lets through.
///
/// Formats a repeating-decimal sample and counts what survives after the
/// decimal separator, so currency minor units and explicit limits are both
/// honored exactly as they will be for real input.
pub fn derive_max_fraction_digits<F: NumberFormatter>(formatter: &F, edit: &FormatOptions) -> usize {
    let sample = formatter.format(FRACTION_SAMPLE, edit);
    sample
        .split_once(formatter.decimal_separator())
        .map(|(_, fraction)| fraction.chars().count())
        .unwrap_or(0)
}

// =============================================================================
// Policy
// =============================================================================

/// Formatter plus bounds: everything needed to judge and rewrite input.
#[derive(Debug, Clone)]
pub struct Policy<F> {
    formatter: F,
    bounds: Bounds,
    max_length: usize,
    derived: DerivedFormatters,
}

impl<F: NumberFormatter> Policy<F> {
    /// Validates the configuration and derives the formatters.
    pub fn new(config: &NumericFieldConfig, formatter: F) -> CoreResult<Self> {
        config.validate()?;
        let derived = DerivedFormatters::derive(config, &formatter);
        Ok(Policy {
            formatter,
            bounds: effective_bounds(config, &derived)?,
            max_length: config.max_length,
            derived,
        })
    }

    pub fn formatter(&self) -> &F {
        &self.formatter
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Maximum edit text length, in characters.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn derived(&self) -> &DerivedFormatters {
        &self.derived
    }

    /// Resolved maximum number of fraction digits while editing.
    pub fn max_fraction_digits(&self) -> usize {
        self.derived.max_fraction_digits
    }

    pub fn decimal_separator(&self) -> char {
        self.formatter.decimal_separator()
    }

    pub fn input_mode(&self) -> InputMode {
        if self.max_fraction_digits() == 0 {
            InputMode::Numeric
        } else {
            InputMode::Decimal
        }
    }

    /// Plain parse, without normalization or clamping.
    pub fn parse(&self, text: &str) -> Option<f64> {
        self.formatter.parse(text)
    }

    pub fn clamp(&self, value: Option<f64>) -> Option<f64> {
        self.bounds.clamp(value)
    }

    /// Parse, re-format with the edit formatter, re-parse, then clamp.
    pub fn parse_and_normalize(&self, text: &str) -> Option<f64> {
        if text.is_empty() {
            return None;
        }
        let parsed = self.parse(text)?;
        self.normalize(parsed)
    }

    /// Rounds a number to what the edit formatter can show, then clamps.
    pub fn normalize(&self, value: f64) -> Option<f64> {
        let rounded = self.parse(&self.formatter.format(value, &self.derived.edit));
        self.clamp(rounded)
    }

    /// Canonical edit text; empty for `None`.
    pub fn format_edit(&self, value: Option<f64>) -> String {
        value
            .map(|v| self.formatter.format(v, &self.derived.edit))
            .unwrap_or_default()
    }

    /// Fully decorated at-rest text; empty for `None`.
    pub fn format_display(&self, value: Option<f64>) -> String {
        value
            .map(|v| self.formatter.format(v, &self.derived.display))
            .unwrap_or_default()
    }

    /// Number of characters after the first decimal separator.
    pub fn fraction_digits(&self, text: &str) -> usize {
        text.split_once(self.decimal_separator())
            .map(|(_, fraction)| fraction.chars().count())
            .unwrap_or(0)
    }

    pub fn exceeds_fraction_digits(&self, text: &str) -> bool {
        self.fraction_digits(text) > self.max_fraction_digits()
    }
}

impl<F: NumberFormatter + FromLocale> Policy<F> {
    /// Applies a new configuration.
    ///
    /// Bounds always update. The formatter is rebuilt only when the locale
    /// changes, and the derived formatters only when their key changes.
    /// Returns true if the derived formatters were rebuilt. On error the
    /// policy is left untouched.
    pub fn reconfigure(&mut self, config: &NumericFieldConfig) -> CoreResult<bool> {
        config.validate()?;

        let key = config.format_key();
        if &key == self.derived.key() {
            self.bounds = effective_bounds(config, &self.derived)?;
            self.max_length = config.max_length;
            return Ok(false);
        }

        let formatter =
            (key.locale != self.derived.key().locale).then(|| F::from_locale(&key.locale));
        let derived =
            DerivedFormatters::derive(config, formatter.as_ref().unwrap_or(&self.formatter));
        self.bounds = effective_bounds(config, &derived)?;
        self.max_length = config.max_length;
        self.derived = derived;
        if let Some(formatter) = formatter {
            self.formatter = formatter;
        }
        Ok(true)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
