//! # Formatting Adapter
//!
//! The locale-aware formatter/parser capability the controller consumes.
//!
//! ## Boundary
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    NumberFormatter (trait)                              │
//! │                                                                         │
//! │   format(1234.5, options) ──► "1,234.5"                                │
//! │   parse("1,234.5")        ──► Some(1234.5)                             │
//! │   grouping_separator()    ──► ','                                      │
//! │   decimal_separator()     ──► '.'                                      │
//! │                                                                         │
//! │   Must be pure and locale-deterministic.                               │
//! │                                                                         │
//! │   LocaleFormatter (this file) is the reference implementation.         │
//! │   A host with a full i18n engine implements the trait instead.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding
//! Values are rounded half away from zero on their shortest decimal
//! representation (`1.005` → `"1.01"` at 2 digits), using `rust_decimal`
//! rather than `f64` formatting, which rounds half-to-even on the binary value.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::locale::{symbols_for, LocaleSymbols};

// =============================================================================
// Format Options
// =============================================================================

/// Options for a single `format` call.
///
/// Unset digit options resolve the way a platform number formatter does:
/// fraction digits default to `0..=3`, or to the currency's minor units
/// when `currency` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FormatOptions {
    pub minimum_integer_digits: Option<u8>,
    pub minimum_fraction_digits: Option<u8>,
    pub maximum_fraction_digits: Option<u8>,
    pub minimum_significant_digits: Option<u8>,
    pub maximum_significant_digits: Option<u8>,
    pub use_grouping: bool,

    /// ISO 4217 code. Drives the default fraction digits.
    pub currency: Option<String>,

    /// Decorate the output with the currency code.
    pub currency_display: bool,
}

impl FormatOptions {
    /// Resolves `(minimum, maximum)` fraction digits.
    pub fn resolved_fraction_digits(&self) -> (u8, u8) {
        let currency_digits = self.currency.as_deref().map(currency_minor_units);
        let default_min = currency_digits.unwrap_or(0);
        let default_max = currency_digits.unwrap_or(3).max(default_min);

        match (self.minimum_fraction_digits, self.maximum_fraction_digits) {
            (Some(min), Some(max)) => (min, max.max(min)),
            (Some(min), None) => (min, default_max.max(min)),
            (None, Some(max)) => (default_min.min(max), max),
            (None, None) => (default_min, default_max),
        }
    }

    /// Resolves `(minimum, maximum)` significant digits, if either is set.
    pub fn resolved_significant_digits(&self) -> Option<(u8, u8)> {
        match (self.minimum_significant_digits, self.maximum_significant_digits) {
            (None, None) => None,
            (min, max) => {
                let min = min.unwrap_or(1);
                Some((min, max.unwrap_or(21).max(min)))
            }
        }
    }
}

/// Minor units (fraction digits) of an ISO 4217 currency.
pub fn currency_minor_units(code: &str) -> u8 {
    match code.to_ascii_uppercase().as_str() {
        "BIF" | "CLP" | "DJF" | "GNF" | "ISK" | "JPY" | "KMF" | "KRW" | "PYG" | "RWF" | "UGX"
        | "VND" | "VUV" | "XAF" | "XOF" | "XPF" => 0,
        "BHD" | "IQD" | "JOD" | "KWD" | "LYD" | "OMR" | "TND" => 3,
        _ => 2,
    }
}

// =============================================================================
// Formatter Capability
// =============================================================================

/// Locale-aware number formatter and parser.
pub trait NumberFormatter {
    /// Formats a number.
    fn format(&self, value: f64, options: &FormatOptions) -> String;

    /// Parses text, returning `None` for empty or unparsable input.
    fn parse(&self, text: &str) -> Option<f64>;

    fn grouping_separator(&self) -> char;

    fn decimal_separator(&self) -> char;
}

/// Builds a formatter for a locale tag.
pub trait FromLocale {
    fn from_locale(locale: &str) -> Self;
}

// =============================================================================
// Reference Formatter
// =============================================================================

/// Reference [`NumberFormatter`] backed by the built-in separator table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocaleFormatter {
    symbols: LocaleSymbols,
}

impl LocaleFormatter {
    pub fn new(symbols: LocaleSymbols) -> Self {
        LocaleFormatter { symbols }
    }

    pub fn for_locale(locale: &str) -> Self {
        LocaleFormatter::new(symbols_for(locale))
    }

    fn round(&self, value: Decimal, options: &FormatOptions) -> (Decimal, usize) {
        if let Some((min_sig, max_sig)) = options.resolved_significant_digits() {
            let rounded = value
                .round_sf_with_strategy(max_sig as u32, RoundingStrategy::MidpointAwayFromZero)
                .unwrap_or(value)
                .normalize();
            let significant = significant_digit_count(&rounded);
            let pad = (min_sig as usize).saturating_sub(significant);
            return (rounded, rounded.scale() as usize + pad);
        }

        let (min_frac, max_frac) = options.resolved_fraction_digits();
        let rounded = value
            .round_dp_with_strategy(max_frac as u32, RoundingStrategy::MidpointAwayFromZero)
            .normalize();
        let scale = (rounded.scale() as usize).max(min_frac as usize);
        (rounded, scale)
    }

    fn group(&self, integer: &str) -> String {
        let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
        for (i, digit) in integer.chars().enumerate() {
            if i > 0 && (integer.len() - i) % 3 == 0 {
                grouped.push(self.symbols.grouping);
            }
            grouped.push(digit);
        }
        grouped
    }
}

impl FromLocale for LocaleFormatter {
    fn from_locale(locale: &str) -> Self {
        LocaleFormatter::for_locale(locale)
    }
}

impl NumberFormatter for LocaleFormatter {
    fn format(&self, value: f64, options: &FormatOptions) -> String {
        if !value.is_finite() {
            return value.to_string();
        }

        let Some(decimal) = to_decimal(value) else {
            return value.to_string();
        };

        let (mut rounded, scale) = self.round(decimal, options);
        if rounded.is_zero() {
            rounded.set_sign_positive(true);
        }

        let text = rounded.abs().to_string();
        let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));

        let min_int = options.minimum_integer_digits.unwrap_or(1) as usize;
        let integer = format!("{:0>width$}", integer, width = min_int);
        let integer = if options.use_grouping {
            self.group(&integer)
        } else {
            integer
        };
        let fraction = format!("{:0<width$}", fraction, width = scale);

        let mut out = String::new();
        if rounded.is_sign_negative() {
            out.push('-');
        }
        out.push_str(&integer);
        if !fraction.is_empty() {
            out.push(self.symbols.decimal);
            out.push_str(&fraction);
        }
        if options.currency_display {
            if let Some(code) = &options.currency {
                out.push(' ');
                out.push_str(&code.to_ascii_uppercase());
            }
        }
        out
    }

    fn parse(&self, text: &str) -> Option<f64> {
        let text = strip_currency_code(text.trim());

        let mut normalized = String::with_capacity(text.len());
        let mut seen_digit = false;
        let mut seen_decimal = false;

        for (i, c) in text.chars().enumerate() {
            match c {
                '-' if i == 0 => normalized.push('-'),
                '0'..='9' => {
                    seen_digit = true;
                    normalized.push(c);
                }
                c if c == self.symbols.decimal && !seen_decimal => {
                    seen_decimal = true;
                    normalized.push('.');
                }
                c if c == self.symbols.grouping && !seen_decimal => {}
                _ => return None,
            }
        }

        if !seen_digit {
            return None;
        }

        normalized.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    fn grouping_separator(&self) -> char {
        self.symbols.grouping
    }

    fn decimal_separator(&self) -> char {
        self.symbols.decimal
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Converts via the shortest round-trip representation so `0.1` stays `0.1`.
pub(crate) fn to_decimal(value: f64) -> Option<Decimal> {
    value
        .to_string()
        .parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_f64(value))
}

fn significant_digit_count(value: &Decimal) -> usize {
    let digits: String = value
        .abs()
        .to_string()
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    let significant = digits.trim_start_matches('0').len();
    significant.max(1)
}

/// Strips a trailing ` XXX` currency code added by `currency_display`.
fn strip_currency_code(text: &str) -> &str {
    match text.rsplit_once(char::is_whitespace) {
        Some((number, code))
            if code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase()) =>
        {
            number.trim_end()
        }
        _ => text,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
