//! # Error Types
//!
//! Domain-specific error types for numfield-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  numfield-core errors (this file)                                      │
//! │  └── CoreError        - Construction-time configuration failures       │
//! │                                                                         │
//! │  NOT errors (see warning.rs)                                           │
//! │  └── Warning          - Blocked / rewritten user input                 │
//! │                                                                         │
//! │  numfield-cli errors (separate crate)                                  │
//! │  └── AppError         - I/O, TOML, script failures                     │
//! │                                                                         │
//! │  Flow: CoreError → AppError → exit code                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. A configuration error is fatal and never silently clamped
//! 3. User input problems are never errors, they are warnings

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Configuration errors raised when a field is constructed or reconfigured.
///
/// These indicate a nonsensical policy rather than a user-input problem.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// The lower bound excludes every value around zero.
    ///
    /// ## When This Occurs
    /// - `minimumValue: 5` - a user could never type the first digit `1`
    ///   without it being clamped, so the field would be unusable
    #[error("minimumValue must be between {} and 1, got {0}", -crate::MAX_SAFE_INTEGER)]
    MinimumValueTooLarge(f64),

    /// The upper bound excludes every value around zero.
    #[error("maximumValue must be between -1 and {}, got {0}", crate::MAX_SAFE_INTEGER)]
    MaximumValueTooSmall(f64),

    /// `minimumValue` is greater than `maximumValue`.
    #[error("minimumValue {min} is greater than maximumValue {max}")]
    InvertedBounds { min: f64, max: f64 },

    /// A bound is NaN or infinite.
    #[error("{field} must be a finite number")]
    NonFiniteBound { field: &'static str },

    /// No value in `[min, max]` has few enough fraction digits to be typed.
    ///
    /// ## When This Occurs
    /// - `minimumValue: 0.3, maximumValue: 0.4, maximumFractionDigits: 0`
    #[error("no value between {min} and {max} can be shown with {digits} fraction digits")]
    NoRepresentableValue { min: f64, max: f64, digits: usize },

    /// A digit option is outside the range the formatter supports.
    #[error("{option} must be between {min} and {max}, got {value}")]
    DigitsOutOfRange {
        option: &'static str,
        value: u8,
        min: u8,
        max: u8,
    },

    /// A `minimum*Digits` option exceeds its `maximum*Digits` counterpart.
    #[error("{lower} must not be greater than {upper}")]
    InvertedDigitRange {
        lower: &'static str,
        upper: &'static str,
    },

    /// Currency is not a three-letter ISO 4217 code.
    #[error("currency must be a three-letter ISO 4217 code, got '{0}'")]
    InvalidCurrency(String),

    /// Locale tag is empty.
    #[error("locale must not be empty")]
    EmptyLocale,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
