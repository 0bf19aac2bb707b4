//! # numfield-core: Locale-Aware Numeric Input Controller
//!
//! This crate holds the behavior of a numeric text field: what keys it
//! accepts, how typed text is clamped and rounded, and when a value is
//! committed. It owns no widget and does no I/O; the host feeds it UI events
//! and applies the [`Reaction`] it gets back.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Numeric Field Pipeline                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Host (widget, form, CLI)                     │   │
//! │  │     keydown ──► keyup ──► paste ──► focus/blur ──► reset       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ FieldEvent / Reaction                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ numfield-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ keystroke │  │ reconcile │  │   mode    │  │   sync    │  │   │
//! │  │   │ validator │  │ clamp and │  │ display / │  │ external  │  │   │
//! │  │   │           │  │   round   │  │   edit    │  │  values   │  │   │
//! │  │   └─────┬─────┘  └─────┬─────┘  └───────────┘  └─────┬─────┘  │   │
//! │  │         └──────────────┼────────────────────────────┘        │   │
//! │  │                  ┌─────▼─────┐                                 │   │
//! │  │                  │  policy   │ bounds, fraction digits         │   │
//! │  │                  └─────┬─────┘                                 │   │
//! │  │                  ┌─────▼─────┐                                 │   │
//! │  │                  │  format   │ locale parse / format           │   │
//! │  │                  └───────────┘                                 │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO WIDGETS • SYNCHRONOUS                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Field configuration and validation
//! - [`format`] - Formatter contract and the reference locale formatter
//! - [`policy`] - Bounds, fraction digits, derived formatters
//! - [`keystroke`] - Keydown filtering
//! - [`reconcile`] - Post-edit clamping and rounding
//! - [`mode`] - Display/edit switching
//! - [`sync`] - External value reconciliation
//! - [`field`] - The controller tying it all together
//!
//! ## Example Usage
//!
//! ```rust
//! use numfield_core::{KeyPress, NumericField, NumericFieldConfig, WarningKind};
//!
//! let config = NumericFieldConfig::default().with_bounds(0.0, 100.0);
//! let mut field = NumericField::new(config).unwrap();
//! field.focus();
//!
//! // non-negative fields never see a minus sign
//! let reaction = field.key_down(&KeyPress::new("-"));
//! assert!(reaction.blocked);
//! assert_eq!(reaction.warning.unwrap().kind, WarningKind::BlockedNegativeNumber);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod field;
pub mod format;
pub mod keystroke;
pub mod locale;
pub mod mode;
pub mod policy;
pub mod reconcile;
pub mod sync;
pub mod warning;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use config::{FormatKey, NumericFieldConfig};
pub use error::{CoreError, CoreResult};
pub use field::{Commit, EditState, FieldEvent, NumericField, Reaction};
pub use format::{FormatOptions, FromLocale, LocaleFormatter, NumberFormatter};
pub use keystroke::{KeyPress, KeyVerdict, Modifiers, Selection};
pub use policy::{Bounds, InputMode, Policy};
pub use reconcile::Reconciliation;
pub use warning::{Warning, WarningKind};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Largest integer an `f64` represents exactly (2^53 - 1).
///
/// Default bounds are ± this value.
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Locale used when a configuration does not name one.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Maximum number of characters in the edit text.
pub const DEFAULT_MAX_LENGTH: usize = 18;

/// Formatting this value and counting the digits after the decimal separator
/// yields the effective maximum fraction digits of a formatter.
pub const FRACTION_SAMPLE: f64 = 0.1111111111111111;
