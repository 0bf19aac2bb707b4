//! # Input Warnings
//!
//! Transient, presentation-facing classifications of why an edit was blocked
//! or rewritten. Warnings are values, never errors.
//!
//! ## Lifecycle
//! ```text
//! keydown "x" ──► BLOCKED_NOT_A_NUMBER ──► slot = Some(warning)
//!                                              │
//! keydown "5" ──► allowed ─────────────────────► slot = None
//!                                              │
//! keyup "15"  ──► MODIFIED_MAX_NUMBER ─────────► slot = Some(warning)
//!                                              │
//! blur        ──► leave edit mode ─────────────► slot = None
//! ```
//! Only the most recent warning is observable: the slot is replaced on every
//! event, never accumulated.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Why an edit was blocked or rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum WarningKind {
    // Keystroke blocked, prior text preserved
    BlockedWhitespace,
    BlockedNegativeNumber,
    BlockedNotANumber,
    BlockedFraction,

    // Text rewritten after the edit landed
    ResetNotANumber,
    ModifiedMaxFractionDigits,
    ModifiedMinNumber,
    ModifiedMaxNumber,
    Modified,
}

impl WarningKind {
    /// Returns true if the input was discarded before reaching the text.
    pub fn is_blocked(&self) -> bool {
        matches!(
            self,
            WarningKind::BlockedWhitespace
                | WarningKind::BlockedNegativeNumber
                | WarningKind::BlockedNotANumber
                | WarningKind::BlockedFraction
        )
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WarningKind::BlockedWhitespace => "BLOCKED_WHITESPACE",
            WarningKind::BlockedNegativeNumber => "BLOCKED_NEGATIVE_NUMBER",
            WarningKind::BlockedNotANumber => "BLOCKED_NOT_A_NUMBER",
            WarningKind::BlockedFraction => "BLOCKED_FRACTION",
            WarningKind::ResetNotANumber => "RESET_NOT_A_NUMBER",
            WarningKind::ModifiedMaxFractionDigits => "MODIFIED_MAX_FRACTION_DIGITS",
            WarningKind::ModifiedMinNumber => "MODIFIED_MIN_NUMBER",
            WarningKind::ModifiedMaxNumber => "MODIFIED_MAX_NUMBER",
            WarningKind::Modified => "MODIFIED",
        };
        f.write_str(name)
    }
}

/// A warning plus the input it discarded or modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Warning {
    pub kind: WarningKind,
    pub discarded_or_modified_input: String,
}

impl Warning {
    pub fn new(kind: WarningKind, input: impl Into<String>) -> Self {
        Warning {
            kind,
            discarded_or_modified_input: input.into(),
        }
    }

    pub fn input(&self) -> &str {
        &self.discarded_or_modified_input
    }
}

/// Default English message, shown inline under the field.
impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let input = self.input();
        match self.kind {
            WarningKind::BlockedWhitespace => write!(f, "Whitespace is not allowed"),
            WarningKind::BlockedNegativeNumber => write!(f, "Negative numbers are not allowed"),
            WarningKind::BlockedNotANumber => {
                write!(f, "'{input}' was discarded, the result would not be a number")
            }
            WarningKind::BlockedFraction => write!(f, "Only whole numbers are allowed"),
            WarningKind::ResetNotANumber => {
                write!(f, "'{input}' is not a number, the previous value was restored")
            }
            WarningKind::ModifiedMaxFractionDigits => {
                write!(f, "'{input}' has too many fraction digits and was rounded")
            }
            WarningKind::ModifiedMinNumber => {
                write!(f, "'{input}' is below the minimum and was raised to it")
            }
            WarningKind::ModifiedMaxNumber => {
                write!(f, "'{input}' is above the maximum and was lowered to it")
            }
            WarningKind::Modified => write!(f, "'{input}' was adjusted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&WarningKind::ModifiedMaxFractionDigits).unwrap();
        assert_eq!(json, "\"MODIFIED_MAX_FRACTION_DIGITS\"");

        let kind: WarningKind = serde_json::from_str("\"BLOCKED_NOT_A_NUMBER\"").unwrap();
        assert_eq!(kind, WarningKind::BlockedNotANumber);
        assert_eq!(kind.to_string(), "BLOCKED_NOT_A_NUMBER");
    }

    #[test]
    fn test_blocked_vs_rewrite() {
        assert!(WarningKind::BlockedWhitespace.is_blocked());
        assert!(WarningKind::BlockedFraction.is_blocked());
        assert!(!WarningKind::ResetNotANumber.is_blocked());
        assert!(!WarningKind::Modified.is_blocked());
    }

    #[test]
    fn test_default_messages() {
        let warning = Warning::new(WarningKind::ModifiedMaxNumber, "15");
        assert_eq!(
            warning.to_string(),
            "'15' is above the maximum and was lowered to it"
        );

        let warning = Warning::new(WarningKind::BlockedWhitespace, " ");
        assert_eq!(warning.to_string(), "Whitespace is not allowed");
    }
}
