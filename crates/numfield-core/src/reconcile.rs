//! # Commit Reconciler
//!
//! Runs after every content-changing edit. It reparses the text the host now
//! shows, detects drift between what the user typed and what the policy
//! allows, and either accepts the text or rewrites it.
//!
//! ## Decision Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  reconcile(committed, text)                                             │
//! │                                                                         │
//! │  text == committed or text == "-" ──────────────────► Unchanged         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  parse(text) is None and text != "" ────────────────► Reset             │
//! │           │                     (back to committed, RESET_NOT_A_NUMBER) │
//! │           ▼                                                             │
//! │  safe = parse_and_normalize(text)                                       │
//! │           │                                                             │
//! │  too many fraction digits? ─────────────────────────► Rewritten         │
//! │           │                      (MODIFIED_MAX_FRACTION_DIGITS)         │
//! │  safe != parsed? ───────────────────────────────────► Rewritten         │
//! │           │                 (MODIFIED_MIN_NUMBER / MODIFIED_MAX_NUMBER) │
//! │           ▼                                                             │
//! │       Accepted                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Priority
//! When both a fraction-digit truncation and a min/max clamp apply to the
//! same text, the fraction-digit warning wins. The rewritten text is the
//! same either way.

use crate::format::NumberFormatter;
use crate::policy::Policy;
use crate::warning::{Warning, WarningKind};

/// Outcome of one reconciliation.
#[derive(Debug, Clone, PartialEq)]
pub enum Reconciliation {
    /// Nothing to check: same text as last time, or a lone minus sign.
    Unchanged,

    /// The text is policy-valid and becomes the committed edit text.
    Accepted,

    /// The text is unparsable; the host must show `text` (the last
    /// committed value) again.
    Reset { text: String, warning: Warning },

    /// The text was clamped or rounded; the host must show `text`, which is
    /// also the new committed edit text.
    Rewritten {
        text: String,
        value: Option<f64>,
        warning: Warning,
    },
}

impl Reconciliation {
    pub fn warning(&self) -> Option<&Warning> {
        match self {
            Reconciliation::Reset { warning, .. } | Reconciliation::Rewritten { warning, .. } => {
                Some(warning)
            }
            _ => None,
        }
    }

    /// Text the host must write back, if any.
    pub fn replacement(&self) -> Option<&str> {
        match self {
            Reconciliation::Reset { text, .. } | Reconciliation::Rewritten { text, .. } => {
                Some(text)
            }
            _ => None,
        }
    }
}

/// Reconciles the host's current text against the last committed edit text.
pub fn reconcile<F: NumberFormatter>(
    policy: &Policy<F>,
    committed: &str,
    text: &str,
) -> Reconciliation {
    if text == committed || text == "-" {
        return Reconciliation::Unchanged;
    }

    let parsed = policy.parse(text);
    if parsed.is_none() && !text.is_empty() {
        return Reconciliation::Reset {
            text: committed.to_string(),
            warning: Warning::new(WarningKind::ResetNotANumber, text),
        };
    }

    let safe = policy.parse_and_normalize(text);
    let too_many_fraction_digits = policy.exceeds_fraction_digits(text);

    if safe == parsed && !too_many_fraction_digits {
        return Reconciliation::Accepted;
    }

    let kind = match (safe, parsed) {
        _ if too_many_fraction_digits => WarningKind::ModifiedMaxFractionDigits,
        (Some(safe), Some(parsed)) if safe > parsed => WarningKind::ModifiedMinNumber,
        (Some(_), Some(_)) => WarningKind::ModifiedMaxNumber,
        _ => WarningKind::Modified,
    };

    Reconciliation::Rewritten {
        text: policy.format_edit(safe),
        value: safe,
        warning: Warning::new(kind, text),
    }
}

/// Final value and canonical edit text when leaving edit mode.
pub fn finalize<F: NumberFormatter>(policy: &Policy<F>, committed: &str) -> (Option<f64>, String) {
    let value = policy.parse_and_normalize(committed);
    (value, policy.format_edit(value))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NumericFieldConfig;
    use crate::format::LocaleFormatter;

    fn policy(config: NumericFieldConfig) -> Policy<LocaleFormatter> {
        let formatter = LocaleFormatter::for_locale(&config.locale);
        Policy::new(&config, formatter).unwrap()
    }

    fn rewritten(outcome: Reconciliation) -> (String, WarningKind) {
        match outcome {
            Reconciliation::Rewritten { text, warning, .. } => (text, warning.kind),
            other => panic!("expected rewrite, got {other:?}"),
        }
    }

    #[test]
    fn test_unchanged_and_lone_minus_skip_checks() {
        let p = policy(NumericFieldConfig::default());
        assert_eq!(reconcile(&p, "12", "12"), Reconciliation::Unchanged);
        assert_eq!(reconcile(&p, "", "-"), Reconciliation::Unchanged);
    }

    #[test]
    fn test_accepts_valid_text_verbatim() {
        let p = policy(NumericFieldConfig::default());
        assert_eq!(reconcile(&p, "1", "12"), Reconciliation::Accepted);
        assert_eq!(reconcile(&p, "1", "1."), Reconciliation::Accepted);
        assert_eq!(reconcile(&p, "12", ""), Reconciliation::Accepted);
        assert_eq!(reconcile(&p, "1,00", "1,000"), Reconciliation::Accepted);
    }

    #[test]
    fn test_reset_restores_last_committed_text() {
        let p = policy(NumericFieldConfig::default());
        let outcome = reconcile(&p, "12", "1-2");
        assert_eq!(outcome.replacement(), Some("12"));
        let warning = outcome.warning().unwrap();
        assert_eq!(warning.kind, WarningKind::ResetNotANumber);
        assert_eq!(warning.input(), "1-2");
    }

    #[test]
    fn test_clamps_to_maximum() {
        let p = policy(NumericFieldConfig::default().with_bounds(-1.0, 10.0));
        assert_eq!(
            rewritten(reconcile(&p, "1", "15")),
            ("10".to_string(), WarningKind::ModifiedMaxNumber)
        );
    }

    #[test]
    fn test_clamps_to_minimum() {
        let p = policy(NumericFieldConfig::default().with_bounds(-5.0, 10.0));
        assert_eq!(
            rewritten(reconcile(&p, "-", "-7")),
            ("-5".to_string(), WarningKind::ModifiedMinNumber)
        );
    }

    #[test]
    fn test_truncates_fraction_digits() {
        let p = policy(NumericFieldConfig::default().with_maximum_fraction_digits(2));
        assert_eq!(
            rewritten(reconcile(&p, "1.99", "1.999")),
            ("2".to_string(), WarningKind::ModifiedMaxFractionDigits)
        );
        // same value, but a trailing zero beyond the limit
        assert_eq!(
            rewritten(reconcile(&p, "1.11", "1.110")),
            ("1.11".to_string(), WarningKind::ModifiedMaxFractionDigits)
        );
    }

    #[test]
    fn test_fraction_warning_wins_over_clamp() {
        let p = policy(
            NumericFieldConfig::default()
                .with_bounds(-1.0, 10.0)
                .with_maximum_fraction_digits(1),
        );
        assert_eq!(
            rewritten(reconcile(&p, "12.3", "12.34")),
            ("10".to_string(), WarningKind::ModifiedMaxFractionDigits)
        );
    }

    #[test]
    fn test_finalize_canonicalizes() {
        let p = policy(NumericFieldConfig::default().with_bounds(-1.0, 10.0));
        assert_eq!(finalize(&p, "1,0"), (Some(10.0), "10".to_string()));
        assert_eq!(finalize(&p, "3."), (Some(3.0), "3".to_string()));
        assert_eq!(finalize(&p, ""), (None, String::new()));
    }
}
