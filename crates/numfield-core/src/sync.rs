//! # External Value Sync
//!
//! Reconciles values supplied by the field's owner (initial value, form
//! reset, programmatic set) with the internally tracked edit text.
//!
//! ```text
//! external 5 ──► same as last seen? ──yes──► keep edit text
//!                     │
//!                     no
//!                     ▼
//!             normalize(5) == normalize(edit text)? ──yes──► keep edit text
//!                     │                                      ("5.0" survives)
//!                     no
//!                     ▼
//!             edit text = format_edit(normalize(5))
//! ```
//! Comparing normalized values keeps an in-progress edit from being
//! clobbered by an echo of the same number in another textual form.

use tracing::trace;

use crate::format::NumberFormatter;
use crate::policy::Policy;

/// Edit text for an external value: normalized, clamped, edit-formatted.
pub fn external_edit_text<F: NumberFormatter>(policy: &Policy<F>, value: Option<f64>) -> String {
    let normalized = value.and_then(|v| policy.normalize(v));
    policy.format_edit(normalized)
}

/// Returns the replacement edit text, or `None` to keep the current one.
pub fn sync_external<F: NumberFormatter>(
    policy: &Policy<F>,
    last_seen: Option<f64>,
    value: Option<f64>,
    current_text: &str,
) -> Option<String> {
    if last_seen == value {
        return None;
    }

    let incoming = value.and_then(|v| policy.normalize(v));
    if incoming == policy.parse_and_normalize(current_text) {
        trace!(?value, current_text, "External value matches edit text");
        return None;
    }

    let text = policy.format_edit(incoming);
    trace!(?value, %text, "External value replaces edit text");
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NumericFieldConfig;
    use crate::format::LocaleFormatter;

    fn policy(config: NumericFieldConfig) -> Policy<LocaleFormatter> {
        let formatter = LocaleFormatter::for_locale(&config.locale);
        Policy::new(&config, formatter).unwrap()
    }

    #[test]
    fn test_same_value_never_touches_text() {
        let p = policy(NumericFieldConfig::default());
        assert_eq!(sync_external(&p, Some(5.0), Some(5.0), "5.0"), None);
    }

    #[test]
    fn test_equal_normalized_value_keeps_text() {
        let p = policy(NumericFieldConfig::default());
        assert_eq!(sync_external(&p, None, Some(5.0), "5.0"), None);
    }

    #[test]
    fn test_new_value_replaces_text() {
        let p = policy(NumericFieldConfig::for_locale("de-DE").with_bounds(-1.0, 100.0));
        assert_eq!(
            sync_external(&p, Some(5.0), Some(3.14), "5"),
            Some("3,14".to_string())
        );
        assert_eq!(
            sync_external(&p, Some(5.0), Some(500.0), "5"),
            Some("100".to_string())
        );
    }

    #[test]
    fn test_reset_to_none_clears_text() {
        let p = policy(NumericFieldConfig::default());
        assert_eq!(sync_external(&p, Some(5.0), None, "5"), Some(String::new()));
        assert_eq!(sync_external(&p, Some(5.0), None, ""), None);
    }

    #[test]
    fn test_external_edit_text() {
        let p = policy(NumericFieldConfig::default().with_maximum_fraction_digits(1));
        assert_eq!(external_edit_text(&p, Some(2.25)), "2.3");
        assert_eq!(external_edit_text(&p, None), "");
    }
}
