//! # Numeric Field Controller
//!
//! One live numeric input: owns its [`EditState`] and routes every inbound
//! UI event through the validator, reconciler, mode switch and sync logic.
//!
//! ## Event Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Keystroke, End to End                            │
//! │                                                                         │
//! │  keydown("5") ──► Keystroke Validator ──block──► Reaction{blocked}     │
//! │                          │                                              │
//! │                        allow                                            │
//! │                          ▼                                              │
//! │  host applies the key to its text buffer                               │
//! │                          │                                              │
//! │  keyup("15") ───► Commit Reconciler ──rewrite──► Reaction{replaceText} │
//! │                          │                                              │
//! │                        accept                                           │
//! │                          ▼                                              │
//! │  blur() ────────► Mode Switch leaves edit mode                         │
//! │                          │                                              │
//! │                          ▼                                              │
//! │                 Reaction{commit: 10, replaceText: display form}        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! Handlers run synchronously on the UI thread. Each field owns exactly one
//! `EditState` and is its only writer, so no locking is involved.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use ts_rs::TS;

use crate::config::NumericFieldConfig;
use crate::error::CoreResult;
use crate::format::{FromLocale, LocaleFormatter, NumberFormatter};
use crate::keystroke::{validate_keystroke, KeyPress, KeyVerdict};
use crate::mode::ModeSwitch;
use crate::policy::{InputMode, Policy};
use crate::reconcile::{finalize, reconcile, Reconciliation};
use crate::sync::{external_edit_text, sync_external};
use crate::warning::{Warning, WarningKind};

// =============================================================================
// Events
// =============================================================================

/// Inbound UI event for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "camelCase")]
#[ts(export)]
pub enum FieldEvent {
    KeyDown(KeyPress),
    KeyUp {
        /// Host text after the key landed.
        text: String,
        #[serde(default)]
        key: Option<String>,
    },
    Paste {
        text: String,
    },
    /// Content change without a key release (e.g. after a paste).
    Input {
        text: String,
    },
    Focus,
    Blur,
    MouseEnter,
    MouseLeave,
    ExternalValue {
        value: Option<f64>,
    },
}

/// A committed numeric value; `None` for an empty field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Commit {
    pub value: Option<f64>,
}

/// What the host must do after an event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Reaction {
    /// Discard the key or paste; the text must not change.
    pub blocked: bool,

    /// Write this into the visible text.
    pub replace_text: Option<String>,

    /// Emit this value to the field owner.
    pub commit: Option<Commit>,

    /// Warning raised by this event.
    pub warning: Option<Warning>,

    /// Enter was released on accepted text.
    pub submit_requested: bool,
}

impl Reaction {
    fn blocked(warning: Option<Warning>) -> Self {
        Reaction {
            blocked: true,
            warning,
            ..Default::default()
        }
    }
}

// =============================================================================
// Edit State
// =============================================================================

/// Per-instance mutable state. Only the owning [`NumericField`] writes it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditState {
    /// Last committed edit text: empty, a lone minus, or parsable.
    pub raw_text: String,
    pub mode: ModeSwitch,
    pub last_external_value: Option<f64>,
    /// Single-slot warning; replaced, never accumulated.
    pub warning: Option<Warning>,
    /// An allowed paste awaits its reconciliation.
    pub paste_pending: bool,
}

// =============================================================================
// Numeric Field
// =============================================================================

/// Controller for one numeric input.
#[derive(Debug, Clone)]
pub struct NumericField<F = LocaleFormatter> {
    policy: Policy<F>,
    state: EditState,
}

impl NumericField<LocaleFormatter> {
    /// Creates a field using the reference formatter for `config.locale`.
    ///
    /// ## Errors
    /// Returns a [`CoreError`](crate::CoreError) if the configuration is
    /// invalid (e.g. `minimumValue > 1`).
    pub fn new(config: NumericFieldConfig) -> CoreResult<Self> {
        let formatter = LocaleFormatter::for_locale(&config.locale);
        Self::with_formatter(config, formatter)
    }
}

impl<F: NumberFormatter> NumericField<F> {
    /// Creates a field backed by a host-supplied formatter.
    pub fn with_formatter(config: NumericFieldConfig, formatter: F) -> CoreResult<Self> {
        let policy = Policy::new(&config, formatter)?;
        debug!(
            locale = %config.locale,
            min = config.minimum_value,
            max = config.maximum_value,
            max_fraction_digits = policy.max_fraction_digits(),
            "Numeric field created"
        );
        Ok(NumericField {
            policy,
            state: EditState::default(),
        })
    }

    /// Seeds the field with its owner's initial value.
    pub fn with_value(mut self, value: Option<f64>) -> Self {
        self.state.raw_text = external_edit_text(&self.policy, value);
        self.state.last_external_value = value;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn policy(&self) -> &Policy<F> {
        &self.policy
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    /// Committed edit text, as shown while editing.
    pub fn edit_text(&self) -> &str {
        &self.state.raw_text
    }

    /// The text the host should render right now.
    pub fn shown_text(&self) -> String {
        if self.state.mode.is_editing() {
            self.state.raw_text.clone()
        } else {
            self.policy
                .format_display(self.policy.parse_and_normalize(&self.state.raw_text))
        }
    }

    /// Current normalized value of the committed edit text.
    pub fn value(&self) -> Option<f64> {
        self.policy.parse_and_normalize(&self.state.raw_text)
    }

    pub fn warning(&self) -> Option<&Warning> {
        self.state.warning.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.state.mode.is_editing()
    }

    pub fn input_mode(&self) -> InputMode {
        self.policy.input_mode()
    }

    // =========================================================================
    // Event Handlers
    // =========================================================================

    /// Dispatches one inbound event.
    pub fn handle(&mut self, event: FieldEvent) -> Reaction {
        match event {
            FieldEvent::KeyDown(press) => self.key_down(&press),
            FieldEvent::KeyUp { text, key } => self.key_up(&text, key.as_deref()),
            FieldEvent::Paste { text } => self.paste(&text),
            FieldEvent::Input { text } => self.input(&text),
            FieldEvent::Focus => self.focus(),
            FieldEvent::Blur => self.blur(),
            FieldEvent::MouseEnter => self.mouse_enter(),
            FieldEvent::MouseLeave => self.mouse_leave(),
            FieldEvent::ExternalValue { value } => self.set_external_value(value),
        }
    }

    /// Keydown: may block the key before it reaches the text.
    pub fn key_down(&mut self, press: &KeyPress) -> Reaction {
        match validate_keystroke(&self.policy, &self.state.raw_text, press) {
            KeyVerdict::Allow => {
                self.state.warning = None;
                Reaction::default()
            }
            KeyVerdict::Block(warning) => {
                debug!(kind = %warning.kind, key = %press.key, "Keystroke blocked");
                self.state.warning = Some(warning.clone());
                Reaction::blocked(Some(warning))
            }
            KeyVerdict::Ignore => {
                trace!(key = %press.key, "Keystroke ignored, max length reached");
                Reaction::blocked(None)
            }
        }
    }

    /// Key release: reconciles the host text, and requests submit on Enter.
    pub fn key_up(&mut self, text: &str, key: Option<&str>) -> Reaction {
        let mut reaction = self.reconcile_text(text);
        if key == Some("Enter") && reaction.replace_text.is_none() {
            reaction.submit_requested = true;
        }
        reaction
    }

    /// Content change that did not come with a key release.
    pub fn input(&mut self, text: &str) -> Reaction {
        self.reconcile_text(text)
    }

    /// Paste: unparsable clipboard content is blocked entirely.
    pub fn paste(&mut self, clipboard: &str) -> Reaction {
        if self.policy.parse_and_normalize(clipboard).is_none() {
            let warning = Warning::new(WarningKind::BlockedNotANumber, clipboard);
            debug!(clipboard, "Paste blocked, not a number");
            self.state.warning = Some(warning.clone());
            return Reaction::blocked(Some(warning));
        }

        self.state.paste_pending = true;
        Reaction::default()
    }

    pub fn focus(&mut self) -> Reaction {
        let was_editing = self.state.mode.is_editing();
        self.state.mode.focus();
        self.entered(was_editing)
    }

    pub fn mouse_enter(&mut self) -> Reaction {
        let was_editing = self.state.mode.is_editing();
        self.state.mode.pointer_enter();
        self.entered(was_editing)
    }

    pub fn blur(&mut self) -> Reaction {
        if self.state.mode.blur() {
            self.leave()
        } else {
            Reaction::default()
        }
    }

    /// Pointer leave only ends the session if the field is not focused.
    pub fn mouse_leave(&mut self) -> Reaction {
        if self.state.mode.pointer_leave() {
            self.leave()
        } else {
            Reaction::default()
        }
    }

    /// Owner-supplied value (e.g. form reset).
    pub fn set_external_value(&mut self, value: Option<f64>) -> Reaction {
        let replacement = sync_external(
            &self.policy,
            self.state.last_external_value,
            value,
            &self.state.raw_text,
        );
        self.state.last_external_value = value;

        match replacement {
            Some(text) => {
                self.state.raw_text = text;
                Reaction {
                    replace_text: Some(self.shown_text()),
                    ..Default::default()
                }
            }
            None => Reaction::default(),
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn reconcile_text(&mut self, text: &str) -> Reaction {
        let outcome = reconcile(&self.policy, &self.state.raw_text, text);
        let mut reaction = Reaction::default();

        match &outcome {
            Reconciliation::Unchanged => {}
            Reconciliation::Accepted => {
                trace!(text, "Edit accepted");
                self.state.raw_text = text.to_string();
            }
            Reconciliation::Reset { text: restored, warning } => {
                debug!(kind = %warning.kind, input = text, "Edit reset");
                reaction.replace_text = Some(restored.clone());
            }
            Reconciliation::Rewritten {
                text: rewritten,
                value,
                warning,
            } => {
                debug!(kind = %warning.kind, input = text, %rewritten, ?value, "Edit rewritten");
                self.state.raw_text = rewritten.clone();
                reaction.replace_text = Some(rewritten.clone());
            }
        }

        if let Some(warning) = outcome.warning() {
            self.state.warning = Some(warning.clone());
            reaction.warning = Some(warning.clone());
        }

        if std::mem::take(&mut self.state.paste_pending) {
            reaction.commit = match outcome {
                Reconciliation::Reset { .. } => None,
                Reconciliation::Rewritten { value, .. } => Some(Commit { value }),
                Reconciliation::Unchanged | Reconciliation::Accepted => Some(Commit {
                    value: self.value(),
                }),
            };
        }

        reaction
    }

    fn entered(&self, was_editing: bool) -> Reaction {
        if was_editing {
            return Reaction::default();
        }
        trace!("Entering edit mode");
        Reaction {
            replace_text: Some(self.state.raw_text.clone()),
            ..Default::default()
        }
    }

    fn leave(&mut self) -> Reaction {
        let (value, text) = finalize(&self.policy, &self.state.raw_text);
        self.state.raw_text = text;
        self.state.warning = None;
        self.state.paste_pending = false;
        trace!(?value, "Leaving edit mode");

        Reaction {
            replace_text: Some(self.shown_text()),
            commit: Some(Commit { value }),
            ..Default::default()
        }
    }
}

impl<F: NumberFormatter + FromLocale> NumericField<F> {
    /// Applies a new configuration to a live field.
    ///
    /// Derived formatters are rebuilt only if format-affecting options
    /// changed. A rebuild rewrites the edit text in the new format, keeping
    /// its value, and the reaction carries the text to show.
    pub fn reconfigure(&mut self, config: &NumericFieldConfig) -> CoreResult<Reaction> {
        let value = self.value();
        if !self.policy.reconfigure(config)? {
            return Ok(Reaction::default());
        }

        let text = external_edit_text(&self.policy, value);
        debug!(locale = %config.locale, ?value, %text, "Derived formatters rebuilt");
        if text == self.state.raw_text {
            return Ok(Reaction::default());
        }
        self.state.raw_text = text;
        Ok(Reaction {
            replace_text: Some(self.shown_text()),
            ..Default::default()
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn field(config: NumericFieldConfig) -> NumericField {
        NumericField::new(config).unwrap()
    }

    #[test]
    fn test_invalid_config_is_fatal() {
        let config = NumericFieldConfig::default().with_bounds(2.0, 10.0);
        assert!(NumericField::new(config).is_err());
    }

    #[test]
    fn test_allowed_key_clears_warning() {
        let mut f = field(NumericFieldConfig::default());
        f.focus();

        let reaction = f.key_down(&KeyPress::new("x"));
        assert!(reaction.blocked);
        assert_eq!(f.warning().map(|w| w.kind), Some(WarningKind::BlockedNotANumber));

        let reaction = f.key_down(&KeyPress::new("1"));
        assert!(!reaction.blocked);
        assert!(f.warning().is_none());
    }

    #[test]
    fn test_warning_slot_is_replaced() {
        let mut f = field(NumericFieldConfig::default().with_bounds(0.0, 10.0));
        f.key_down(&KeyPress::new("-"));
        f.key_down(&KeyPress::new(" "));
        assert_eq!(f.warning().map(|w| w.kind), Some(WarningKind::BlockedWhitespace));
    }

    #[test]
    fn test_reset_keeps_committed_text() {
        let mut f = field(NumericFieldConfig::default());
        f.focus();
        f.key_up("12", None);

        let reaction = f.key_up("1x2", None);
        assert_eq!(reaction.replace_text.as_deref(), Some("12"));
        assert_eq!(
            reaction.warning.map(|w| w.kind),
            Some(WarningKind::ResetNotANumber)
        );
        assert_eq!(f.edit_text(), "12");
    }

    #[test]
    fn test_enter_requests_submit_only_on_accepted_text() {
        let mut f = field(NumericFieldConfig::default().with_bounds(-1.0, 10.0));
        f.focus();

        assert!(f.key_up("7", Some("Enter")).submit_requested);
        assert!(!f.key_up("70", Some("Enter")).submit_requested);
        assert!(f.key_up("10", Some("Enter")).submit_requested);
    }

    #[test]
    fn test_paste_blocked_when_not_a_number() {
        let mut f = field(NumericFieldConfig::default());
        f.focus();
        let reaction = f.paste("twelve");
        assert!(reaction.blocked);
        assert_eq!(reaction.warning.unwrap().input(), "twelve");
        assert!(!f.state().paste_pending);
    }

    #[test]
    fn test_paste_commits_on_reconcile() {
        let mut f = field(NumericFieldConfig::default().with_bounds(-1.0, 100.0));
        f.focus();

        assert!(!f.paste("250").blocked);
        let reaction = f.input("250");
        assert_eq!(reaction.replace_text.as_deref(), Some("100"));
        assert_eq!(reaction.commit, Some(Commit { value: Some(100.0) }));

        // the flag is consumed
        assert_eq!(f.input("99").commit, None);
    }

    #[test]
    fn test_paste_commits_rounded_value() {
        let config = NumericFieldConfig::default().with_maximum_fraction_digits(2);
        let mut f = field(config);
        f.focus();

        assert!(!f.paste("1.239").blocked);
        let reaction = f.input("1.239");
        assert_eq!(reaction.replace_text.as_deref(), Some("1.24"));
        assert_eq!(reaction.commit, Some(Commit { value: Some(1.24) }));
        assert_eq!(
            reaction.warning.unwrap().kind,
            WarningKind::ModifiedMaxFractionDigits
        );
    }

    #[test]
    fn test_focus_shows_raw_and_blur_shows_display() {
        let config = NumericFieldConfig::default()
            .with_grouping(true)
            .with_maximum_fraction_digits(2);
        let mut f = field(config).with_value(Some(1234.5));
        assert_eq!(f.shown_text(), "1,234.5");

        let reaction = f.focus();
        assert_eq!(reaction.replace_text.as_deref(), Some("1234.5"));
        assert_eq!(f.shown_text(), "1234.5");

        f.key_up("1234.56", None);
        let reaction = f.blur();
        assert_eq!(reaction.commit, Some(Commit { value: Some(1234.56) }));
        assert_eq!(reaction.replace_text.as_deref(), Some("1,234.56"));
        assert!(f.warning().is_none());
    }

    #[test]
    fn test_mouse_leave_commits_only_when_not_focused() {
        let mut f = field(NumericFieldConfig::default());

        f.mouse_enter();
        f.focus();
        assert_eq!(f.mouse_leave(), Reaction::default());
        assert!(f.is_editing());

        f.blur();
        f.mouse_enter();
        let reaction = f.mouse_leave();
        assert_eq!(reaction.commit, Some(Commit { value: None }));
    }

    #[test]
    fn test_handle_dispatches_events() {
        let mut f = field(NumericFieldConfig::default().with_bounds(-1.0, 10.0));
        f.handle(FieldEvent::Focus);
        f.handle(FieldEvent::KeyDown(KeyPress::new("5")));
        f.handle(FieldEvent::KeyUp {
            text: "5".to_string(),
            key: None,
        });
        let reaction = f.handle(FieldEvent::Blur);
        assert_eq!(reaction.commit, Some(Commit { value: Some(5.0) }));
    }

    #[test]
    fn test_event_json_shape() {
        let event: FieldEvent =
            serde_json::from_str(r#"{"type":"keyDown","key":"5"}"#).unwrap();
        assert_eq!(event, FieldEvent::KeyDown(KeyPress::new("5")));

        let event: FieldEvent =
            serde_json::from_str(r#"{"type":"externalValue","value":null}"#).unwrap();
        assert_eq!(event, FieldEvent::ExternalValue { value: None });
    }

    #[test]
    fn test_reconfigure_switches_locale() {
        let mut f = field(NumericFieldConfig::default()).with_value(Some(3.5));
        f.reconfigure(&NumericFieldConfig::for_locale("de-DE"))
            .unwrap();
        assert_eq!(f.policy().decimal_separator(), ',');
        assert_eq!(f.input_mode(), InputMode::Decimal);
    }

    #[test]
    fn test_reconfigure_keeps_value_across_separators() {
        let mut f = field(NumericFieldConfig::default()).with_value(Some(3.5));
        f.handle(FieldEvent::Focus);
        assert_eq!(f.edit_text(), "3.5");

        let reaction = f
            .reconfigure(&NumericFieldConfig::for_locale("de-DE"))
            .unwrap();
        assert_eq!(f.edit_text(), "3,5");
        assert_eq!(f.value(), Some(3.5));
        assert_eq!(reaction.replace_text.as_deref(), Some("3,5"));

        let reaction = f.handle(FieldEvent::Blur);
        assert_eq!(reaction.commit, Some(Commit { value: Some(3.5) }));
    }

    #[test]
    fn test_reconfigure_bounds_only_keeps_text() {
        let mut f = field(NumericFieldConfig::default()).with_value(Some(3.5));
        let reaction = f
            .reconfigure(&NumericFieldConfig::default().with_bounds(0.0, 100.0))
            .unwrap();
        assert_eq!(reaction, Reaction::default());
        assert_eq!(f.edit_text(), "3.5");
    }
}
