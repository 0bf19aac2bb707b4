//! # Keystroke Validator
//!
//! Intercepts each keypress before it reaches the visible text and rejects
//! characters that would produce an unparsable or policy-violating string.
//!
//! ## Decision Flow
//! ```text
//! keydown(key)
//!    │
//!    ├── " "                            ──► Block(BLOCKED_WHITESPACE)
//!    ├── "-" in a non-negative field    ──► Block(BLOCKED_NEGATIVE_NUMBER)
//!    ├── named key / Ctrl / Alt / Meta  ──► Allow (unexamined)
//!    │
//!    └── single character
//!          candidate = host text with key applied
//!          ├── candidate == "-"              ──► Allow (transient state)
//!          ├── parse(candidate) is None      ──► Block(BLOCKED_NOT_A_NUMBER)
//!          ├── decimal separator, 0 digits   ──► Block(BLOCKED_FRACTION)
//!          ├── longer than maxLength         ──► Ignore (no warning)
//!          └── otherwise                     ──► Allow
//! ```
//!
//! This is a best-effort filter. Without a selection the key is assumed to be
//! appended, so some valid mid-string edits are rejected. The candidate is
//! built from the host text carried by the press when present, and from the
//! committed edit text otherwise; keys repeated before any keyup only count
//! against `maxLength` if the host supplies its text. The
//! [reconciler](crate::reconcile) remains the authoritative backstop.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::format::NumberFormatter;
use crate::policy::Policy;
use crate::warning::{Warning, WarningKind};

// =============================================================================
// Key Press
// =============================================================================

/// Modifier keys held during a keypress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Modifiers {
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub meta: bool,
    #[serde(default)]
    pub shift: bool,
}

impl Modifiers {
    /// Ctrl, Alt or Meta turn a character into a shortcut.
    pub fn is_shortcut(&self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

/// Host selection as byte offsets into the current text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Creates a normalized selection (`start <= end`).
    pub fn new(a: usize, b: usize) -> Self {
        Selection {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn caret(at: usize) -> Self {
        Selection { start: at, end: at }
    }

    /// Replaces the selected range, or `None` if it is not a valid range of `text`.
    pub fn apply(&self, text: &str, insert: &str) -> Option<String> {
        let start = self.start.min(self.end);
        let end = self.start.max(self.end);
        if end > text.len() || !text.is_char_boundary(start) || !text.is_char_boundary(end) {
            return None;
        }
        let mut out = String::with_capacity(text.len() + insert.len());
        out.push_str(&text[..start]);
        out.push_str(insert);
        out.push_str(&text[end..]);
        Some(out)
    }
}

/// One keydown event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct KeyPress {
    /// Key value: a single character, or a named key such as `Backspace`.
    pub key: String,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub selection: Option<Selection>,
    /// Text the host shows before the key lands, if it differs from the
    /// field's committed edit text (e.g. during autorepeat, before keyup).
    #[serde(default)]
    pub text: Option<String>,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        KeyPress {
            key: key.into(),
            modifiers: Modifiers::default(),
            selection: None,
            text: None,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn at(mut self, selection: Selection) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Single characters change the value; named keys are longer.
    pub fn is_character(&self) -> bool {
        self.key.chars().count() == 1
    }

    /// Text the host would show if the key landed.
    pub fn candidate(&self, text: &str) -> String {
        self.selection
            .and_then(|selection| selection.apply(text, &self.key))
            .unwrap_or_else(|| format!("{text}{}", self.key))
    }
}

// =============================================================================
// Verdict
// =============================================================================

/// Outcome of a keydown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyVerdict {
    /// Let the key through and clear any warning.
    Allow,
    /// Discard the key and surface a warning.
    Block(Warning),
    /// Discard the key silently (length limit).
    Ignore,
}

impl KeyVerdict {
    fn block(kind: WarningKind, input: &str) -> Self {
        KeyVerdict::Block(Warning::new(kind, input))
    }
}

/// Judges a keydown against the current edit text.
pub fn validate_keystroke<F: NumberFormatter>(
    policy: &Policy<F>,
    text: &str,
    press: &KeyPress,
) -> KeyVerdict {
    let key = press.key.as_str();

    if key == " " {
        return KeyVerdict::block(WarningKind::BlockedWhitespace, key);
    }

    if key == "-" && policy.bounds().is_non_negative() {
        return KeyVerdict::block(WarningKind::BlockedNegativeNumber, key);
    }

    if !press.is_character() || press.modifiers.is_shortcut() {
        return KeyVerdict::Allow;
    }

    let candidate = press.candidate(press.text.as_deref().unwrap_or(text));
    if candidate == "-" {
        return KeyVerdict::Allow;
    }

    if policy.parse(&candidate).is_none() {
        return KeyVerdict::block(WarningKind::BlockedNotANumber, key);
    }

    let is_decimal = key.chars().next() == Some(policy.decimal_separator());
    if is_decimal && policy.max_fraction_digits() == 0 {
        return KeyVerdict::block(WarningKind::BlockedFraction, key);
    }

    if candidate.chars().count() > policy.max_length() {
        return KeyVerdict::Ignore;
    }

    KeyVerdict::Allow
}

// =============================================================================
// Unit Tests
// =============================================================================
