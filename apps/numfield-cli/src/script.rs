//! # Script Replay
//!
//! Replays a JSON-lines script against one field while playing the host: a
//! text buffer that receives allowed keys and honors every text rewrite.
//!
//! ## Script Format
//! Each non-empty line is either a host step or a raw [`FieldEvent`]:
//! ```text
//! {"type":"type","text":"15"}        keydown/keyup per character
//! {"type":"backspace"}               delete the last character
//! {"type":"enter"}                   press and release Enter
//! {"type":"clipboard","text":"42"}   paste, then an input event
//! {"type":"focus"}                   any FieldEvent, passed through
//! ```
//! Lines starting with `#` are comments.
//!
//! ## Output
//! One [`Record`] per field handler call.

use numfield_core::{FieldEvent, KeyPress, NumberFormatter, NumericField, Reaction};
use serde::{Deserialize, Serialize};
use std::io::BufRead;
use tracing::debug;

use crate::error::{AppError, AppResult};

// =============================================================================
// Script Steps
// =============================================================================

/// Host-level action expanded into one or more field events.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostStep {
    Type { text: String },
    Backspace,
    Enter,
    Clipboard { text: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Host(HostStep),
    Event(FieldEvent),
}

/// Parses one script line; `None` for blanks and comments.
pub fn parse_step(line: &str) -> Result<Option<Step>, serde_json::Error> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    match serde_json::from_str::<HostStep>(line) {
        Ok(step) => Ok(Some(Step::Host(step))),
        Err(_) => serde_json::from_str::<FieldEvent>(line).map(|e| Some(Step::Event(e))),
    }
}

// =============================================================================
// Replay
// =============================================================================

/// One handler call and its outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub line: usize,
    pub event: String,
    pub reaction: Reaction,
    /// Host text after the reaction was applied.
    pub text: String,
    /// `"blocked"` or `"rewritten"` when the reaction carries a warning.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<&'static str>,
    /// Inline message for the warning, in English.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Simulated host: the visible text plus the field behind it.
pub struct Host<F: NumberFormatter> {
    field: NumericField<F>,
    buffer: String,
    records: Vec<Record>,
    line: usize,
}

impl<F: NumberFormatter> Host<F> {
    pub fn new(field: NumericField<F>) -> Self {
        let buffer = field.shown_text();
        Host {
            field,
            buffer,
            records: Vec::new(),
            line: 0,
        }
    }

    pub fn field(&self) -> &NumericField<F> {
        &self.field
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Runs every step of `script`.
    pub fn replay(&mut self, script: impl BufRead) -> AppResult<()> {
        for (index, line) in script.lines().enumerate() {
            let line = line?;
            self.line = index + 1;
            let step = parse_step(&line).map_err(|e| AppError::Script {
                line: self.line,
                reason: e.to_string(),
            })?;

            match step {
                Some(Step::Host(step)) => self.host_step(step),
                Some(Step::Event(event)) => self.event(event),
                None => {}
            }
        }
        debug!(steps = self.line, records = self.records.len(), "Script replayed");
        Ok(())
    }

    fn host_step(&mut self, step: HostStep) {
        match step {
            HostStep::Type { text } => {
                for ch in text.chars() {
                    self.key(&ch.to_string(), |buffer| buffer.push(ch));
                }
            }
            HostStep::Backspace => self.key("Backspace", |buffer| {
                buffer.pop();
            }),
            HostStep::Enter => self.key("Enter", |_| {}),
            HostStep::Clipboard { text } => {
                let reaction = self.field.paste(&text);
                let blocked = reaction.blocked;
                self.record(format!("paste {text:?}"), reaction);
                if !blocked {
                    self.buffer.push_str(&text);
                    let content = self.buffer.clone();
                    let reaction = self.field.input(&content);
                    self.record(format!("input {content:?}"), reaction);
                }
            }
        }
    }

    /// Keydown, then (if allowed) the edit and the keyup.
    fn key(&mut self, key: &str, edit: impl FnOnce(&mut String)) {
        let mut press = KeyPress::new(key);
        // outside edit mode the buffer holds the display form
        if self.field.is_editing() {
            press = press.with_text(self.buffer.as_str());
        }
        let reaction = self.field.key_down(&press);
        let blocked = reaction.blocked;
        self.record(format!("keyDown {key:?}"), reaction);
        if blocked {
            return;
        }

        edit(&mut self.buffer);
        let content = self.buffer.clone();
        let reaction = self.field.key_up(&content, Some(key));
        self.record(format!("keyUp {content:?}"), reaction);
    }

    fn event(&mut self, event: FieldEvent) {
        // the host text is whatever the event says it is
        if let FieldEvent::KeyUp { text, .. } | FieldEvent::Input { text } = &event {
            self.buffer = text.clone();
        }
        let label = format!("{event:?}");
        let reaction = self.field.handle(event);
        self.record(label, reaction);
    }

    fn record(&mut self, event: String, reaction: Reaction) {
        if let Some(text) = &reaction.replace_text {
            self.buffer = text.clone();
        }
        let outcome = reaction.warning.as_ref().map(|w| {
            if w.kind.is_blocked() {
                "blocked"
            } else {
                "rewritten"
            }
        });
        let message = reaction.warning.as_ref().map(ToString::to_string);
        self.records.push(Record {
            line: self.line,
            event,
            reaction,
            text: self.buffer.clone(),
            outcome,
            message,
        });
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use numfield_core::{NumericFieldConfig, WarningKind};

    fn host(config: NumericFieldConfig) -> Host<numfield_core::LocaleFormatter> {
        Host::new(NumericField::new(config).unwrap())
    }

    #[test]
    fn test_parse_steps() {
        assert_eq!(parse_step("  ").unwrap(), None);
        assert_eq!(parse_step("# comment").unwrap(), None);
        assert_eq!(
            parse_step(r#"{"type":"type","text":"12"}"#).unwrap(),
            Some(Step::Host(HostStep::Type { text: "12".into() }))
        );
        assert_eq!(
            parse_step(r#"{"type":"blur"}"#).unwrap(),
            Some(Step::Event(FieldEvent::Blur))
        );
        assert!(parse_step(r#"{"type":"dance"}"#).is_err());
    }

    #[test]
    fn test_replay_clamps_and_commits() {
        let mut host = host(NumericFieldConfig::default().with_bounds(-1.0, 10.0));
        let script = "{\"type\":\"focus\"}\n{\"type\":\"type\",\"text\":\"15\"}\n{\"type\":\"blur\"}\n";
        host.replay(script.as_bytes()).unwrap();

        assert_eq!(host.text(), "10");
        let rewrite = host
            .records()
            .iter()
            .find_map(|r| r.reaction.warning.as_ref())
            .unwrap();
        assert_eq!(rewrite.kind, WarningKind::ModifiedMaxNumber);

        let last = host.records().last().unwrap();
        assert_eq!(last.line, 3);
        assert_eq!(last.reaction.commit.unwrap().value, Some(10.0));
    }

    #[test]
    fn test_blocked_keys_never_reach_the_buffer() {
        let mut host = host(NumericFieldConfig::default().with_bounds(0.0, 100.0));
        host.replay("{\"type\":\"focus\"}\n{\"type\":\"type\",\"text\":\"-4 2\"}\n".as_bytes())
            .unwrap();
        assert_eq!(host.text(), "42");
    }

    #[test]
    fn test_backspace_and_enter() {
        let mut host = host(NumericFieldConfig::default());
        let script = r#"{"type":"focus"}
{"type":"type","text":"123"}
{"type":"backspace"}
{"type":"enter"}"#;
        host.replay(script.as_bytes()).unwrap();

        assert_eq!(host.text(), "12");
        assert_eq!(host.field().edit_text(), "12");
        assert!(host.records().last().unwrap().reaction.submit_requested);
    }

    #[test]
    fn test_clipboard_paste() {
        let mut host = host(NumericFieldConfig::default());
        let script = r#"{"type":"focus"}
{"type":"clipboard","text":"abc"}
{"type":"clipboard","text":"42"}"#;
        host.replay(script.as_bytes()).unwrap();

        assert_eq!(host.text(), "42");
        let last = host.records().last().unwrap();
        assert_eq!(last.reaction.commit.unwrap().value, Some(42.0));
    }

    #[test]
    fn test_records_classify_warnings() {
        let mut host = host(NumericFieldConfig::default().with_bounds(0.0, 10.0));
        let script = "{\"type\":\"focus\"}\n{\"type\":\"type\",\"text\":\"-15\"}\n";
        host.replay(script.as_bytes()).unwrap();

        let outcomes: Vec<_> = host.records().iter().filter_map(|r| r.outcome).collect();
        assert_eq!(outcomes, vec!["blocked", "rewritten"]);

        let blocked = host.records().iter().find(|r| r.outcome == Some("blocked")).unwrap();
        assert_eq!(blocked.message.as_deref(), Some("Negative numbers are not allowed"));

        let json = serde_json::to_value(host.records().last().unwrap()).unwrap();
        assert_eq!(json["outcome"], "rewritten");
        assert!(json["message"].as_str().unwrap().contains("maximum"));

        let quiet = serde_json::to_value(&host.records()[0]).unwrap();
        assert!(quiet.get("outcome").is_none());
    }

    #[test]
    fn test_bad_line_reports_its_number() {
        let mut host = host(NumericFieldConfig::default());
        let err = host
            .replay("{\"type\":\"focus\"}\nnot json\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, AppError::Script { line: 2, .. }));
    }
}
