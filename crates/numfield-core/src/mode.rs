//! # Display/Edit Mode Switch
//!
//! Binary state selecting which representation the field shows.
//!
//! ```text
//!               focus / mouseenter
//!   ┌─────────┐ ─────────────────► ┌─────────┐
//!   │ DISPLAY │                    │  EDIT   │
//!   └─────────┘ ◄───────────────── └─────────┘
//!                blur, or mouseleave while not focused
//! ```
//! Focus always wins: leaving with the pointer keeps a focused field in edit
//! mode. Entering never reformats; leaving always does (see `field.rs`).

/// Focus and hover tracking for one field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeSwitch {
    editing: bool,
    focused: bool,
}

impl ModeSwitch {
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn focus(&mut self) {
        self.focused = true;
        self.editing = true;
    }

    pub fn pointer_enter(&mut self) {
        self.editing = true;
    }

    /// Returns true if edit mode was left.
    pub fn blur(&mut self) -> bool {
        self.focused = false;
        std::mem::replace(&mut self.editing, false)
    }

    /// Returns true if edit mode was left.
    pub fn pointer_leave(&mut self) -> bool {
        if self.focused {
            return false;
        }
        std::mem::replace(&mut self.editing, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_enters_and_blur_leaves() {
        let mut mode = ModeSwitch::default();
        assert!(!mode.is_editing());

        mode.focus();
        assert!(mode.is_editing());
        assert!(mode.is_focused());

        assert!(mode.blur());
        assert!(!mode.is_editing());
        assert!(!mode.blur());
    }

    #[test]
    fn test_focus_wins_over_pointer_leave() {
        let mut mode = ModeSwitch::default();
        mode.pointer_enter();
        mode.focus();
        assert!(!mode.pointer_leave());
        assert!(mode.is_editing());
    }

    #[test]
    fn test_hover_only_session() {
        let mut mode = ModeSwitch::default();
        mode.pointer_enter();
        assert!(mode.is_editing());
        assert!(mode.pointer_leave());
        assert!(!mode.pointer_leave());
    }
}
