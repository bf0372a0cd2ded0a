//! Typewriter reveal of a generated description, followed by free editing.
//!
//! ```text
//! Idle ──load──▶ Revealing ──last tick──▶ Complete ◀──save/cancel── Editing
//!                    ▲                        └────────begin_edit───────▲
//!                    └──────────── load (new result id) from any state
//! ```
//!
//! The machine has no clock of its own: the owner drives it with [`Reveal::tick`]
//! from a recurring timer and stops the timer once a tick reports completion.

use crate::description::ResultId;
use crate::text::TextBuffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    Idle,
    Revealing,
    Complete,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// One more character is visible.
    Advanced(char),
    /// The last character was revealed; the timer should stop.
    Completed(char),
    /// Nothing to reveal in the current phase.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct Reveal {
    source: Option<ResultId>,
    full_text: String,
    /// Byte length of the revealed prefix, always on a char boundary.
    revealed_len: usize,
    phase: RevealPhase,
    edit: Option<TextBuffer>,
}

impl Reveal {
    pub fn new() -> Self {
        Self {
            source: None,
            full_text: String::new(),
            revealed_len: 0,
            phase: RevealPhase::Idle,
            edit: None,
        }
    }

    /// Supply the text of a result. A result id different from the current
    /// one restarts the reveal from empty and discards any unsaved edit; the
    /// same id is ignored. Returns whether the reveal restarted.
    pub fn load(&mut self, source: ResultId, full_text: String) -> bool {
        if self.source == Some(source) {
            return false;
        }
        self.source = Some(source);
        self.revealed_len = 0;
        self.edit = None;
        self.phase = if full_text.is_empty() {
            RevealPhase::Idle
        } else {
            RevealPhase::Revealing
        };
        self.full_text = full_text;
        true
    }

    /// Reveal exactly one more character, in source order.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != RevealPhase::Revealing {
            return TickOutcome::Ignored;
        }
        let Some(c) = self.full_text[self.revealed_len..].chars().next() else {
            self.phase = RevealPhase::Complete;
            return TickOutcome::Ignored;
        };
        self.revealed_len += c.len_utf8();
        if self.revealed_len == self.full_text.len() {
            self.phase = RevealPhase::Complete;
            TickOutcome::Completed(c)
        } else {
            TickOutcome::Advanced(c)
        }
    }

    /// Switch to free editing. Only possible once the reveal is complete.
    pub fn begin_edit(&mut self) -> bool {
        if self.phase != RevealPhase::Complete {
            return false;
        }
        self.edit = Some(TextBuffer::multi_line().with_text(self.revealed()));
        self.phase = RevealPhase::Editing;
        true
    }

    pub fn edit_buffer(&self) -> Option<&TextBuffer> {
        self.edit.as_ref()
    }

    pub fn edit_buffer_mut(&mut self) -> Option<&mut TextBuffer> {
        self.edit.as_mut()
    }

    /// Commit the edit buffer as the displayed text and return it so the
    /// owner can update the result. `None` when not editing.
    pub fn save_edit(&mut self) -> Option<String> {
        if self.phase != RevealPhase::Editing {
            return None;
        }
        let text = self.edit.take().map(TextBuffer::into_string)?;
        self.full_text = text.clone();
        self.revealed_len = self.full_text.len();
        self.phase = RevealPhase::Complete;
        Some(text)
    }

    /// Leave editing without touching the displayed text.
    pub fn cancel_edit(&mut self) -> bool {
        if self.phase != RevealPhase::Editing {
            return false;
        }
        self.edit = None;
        self.phase = RevealPhase::Complete;
        true
    }

    /// Forget everything, including any unsaved edit.
    pub fn unmount(&mut self) {
        *self = Self::new();
    }

    /// Text a copy action would put on the clipboard: the revealed text once
    /// complete, the edit buffer while editing, nothing before that.
    pub fn copy_text(&self) -> Option<&str> {
        match self.phase {
            RevealPhase::Complete => Some(self.revealed()),
            RevealPhase::Editing => self.edit.as_ref().map(TextBuffer::as_str),
            RevealPhase::Idle | RevealPhase::Revealing => None,
        }
    }

    pub fn revealed(&self) -> &str {
        &self.full_text[..self.revealed_len]
    }

    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    pub fn source(&self) -> Option<ResultId> {
        self.source
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    pub fn is_revealing(&self) -> bool {
        self.phase == RevealPhase::Revealing
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.phase, RevealPhase::Complete | RevealPhase::Editing)
    }

    pub fn is_editing(&self) -> bool {
        self.phase == RevealPhase::Editing
    }
}

impl Default for Reveal {
    fn default() -> Self {
        Self::new()
    }
}
