//! Action enum: the central message bus for the TUI.
//! Key presses, timer ticks and async results all flow through here.

use tubedesc_core::description::{ResultId, ServiceResponse};
use tubedesc_core::submission::Submission;

/// Every possible action that can occur in the application.
#[derive(Debug)]
pub enum Action {
    // ── Global ──────────────────────────────────────────────
    /// Quit the application.
    Quit,
    /// Toggle help overlay.
    ToggleHelp,
    /// Display a status message in the status bar.
    SetStatus(String),
    /// A tick event for the caret blink and transient messages.
    Tick,
    /// Ctrl+S: submit the form, or save the preview edit.
    Save,
    /// Esc: cancel the preview edit, or leave the focused text field.
    Escape,
    /// Move keyboard focus to the form pane.
    FocusForm,
    /// Move keyboard focus to the preview pane.
    FocusPreview,

    // ── Text input ──────────────────────────────────────────
    /// A character was typed (only sent when in input mode).
    CharInput(char),
    BackspaceInput,
    /// Delete word (Ctrl+W).
    DeleteWord,
    /// Enter in a multi-line field.
    NewlineInput,
    /// Paste from the system clipboard (Ctrl+V).
    PasteInput,
    /// Bulk paste from bracketed paste mode.
    PasteBulk(String),
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,

    // ── Form ────────────────────────────────────────────────
    FocusNext,
    FocusPrev,
    /// Step the focused select field forward.
    CycleNext,
    CyclePrev,
    AddLink,
    /// Remove the focused link row.
    RemoveLink,
    ResetForm,
    SubmitForm,

    // ── Submission ──────────────────────────────────────────
    /// A request was cleared to go out.
    GenerationStarted,
    /// The service answered (or the request failed) for this submission.
    GenerationFinished {
        submission: Submission,
        response: tubedesc_core::Result<ServiceResponse>,
    },

    // ── View composer timers ────────────────────────────────
    PreviewShown(u64),
    TransitionSettled(u64),
    BackToForm,

    // ── Preview ─────────────────────────────────────────────
    /// One reveal step for the given result.
    RevealTick(ResultId),
    Copy,
    BeginEdit,
    SaveEdit,
    CancelEdit,
    /// The preview committed an edit; the result's summary becomes this text.
    EditSaved(String),
    ScrollUp,
    ScrollDown,
}

/// Whether the app is in a text-input mode where raw keys should
/// be forwarded to the active component instead of interpreted as
/// global shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal mode: keys are global shortcuts.
    Normal,
    /// Text input mode: keys go to the focused text field.
    Editing,
}

/// Which pane owns keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Form,
    Preview,
}
