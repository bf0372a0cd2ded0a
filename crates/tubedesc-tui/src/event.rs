//! Terminal event handling: captures keyboard, paste and resize events
//! from crossterm and dispatches them as Actions.
//!
//! The handler operates in two modes:
//! - Normal: keys are mapped to shortcuts (quit, copy, edit, cycle selects).
//! - Editing: keys are forwarded as raw CharInput/BackspaceInput so text
//!   fields can receive typed characters.
//!
//! The current InputMode is shared between the App and EventHandler via
//! an Arc<AtomicU8>.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::action::{Action, InputMode};

const MODE_NORMAL: u8 = 0;
const MODE_EDITING: u8 = 1;

/// Shared flag the App sets so the EventHandler knows which keymap to use.
pub type InputModeFlag = Arc<AtomicU8>;

pub fn new_input_mode_flag() -> InputModeFlag {
    Arc::new(AtomicU8::new(MODE_NORMAL))
}

pub fn set_input_mode(flag: &InputModeFlag, mode: InputMode) {
    let val = match mode {
        InputMode::Normal => MODE_NORMAL,
        InputMode::Editing => MODE_EDITING,
    };
    flag.store(val, Ordering::Relaxed);
}

pub fn get_input_mode(flag: &InputModeFlag) -> InputMode {
    match flag.load(Ordering::Relaxed) {
        MODE_EDITING => InputMode::Editing,
        _ => InputMode::Normal,
    }
}

/// Event loop that reads terminal events and sends Actions.
pub struct EventHandler {
    tx: mpsc::UnboundedSender<Action>,
    tick_rate: Duration,
    mode_flag: InputModeFlag,
}

impl EventHandler {
    pub fn new(
        tx: mpsc::UnboundedSender<Action>,
        tick_rate: Duration,
        mode_flag: InputModeFlag,
    ) -> Self {
        Self {
            tx,
            tick_rate,
            mode_flag,
        }
    }

    /// Run the event loop until the receiving side goes away.
    pub async fn run(&self) {
        let mut interval = tokio::time::interval(self.tick_rate);

        loop {
            let action = tokio::select! {
                _ = interval.tick() => {
                    Some(Action::Tick)
                }
                result = tokio::task::spawn_blocking(|| {
                    if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                        event::read().ok()
                    } else {
                        None
                    }
                }) => {
                    match result {
                        Ok(Some(event)) => self.map_event(event),
                        _ => None,
                    }
                }
            };

            if let Some(action) = action {
                if self.tx.send(action).is_err() {
                    break;
                }
            }
        }
    }

    fn map_event(&self, event: Event) -> Option<Action> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.map_key(key),
            Event::Paste(text) => Some(Action::PasteBulk(text)),
            Event::Resize(_, _) => Some(Action::Tick),
            _ => None,
        }
    }

    fn map_key(&self, key: KeyEvent) -> Option<Action> {
        // Ctrl+C always quits regardless of mode.
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        match get_input_mode(&self.mode_flag) {
            InputMode::Editing => map_key_editing(key),
            InputMode::Normal => map_key_normal(key),
        }
    }
}

/// Key mapping when a text field is focused. Most keys become character
/// input; only a few are reserved for navigation.
fn map_key_editing(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('w') => Some(Action::DeleteWord),
            KeyCode::Char('v') => Some(Action::PasteInput),
            KeyCode::Char('s') | KeyCode::Enter => Some(Action::Save),
            KeyCode::Char('r') => Some(Action::ResetForm),
            KeyCode::Char('n') => Some(Action::AddLink),
            KeyCode::Char('d') => Some(Action::RemoveLink),
            _ => None,
        };
    }

    // Alt+Enter also saves (some terminals send this instead of Ctrl+Enter).
    if key.modifiers.contains(KeyModifiers::ALT) && key.code == KeyCode::Enter {
        return Some(Action::Save);
    }

    match key.code {
        KeyCode::Esc => Some(Action::Escape),
        KeyCode::Tab => Some(Action::FocusNext),
        KeyCode::BackTab => Some(Action::FocusPrev),
        KeyCode::Enter => Some(Action::NewlineInput),
        KeyCode::Backspace => Some(Action::BackspaceInput),
        KeyCode::Left => Some(Action::CursorLeft),
        KeyCode::Right => Some(Action::CursorRight),
        KeyCode::Up => Some(Action::CursorUp),
        KeyCode::Down => Some(Action::CursorDown),
        KeyCode::Char(c) => Some(Action::CharInput(c)),
        _ => None,
    }
}

/// Key mapping in normal mode: shortcuts.
fn map_key_normal(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('s') => Some(Action::Save),
            KeyCode::Char('r') => Some(Action::ResetForm),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Tab | KeyCode::Enter => Some(Action::FocusNext),
        KeyCode::BackTab => Some(Action::FocusPrev),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::CycleNext),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::CyclePrev),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::ScrollUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::ScrollDown),
        KeyCode::Char('+') => Some(Action::AddLink),
        KeyCode::Char('-') => Some(Action::RemoveLink),
        KeyCode::Char('c') => Some(Action::Copy),
        KeyCode::Char('e') => Some(Action::BeginEdit),
        KeyCode::Char('b') => Some(Action::BackToForm),
        KeyCode::Char('f') => Some(Action::FocusForm),
        KeyCode::Char('p') => Some(Action::FocusPreview),
        KeyCode::Esc => Some(Action::Escape),
        _ => None,
    }
}
