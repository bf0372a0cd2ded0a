//! Preview pane: reveals the generated description one character at a
//! time, then allows copying and free editing.
//!
//! Features:
//! - Auto-scroll follows the newest character until the user scrolls up
//! - A blinking caret while revealing, removed once complete
//! - Footer with generation status and a transient "Copied!" acknowledgment
//! - Editing with the same cursor rendering as the form's text fields

use std::cell::Cell;
use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use tubedesc_core::description::{GenerationResult, ResultId};
use tubedesc_core::reveal::{Reveal, RevealPhase, TickOutcome};
use tubedesc_core::text::TextBuffer;

use crate::action::Action;
use crate::components::text_view::{layout_text, render_row, scroll_to_show, VisualLine};
use crate::components::Component;
use crate::theme::Theme;

const CARET: &str = "▌";

pub struct PreviewComponent {
    reveal: Reveal,
    title: String,
    received_at: String,
    copied_at: Option<Instant>,
    copied_feedback: Duration,
    /// Caret visibility, toggled on every tick while revealing.
    blink_on: bool,
    /// Whether this pane owns keyboard focus.
    pub active: bool,
    /// The pane is sliding in ahead of the first result.
    pub sliding: bool,
    /// Keep the newest line in view.
    follow: bool,
    scroll: Cell<usize>,
    max_scroll: Cell<usize>,
}

impl PreviewComponent {
    pub fn new(copied_feedback: Duration) -> Self {
        Self {
            reveal: Reveal::new(),
            title: String::new(),
            received_at: String::new(),
            copied_at: None,
            copied_feedback,
            blink_on: true,
            active: false,
            sliding: false,
            follow: true,
            scroll: Cell::new(0),
            max_scroll: Cell::new(0),
        }
    }

    /// Show `result`. A result with a new id restarts the reveal; returns
    /// whether it did.
    pub fn load(&mut self, result: &GenerationResult) -> bool {
        if !self.reveal.load(result.id, result.full_text()) {
            return false;
        }
        self.title = result.description.title.clone();
        self.received_at = result.received_at.format("%H:%M:%S UTC").to_string();
        self.copied_at = None;
        self.blink_on = true;
        self.follow = true;
        self.scroll.set(0);
        true
    }

    /// Advance the reveal for `id`. Ticks for any other result are ignored.
    pub fn tick(&mut self, id: ResultId) -> TickOutcome {
        if self.reveal.source() != Some(id) {
            return TickOutcome::Ignored;
        }
        self.reveal.tick()
    }

    pub fn reveal(&self) -> &Reveal {
        &self.reveal
    }

    /// Drop the shown result and any unsaved edit.
    pub fn unmount(&mut self) {
        self.reveal.unmount();
        self.title.clear();
        self.received_at.clear();
        self.copied_at = None;
    }

    pub fn copy_text(&self) -> Option<&str> {
        self.reveal.copy_text()
    }

    pub fn mark_copied(&mut self, at: Instant) {
        self.copied_at = Some(at);
    }

    pub fn copied_visible(&self, now: Instant) -> bool {
        self.copied_at
            .is_some_and(|at| now.saturating_duration_since(at) < self.copied_feedback)
    }

    /// Whether this component wants to capture raw key input.
    pub fn wants_input(&self) -> bool {
        self.reveal.is_editing()
    }

    fn edit(&mut self, edit: impl FnOnce(&mut TextBuffer)) {
        if let Some(buffer) = self.reveal.edit_buffer_mut() {
            edit(buffer);
        }
    }

    fn scroll_by(&mut self, down: bool) {
        let current = self.scroll.get();
        let max = self.max_scroll.get();
        if down {
            let next = (current + 1).min(max);
            self.scroll.set(next);
            self.follow = next >= max;
        } else {
            self.scroll.set(current.saturating_sub(1));
            self.follow = false;
        }
    }
}

impl Component for PreviewComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::Tick => {
                self.blink_on = self.reveal.is_revealing() && !self.blink_on;
                if self
                    .copied_at
                    .is_some_and(|_| !self.copied_visible(Instant::now()))
                {
                    self.copied_at = None;
                }
                None
            }
            Action::BeginEdit => {
                if self.reveal.begin_edit() {
                    None
                } else {
                    Some(Action::SetStatus(
                        "Editing is available once the description is complete".to_string(),
                    ))
                }
            }
            Action::SaveEdit => self.reveal.save_edit().map(Action::EditSaved),
            Action::CancelEdit => {
                self.reveal.cancel_edit();
                None
            }

            // ── Edit buffer ─────────────────────────────────────
            Action::CharInput(c) => {
                self.edit(|b| b.insert_char(*c));
                None
            }
            Action::BackspaceInput => {
                self.edit(TextBuffer::backspace);
                None
            }
            Action::DeleteWord => {
                self.edit(TextBuffer::delete_word);
                None
            }
            Action::NewlineInput => {
                self.edit(TextBuffer::newline);
                None
            }
            Action::PasteBulk(text) => {
                self.edit(|b| b.insert_str(text));
                None
            }
            Action::CursorLeft => {
                self.edit(TextBuffer::move_left);
                None
            }
            Action::CursorRight => {
                self.edit(TextBuffer::move_right);
                None
            }
            Action::CursorUp => {
                self.edit(|b| {
                    b.move_up();
                });
                None
            }
            Action::CursorDown => {
                self.edit(|b| {
                    b.move_down();
                });
                None
            }

            Action::ScrollUp if !self.wants_input() => {
                self.scroll_by(false);
                None
            }
            Action::ScrollDown if !self.wants_input() => {
                self.scroll_by(true);
                None
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let mut block = Block::default()
            .title(self.header())
            .borders(Borders::ALL)
            .border_style(if self.sliding {
                Theme::dim()
            } else if self.active {
                Theme::focused_border()
            } else {
                Theme::border()
            });
        if let Some(footer) = self.footer() {
            block = block.title_bottom(footer);
        }
        block = block.title_bottom(self.hints().right_aligned());

        let inner = block.inner(area);
        let width = (inner.width as usize).max(1);
        let height = inner.height as usize;

        let (rows, focus_row) = match self.reveal.phase() {
            RevealPhase::Idle => {
                let waiting = if self.sliding {
                    vec![Line::from(Span::styled(
                        "Generating description...",
                        Theme::in_progress(),
                    ))]
                } else {
                    Vec::new()
                };
                frame.render_widget(Paragraph::new(waiting).block(block), area);
                return;
            }
            RevealPhase::Editing => {
                let buffer = self.reveal.edit_buffer();
                let text = buffer.map(TextBuffer::as_str).unwrap_or_default();
                let cursor = buffer.map(TextBuffer::cursor);
                layout_text(text, cursor, width)
            }
            RevealPhase::Revealing | RevealPhase::Complete => {
                layout_text(self.reveal.revealed(), None, width)
            }
        };

        let max_scroll = rows.len().saturating_sub(height);
        self.max_scroll.set(max_scroll);
        let scroll = if self.reveal.is_editing() {
            scroll_to_show(self.scroll.get(), focus_row, height)
        } else if self.follow {
            max_scroll
        } else {
            self.scroll.get().min(max_scroll)
        };
        self.scroll.set(scroll);

        let last = rows.len().saturating_sub(1);
        let lines: Vec<Line> = rows
            .iter()
            .enumerate()
            .skip(scroll)
            .take(height)
            .map(|(i, row)| self.row_line(row, i == last))
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

impl PreviewComponent {
    fn row_line(&self, row: &VisualLine, is_last: bool) -> Line<'static> {
        let mut line = render_row(row, Theme::normal());
        if is_last && self.reveal.is_revealing() && self.blink_on {
            line.spans.push(Span::styled(CARET, Theme::caret()));
        }
        line
    }

    fn header(&self) -> Line<'static> {
        let mut spans = vec![Span::styled(" Preview ", Theme::title())];
        if !self.title.is_empty() {
            spans.push(Span::styled(format!("· {} ", self.title), Theme::header()));
        }
        if !self.received_at.is_empty() {
            spans.push(Span::styled(
                format!("· {} ", self.received_at),
                Theme::dim(),
            ));
        }
        Line::from(spans)
    }

    fn footer(&self) -> Option<Line<'static>> {
        let status = match self.reveal.phase() {
            RevealPhase::Idle => return None,
            RevealPhase::Revealing => Span::styled(" ● generation in progress ", Theme::in_progress()),
            RevealPhase::Complete => Span::styled(" ✓ generation finished ", Theme::done()),
            RevealPhase::Editing => Span::styled(" ✎ editing ", Theme::selected()),
        };
        let mut spans = vec![status];
        if self.copied_visible(Instant::now()) {
            spans.push(Span::styled("Copied! ", Theme::done()));
        }
        Some(Line::from(spans))
    }

    fn hints(&self) -> Line<'static> {
        let pairs: &[(&str, &str)] = match self.reveal.phase() {
            RevealPhase::Idle | RevealPhase::Revealing => &[("b", " back ")],
            RevealPhase::Complete => &[("c", " copy  "), ("e", " edit  "), ("b", " back ")],
            RevealPhase::Editing => &[("ctrl+s", " save  "), ("esc", " cancel ")],
        };
        let spans = pairs
            .iter()
            .flat_map(|(key, desc)| {
                [
                    Span::styled(*key, Theme::key_hint()),
                    Span::styled(*desc, Theme::dim()),
                ]
            })
            .collect::<Vec<_>>();
        Line::from(spans)
    }
}
