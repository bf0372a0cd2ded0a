//! Help overlay with the keybinding reference.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;

pub struct HelpComponent {
    pub visible: bool,
}

impl HelpComponent {
    pub fn new() -> Self {
        Self { visible: false }
    }

    fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
        let [_, middle, _] = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .flex(Flex::Center)
        .areas(area);

        let [_, center, _] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .flex(Flex::Center)
        .areas(middle);

        center
    }
}

impl Component for HelpComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::ToggleHelp => {
                self.visible = !self.visible;
                None
            }
            // Timers and async results must not close the overlay.
            Action::Tick
            | Action::RevealTick(_)
            | Action::PreviewShown(_)
            | Action::TransitionSettled(_)
            | Action::GenerationStarted
            | Action::GenerationFinished { .. }
            | Action::SetStatus(_) => None,
            _ if self.visible => {
                // Any key closes help.
                self.visible = false;
                None
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let dialog = Self::centered_rect(area, 58, 24);
        frame.render_widget(Clear, dialog);

        let block = Block::default()
            .title(" Help: keybindings ")
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Theme::focused_border());

        let help_text = vec![
            Line::from(""),
            key_line("q / Ctrl+C", "Quit"),
            key_line("?", "Toggle this help"),
            key_line("f / p", "Focus form / preview"),
            Line::from(""),
            Line::from(Span::styled("── Form ──", Theme::header())),
            key_line("Tab / Shift+Tab", "Next / previous field"),
            key_line("Left / Right", "Change the selected option"),
            key_line("+ / Ctrl+N", "Add a link row"),
            key_line("- / Ctrl+D", "Remove the focused link row"),
            key_line("Ctrl+V", "Paste from the clipboard"),
            key_line("Ctrl+S", "Generate the description"),
            key_line("Ctrl+R", "Reset the form"),
            Line::from(""),
            Line::from(Span::styled("── Preview ──", Theme::header())),
            key_line("Up / Down", "Scroll"),
            key_line("c", "Copy to the clipboard"),
            key_line("e", "Edit the description"),
            key_line("Ctrl+S / Esc", "Save / cancel the edit"),
            key_line("b", "Back to the form"),
        ];

        let paragraph = Paragraph::new(help_text).block(block);
        frame.render_widget(paragraph, dialog);
    }
}

fn key_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {:<20}", key), Theme::selected()),
        Span::styled(desc, Theme::normal()),
    ])
}
