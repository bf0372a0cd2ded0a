//! Status bar at the bottom of the TUI.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;

pub struct StatusBarComponent {
    /// Current status message.
    pub message: String,
    /// Short label for what the keyboard is driving right now.
    pub badge: &'static str,
}

impl StatusBarComponent {
    pub fn new() -> Self {
        Self {
            message: "Fill in the video details, then press Ctrl+S to generate.".to_string(),
            badge: "Form",
        }
    }
}

impl Component for StatusBarComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        if let Action::SetStatus(msg) = action {
            self.message = msg.clone();
        }
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let width = area.width as usize;

        let hints = "q·?·ctrl+s";
        let hints_len = hints.chars().count() + 1;
        let badge_len = self.badge.len() + 2;

        let msg_budget = width
            .saturating_sub(badge_len)
            .saturating_sub(hints_len)
            .saturating_sub(4);
        let msg = truncate(&self.message, msg_budget);

        let used = badge_len + 2 + msg.chars().count();
        let pad = width.saturating_sub(used + hints_len);

        let line = Line::from(vec![
            Span::styled(format!(" {} ", self.badge), Theme::muted()),
            Span::styled("  ", Theme::dim()),
            Span::styled(msg, Theme::status_bar()),
            Span::raw(" ".repeat(pad)),
            Span::styled(hints, Theme::key_hint()),
            Span::raw(" "),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Cut `message` to `budget` characters, marking the cut with an ellipsis.
fn truncate(message: &str, budget: usize) -> String {
    if message.chars().count() <= budget {
        return message.to_string();
    }
    if budget <= 3 {
        return String::new();
    }
    let kept: String = message.chars().take(budget - 3).collect();
    format!("{kept}...")
}
