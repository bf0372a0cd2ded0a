//! Color scheme and styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// Palette for tubedesc: warm greys on the terminal background, a red accent
/// for the brand and the reveal caret, and a cool blue for focus.
pub struct Theme;

impl Theme {
    // ── Palette ─────────────────────────────────────────────
    fn text() -> Color {
        Color::Rgb(214, 210, 204)
    }

    fn text_faint() -> Color {
        Color::Rgb(96, 92, 88)
    }

    fn text_soft() -> Color {
        Color::Rgb(150, 144, 138)
    }

    fn focus() -> Color {
        Color::Rgb(96, 160, 240)
    }

    fn brand() -> Color {
        Color::Rgb(230, 33, 23)
    }

    fn ok() -> Color {
        Color::Rgb(94, 190, 110)
    }

    fn pending() -> Color {
        Color::Rgb(236, 170, 60)
    }

    fn rule() -> Color {
        Color::Rgb(64, 60, 58)
    }

    // ── Text ────────────────────────────────────────────────

    /// App name and pane titles.
    pub fn title() -> Style {
        Style::default().fg(Self::brand()).add_modifier(Modifier::BOLD)
    }

    pub fn header() -> Style {
        Style::default().fg(Self::text()).add_modifier(Modifier::BOLD)
    }

    /// Focused field label and current option value.
    pub fn selected() -> Style {
        Style::default().fg(Self::focus()).add_modifier(Modifier::BOLD)
    }

    pub fn normal() -> Style {
        Style::default().fg(Self::text())
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::text_faint())
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::text_soft())
    }

    pub fn key_hint() -> Style {
        Style::default().fg(Self::focus())
    }

    pub fn status_bar() -> Style {
        Self::muted()
    }

    // ── Frames ──────────────────────────────────────────────

    pub fn border() -> Style {
        Style::default().fg(Self::rule())
    }

    pub fn focused_border() -> Style {
        Style::default().fg(Self::focus())
    }

    // ── Editing and reveal ──────────────────────────────────

    /// Block cursor drawn over the character under the text cursor.
    pub fn cursor() -> Style {
        Style::default().fg(Color::Black).bg(Self::focus())
    }

    /// Trailing caret shown while text is still being revealed.
    pub fn caret() -> Style {
        Style::default().fg(Self::brand()).add_modifier(Modifier::BOLD)
    }

    pub fn field_error() -> Style {
        Style::default().fg(Self::brand())
    }

    pub fn in_progress() -> Style {
        Style::default().fg(Self::pending())
    }

    pub fn done() -> Style {
        Style::default().fg(Self::ok())
    }
}
