//! The request form: select fields, free-text fields and the link editor.
//!
//! Features:
//! - Tab / Shift+Tab walk the fields; Up/Down leave a multi-line field at its edges
//! - Left/Right cycle the focused select field
//! - `+` / Ctrl+N add a link row, `-` / Ctrl+D remove the focused one
//! - Field errors from the last submit attempt render under their field and
//!   clear as soon as that field is edited

use std::cell::Cell;

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use tubedesc_core::config::FormConfig;
use tubedesc_core::form::{DescriptionForm, FormField, ValidationErrors};
use tubedesc_core::links::{LinkField, LinkId};
use tubedesc_core::options::{select_next, select_prev, Choice, TimestampsMode};
use tubedesc_core::text::TextBuffer;

use crate::action::Action;
use crate::components::text_view::{layout_text, render_row, scroll_to_show};
use crate::components::Component;
use crate::theme::Theme;

/// Width of the label column, including padding.
const LABEL_WIDTH: usize = 18;

pub struct DescriptionFormComponent {
    pub form: DescriptionForm,
    focus: FormField,
    /// Edit buffer for the focused link field; written back on every change.
    link_buffer: TextBuffer,
    errors: ValidationErrors,
    /// A submission is in flight.
    pub busy: bool,
    /// Whether this pane owns keyboard focus.
    pub active: bool,
    scroll: Cell<usize>,
}

impl DescriptionFormComponent {
    pub fn new(defaults: FormConfig) -> Self {
        Self {
            form: DescriptionForm::new(defaults),
            focus: FormField::VideoType,
            link_buffer: TextBuffer::single_line(),
            errors: ValidationErrors::default(),
            busy: false,
            active: true,
            scroll: Cell::new(0),
        }
    }

    pub fn focused(&self) -> FormField {
        self.focus
    }

    /// Whether this component wants to capture raw key input.
    pub fn wants_input(&self) -> bool {
        is_text_field(self.focus)
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Fields in focus order. Manual timestamps only appear in manual mode.
    pub fn focus_order(&self) -> Vec<FormField> {
        let mut order = vec![
            FormField::VideoType,
            FormField::DescriptionTone,
            FormField::VideoUrl,
            FormField::OptionalKeywords,
            FormField::Hashtags,
            FormField::Language,
            FormField::Translation,
            FormField::TimestampsMode,
        ];
        if self.form.timestamps_mode == TimestampsMode::Manual {
            order.push(FormField::ManualTimestamps);
        }
        for link in &self.form.links {
            order.push(FormField::LinkTitle(link.id));
            order.push(FormField::LinkUrl(link.id));
        }
        order
    }

    pub fn set_focus(&mut self, field: FormField) {
        self.focus = field;
        if let Some((id, which)) = link_target(field) {
            let value = self
                .form
                .links
                .get(id)
                .map(|link| link.field(which).to_string())
                .unwrap_or_default();
            self.link_buffer = TextBuffer::single_line().with_text(value);
        }
    }

    fn focus_step(&mut self, forward: bool) {
        let order = self.focus_order();
        let len = order.len();
        let pos = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (pos + 1) % len
        } else {
            (pos + len - 1) % len
        };
        self.set_focus(order[next]);
    }

    /// Show the errors of a rejected submit and jump to the first one.
    pub fn show_errors(&mut self, errors: ValidationErrors) {
        if let Some(first) = errors.errors.first() {
            if self.focus_order().contains(&first.field) {
                self.set_focus(first.field);
            }
        }
        self.errors = errors;
    }

    pub fn clear_errors(&mut self) {
        self.errors = ValidationErrors::default();
    }

    fn clear_error(&mut self, field: FormField) {
        self.errors.errors.retain(|e| e.field != field);
    }

    pub fn set_video_url(&mut self, url: &str) {
        self.form.set_video_url(url);
    }

    pub fn reset(&mut self) {
        self.form.reset();
        self.clear_errors();
        self.set_focus(FormField::VideoType);
        self.scroll.set(0);
    }

    fn focused_buffer(&self) -> Option<&TextBuffer> {
        match self.focus {
            FormField::LinkTitle(_) | FormField::LinkUrl(_) => Some(&self.link_buffer),
            FormField::VideoUrl => Some(&self.form.video_url),
            FormField::OptionalKeywords => Some(&self.form.optional_keywords),
            FormField::Hashtags => Some(&self.form.hashtags),
            FormField::ManualTimestamps => Some(&self.form.manual_timestamps),
            _ => None,
        }
    }

    /// Apply `edit` to the focused text field. Returns false on a select field.
    fn edit_focused(&mut self, edit: impl FnOnce(&mut TextBuffer)) -> bool {
        let field = self.focus;
        if let Some((id, which)) = link_target(field) {
            edit(&mut self.link_buffer);
            self.form.links.update(id, which, self.link_buffer.as_str());
        } else {
            match self.form.text_mut(field) {
                Some(buffer) => edit(buffer),
                None => return false,
            }
        }
        self.clear_error(field);
        true
    }

    fn cycle(&mut self, forward: bool) {
        let form = &mut self.form;
        match self.focus {
            FormField::VideoType => form.video_type = step(form.video_type, forward),
            FormField::DescriptionTone => {
                form.description_tone = step(form.description_tone, forward)
            }
            FormField::Language => form.language = step(form.language, forward),
            FormField::Translation => form.translation = step(form.translation, forward),
            FormField::TimestampsMode => {
                form.timestamps_mode = if forward {
                    form.timestamps_mode.next()
                } else {
                    form.timestamps_mode.prev()
                }
            }
            _ => return,
        }
        self.clear_error(self.focus);
    }

    fn add_link(&mut self) {
        let id = self.form.links.add();
        self.set_focus(FormField::LinkTitle(id));
    }

    fn remove_focused_link(&mut self) -> Option<Action> {
        let Some((id, _)) = link_target(self.focus) else {
            return Some(Action::SetStatus("Focus a link row to remove it".to_string()));
        };
        let old_order = self.focus_order();
        let pos = old_order.iter().position(|f| *f == self.focus).unwrap_or(0);
        if !self.form.links.remove(id) {
            return Some(Action::SetStatus(
                "The last link row cannot be removed".to_string(),
            ));
        }
        self.errors
            .errors
            .retain(|e| link_target(e.field).map(|(l, _)| l) != Some(id));
        let new_order = self.focus_order();
        let target = old_order[..pos]
            .iter()
            .rev()
            .find(|f| new_order.contains(f))
            .copied()
            .unwrap_or(FormField::VideoType);
        self.set_focus(target);
        None
    }

    fn vertical(&mut self, up: bool) {
        let moved = match self.focus {
            FormField::OptionalKeywords | FormField::ManualTimestamps => self
                .form
                .text_mut(self.focus)
                .is_some_and(|b| if up { b.move_up() } else { b.move_down() }),
            _ => false,
        };
        if !moved {
            self.focus_step(!up);
        }
    }
}

impl Component for DescriptionFormComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            // ── Text input ──────────────────────────────────────
            Action::CharInput(c) => {
                self.edit_focused(|b| b.insert_char(*c));
                None
            }
            Action::BackspaceInput => {
                self.edit_focused(TextBuffer::backspace);
                None
            }
            Action::DeleteWord => {
                self.edit_focused(TextBuffer::delete_word);
                None
            }
            Action::PasteBulk(text) => {
                if !text.is_empty() {
                    self.edit_focused(|b| b.insert_str(text));
                }
                None
            }
            Action::NewlineInput => {
                let multiline = self.focused_buffer().is_some_and(TextBuffer::is_multiline);
                if multiline {
                    self.edit_focused(TextBuffer::newline);
                } else {
                    self.focus_step(true);
                }
                None
            }
            Action::CursorLeft => {
                self.edit_focused(TextBuffer::move_left);
                None
            }
            Action::CursorRight => {
                self.edit_focused(TextBuffer::move_right);
                None
            }
            Action::CursorUp | Action::ScrollUp => {
                self.vertical(true);
                None
            }
            Action::CursorDown | Action::ScrollDown => {
                self.vertical(false);
                None
            }

            // ── Navigation and selects ──────────────────────────
            Action::FocusNext => {
                self.focus_step(true);
                None
            }
            Action::FocusPrev => {
                self.focus_step(false);
                None
            }
            Action::CycleNext => {
                self.cycle(true);
                None
            }
            Action::CyclePrev => {
                self.cycle(false);
                None
            }

            // ── Links ───────────────────────────────────────────
            Action::AddLink => {
                self.add_link();
                None
            }
            Action::RemoveLink => self.remove_focused_link(),

            Action::ResetForm => {
                self.reset();
                Some(Action::SetStatus("Form reset".to_string()))
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Video details ")
            .title_style(if self.active {
                Theme::title()
            } else {
                Theme::muted()
            })
            .borders(Borders::ALL)
            .border_style(if self.active {
                Theme::focused_border()
            } else {
                Theme::border()
            });
        let inner = block.inner(area);
        let value_width = (inner.width as usize).saturating_sub(LABEL_WIDTH).max(1);

        let mut lines: Vec<Line<'static>> = Vec::new();
        let mut focus_line = 0;

        for field in self.focus_order() {
            if let FormField::LinkTitle(id) = field {
                if self.form.links.as_slice().first().map(|l| l.id) == Some(id) {
                    lines.push(Line::from(""));
                    lines.push(Line::from(Span::styled(
                        "  Useful links",
                        Theme::header(),
                    )));
                }
            }

            let start = lines.len();
            let (field_lines, cursor_offset) = self.field_lines(field, value_width);
            if field == self.focus {
                focus_line = start + cursor_offset;
            }
            lines.extend(field_lines);

            if let Some(message) = self.errors.for_field(field) {
                lines.push(Line::from(Span::styled(
                    format!("{:width$}⚠ {}", "", message, width = LABEL_WIDTH),
                    Theme::field_error(),
                )));
            }
        }

        lines.push(Line::from(""));
        lines.push(self.hint_line());

        let scroll = scroll_to_show(self.scroll.get(), focus_line, inner.height as usize);
        self.scroll.set(scroll);

        let paragraph = Paragraph::new(lines)
            .block(block)
            .scroll((scroll as u16, 0));
        frame.render_widget(paragraph, area);
    }
}

impl DescriptionFormComponent {
    /// Rendered rows for one field and the offset of its cursor row.
    fn field_lines(&self, field: FormField, width: usize) -> (Vec<Line<'static>>, usize) {
        let focused = field == self.focus && self.active;
        let label_style = if field == self.focus {
            Theme::selected()
        } else {
            Theme::muted()
        };
        let label = Span::styled(
            format!("  {:<width$}", field_label(field), width = LABEL_WIDTH - 2),
            label_style,
        );

        if let Some(value) = self.select_value(field) {
            let value_style = if value.is_none() {
                Theme::dim()
            } else if focused {
                Theme::selected()
            } else {
                Theme::normal()
            };
            let text = format!("‹ {} ›", value.unwrap_or_else(|| "select".to_string()));
            return (
                vec![Line::from(vec![label, Span::styled(text, value_style)])],
                0,
            );
        }

        let (text, cursor) = match (self.focused_buffer(), focused) {
            (Some(buffer), true) => (buffer.as_str().to_string(), Some(buffer.cursor())),
            _ => (self.stored_text(field), None),
        };

        if text.is_empty() && cursor.is_none() {
            return (
                vec![Line::from(vec![
                    label,
                    Span::styled(placeholder(field).to_string(), Theme::dim()),
                ])],
                0,
            );
        }

        let (rows, cursor_row) = layout_text(&text, cursor, width);
        let indent = " ".repeat(LABEL_WIDTH);
        let mut label = Some(label);
        let lines = rows
            .iter()
            .map(|row| {
                let mut line = render_row(row, Theme::normal());
                let prefix = label
                    .take()
                    .unwrap_or_else(|| Span::raw(indent.clone()));
                line.spans.insert(0, prefix);
                line
            })
            .collect();
        (lines, cursor_row)
    }

    /// Display value of a select field; `None` inside means nothing chosen.
    fn select_value(&self, field: FormField) -> Option<Option<String>> {
        let form = &self.form;
        match field {
            FormField::VideoType => Some(form.video_type.map(choice_label)),
            FormField::DescriptionTone => Some(form.description_tone.map(choice_label)),
            FormField::Language => Some(form.language.map(choice_label)),
            FormField::Translation => Some(form.translation.map(choice_label)),
            FormField::TimestampsMode => Some(Some(choice_label(form.timestamps_mode))),
            _ => None,
        }
    }

    fn stored_text(&self, field: FormField) -> String {
        let form = &self.form;
        match field {
            FormField::VideoUrl => form.video_url.as_str().to_string(),
            FormField::OptionalKeywords => form.optional_keywords.as_str().to_string(),
            FormField::Hashtags => form.hashtags.as_str().to_string(),
            FormField::ManualTimestamps => form.manual_timestamps.as_str().to_string(),
            FormField::LinkTitle(id) | FormField::LinkUrl(id) => link_target(field)
                .and_then(|(_, which)| form.links.get(id).map(|l| l.field(which).to_string()))
                .unwrap_or_default(),
            _ => String::new(),
        }
    }

    fn hint_line(&self) -> Line<'static> {
        if self.busy {
            return Line::from(Span::styled(
                "  Generating description...",
                Theme::in_progress(),
            ));
        }
        let mut spans = vec![
            Span::styled("  ctrl+s", Theme::key_hint()),
            Span::styled(" generate  ", Theme::dim()),
            Span::styled("tab", Theme::key_hint()),
            Span::styled(" next field  ", Theme::dim()),
        ];
        if self.wants_input() {
            spans.push(Span::styled("ctrl+n/ctrl+d", Theme::key_hint()));
        } else {
            spans.push(Span::styled("←→", Theme::key_hint()));
            spans.push(Span::styled(" choose  ", Theme::dim()));
            spans.push(Span::styled("+/-", Theme::key_hint()));
        }
        spans.push(Span::styled(" add/remove link", Theme::dim()));
        Line::from(spans)
    }
}

fn step<T: Choice>(current: Option<T>, forward: bool) -> Option<T> {
    if forward {
        select_next(current)
    } else {
        select_prev(current)
    }
}

fn choice_label<T: Choice>(choice: T) -> String {
    if choice.is_auto() {
        format!("{} (auto)", choice.label())
    } else {
        choice.label().to_string()
    }
}

fn is_text_field(field: FormField) -> bool {
    matches!(
        field,
        FormField::VideoUrl
            | FormField::OptionalKeywords
            | FormField::Hashtags
            | FormField::ManualTimestamps
            | FormField::LinkTitle(_)
            | FormField::LinkUrl(_)
    )
}

fn link_target(field: FormField) -> Option<(LinkId, LinkField)> {
    match field {
        FormField::LinkTitle(id) => Some((id, LinkField::Title)),
        FormField::LinkUrl(id) => Some((id, LinkField::Url)),
        _ => None,
    }
}

fn field_label(field: FormField) -> &'static str {
    match field {
        FormField::VideoType => "Video type",
        FormField::DescriptionTone => "Tone",
        FormField::VideoUrl => "Video URL",
        FormField::OptionalKeywords => "Keywords",
        FormField::Hashtags => "Hashtags",
        FormField::Language => "Language",
        FormField::Translation => "Translation",
        FormField::TimestampsMode => "Timestamps",
        FormField::ManualTimestamps => "Your timestamps",
        FormField::LinkTitle(_) => "  Title",
        FormField::LinkUrl(_) => "  URL",
    }
}

fn placeholder(field: FormField) -> &'static str {
    match field {
        FormField::VideoUrl => "https://www.youtube.com/watch?v=...",
        FormField::OptionalKeywords => "SEO, AI, LangChain",
        FormField::Hashtags => "#SEO #AI",
        FormField::ManualTimestamps => "00:00 Intro",
        FormField::LinkTitle(_) => "GitHub",
        FormField::LinkUrl(_) => "https://github.com/...",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tubedesc_core::options::{Language, VideoType};

    fn component() -> DescriptionFormComponent {
        DescriptionFormComponent::new(FormConfig::default())
    }

    fn type_str(c: &mut DescriptionFormComponent, s: &str) {
        for ch in s.chars() {
            c.handle_action(&Action::CharInput(ch));
        }
    }

    #[test]
    fn manual_timestamps_only_focusable_in_manual_mode() {
        let mut c = component();
        assert!(!c.focus_order().contains(&FormField::ManualTimestamps));
        c.set_focus(FormField::TimestampsMode);
        c.handle_action(&Action::CycleNext);
        assert_eq!(c.form.timestamps_mode, TimestampsMode::Manual);
        assert!(c.focus_order().contains(&FormField::ManualTimestamps));
    }

    #[test]
    fn typing_goes_to_the_focused_text_field() {
        let mut c = component();
        c.set_focus(FormField::VideoUrl);
        assert!(c.wants_input());
        type_str(&mut c, "https://youtu.be/x");
        assert_eq!(c.form.video_url.as_str(), "https://youtu.be/x");
    }

    #[test]
    fn typing_on_a_select_field_is_ignored() {
        let mut c = component();
        assert!(!c.wants_input());
        type_str(&mut c, "abc");
        assert!(c.form.video_url.is_empty());
        assert!(c.form.video_type.is_none());
    }

    #[test]
    fn link_edits_are_written_through_to_the_list() {
        let mut c = component();
        let id = c.form.links.as_slice()[0].id;
        c.set_focus(FormField::LinkTitle(id));
        type_str(&mut c, "Github");
        c.handle_action(&Action::FocusNext);
        assert_eq!(c.focused(), FormField::LinkUrl(id));
        type_str(&mut c, "https://github.com/");
        let link = c.form.links.get(id).unwrap();
        assert_eq!(link.title, "Github");
        assert_eq!(link.url, "https://github.com/");
    }

    #[test]
    fn refocusing_a_link_field_loads_its_text() {
        let mut c = component();
        let id = c.form.links.as_slice()[0].id;
        c.form.links.update(id, LinkField::Url, "https://x.com");
        c.set_focus(FormField::LinkUrl(id));
        c.handle_action(&Action::BackspaceInput);
        assert_eq!(c.form.links.get(id).unwrap().url, "https://x.co");
    }

    #[test]
    fn adding_a_link_focuses_its_title() {
        let mut c = component();
        c.handle_action(&Action::AddLink);
        assert_eq!(c.form.links.len(), 2);
        let new_id = c.form.links.as_slice()[1].id;
        assert_eq!(c.focused(), FormField::LinkTitle(new_id));
    }

    #[test]
    fn removing_a_link_moves_focus_back() {
        let mut c = component();
        let first = c.form.links.as_slice()[0].id;
        c.handle_action(&Action::AddLink);
        c.handle_action(&Action::RemoveLink);
        assert_eq!(c.form.links.len(), 1);
        assert_eq!(c.focused(), FormField::LinkUrl(first));
    }

    #[test]
    fn the_last_link_row_stays() {
        let mut c = component();
        let id = c.form.links.as_slice()[0].id;
        c.set_focus(FormField::LinkTitle(id));
        assert_matches!(c.handle_action(&Action::RemoveLink), Some(Action::SetStatus(_)));
        assert_eq!(c.form.links.len(), 1);
    }

    #[test]
    fn cycling_selects_values() {
        let mut c = component();
        c.handle_action(&Action::CycleNext);
        assert_eq!(c.form.video_type, Some(VideoType::Tutorial));
        c.handle_action(&Action::CyclePrev);
        assert_eq!(c.form.video_type, None);

        c.set_focus(FormField::Language);
        c.handle_action(&Action::CycleNext);
        assert_eq!(c.form.language, Some(Language::En));
    }

    #[test]
    fn errors_focus_the_first_field_and_clear_on_edit() {
        let mut c = component();
        c.set_focus(FormField::Hashtags);
        let errors = c.form.validate().unwrap_err();
        c.show_errors(errors);
        assert_eq!(c.focused(), FormField::VideoType);
        assert!(c.errors().for_field(FormField::VideoUrl).is_some());

        c.set_focus(FormField::VideoUrl);
        type_str(&mut c, "h");
        assert!(c.errors().for_field(FormField::VideoUrl).is_none());
        assert!(c.errors().for_field(FormField::VideoType).is_some());
    }

    #[test]
    fn enter_moves_on_from_single_line_fields() {
        let mut c = component();
        c.set_focus(FormField::VideoUrl);
        c.handle_action(&Action::NewlineInput);
        assert_eq!(c.focused(), FormField::OptionalKeywords);
        c.handle_action(&Action::NewlineInput);
        assert_eq!(c.form.optional_keywords.as_str(), "\n");
        assert_eq!(c.focused(), FormField::OptionalKeywords);
    }

    #[test]
    fn focus_wraps_around() {
        let mut c = component();
        c.handle_action(&Action::FocusPrev);
        let id = c.form.links.as_slice()[0].id;
        assert_eq!(c.focused(), FormField::LinkUrl(id));
        c.handle_action(&Action::FocusNext);
        assert_eq!(c.focused(), FormField::VideoType);
    }

    #[test]
    fn reset_clears_values_and_errors() {
        let mut c = component();
        c.set_focus(FormField::Hashtags);
        type_str(&mut c, "#seo");
        c.handle_action(&Action::AddLink);
        c.show_errors(c.form.validate().unwrap_err());
        assert_matches!(c.handle_action(&Action::ResetForm), Some(Action::SetStatus(_)));
        assert!(c.form.hashtags.is_empty());
        assert_eq!(c.form.links.len(), 1);
        assert!(c.errors().is_empty());
        assert_eq!(c.focused(), FormField::VideoType);
    }
}
