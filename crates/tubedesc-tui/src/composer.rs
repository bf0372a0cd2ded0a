//! View composer: which panes are on screen, and the hand-off from the
//! form alone to the form plus preview.
//!
//! ```text
//! FormOnly ──generation started──▶ Transitioning ──preview delay──▶ FormAndPreview
//!     ▲                                                                  │
//!     └────────────────────────────── back ──────────────────────────────┘
//! ```
//!
//! Timed steps carry the epoch they were scheduled in. Going back bumps the
//! epoch, so a timer that fires afterwards finds a different epoch and is
//! ignored.

use ratatui::layout::{Constraint, Layout, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    FormOnly,
    Transitioning,
    FormAndPreview,
}

/// Screen areas for each visible pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panes {
    pub form: Option<Rect>,
    pub preview: Option<Rect>,
}

#[derive(Debug)]
pub struct ViewComposer {
    mode: ViewMode,
    /// Set while the preview pane is still sliding in.
    sliding: bool,
    epoch: u64,
}

impl ViewComposer {
    pub fn new() -> Self {
        Self {
            mode: ViewMode::FormOnly,
            sliding: false,
            epoch: 0,
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn is_sliding(&self) -> bool {
        self.sliding
    }

    /// Start the slide-in. Returns the epoch the follow-up timers must carry,
    /// or `None` when the preview is already on its way or on screen.
    pub fn begin_transition(&mut self) -> Option<u64> {
        if self.mode != ViewMode::FormOnly {
            return None;
        }
        self.mode = ViewMode::Transitioning;
        self.sliding = true;
        Some(self.epoch)
    }

    /// The preview delay elapsed: the preview joins the layout.
    pub fn reveal_preview(&mut self, epoch: u64) -> bool {
        if epoch != self.epoch || self.mode != ViewMode::Transitioning {
            return false;
        }
        self.mode = ViewMode::FormAndPreview;
        true
    }

    /// The settle delay elapsed: drop the sliding flag.
    pub fn settle(&mut self, epoch: u64) -> bool {
        if epoch != self.epoch || !self.sliding {
            return false;
        }
        self.sliding = false;
        true
    }

    /// Return to the form alone, immediately.
    pub fn back_to_form(&mut self) {
        self.mode = ViewMode::FormOnly;
        self.sliding = false;
        self.epoch += 1;
    }

    /// Whether the form is hidden behind the preview on this terminal width.
    pub fn preview_only(&self, width: u16, narrow_width: u16) -> bool {
        self.mode == ViewMode::FormAndPreview && width < narrow_width
    }

    /// Split `area` between the visible panes. Below `narrow_width` columns
    /// the two panes never share the screen.
    pub fn panes(&self, area: Rect, narrow_width: u16) -> Panes {
        let narrow = area.width < narrow_width;
        match self.mode {
            ViewMode::FormOnly => Panes {
                form: Some(area),
                preview: None,
            },
            ViewMode::Transitioning if narrow => Panes {
                form: Some(area),
                preview: None,
            },
            ViewMode::Transitioning => {
                let [form, preview] =
                    Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)])
                        .areas(area);
                Panes {
                    form: Some(form),
                    preview: Some(preview),
                }
            }
            ViewMode::FormAndPreview if narrow => Panes {
                form: None,
                preview: Some(area),
            },
            ViewMode::FormAndPreview => {
                let [form, preview] =
                    Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
                        .areas(area);
                Panes {
                    form: Some(form),
                    preview: Some(preview),
                }
            }
        }
    }
}

impl Default for ViewComposer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NARROW: u16 = 100;

    fn wide() -> Rect {
        Rect::new(0, 0, 160, 40)
    }

    fn small() -> Rect {
        Rect::new(0, 0, 80, 24)
    }

    #[test]
    fn full_transition_sequence() {
        let mut composer = ViewComposer::new();
        let epoch = composer.begin_transition().unwrap();
        assert_eq!(composer.mode(), ViewMode::Transitioning);
        assert!(composer.is_sliding());

        assert!(composer.reveal_preview(epoch));
        assert_eq!(composer.mode(), ViewMode::FormAndPreview);
        assert!(composer.is_sliding());

        assert!(composer.settle(epoch));
        assert!(!composer.is_sliding());
    }

    #[test]
    fn second_generation_does_not_restart_the_transition() {
        let mut composer = ViewComposer::new();
        let epoch = composer.begin_transition().unwrap();
        composer.reveal_preview(epoch);
        assert_eq!(composer.begin_transition(), None);
        assert_eq!(composer.mode(), ViewMode::FormAndPreview);
    }

    #[test]
    fn timers_from_before_back_are_ignored() {
        let mut composer = ViewComposer::new();
        let stale = composer.begin_transition().unwrap();
        composer.back_to_form();
        assert!(!composer.reveal_preview(stale));
        assert_eq!(composer.mode(), ViewMode::FormOnly);

        let fresh = composer.begin_transition().unwrap();
        assert_ne!(fresh, stale);
        assert!(!composer.settle(stale));
        assert!(composer.is_sliding());
        assert!(composer.reveal_preview(fresh));
    }

    #[test]
    fn wide_layout_shows_both_panes() {
        let mut composer = ViewComposer::new();
        let epoch = composer.begin_transition().unwrap();
        composer.reveal_preview(epoch);
        let panes = composer.panes(wide(), NARROW);
        let (form, preview) = (panes.form.unwrap(), panes.preview.unwrap());
        assert_eq!(form.width + preview.width, wide().width);
        assert!(form.x < preview.x);
    }

    #[test]
    fn narrow_layout_hides_the_form_behind_the_preview() {
        let mut composer = ViewComposer::new();
        let epoch = composer.begin_transition().unwrap();
        assert_eq!(composer.panes(small(), NARROW).preview, None);
        composer.reveal_preview(epoch);
        let panes = composer.panes(small(), NARROW);
        assert_eq!(panes.form, None);
        assert_eq!(panes.preview, Some(small()));
        assert!(composer.preview_only(small().width, NARROW));
    }

    #[test]
    fn form_only_uses_the_whole_area() {
        let panes = ViewComposer::new().panes(wide(), NARROW);
        assert_eq!(panes.form, Some(wide()));
        assert_eq!(panes.preview, None);
    }
}
