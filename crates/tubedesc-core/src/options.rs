//! Option catalogs behind the form's select fields.
//!
//! Each catalog knows its wire value (what the generation service expects)
//! and a display label. Selection in the TUI cycles through `all()`.

use serde::{Deserialize, Serialize};

/// A closed set of values a select field can take.
pub trait Choice: Copy + PartialEq + Sized + 'static {
    /// Every value, in display order.
    fn all() -> &'static [Self];

    /// The value sent to the generation service.
    fn as_str(&self) -> &'static str;

    /// Human-readable label for the UI.
    fn label(&self) -> &'static str;

    /// Whether the service infers this value from the video itself.
    fn is_auto(&self) -> bool {
        false
    }

    fn position(&self) -> usize {
        Self::all().iter().position(|c| c == self).unwrap_or(0)
    }

    /// Cycle to the next value, stopping at the last one.
    fn next(&self) -> Self {
        let all = Self::all();
        all[(self.position() + 1).min(all.len() - 1)]
    }

    /// Cycle to the previous value, stopping at the first one.
    fn prev(&self) -> Self {
        Self::all()[self.position().saturating_sub(1)]
    }
}

/// Step an optional selection forward. An empty selection picks the first value.
pub fn select_next<T: Choice>(current: Option<T>) -> Option<T> {
    match current {
        Some(c) => Some(c.next()),
        None => T::all().first().copied(),
    }
}

/// Step an optional selection backward. Stepping back from the first value
/// clears the selection.
pub fn select_prev<T: Choice>(current: Option<T>) -> Option<T> {
    match current {
        Some(c) if c.position() == 0 => None,
        Some(c) => Some(c.prev()),
        None => None,
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum VideoType {
    Tutorial,
    Vlog,
    Review,
    Interview,
    Event,
    BasedOnContent,
}

impl Choice for VideoType {
    fn all() -> &'static [VideoType] {
        &[
            VideoType::Tutorial,
            VideoType::Vlog,
            VideoType::Review,
            VideoType::Interview,
            VideoType::Event,
            VideoType::BasedOnContent,
        ]
    }

    fn as_str(&self) -> &'static str {
        match self {
            VideoType::Tutorial => "tutorial",
            VideoType::Vlog => "vlog",
            VideoType::Review => "review",
            VideoType::Interview => "interview",
            VideoType::Event => "event",
            VideoType::BasedOnContent => "based_on_content",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            VideoType::Tutorial => "Tutorial",
            VideoType::Vlog => "Vlog",
            VideoType::Review => "Product review",
            VideoType::Interview => "Interview",
            VideoType::Event => "Event recap",
            VideoType::BasedOnContent => "Based on video content",
        }
    }

    fn is_auto(&self) -> bool {
        matches!(self, VideoType::BasedOnContent)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DescriptionTone {
    Seo,
    Casual,
    Professional,
    Friendly,
    BasedOnVideo,
}

impl Choice for DescriptionTone {
    fn all() -> &'static [DescriptionTone] {
        &[
            DescriptionTone::Seo,
            DescriptionTone::Casual,
            DescriptionTone::Professional,
            DescriptionTone::Friendly,
            DescriptionTone::BasedOnVideo,
        ]
    }

    fn as_str(&self) -> &'static str {
        match self {
            DescriptionTone::Seo => "seo",
            DescriptionTone::Casual => "casual",
            DescriptionTone::Professional => "professional",
            DescriptionTone::Friendly => "friendly",
            DescriptionTone::BasedOnVideo => "based_on_video",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            DescriptionTone::Seo => "SEO-optimized",
            DescriptionTone::Casual => "Casual",
            DescriptionTone::Professional => "Professional",
            DescriptionTone::Friendly => "Friendly",
            DescriptionTone::BasedOnVideo => "Tone based on video",
        }
    }

    fn is_auto(&self) -> bool {
        matches!(self, DescriptionTone::BasedOnVideo)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Fr,
    En,
    Es,
    De,
}

impl Choice for Language {
    fn all() -> &'static [Language] {
        &[Language::Fr, Language::En, Language::Es, Language::De]
    }

    fn as_str(&self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
            Language::Es => "es",
            Language::De => "de",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Language::Fr => "Français",
            Language::En => "Anglais",
            Language::Es => "Espagnol",
            Language::De => "Allemand",
        }
    }
}

/// How the description's timestamp section is produced.
///
/// The service speaks French on the wire: `automatique`, `manuel`, `aucun`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TimestampsMode {
    #[default]
    #[serde(rename = "automatique")]
    Automatic,
    #[serde(rename = "manuel")]
    Manual,
    #[serde(rename = "aucun")]
    None,
}

impl Choice for TimestampsMode {
    fn all() -> &'static [TimestampsMode] {
        &[
            TimestampsMode::Automatic,
            TimestampsMode::Manual,
            TimestampsMode::None,
        ]
    }

    fn as_str(&self) -> &'static str {
        match self {
            TimestampsMode::Automatic => "automatique",
            TimestampsMode::Manual => "manuel",
            TimestampsMode::None => "aucun",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            TimestampsMode::Automatic => "Générer automatiquement",
            TimestampsMode::Manual => "Saisir manuellement",
            TimestampsMode::None => "Aucun",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_and_prev_saturate_at_the_ends() {
        assert_eq!(Language::De.next(), Language::De);
        assert_eq!(Language::Fr.prev(), Language::Fr);
        assert_eq!(Language::Fr.next(), Language::En);
        assert_eq!(Language::Es.prev(), Language::En);
    }

    #[test]
    fn optional_selection_starts_at_first_and_clears_backwards() {
        assert_eq!(select_next::<VideoType>(None), Some(VideoType::Tutorial));
        assert_eq!(select_prev(Some(VideoType::Tutorial)), None);
        assert_eq!(select_prev(Some(VideoType::Vlog)), Some(VideoType::Tutorial));
        assert_eq!(select_prev::<DescriptionTone>(None), None);
    }

    #[test]
    fn wire_values_match_serde_names() {
        for mode in TimestampsMode::all() {
            let json = serde_json::to_string(mode).unwrap();
            assert_eq!(json, format!("\"{}\"", mode.as_str()));
        }
        for tone in DescriptionTone::all() {
            let json = serde_json::to_string(tone).unwrap();
            assert_eq!(json, format!("\"{}\"", tone.as_str()));
        }
    }

    #[test]
    fn auto_options_are_flagged() {
        assert!(VideoType::BasedOnContent.is_auto());
        assert!(DescriptionTone::BasedOnVideo.is_auto());
        assert!(!VideoType::Vlog.is_auto());
    }
}
