//! Form state holder for a generation request.
//!
//! Owns every field value, validates them, and snapshots them into the
//! wire-shaped [`GenerationRequest`] at submit time.

use std::fmt;

use url::Url;

use crate::config::FormConfig;
use crate::description::{GenerationRequest, NamedLink, TRANSCRIPT_FORMAT};
use crate::links::{LinkId, LinkList};
use crate::options::{Choice, DescriptionTone, Language, TimestampsMode, VideoType};
use crate::text::TextBuffer;

/// Addressable form fields, used for focus and for field-level errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    VideoType,
    DescriptionTone,
    VideoUrl,
    OptionalKeywords,
    Hashtags,
    Language,
    Translation,
    TimestampsMode,
    ManualTimestamps,
    LinkTitle(LinkId),
    LinkUrl(LinkId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

/// Every field that failed validation. Never empty when returned as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, field: FormField, message: &str) {
        self.errors.push(FieldError {
            field,
            message: message.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn for_field(&self, field: FormField) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

#[derive(Debug, Clone)]
pub struct DescriptionForm {
    pub video_type: Option<VideoType>,
    pub description_tone: Option<DescriptionTone>,
    pub video_url: TextBuffer,
    pub optional_keywords: TextBuffer,
    pub hashtags: TextBuffer,
    pub language: Option<Language>,
    pub translation: Option<Language>,
    pub timestamps_mode: TimestampsMode,
    pub manual_timestamps: TextBuffer,
    pub links: LinkList,
    defaults: FormConfig,
}

impl DescriptionForm {
    pub fn new(defaults: FormConfig) -> Self {
        Self {
            video_type: None,
            description_tone: None,
            video_url: TextBuffer::single_line(),
            optional_keywords: TextBuffer::multi_line(),
            hashtags: TextBuffer::single_line(),
            language: Some(defaults.default_language),
            translation: Some(defaults.default_translation),
            timestamps_mode: TimestampsMode::default(),
            manual_timestamps: TextBuffer::multi_line(),
            links: LinkList::new(),
            defaults,
        }
    }

    /// Restore every field to its initial value. The link list goes back to
    /// a single empty entry.
    pub fn reset(&mut self) {
        *self = Self::new(self.defaults.clone());
    }

    pub fn set_video_url(&mut self, url: impl Into<String>) {
        self.video_url.set_text(url);
    }

    /// Mutable access to a free-text field, if `field` is one.
    pub fn text_mut(&mut self, field: FormField) -> Option<&mut TextBuffer> {
        match field {
            FormField::VideoUrl => Some(&mut self.video_url),
            FormField::OptionalKeywords => Some(&mut self.optional_keywords),
            FormField::Hashtags => Some(&mut self.hashtags),
            FormField::ManualTimestamps => Some(&mut self.manual_timestamps),
            _ => None,
        }
    }

    /// Check required fields and URL shapes.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.video_type.is_none() {
            errors.push(FormField::VideoType, "Please select a video type");
        }
        if self.description_tone.is_none() {
            errors.push(FormField::DescriptionTone, "Please select a description tone");
        }

        let url = self.video_url.as_str().trim();
        if url.is_empty() {
            errors.push(FormField::VideoUrl, "Video URL is required");
        } else if !is_youtube_url(url) {
            errors.push(FormField::VideoUrl, "Please enter a valid YouTube URL");
        }

        if self.language.is_none() {
            errors.push(FormField::Language, "Please select a language");
        }
        if self.translation.is_none() {
            errors.push(FormField::Translation, "Please select a translation language");
        }

        for link in &self.links {
            let url = link.url.trim();
            if !url.is_empty() && Url::parse(url).is_err() {
                errors.push(FormField::LinkUrl(link.id), "Please enter a valid URL");
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Snapshot the current values into a request payload.
    ///
    /// Blank fields serialize as `""`. Links missing a title or a URL are dropped;
    /// the rest are sent trimmed, the same text that was validated.
    pub fn build_request(&self) -> GenerationRequest {
        GenerationRequest {
            video_type: choice_str(self.video_type),
            video_url: self.video_url.as_str().trim().to_string(),
            description_tone: choice_str(self.description_tone),
            optional_keywords: self.optional_keywords.as_str().to_string(),
            transcript_format: TRANSCRIPT_FORMAT.to_string(),
            transcript: String::new(),
            languages: self
                .language
                .map(|l| vec![l.as_str().to_string()])
                .unwrap_or_default(),
            translation: choice_str(self.translation),
            hashtags: self.hashtags.as_str().to_string(),
            timestamps_mode: self.timestamps_mode.as_str().to_string(),
            manual_timestamps: self.manual_timestamps.as_str().to_string(),
            useful_links: self
                .links
                .iter()
                .filter(|link| link.is_complete())
                .map(|link| NamedLink::new(link.title.trim(), link.url.trim()))
                .collect(),
        }
    }

    /// Validate, then build the request.
    pub fn submit_request(&self) -> Result<GenerationRequest, ValidationErrors> {
        self.validate()?;
        Ok(self.build_request())
    }
}

impl Default for DescriptionForm {
    fn default() -> Self {
        Self::new(FormConfig::default())
    }
}

fn choice_str<T: Choice>(choice: Option<T>) -> String {
    choice.map(|c| c.as_str().to_string()).unwrap_or_default()
}

/// A well-formed absolute URL pointing at a YouTube domain.
pub fn is_youtube_url(url: &str) -> bool {
    Url::parse(url).is_ok() && (url.contains("youtube.com") || url.contains("youtu.be"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::LinkField;

    fn filled_form() -> DescriptionForm {
        let mut form = DescriptionForm::default();
        form.video_type = Some(VideoType::Tutorial);
        form.description_tone = Some(DescriptionTone::Seo);
        form.set_video_url("https://www.youtube.com/watch?v=LgGmaX-l5K8");
        form
    }

    #[test]
    fn defaults_pick_french_and_automatic_timestamps() {
        let form = DescriptionForm::default();
        assert_eq!(form.language, Some(Language::Fr));
        assert_eq!(form.translation, Some(Language::Fr));
        assert_eq!(form.timestamps_mode, TimestampsMode::Automatic);
        assert_eq!(form.links.len(), 1);
    }

    #[test]
    fn blank_fields_serialize_as_empty_strings() {
        let request = DescriptionForm::default().build_request();
        let json = serde_json::to_value(&request).unwrap();
        for key in [
            "video_type",
            "video_url",
            "description_tone",
            "optional_keywords",
            "transcript",
            "hashtags",
            "manual_timestamps",
        ] {
            assert_eq!(json[key], "", "{key} should be an empty string");
        }
        assert_eq!(json["transcript_format"], "CHUNKS");
        assert_eq!(json["languages"], serde_json::json!(["fr"]));
        assert_eq!(json["timestamps_mode"], "automatique");
        assert_eq!(json["useful_links"], serde_json::json!([]));
    }

    #[test]
    fn payload_keys_match_the_wire_contract() {
        let json = serde_json::to_value(filled_form().build_request()).unwrap();
        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "description_tone",
                "hashtags",
                "languages",
                "manual_timestamps",
                "optional_keywords",
                "timestamps_mode",
                "transcript",
                "transcript_format",
                "translation",
                "useful_links",
                "video_type",
                "video_url",
            ]
        );
    }

    #[test]
    fn incomplete_links_are_dropped() {
        let mut form = filled_form();
        let first = form.links.as_slice()[0].id;
        form.links.update(first, LinkField::Title, "Github");
        form.links.update(first, LinkField::Url, "https://github.com/");
        let title_only = form.links.add();
        form.links.update(title_only, LinkField::Title, "Docs");
        let url_only = form.links.add();
        form.links.update(url_only, LinkField::Url, "https://python.langchain.com");

        let request = form.build_request();
        assert_eq!(
            request.useful_links,
            vec![NamedLink::new("Github", "https://github.com/")]
        );
    }

    #[test]
    fn vimeo_url_is_rejected() {
        let mut form = filled_form();
        form.set_video_url("https://vimeo.com/123");
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.for_field(FormField::VideoUrl),
            Some("Please enter a valid YouTube URL")
        );
    }

    #[test]
    fn relative_youtube_text_is_rejected() {
        let mut form = filled_form();
        form.set_video_url("youtube.com/watch?v=x");
        assert!(form.validate().is_err());
        form.set_video_url("https://youtu.be/abc");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn missing_required_fields_are_all_reported() {
        let mut form = DescriptionForm::default();
        form.language = None;
        let errors = form.validate().unwrap_err();
        let fields: Vec<FormField> = errors.errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                FormField::VideoType,
                FormField::DescriptionTone,
                FormField::VideoUrl,
                FormField::Language,
            ]
        );
    }

    #[test]
    fn validation_failure_keeps_field_values() {
        let mut form = filled_form();
        form.set_video_url("not a url");
        form.hashtags.set_text("#seo");
        let _ = form.submit_request();
        assert_eq!(form.hashtags.as_str(), "#seo");
        assert_eq!(form.video_url.as_str(), "not a url");
    }

    #[test]
    fn links_are_sent_as_validated() {
        let mut form = filled_form();
        let first = form.links.as_slice()[0].id;
        form.links.update(first, LinkField::Title, " Github ");
        form.links.update(first, LinkField::Url, " https://github.com/ ");
        let blank = form.links.add();
        form.links.update(blank, LinkField::Title, "   ");
        form.links.update(blank, LinkField::Url, "https://example.com/");

        let request = form.submit_request().unwrap();
        assert_eq!(
            request.useful_links,
            vec![NamedLink::new("Github", "https://github.com/")]
        );
    }

    #[test]
    fn malformed_link_url_is_a_field_error() {
        let mut form = filled_form();
        let id = form.links.as_slice()[0].id;
        form.links.update(id, LinkField::Url, "not a url");
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.for_field(FormField::LinkUrl(id)),
            Some("Please enter a valid URL")
        );
    }

    #[test]
    fn reset_restores_defaults() {
        let mut form = filled_form();
        form.links.add();
        form.timestamps_mode = TimestampsMode::Manual;
        form.reset();
        assert!(form.video_type.is_none());
        assert!(form.video_url.is_empty());
        assert_eq!(form.timestamps_mode, TimestampsMode::Automatic);
        assert_eq!(form.links.len(), 1);
    }

    #[test]
    fn submit_request_returns_validated_snapshot() {
        let request = filled_form().submit_request().unwrap();
        assert_eq!(request.video_type, "tutorial");
        assert_eq!(request.description_tone, "seo");
        assert_eq!(request.languages, vec!["fr".to_string()]);
    }
}
