//! Request and response shapes exchanged with the generation service, and the
//! combined result the preview renders.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Marker the service uses to pick its transcript chunking strategy.
pub const TRANSCRIPT_FORMAT: &str = "CHUNKS";

pub const LINKS_HEADER: &str = "🔗 Liens utiles:";
pub const KEYWORDS_HEADER: &str = "🔍 Mots-clés:";

/// A link encoded on the wire as a single-key object: `{"<title>": "<url>"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedLink {
    pub title: String,
    pub url: String,
}

impl NamedLink {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

impl Serialize for NamedLink {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.title, &self.url)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for NamedLink {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SingleKeyVisitor;

        impl<'de> Visitor<'de> for SingleKeyVisitor {
            type Value = NamedLink;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object with exactly one key")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<NamedLink, A::Error> {
                let (title, url): (String, String) = map
                    .next_entry()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                if map.next_key::<de::IgnoredAny>()?.is_some() {
                    return Err(de::Error::invalid_length(2, &self));
                }
                Ok(NamedLink { title, url })
            }
        }

        deserializer.deserialize_map(SingleKeyVisitor)
    }
}

/// Snapshot of the form at submit time, in the service's wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub video_type: String,
    pub video_url: String,
    pub description_tone: String,
    pub optional_keywords: String,
    pub transcript_format: String,
    pub transcript: String,
    pub languages: Vec<String>,
    pub translation: String,
    pub hashtags: String,
    pub timestamps_mode: String,
    pub manual_timestamps: String,
    pub useful_links: Vec<NamedLink>,
}

/// Description generated by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedDescription {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub resume: String,
    #[serde(default)]
    pub links: Vec<NamedLink>,
    #[serde(default)]
    pub timestamps: String,
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub call_to_action: String,
    #[serde(default)]
    pub about_channel: String,
}

impl GeneratedDescription {
    /// Render the text the preview reveals.
    ///
    /// Sections appear in a fixed order separated by a blank line. Empty
    /// sections are left out entirely, headers included. The title is not part
    /// of the body.
    pub fn full_text(&self) -> String {
        let mut sections: Vec<String> = Vec::new();

        push_trimmed(&mut sections, &self.resume);
        push_trimmed(&mut sections, &self.timestamps);

        if !self.links.is_empty() {
            let lines: Vec<String> = self
                .links
                .iter()
                .map(|link| format!("- {}: {}", link.title, link.url))
                .collect();
            sections.push(format!("{}\n{}", LINKS_HEADER, lines.join("\n")));
        }

        if !self.keywords.trim().is_empty() {
            sections.push(format!("{}\n{}", KEYWORDS_HEADER, self.keywords.trim()));
        }

        push_trimmed(&mut sections, &self.call_to_action);
        push_trimmed(&mut sections, &self.about_channel);

        sections.join("\n\n")
    }
}

fn push_trimmed(sections: &mut Vec<String>, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        sections.push(text.to_string());
    }
}

/// Body returned by `POST /generate`: either an error or a description.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ServiceResponse {
    Failure { error: String },
    Success(GeneratedDescription),
}

/// Identity of a generation result. A new id means new content for the
/// preview; edits to an existing result keep its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResultId(pub u64);

impl ResultId {
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The submitted request merged with the description the service returned.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub id: ResultId,
    pub request: GenerationRequest,
    pub description: GeneratedDescription,
    pub received_at: DateTime<Utc>,
    /// Body saved from the editor. It replaces the assembled sections.
    edited: Option<String>,
}

impl GenerationResult {
    pub fn new(request: GenerationRequest, description: GeneratedDescription) -> Self {
        Self {
            id: ResultId::next(),
            request,
            description,
            received_at: Utc::now(),
            edited: None,
        }
    }

    /// The text to show: the saved edit if there is one, otherwise the
    /// sections assembled from the description.
    pub fn full_text(&self) -> String {
        match &self.edited {
            Some(text) => text.clone(),
            None => self.description.full_text(),
        }
    }

    /// Apply a saved edit. The editor works on the whole body, so the text
    /// becomes the resume and also stands in for the assembled sections.
    /// The identity is unchanged so the preview does not restart its reveal.
    pub fn set_resume(&mut self, resume: String) {
        self.description.resume = resume.clone();
        self.edited = Some(resume);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn description() -> GeneratedDescription {
        GeneratedDescription {
            title: "Title".into(),
            resume: "Hello".into(),
            links: vec![],
            timestamps: String::new(),
            keywords: String::new(),
            call_to_action: "Subscribe!".into(),
            about_channel: "Channel X".into(),
        }
    }

    #[test]
    fn empty_sections_are_omitted() {
        let text = description().full_text();
        assert_eq!(text, "Hello\n\nSubscribe!\n\nChannel X");
        assert!(!text.contains(LINKS_HEADER));
        assert!(!text.contains(KEYWORDS_HEADER));
    }

    #[test]
    fn links_render_under_their_header() {
        let mut d = description();
        d.links = vec![NamedLink::new("Site", "https://x.com")];
        let text = d.full_text();
        assert!(text.contains("🔗 Liens utiles:\n- Site: https://x.com"));
    }

    #[test]
    fn sections_keep_their_order() {
        let d = GeneratedDescription {
            title: String::new(),
            resume: "R".into(),
            links: vec![NamedLink::new("A", "https://a"), NamedLink::new("B", "https://b")],
            timestamps: "00:00 Intro".into(),
            keywords: "seo, ia".into(),
            call_to_action: "CTA".into(),
            about_channel: "About".into(),
        };
        assert_eq!(
            d.full_text(),
            "R\n\n00:00 Intro\n\n🔗 Liens utiles:\n- A: https://a\n- B: https://b\n\n🔍 Mots-clés:\nseo, ia\n\nCTA\n\nAbout"
        );
    }

    #[test]
    fn empty_description_renders_nothing() {
        assert_eq!(GeneratedDescription::default().full_text(), "");
    }

    #[test]
    fn named_link_is_a_single_key_object() {
        let json = serde_json::to_string(&NamedLink::new("Github", "https://github.com/")).unwrap();
        assert_eq!(json, r#"{"Github":"https://github.com/"}"#);
    }

    #[test]
    fn named_link_rejects_other_key_counts() {
        assert!(serde_json::from_str::<NamedLink>("{}").is_err());
        assert!(serde_json::from_str::<NamedLink>(r#"{"a":"1","b":"2"}"#).is_err());
        let link: NamedLink = serde_json::from_str(r#"{"Docs":"https://d"}"#).unwrap();
        assert_eq!(link, NamedLink::new("Docs", "https://d"));
    }

    #[test]
    fn error_body_decodes_as_failure() {
        let resp: ServiceResponse = serde_json::from_str(r#"{"error":"quota exceeded"}"#).unwrap();
        assert_eq!(
            resp,
            ServiceResponse::Failure {
                error: "quota exceeded".into()
            }
        );
    }

    #[test]
    fn description_body_decodes_as_success() {
        let body = r#"{
            "title": "T", "resume": "R", "links": [{"Site": "https://x.com"}],
            "timestamps": "", "keywords": "k", "call_to_action": "c", "about_channel": "a"
        }"#;
        match serde_json::from_str::<ServiceResponse>(body).unwrap() {
            ServiceResponse::Success(d) => {
                assert_eq!(d.resume, "R");
                assert_eq!(d.links, vec![NamedLink::new("Site", "https://x.com")]);
            }
            other => panic!("Expected Success, got {other:?}"),
        }
    }

    #[test]
    fn null_error_is_not_a_failure() {
        let resp: ServiceResponse =
            serde_json::from_str(r#"{"error": null, "resume": "R"}"#).unwrap();
        assert!(matches!(resp, ServiceResponse::Success(_)));
    }

    fn request() -> GenerationRequest {
        GenerationRequest {
            video_type: "vlog".into(),
            video_url: "https://youtu.be/x".into(),
            description_tone: "casual".into(),
            optional_keywords: String::new(),
            transcript_format: TRANSCRIPT_FORMAT.into(),
            transcript: String::new(),
            languages: vec!["fr".into()],
            translation: "fr".into(),
            hashtags: String::new(),
            timestamps_mode: "automatique".into(),
            manual_timestamps: String::new(),
            useful_links: vec![],
        }
    }

    #[test]
    fn set_resume_keeps_identity() {
        let mut result = GenerationResult::new(request(), description());
        let id = result.id;
        result.set_resume("Edited".into());
        assert_eq!(result.id, id);
        assert_eq!(result.description.resume, "Edited");
        assert_ne!(GenerationResult::new(result.request.clone(), description()).id, id);
    }

    #[test]
    fn saved_edit_is_the_whole_text() {
        let mut d = description();
        d.call_to_action = "Subscribe!".into();
        d.about_channel = "About us".into();
        let mut result = GenerationResult::new(request(), d);

        let edited = format!("{}\nP.S. new video soon", result.full_text());
        result.set_resume(edited.clone());

        assert_eq!(result.full_text(), edited);
        assert_eq!(result.full_text().matches("Subscribe!").count(), 1);
    }
}
