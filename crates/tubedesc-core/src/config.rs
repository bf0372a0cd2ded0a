use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::options::Language;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TubedescConfig {
    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub preview: PreviewConfig,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub form: FormConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Delay between two revealed characters.
    #[serde(default = "default_reveal_interval")]
    pub reveal_interval_ms: u64,

    /// How long the "Copied!" acknowledgment stays visible.
    #[serde(default = "default_copied_feedback")]
    pub copied_feedback_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_preview_delay")]
    pub preview_delay_ms: u64,

    #[serde(default = "default_settle_delay")]
    pub settle_delay_ms: u64,

    /// Below this terminal width the preview replaces the form instead of
    /// sitting next to it.
    #[serde(default = "default_narrow_width")]
    pub narrow_width: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    #[serde(default)]
    pub default_language: Language,

    #[serde(default)]
    pub default_translation: Language,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}
fn default_timeout() -> u64 {
    120
}
fn default_reveal_interval() -> u64 {
    10
}
fn default_copied_feedback() -> u64 {
    2000
}
fn default_preview_delay() -> u64 {
    400
}
fn default_settle_delay() -> u64 {
    500
}
fn default_narrow_width() -> u16 {
    100
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            reveal_interval_ms: default_reveal_interval(),
            copied_feedback_ms: default_copied_feedback(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            preview_delay_ms: default_preview_delay(),
            settle_delay_ms: default_settle_delay(),
            narrow_width: default_narrow_width(),
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            default_language: Language::default(),
            default_translation: Language::default(),
        }
    }
}

impl PreviewConfig {
    pub fn reveal_interval(&self) -> Duration {
        // A zero interval would spin the timer task.
        Duration::from_millis(self.reveal_interval_ms.max(1))
    }

    pub fn copied_feedback(&self) -> Duration {
        Duration::from_millis(self.copied_feedback_ms)
    }
}

impl LayoutConfig {
    pub fn preview_delay(&self) -> Duration {
        Duration::from_millis(self.preview_delay_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

impl TubedescConfig {
    /// Load config from ~/.config/tubedesc/config.toml, creating defaults if missing.
    pub fn load() -> crate::error::Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(|e| {
                crate::error::TubedescError::Config(format!("Failed to read config: {e}"))
            })?;
            Self::from_toml(&contents)
        } else {
            let config = TubedescConfig::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Parse a config document. Missing sections and keys take their defaults.
    pub fn from_toml(contents: &str) -> crate::error::Result<Self> {
        toml::from_str(contents).map_err(|e| {
            crate::error::TubedescError::Config(format!("Failed to parse config: {e}"))
        })
    }

    /// Save config to disk.
    pub fn save(&self) -> crate::error::Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self).map_err(|e| {
            crate::error::TubedescError::Config(format!("Failed to serialize config: {e}"))
        })?;
        std::fs::write(&config_path, contents)?;
        Ok(())
    }

    /// Get the config file path.
    pub fn config_path() -> crate::error::Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            crate::error::TubedescError::Config("Could not determine config directory".into())
        })?;
        Ok(config_dir.join("tubedesc").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = TubedescConfig::from_toml("").unwrap();
        assert_eq!(config.service.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.preview.reveal_interval_ms, 10);
        assert_eq!(config.preview.copied_feedback_ms, 2000);
        assert_eq!(config.layout.preview_delay_ms, 400);
        assert_eq!(config.layout.settle_delay_ms, 500);
        assert_eq!(config.form.default_language, Language::Fr);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config = TubedescConfig::from_toml(
            "[service]\nbase_url = \"http://10.0.0.2:9000\"\n\n[form]\ndefault_translation = \"en\"\n",
        )
        .unwrap();
        assert_eq!(config.service.base_url, "http://10.0.0.2:9000");
        assert_eq!(config.service.timeout_seconds, 120);
        assert_eq!(config.form.default_language, Language::Fr);
        assert_eq!(config.form.default_translation, Language::En);
    }

    #[test]
    fn malformed_document_is_a_config_error() {
        let err = TubedescConfig::from_toml("[service\nbase_url = 3").unwrap_err();
        assert!(matches!(err, crate::error::TubedescError::Config(_)));
    }

    #[test]
    fn zero_reveal_interval_is_clamped() {
        let preview = PreviewConfig {
            reveal_interval_ms: 0,
            copied_feedback_ms: 2000,
        };
        assert_eq!(preview.reveal_interval(), Duration::from_millis(1));
    }
}
