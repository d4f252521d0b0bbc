//! Configuration settings for draftcast.

use crate::error::{DraftError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Environment variable holding the OpenAI API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub openai: OpenAISettings,
    pub transcript: TranscriptSettings,
    pub generation: GenerationSettings,
    pub output: OutputSettings,
    pub server: ServerSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level used when no -v flag is given (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// OpenAI credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct OpenAISettings {
    /// API key. The OPENAI_API_KEY environment variable takes precedence.
    pub api_key: Option<String>,
}

/// Transcript fetching settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptSettings {
    /// Locale tags in priority order. Manual captions are tried across the
    /// whole list before falling back to generated ones.
    pub languages: Vec<String>,
    /// HTTP timeout for transcript requests.
    pub timeout_secs: u64,
}

impl Default for TranscriptSettings {
    fn default() -> Self {
        Self {
            languages: ["en", "en-AU", "en-GB", "en-US"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            timeout_secs: 30,
        }
    }
}

/// Article generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Chat completion model.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// HTTP timeout for completion requests.
    pub timeout_secs: u64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            temperature: 0.7,
            timeout_secs: crate::openai::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Draft output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// File name used when saving or downloading a draft.
    pub file_name: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            file_name: crate::article::DRAFT_FILE_NAME.to_string(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory holding an `article.toml` that overrides the built-in prompt.
    pub custom_dir: Option<String>,
    /// Custom variables available in prompts as {{variable_name}}.
    pub variables: HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| DraftError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("draftcast")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Resolve the OpenAI API key from the environment or the config file.
    pub fn api_key(&self) -> Result<String> {
        self.resolve_api_key(std::env::var(API_KEY_ENV).ok())
    }

    fn resolve_api_key(&self, from_env: Option<String>) -> Result<String> {
        from_env
            .filter(|k| !k.trim().is_empty())
            .or_else(|| {
                self.openai
                    .api_key
                    .clone()
                    .filter(|k| !k.trim().is_empty())
            })
            .ok_or_else(|| DraftError::ConfigurationMissing(format!("{} is not set", API_KEY_ENV)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.transcript.languages, vec!["en", "en-AU", "en-GB", "en-US"]);
        assert_eq!(settings.generation.model, "gpt-4o");
        assert!((settings.generation.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(settings.output.file_name, "article_draft.md");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [generation]
            model = "gpt-4o-mini"
            "#,
        )
        .unwrap();
        assert_eq!(settings.generation.model, "gpt-4o-mini");
        assert!((settings.generation.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(settings.server.port, 3000);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.transcript.languages = vec!["en-GB".to_string()];
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.transcript.languages, vec!["en-GB"]);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.generation.model, "gpt-4o");
    }

    #[test]
    fn test_api_key_env_wins() {
        let mut settings = Settings::default();
        settings.openai.api_key = Some("sk-from-file".to_string());
        let key = settings.resolve_api_key(Some("sk-from-env".to_string())).unwrap();
        assert_eq!(key, "sk-from-env");
    }

    #[test]
    fn test_api_key_falls_back_to_file() {
        let mut settings = Settings::default();
        settings.openai.api_key = Some("sk-from-file".to_string());
        let key = settings.resolve_api_key(Some("  ".to_string())).unwrap();
        assert_eq!(key, "sk-from-file");
    }

    #[test]
    fn test_api_key_missing() {
        let settings = Settings::default();
        let err = settings.resolve_api_key(None).unwrap_err();
        assert!(matches!(err, DraftError::ConfigurationMissing(_)));
    }
}
