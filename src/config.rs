use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use crate::error::{Result, VttError};
use crate::language::{AUTO, LANGUAGES};

/// Environment variable consulted when no API key is configured
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Models offered by the Gemini provider
pub const AVAILABLE_MODELS: &[&str] = &[
    "gemini-2.0-flash-exp",
    "gemini-1.5-pro",
    "gemini-1.5-flash",
    "gemini-1.5-flash-8b",
];

/// Model suggested when the configured one runs out of quota
pub const HIGH_QUOTA_MODEL: &str = "gemini-1.5-flash";

fn default_temperature() -> f32 {
    0.2
}

fn default_timeout_secs() -> u64 {
    300
}

fn default_auto_detect() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub translate: TranslateConfig,
    pub languages: LanguageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateConfig {
    /// Translation backend
    pub provider: Provider,
    /// Base URL of the provider API
    pub endpoint: String,
    /// Model used for translation
    pub model: String,
    /// API key; falls back to the GEMINI_API_KEY environment variable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Translation style preset
    pub style: TranslationStyle,
    /// Free-form instructions used by the Custom style
    #[serde(default)]
    pub custom_requirements: String,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// HTTP timeout for a single request
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provider {
    /// Google Gemini generateContent API
    Gemini,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranslationStyle {
    Formal,
    Casual,
    Literal,
    Natural,
    Subtitle,
    Educational,
    /// Use `custom_requirements` as the instructions
    Custom,
}

impl TranslationStyle {
    pub const ALL: [TranslationStyle; 7] = [
        Self::Formal,
        Self::Casual,
        Self::Literal,
        Self::Natural,
        Self::Subtitle,
        Self::Educational,
        Self::Custom,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            Self::Formal => "Formal and professional translation",
            Self::Casual => "Casual and conversational translation",
            Self::Literal => "Literal word-for-word translation",
            Self::Natural => "Natural and fluent translation",
            Self::Subtitle => "Optimized for subtitle display (concise, clear)",
            Self::Educational => "Educational and technical translation",
            Self::Custom => "Custom requirements (specify below)",
        }
    }
}

impl FromStr for TranslationStyle {
    type Err = VttError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "formal" => Ok(Self::Formal),
            "casual" => Ok(Self::Casual),
            "literal" => Ok(Self::Literal),
            "natural" => Ok(Self::Natural),
            "subtitle" => Ok(Self::Subtitle),
            "educational" => Ok(Self::Educational),
            "custom" => Ok(Self::Custom),
            _ => Err(VttError::Config(format!(
                "Invalid translation style '{}'. Valid styles: formal, casual, literal, natural, subtitle, educational, custom",
                s
            ))),
        }
    }
}

/// Source/target language selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageConfig {
    /// Source language code, `auto` to rely on detection
    pub source: String,
    /// Target language code
    pub target: String,
    /// Use each document's detected language as the source
    #[serde(default = "default_auto_detect")]
    pub auto_detect: bool,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            provider: Provider::Gemini,
            endpoint: "https://generativelanguage.googleapis.com".to_string(),
            model: AVAILABLE_MODELS[0].to_string(),
            api_key: None,
            style: TranslationStyle::Subtitle,
            custom_requirements: String::new(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            source: AUTO.to_string(),
            target: "vi".to_string(),
            auto_detect: true,
        }
    }
}

impl TranslateConfig {
    /// Style text placed in the translation prompt
    pub fn instructions(&self) -> &str {
        if self.style == TranslationStyle::Custom && !self.custom_requirements.trim().is_empty() {
            &self.custom_requirements
        } else {
            self.style.description()
        }
    }

    /// Configured key, or the environment fallback
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
    }
}

impl LanguageConfig {
    /// Source language code for a document, given what was detected in it
    pub fn source_for(&self, detected: Option<&str>) -> String {
        if self.auto_detect {
            detected.unwrap_or("en").to_string()
        } else {
            self.source.clone()
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| VttError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| VttError::Config(format!("Failed to parse config file: {}", e)))?;
        config.validate()?;

        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| VttError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| VttError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !LANGUAGES.contains(&self.languages.target) || self.languages.target == AUTO {
            return Err(VttError::Config(format!(
                "Unsupported target language '{}'",
                self.languages.target
            )));
        }
        if !LANGUAGES.contains(&self.languages.source) {
            return Err(VttError::Config(format!(
                "Unsupported source language '{}'",
                self.languages.source
            )));
        }
        if self.translate.model.trim().is_empty() {
            return Err(VttError::Config("Model name must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.translate.model, "gemini-2.0-flash-exp");
        assert_eq!(config.translate.style, TranslationStyle::Subtitle);
        assert_eq!(config.languages.source, "auto");
        assert_eq!(config.languages.target, "vi");
        assert!(config.languages.auto_detect);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_instructions() {
        let mut translate = TranslateConfig::default();
        assert_eq!(translate.instructions(), "Optimized for subtitle display (concise, clear)");

        translate.style = TranslationStyle::Custom;
        assert_eq!(translate.instructions(), "Custom requirements (specify below)");

        translate.custom_requirements = "Keep it playful".to_string();
        assert_eq!(translate.instructions(), "Keep it playful");

        translate.style = TranslationStyle::Formal;
        assert_eq!(translate.instructions(), "Formal and professional translation");
    }

    #[test]
    fn test_source_for_document() {
        let mut languages = LanguageConfig::default();
        assert_eq!(languages.source_for(Some("ja")), "ja");
        assert_eq!(languages.source_for(Some("auto")), "auto");
        assert_eq!(languages.source_for(None), "en");

        languages.auto_detect = false;
        languages.source = "fr".to_string();
        assert_eq!(languages.source_for(Some("ja")), "fr");
    }

    #[test]
    fn test_style_from_str() {
        assert_eq!("Casual".parse::<TranslationStyle>().unwrap(), TranslationStyle::Casual);
        assert!("poetic".parse::<TranslationStyle>().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vttlate.toml");

        let mut config = Config::default();
        config.languages.target = "ja".to_string();
        config.translate.style = TranslationStyle::Natural;
        config.save_to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.languages.target, "ja");
        assert_eq!(loaded.translate.style, TranslationStyle::Natural);
        assert!(loaded.translate.api_key.is_none());
    }

    #[test]
    fn test_rejects_unknown_target() {
        let mut config = Config::default();
        config.languages.target = "auto".to_string();
        assert!(config.validate().is_err());

        config.languages.target = "xx".to_string();
        assert!(config.validate().is_err());
    }
}
