use thiserror::Error;

#[derive(Error, Debug)]
pub enum VttError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Raw failure reported by the translation model client, before classification
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Translation service not configured. {0}")]
    NotConfigured(String),

    #[error("Invalid API key. Please check your Gemini API key and try again.")]
    InvalidApiKey,

    #[error("Permission denied. Please check your API key permissions for the selected model.")]
    PermissionDenied,

    #[error("API quota exceeded. Please check your Gemini API usage limits.")]
    QuotaExceeded,

    #[error("Rate limit exceeded. Please wait a moment and try again.")]
    RateLimited,

    #[error(
        "Rate limit exceeded. Please wait a moment and try again, or switch to a different model like \"{0}\" which has higher quotas."
    )]
    RateLimitedBatch(String),

    #[error("Model \"{0}\" not found. Please select a different model.")]
    ModelNotFound(String),

    #[error("{0}. Please check your API key and model selection.")]
    Translation(String),
}

impl VttError {
    /// True for failures of the translation call itself
    pub fn is_translation_failure(&self) -> bool {
        matches!(
            self,
            Self::InvalidApiKey
                | Self::PermissionDenied
                | Self::QuotaExceeded
                | Self::RateLimited
                | Self::RateLimitedBatch(_)
                | Self::ModelNotFound(_)
                | Self::Translation(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, VttError>;
