// Batch translation through a language model
//
// - Codec: numbered prompt encoding and tolerant response decoding
// - Gemini: HTTP client for the generateContent API
// - Batch: one request per document, progress and failure mapping

pub mod batch;
pub mod codec;
pub mod gemini;

use async_trait::async_trait;

pub use batch::*;
pub use codec::*;
use crate::config::{HIGH_QUOTA_MODEL, Provider, TranslateConfig};
use crate::error::{Result, VttError};

/// A language model that turns one prompt into one text answer
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send the prompt and return the raw response text.
    ///
    /// Failures are reported as `VttError::Provider` carrying the provider's
    /// own message, so callers can classify them.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Factory for creating completion clients
pub struct ClientFactory;

impl ClientFactory {
    /// Create a client for the configured provider
    pub fn create_client(config: &TranslateConfig) -> Result<Box<dyn CompletionClient>> {
        match config.provider {
            Provider::Gemini => Ok(Box::new(gemini::GeminiClient::new(config)?)),
        }
    }
}

/// Which kind of request failed; they report quota problems differently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Single,
    Batch,
}

/// Turn a failed model call into an error the user can act on
pub fn classify_failure(error: VttError, model: &str, kind: RequestKind) -> VttError {
    let message = match error {
        VttError::Provider(message) => message,
        VttError::Http(e) => e.to_string(),
        other => return other,
    };

    if message.contains("API_KEY_INVALID") {
        return VttError::InvalidApiKey;
    }
    if message.contains("PERMISSION_DENIED") {
        return VttError::PermissionDenied;
    }

    match kind {
        RequestKind::Batch => {
            if message.contains("QUOTA_EXCEEDED") || message.contains("429") || message.contains("quota") {
                return VttError::RateLimitedBatch(HIGH_QUOTA_MODEL.to_string());
            }
            if message.contains("MODEL_NOT_FOUND") {
                return VttError::ModelNotFound(model.to_string());
            }
            VttError::Translation(format!("Batch translation failed: {}", message))
        }
        RequestKind::Single => {
            if message.contains("QUOTA_EXCEEDED") {
                return VttError::QuotaExceeded;
            }
            if message.contains("MODEL_NOT_FOUND") {
                return VttError::ModelNotFound(model.to_string());
            }
            if message.contains("RATE_LIMIT_EXCEEDED") {
                return VttError::RateLimited;
            }
            VttError::Translation(format!("Translation failed: {}", message))
        }
    }
}
