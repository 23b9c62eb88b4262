use tracing::{debug, info};

use super::codec::{decode_batch, encode_batch, encode_single};
use super::{classify_failure, CompletionClient, RequestKind};
use crate::config::TranslateConfig;
use crate::error::Result;

/// Receives `(completed, total)` before the request and after the response
pub type ProgressFn<'a> = &'a mut (dyn FnMut(usize, usize) + Send);

/// Translates a whole document's texts with a single model request
pub struct BatchTranslator {
    client: Box<dyn CompletionClient>,
    model: String,
    instructions: String,
}

impl BatchTranslator {
    pub fn new(client: Box<dyn CompletionClient>, config: &TranslateConfig) -> Self {
        Self {
            client,
            model: config.model.clone(),
            instructions: config.instructions().to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Translate all texts in one request.
    ///
    /// The result has one entry per input, in input order; entries the
    /// response did not cover are empty. Failures of the request itself are
    /// returned as-is and never retried.
    pub async fn translate_batch(
        &self,
        texts: &[String],
        source_language: &str,
        target_language: &str,
        mut on_progress: Option<ProgressFn<'_>>,
    ) -> Result<Vec<String>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let total = texts.len();
        let prompt = encode_batch(texts, source_language, target_language, &self.instructions);

        if let Some(progress) = on_progress.as_deref_mut() {
            progress(0, total);
        }

        info!(
            "Translating {} subtitles from {} to {} with {}",
            total, source_language, target_language, self.model
        );
        debug!("Batch prompt:\n{}", prompt);

        let response = self
            .client
            .generate(&prompt)
            .await
            .map_err(|e| classify_failure(e, &self.model, RequestKind::Batch))?;

        let translated = decode_batch(response.trim(), total);

        if let Some(progress) = on_progress.as_deref_mut() {
            progress(total, total);
        }

        Ok(translated)
    }

    /// Translate a single text on its own
    pub async fn translate_text(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String> {
        let prompt = encode_single(text, source_language, target_language, &self.instructions);

        let response = self
            .client
            .generate(&prompt)
            .await
            .map_err(|e| classify_failure(e, &self.model, RequestKind::Single))?;

        Ok(response.trim().to_string())
    }
}
