// WebVTT cue model and the text codec around it:
// - Parser: raw cue text into ordered cues
// - Generator: ordered cues back into cue text

pub mod generator;
pub mod parser;

use std::borrow::Cow;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, info, warn};

pub use generator::*;
pub use parser::*;

use crate::error::{Result, VttError};

/// Header marker of the cue format
pub const VTT_MARKER: &str = "WEBVTT";

/// Conventional file extension, without the dot
pub const VTT_EXTENSION: &str = "vtt";

/// Separator between start and end timestamps on a time line
pub const TIME_SEPARATOR: &str = "-->";

/// One timed subtitle entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cue {
    /// Position in the document, starting at 0
    pub sequence_index: usize,
    /// Start timestamp exactly as written in the source
    pub start_time: String,
    /// End timestamp exactly as written in the source
    pub end_time: String,
    /// Cue text, lines joined with `\n`
    pub text: String,
}

/// A named collection of cues plus where it came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub name: String,
    /// Original text; `None` once the document is rebuilt from cues
    pub raw_content: Option<String>,
    pub cues: Vec<Cue>,
    pub detected_language: Option<String>,
}

impl Document {
    /// Build a new document that keeps this one's cue timing and order but
    /// carries the given texts.
    ///
    /// A missing or empty replacement keeps the original cue text.
    pub fn with_texts(&self, name: String, texts: &[String]) -> Document {
        let cues = self
            .cues
            .iter()
            .enumerate()
            .map(|(idx, cue)| {
                let text = match texts.get(idx) {
                    Some(translated) if !translated.is_empty() => translated.clone(),
                    _ => cue.text.clone(),
                };
                Cue { text, ..cue.clone() }
            })
            .collect();

        Document {
            name,
            raw_content: None,
            cues,
            detected_language: self.detected_language.clone(),
        }
    }

    pub fn texts(&self) -> Vec<String> {
        self.cues.iter().map(|cue| cue.text.clone()).collect()
    }

    /// Regenerated cue text of this document
    pub fn render(&self) -> String {
        generate_document(&self.cues)
    }
}

/// True when the path carries the cue format's extension (any case)
pub fn has_vtt_extension<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(VTT_EXTENSION))
        .unwrap_or(false)
}

/// Read and parse a subtitle file
pub async fn read_document<P: AsRef<Path>>(path: P) -> Result<Document> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(VttError::FileNotFound(path.display().to_string()));
    }
    if !has_vtt_extension(path) {
        return Err(VttError::UnsupportedFormat(format!(
            "{} is not a .{} file",
            path.display(),
            VTT_EXTENSION
        )));
    }

    let bytes = fs::read(path).await?;
    let content = String::from_utf8_lossy(&bytes);
    if matches!(content, Cow::Owned(_)) {
        warn!("{} is not valid UTF-8, invalid bytes were replaced", path.display());
    }
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| VttError::Config(format!("Invalid subtitle filename: {}", path.display())))?;

    let document = parse_document(&content, &name);
    debug!("Parsed {} cues from {}", document.cues.len(), path.display());

    Ok(document)
}

/// Generate the document's cue text and write it to the given path
pub async fn write_document<P: AsRef<Path>>(document: &Document, output_path: P) -> Result<()> {
    let output_path = output_path.as_ref();
    info!("Writing subtitle file: {}", output_path.display());

    fs::write(output_path, document.render()).await?;

    Ok(())
}
