use std::collections::HashSet;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use tokio::fs;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::config::{Config, LanguageConfig};
use crate::detect::detect_cues_language;
use crate::error::{Result, VttError};
use crate::filename::tag_filename;
use crate::language::LANGUAGES;
use crate::subtitle::{has_vtt_extension, read_document, write_document, Document};
use crate::translate::{BatchTranslator, ClientFactory, CompletionClient};

/// Outcome of translating one document
#[derive(Debug, Clone)]
pub struct TranslatedDocument {
    pub document: Document,
    pub output_path: PathBuf,
    pub source_language: String,
}

pub struct Workflow {
    config: Config,
    translator: BatchTranslator,
}

impl Workflow {
    pub fn new(config: Config) -> Result<Self> {
        let client = ClientFactory::create_client(&config.translate)?;
        Ok(Self::with_client(config, client))
    }

    /// Build a workflow around an existing model client
    pub fn with_client(config: Config, client: Box<dyn CompletionClient>) -> Self {
        let translator = BatchTranslator::new(client, &config.translate);
        Self { config, translator }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn translator(&self) -> &BatchTranslator {
        &self.translator
    }

    /// Translate every subtitle file found in the inputs, one after another.
    ///
    /// Output files are written as each document finishes; the first failed
    /// translation stops the run and is returned.
    pub async fn translate_paths<P: AsRef<Path>>(
        &self,
        inputs: &[PathBuf],
        output_dir: Option<P>,
    ) -> Result<Vec<TranslatedDocument>> {
        let sources = collect_subtitle_files(inputs)?;
        if sources.is_empty() {
            return Err(VttError::UnsupportedFormat(
                "No .vtt files found in the given inputs".to_string(),
            ));
        }

        if let Some(dir) = &output_dir {
            fs::create_dir_all(dir.as_ref()).await?;
        }

        let languages = &self.config.languages;
        info!(
            "Translating {} file(s) to {}",
            sources.len(),
            LANGUAGES.name_of(&languages.target)
        );

        let progress = file_progress_bar(sources.len());
        let mut results = Vec::with_capacity(sources.len());
        let mut written = HashSet::new();

        for path in &sources {
            let document = load_document(path).await?;
            progress.set_message(document.name.clone());

            let translated = self.translate_document(&document, languages, &progress).await?;

            let output_dir = match &output_dir {
                Some(dir) => dir.as_ref().to_path_buf(),
                None => path.parent().map(Path::to_path_buf).unwrap_or_default(),
            };
            let output_path = output_dir.join(&translated.name);
            if !written.insert(output_path.clone()) {
                warn!(
                    "{} was already written in this run and will be overwritten by {}",
                    output_path.display(),
                    path.display()
                );
            }
            write_document(&translated, &output_path).await?;

            info!("Wrote {} ({} cues)", output_path.display(), translated.cues.len());
            results.push(TranslatedDocument {
                source_language: languages.source_for(document.detected_language.as_deref()),
                document: translated,
                output_path,
            });
        }

        progress.finish_with_message("done");
        Ok(results)
    }

    /// Translate one document into a new, renamed document
    pub async fn translate_document(
        &self,
        document: &Document,
        languages: &LanguageConfig,
        progress: &ProgressBar,
    ) -> Result<Document> {
        let source = languages.source_for(document.detected_language.as_deref());
        let source_name = LANGUAGES.name_of(&source);
        let target_name = LANGUAGES.name_of(&languages.target);

        let mut on_progress = |completed: usize, total: usize| {
            if total > 0 && completed == total {
                progress.inc(1);
            }
        };

        let texts = document.texts();
        let translated = self
            .translator
            .translate_batch(&texts, source_name, target_name, Some(&mut on_progress))
            .await?;

        if texts.is_empty() {
            progress.inc(1);
        }

        let empty = translated.iter().filter(|t| t.is_empty()).count();
        if empty > 0 {
            warn!(
                "{}: {} of {} cues came back empty, keeping the original text",
                document.name,
                empty,
                texts.len()
            );
        }

        let name = tag_filename(&document.name, &languages.target);
        Ok(document.with_texts(name, &translated))
    }
}

/// Read a subtitle file and record its detected language
pub async fn load_document<P: AsRef<Path>>(path: P) -> Result<Document> {
    let mut document = read_document(path).await?;
    document.detected_language = Some(detect_cues_language(&document.cues).to_string());
    Ok(document)
}

/// Expand files and directories into the subtitle files to process.
///
/// Directories are walked recursively and only `.vtt` files are kept;
/// an explicitly named file with another extension is skipped with a
/// warning. Order follows the inputs, directory entries sorted by name.
pub fn collect_subtitle_files(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(input)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file() && has_vtt_extension(e.path()))
                .map(|e| e.path().to_path_buf())
                .collect();
            info!("Found {} subtitle files in {}", found.len(), input.display());
            files.append(&mut found);
        } else if input.exists() {
            if has_vtt_extension(input) {
                files.push(input.clone());
            } else {
                warn!("Skipping {}: not a .vtt file", input.display());
            }
        } else {
            return Err(VttError::FileNotFound(input.display().to_string()));
        }
    }

    Ok(files)
}

fn file_progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}
