//! vttlate - WebVTT subtitle translation
//!
//! Command-line entry point: loads configuration, sets up logging and runs
//! the requested subcommand.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vttlate::cli::{Args, Commands};
use vttlate::config::{Config, TranslationStyle, AVAILABLE_MODELS};
use vttlate::error::VttError;
use vttlate::language::{AUTO, LANGUAGES};
use vttlate::workflow::{collect_subtitle_files, load_document, Workflow};

/// Default configuration file looked up in the working directory
const DEFAULT_CONFIG_FILE: &str = "vttlate.toml";

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Keep the guard alive so buffered file logs are flushed on exit
    let _guard = setup_logging(args.verbose)?;

    let mut config = load_config(args.config.as_deref())?;

    match args.command {
        Commands::Translate { inputs, target, source, style, custom, model, output_dir } => {
            apply_overrides(&mut config, target, source, style, custom, model)?;
            config.validate()?;

            let workflow = Workflow::new(config)?;
            match workflow.translate_paths(&inputs, output_dir.as_ref()).await {
                Ok(results) => {
                    let target = LANGUAGES.name_of(&workflow.config().languages.target);
                    for result in &results {
                        println!(
                            "{} ({} cues, {} -> {})",
                            result.output_path.display(),
                            result.document.cues.len(),
                            LANGUAGES.name_of(&result.source_language),
                            target
                        );
                    }
                    info!("Translated {} file(s)", results.len());
                }
                Err(e) => {
                    if e.is_translation_failure() {
                        error!("Translation aborted: {}", e);
                    }
                    return Err(e.into());
                }
            }
        }
        Commands::Detect { inputs } => {
            let files = collect_subtitle_files(&inputs)?;

            println!("\n{:<50} {:<8} {:<8} {:<15}", "File", "Cues", "Code", "Language");
            println!("{}", "-".repeat(85));

            for path in files {
                let document = load_document(&path).await?;
                let code = document.detected_language.as_deref().unwrap_or(AUTO);
                println!(
                    "{:<50} {:<8} {:<8} {:<15}",
                    document.name,
                    document.cues.len(),
                    code,
                    LANGUAGES.name_of(code)
                );
            }
        }
        Commands::Languages => {
            println!("\nSupported Languages:");
            println!("{:<8} {:<20}", "Code", "Name");
            println!("{}", "-".repeat(28));
            for language in LANGUAGES.entries() {
                println!("{:<8} {:<20}", language.code, language.name);
            }

            println!("\nAvailable Models:");
            for model in AVAILABLE_MODELS {
                println!("  {}", model);
            }
        }
        Commands::Test { text, source, target } => {
            if let Some(target) = target {
                config.languages.target = target;
            }
            config.validate()?;

            let workflow = Workflow::new(config)?;
            let languages = &workflow.config().languages;
            let translator = workflow.translator();

            info!("Testing model {}", translator.model());
            let translation = translator
                .translate_text(
                    &text,
                    LANGUAGES.name_of(&source),
                    LANGUAGES.name_of(&languages.target),
                )
                .await?;

            println!("{}", translation);
        }
        Commands::Init { path } => {
            if path.exists() {
                return Err(VttError::Config(format!(
                    "{} already exists, refusing to overwrite",
                    path.display()
                ))
                .into());
            }
            Config::default().save_to_file(&path)?;
            println!("Wrote default configuration to {}", path.display());
        }
    }

    Ok(())
}

/// Load the explicit config file, else the one in the working directory, else defaults
fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(config_path) => Config::from_file(config_path)?,
        None => {
            if Path::new(DEFAULT_CONFIG_FILE).exists() {
                info!("Found {} in current directory, loading...", DEFAULT_CONFIG_FILE);
                Config::from_file(DEFAULT_CONFIG_FILE)?
            } else {
                Config::default()
            }
        }
    };
    Ok(config)
}

/// Apply command-line choices on top of the loaded configuration
fn apply_overrides(
    config: &mut Config,
    target: Option<String>,
    source: Option<String>,
    style: Option<String>,
    custom: Option<String>,
    model: Option<String>,
) -> Result<()> {
    if let Some(target) = target {
        config.languages.target = target;
    }
    if let Some(source) = source {
        config.languages.auto_detect = source.eq_ignore_ascii_case(AUTO);
        config.languages.source = source;
    }
    if let Some(style) = style {
        config.translate.style = style.parse()?;
    }
    if let Some(custom) = custom {
        config.translate.custom_requirements = custom;
        if config.translate.style != TranslationStyle::Custom {
            info!("Custom requirements given, switching to the custom style");
            config.translate.style = TranslationStyle::Custom;
        }
    }
    if let Some(model) = model {
        config.translate.model = model;
    }
    Ok(())
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<WorkerGuard> {
    let log_dir: PathBuf = std::env::current_dir()?.join(".vttlate").join("log");
    std::fs::create_dir_all(&log_dir)?;

    // Daily rotating log file
    let file_appender = rolling::daily(&log_dir, "vttlate.log");
    let (non_blocking_file, guard) = non_blocking(file_appender);

    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(true)
        .with_line_number(true);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false); // No ANSI colors in file

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!("Logging initialized - console: {}, file: {}",
          log_level, log_dir.join("vttlate.log").display());

    Ok(guard)
}
