use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Translate subtitle files (or directories of them) with one request per file
    Translate {
        /// Input .vtt files or directories
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Target language code
        #[arg(short, long)]
        target: Option<String>,

        /// Source language code; disables auto-detection unless "auto"
        #[arg(short, long)]
        source: Option<String>,

        /// Translation style (formal, casual, literal, natural, subtitle, educational, custom)
        #[arg(long)]
        style: Option<String>,

        /// Instructions used with the custom style
        #[arg(long)]
        custom: Option<String>,

        /// Model to translate with
        #[arg(short, long)]
        model: Option<String>,

        /// Output directory; defaults to next to each input
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Show the detected source language of subtitle files
    Detect {
        /// Input .vtt files or directories
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },

    /// List supported language codes
    Languages,

    /// Translate a single text to check the model configuration
    Test {
        /// Text to translate
        #[arg(long)]
        text: String,

        /// Source language code
        #[arg(short, long, default_value = "en")]
        source: String,

        /// Target language code
        #[arg(short, long)]
        target: Option<String>,
    },

    /// Write a default configuration file
    Init {
        /// Where to write the configuration
        #[arg(short, long, default_value = "vttlate.toml")]
        path: PathBuf,
    },
}
