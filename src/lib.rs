//! vttlate - WebVTT subtitle translation through a language model
//!
//! Parses cue-based subtitle files, guesses their language, translates every
//! cue of a file in a single numbered request and writes the result under a
//! language-tagged filename.

pub mod cli;
pub mod config;
pub mod detect;
pub mod error;
pub mod filename;
pub mod language;
pub mod subtitle;
pub mod translate;
pub mod workflow;
