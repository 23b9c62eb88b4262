use crate::language::AUTO;
use crate::subtitle::Cue;

/// Number of leading cues sampled for detection
pub const SAMPLE_CUES: usize = 5;

/// Marker words per language, in check order. The first language with any
/// marker present in the sample wins.
const MARKERS: &[(&str, &[&str])] = &[
    ("en", &["the ", " and ", " is "]),
    ("vi", &["và ", "của ", "là "]),
    ("ja", &["の ", "は ", "を "]),
    ("zh", &["的 ", "是 ", "在 "]),
    ("es", &["el ", "la ", "es "]),
    ("fr", &["le ", "la ", "est "]),
];

/// Guess the language of a short text sample.
///
/// Returns `auto` when nothing matches. This is a word-spotting heuristic,
/// not a classifier.
pub fn detect_language(sample: &str) -> &'static str {
    let sample = sample.to_lowercase();

    MARKERS
        .iter()
        .find(|(_, markers)| markers.iter().any(|marker| sample.contains(marker)))
        .map(|(code, _)| *code)
        .unwrap_or(AUTO)
}

/// Space-joined text of the first few cues
pub fn document_sample(cues: &[Cue]) -> String {
    cues.iter()
        .take(SAMPLE_CUES)
        .map(|cue| cue.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn detect_cues_language(cues: &[Cue]) -> &'static str {
    detect_language(&document_sample(cues))
}
