use std::sync::LazyLock;

use regex::Regex;

/// Sentinel tag meaning "detect, do not assume"
pub const AUTO: &str = "auto";

/// A known language: short code and human-readable name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

const ENTRIES: &[Language] = &[
    Language { code: AUTO, name: "Auto Detect" },
    Language { code: "en", name: "English" },
    Language { code: "vi", name: "Vietnamese" },
    Language { code: "ja", name: "Japanese" },
    Language { code: "zh", name: "Chinese" },
    Language { code: "es", name: "Spanish" },
    Language { code: "fr", name: "French" },
    Language { code: "de", name: "German" },
    Language { code: "ko", name: "Korean" },
    Language { code: "pt", name: "Portuguese" },
    Language { code: "ru", name: "Russian" },
    Language { code: "ar", name: "Arabic" },
    Language { code: "hi", name: "Hindi" },
    Language { code: "th", name: "Thai" },
    Language { code: "it", name: "Italian" },
    Language { code: "nl", name: "Dutch" },
];

/// Closed table of supported languages.
///
/// The detector and the filename tagger both read this one instance, so
/// extending the set of languages only ever happens here.
#[derive(Debug)]
pub struct LanguageTable {
    entries: &'static [Language],
    name_pattern: Regex,
}

impl LanguageTable {
    fn new(entries: &'static [Language]) -> Self {
        let alternation = entries
            .iter()
            .map(|lang| regex::escape(lang.name))
            .collect::<Vec<_>>()
            .join("|");

        // ASCII word boundaries: accented letters next to a name do not join it
        let name_pattern = Regex::new(&format!(r"(?i)(?-u:\b)({})(?-u:\b)", alternation))
            .expect("language name alternation is a valid regex");

        Self { entries, name_pattern }
    }

    pub fn entries(&self) -> &'static [Language] {
        self.entries
    }

    pub fn get(&self, code: &str) -> Option<&'static Language> {
        let code = code.trim();
        self.entries.iter().find(|lang| lang.code.eq_ignore_ascii_case(code))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// Human-readable name for a code, falling back to the code itself
    pub fn name_of<'a>(&self, code: &'a str) -> &'a str {
        match self.get(code) {
            Some(lang) => lang.name,
            None => code,
        }
    }

    /// Case-insensitive, word-bounded match of any language name
    pub fn name_pattern(&self) -> &Regex {
        &self.name_pattern
    }
}

pub static LANGUAGES: LazyLock<LanguageTable> = LazyLock::new(|| LanguageTable::new(ENTRIES));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_code() {
        assert_eq!(LANGUAGES.name_of("vi"), "Vietnamese");
        assert_eq!(LANGUAGES.name_of("EN"), "English");
        assert_eq!(LANGUAGES.name_of(AUTO), "Auto Detect");
        assert_eq!(LANGUAGES.name_of("xx"), "xx");
        assert!(LANGUAGES.contains("nl"));
        assert!(!LANGUAGES.contains("sv"));
    }

    #[test]
    fn test_table_is_closed_set() {
        let codes: Vec<&str> = LANGUAGES.entries().iter().map(|l| l.code).collect();
        assert_eq!(
            codes,
            vec![
                "auto", "en", "vi", "ja", "zh", "es", "fr", "de", "ko", "pt", "ru", "ar", "hi",
                "th", "it", "nl"
            ]
        );
    }

    #[test]
    fn test_name_pattern_is_word_bounded() {
        let pattern = LANGUAGES.name_pattern();
        assert!(pattern.is_match("lecture english"));
        assert!(pattern.is_match("Auto Detect notes"));
        assert!(!pattern.is_match("thailand trip"));
    }
}
