use regex::NoExpand;

use crate::language::LANGUAGES;
use crate::subtitle::VTT_EXTENSION;

/// Name an output file after its target language.
///
/// An existing language name in the stem (any case, whole word) is replaced
/// by the target's name; otherwise the name is appended after a space.
/// Any table name counts as a tag, so `Thai cooking.vtt` becomes
/// `Vietnamese cooking.vtt` when translating to `vi`. Word boundaries are
/// ASCII-only, so a non-ASCII letter touching a name does not shield it.
pub fn tag_filename(original: &str, target_language: &str) -> String {
    let language_name = LANGUAGES.name_of(target_language);
    let stem = strip_vtt_extension(original);

    let pattern = LANGUAGES.name_pattern();
    let tagged = if pattern.is_match(stem) {
        pattern.replacen(stem, 1, NoExpand(language_name)).into_owned()
    } else {
        format!("{} {}", stem, language_name)
    };

    format!("{}.{}", tagged, VTT_EXTENSION)
}

fn strip_vtt_extension(name: &str) -> &str {
    let suffix_len = VTT_EXTENSION.len() + 1;
    if name.len() >= suffix_len && name.is_char_boundary(name.len() - suffix_len) {
        let (stem, suffix) = name.split_at(name.len() - suffix_len);
        if suffix.starts_with('.') && suffix[1..].eq_ignore_ascii_case(VTT_EXTENSION) {
            return stem;
        }
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_language_when_untagged() {
        assert_eq!(tag_filename("lecture.vtt", "vi"), "lecture Vietnamese.vtt");
        assert_eq!(tag_filename("Lecture.VTT", "ja"), "Lecture Japanese.vtt");
    }

    #[test]
    fn test_replaces_existing_language() {
        assert_eq!(tag_filename("lecture English.vtt", "vi"), "lecture Vietnamese.vtt");
        assert_eq!(tag_filename("lecture english part 2.vtt", "fr"), "lecture French part 2.vtt");
    }

    #[test]
    fn test_replaces_only_first_match() {
        assert_eq!(
            tag_filename("English to German.vtt", "es"),
            "Spanish to German.vtt"
        );
    }

    #[test]
    fn test_unknown_code_used_verbatim() {
        assert_eq!(tag_filename("lecture.vtt", "sv"), "lecture sv.vtt");
    }

    #[test]
    fn test_word_boundary_limits_matches() {
        assert_eq!(tag_filename("thailand.vtt", "de"), "thailand German.vtt");
        // whole-word names are still taken as tags
        assert_eq!(tag_filename("Thai cooking.vtt", "vi"), "Vietnamese cooking.vtt");
    }

    #[test]
    fn test_word_boundary_is_ascii_only() {
        assert_eq!(tag_filename("ÉEnglish.vtt", "vi"), "ÉVietnamese.vtt");
        assert_eq!(tag_filename("cours_English.vtt", "fr"), "cours_English French.vtt");
    }

    #[test]
    fn test_name_without_extension() {
        assert_eq!(tag_filename("lecture", "vi"), "lecture Vietnamese.vtt");
        assert_eq!(tag_filename("notes.txt", "en"), "notes.txt English.vtt");
    }
}
