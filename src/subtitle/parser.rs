use super::{Cue, Document, TIME_SEPARATOR, VTT_MARKER};

/// Cue being accumulated while its text lines are read
struct OpenCue {
    start_time: String,
    end_time: String,
    text: String,
}

/// Parse raw cue text into a document.
///
/// Never fails: lines that do not fit the format are skipped, and a time
/// line that never receives any text produces no cue.
pub fn parse_document(content: &str, name: &str) -> Document {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut cues = Vec::new();
    let mut current: Option<OpenCue> = None;
    let mut seen_content = false;

    for (i, raw_line) in lines.iter().enumerate() {
        let line = raw_line.trim();

        if line.is_empty() {
            continue;
        }
        if is_marker_line(line, seen_content) {
            seen_content = true;
            continue;
        }
        seen_content = true;

        if line.contains(TIME_SEPARATOR) {
            let mut parts = line.split(TIME_SEPARATOR).map(str::trim);
            let start_time = parts.next().unwrap_or_default();
            let end_time = parts.next().unwrap_or_default();
            // a time line without a start never opens a cue
            current = (!start_time.is_empty()).then(|| OpenCue {
                start_time: start_time.to_string(),
                end_time: end_time.to_string(),
                text: String::new(),
            });
            continue;
        }

        // identifiers, NOTE blocks and stray text outside a cue
        let Some(cue) = current.as_mut() else {
            continue;
        };

        if cue.text.is_empty() {
            cue.text = line.to_string();
        } else {
            cue.text.push('\n');
            cue.text.push_str(line);
        }

        if closes_cue(lines.get(i + 1).copied()) {
            if let Some(finished) = current.take() {
                if !finished.text.is_empty() {
                    cues.push(Cue {
                        sequence_index: cues.len(),
                        start_time: finished.start_time,
                        end_time: finished.end_time,
                        text: finished.text,
                    });
                }
            }
        }
    }

    Document {
        name: name.to_string(),
        raw_content: Some(content.to_string()),
        cues,
        detected_language: None,
    }
}

fn is_marker_line(line: &str, seen_content: bool) -> bool {
    line == VTT_MARKER || (!seen_content && line.starts_with(VTT_MARKER))
}

/// A cue body ends at a blank line, a new time line, or end of input
fn closes_cue(next_line: Option<&str>) -> bool {
    match next_line {
        None => true,
        Some(next) => next.trim().is_empty() || next.contains(TIME_SEPARATOR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subtitle::generate_document;

    fn cue(index: usize, start: &str, end: &str, text: &str) -> Cue {
        Cue {
            sequence_index: index,
            start_time: start.to_string(),
            end_time: end.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_parse_basic_document() {
        let content = "WEBVTT\n\n00:00:01.000 --> 00:00:04.000\nHello there\n\n00:00:05.000 --> 00:00:08.500\nSecond cue\n";
        let doc = parse_document(content, "talk.vtt");

        assert_eq!(doc.name, "talk.vtt");
        assert_eq!(doc.raw_content.as_deref(), Some(content));
        assert_eq!(doc.detected_language, None);
        assert_eq!(
            doc.cues,
            vec![
                cue(0, "00:00:01.000", "00:00:04.000", "Hello there"),
                cue(1, "00:00:05.000", "00:00:08.500", "Second cue"),
            ]
        );
    }

    #[test]
    fn test_multiline_cue_text_is_preserved() {
        let content = "WEBVTT\n\n00:01.000 --> 00:02.000\nfirst line\nsecond line\n";
        let doc = parse_document(content, "a.vtt");

        assert_eq!(doc.cues.len(), 1);
        assert_eq!(doc.cues[0].text, "first line\nsecond line");
    }

    #[test]
    fn test_time_line_without_text_is_dropped() {
        let content = "WEBVTT\n\n00:00:00.000 --> 00:00:01.000\n\n00:00:02.000 --> 00:00:03.000\nHello\n";
        let doc = parse_document(content, "a.vtt");

        assert_eq!(doc.cues, vec![cue(0, "00:00:02.000", "00:00:03.000", "Hello")]);
    }

    #[test]
    fn test_time_line_directly_followed_by_time_line() {
        let content = "00:00:00.000 --> 00:00:01.000\n00:00:02.000 --> 00:00:03.000\nHello\n00:00:04.000 --> 00:00:05.000";
        let doc = parse_document(content, "a.vtt");

        assert_eq!(doc.cues, vec![cue(0, "00:00:02.000", "00:00:03.000", "Hello")]);
    }

    #[test]
    fn test_timestamps_and_settings_kept_verbatim() {
        let content = "WEBVTT - Lecture\r\n\r\n1\r\n00:00:01.5 --> 00:00:02,25 align:start\r\nText\r\n";
        let doc = parse_document(content, "a.vtt");

        assert_eq!(doc.cues, vec![cue(0, "00:00:01.5", "00:00:02,25 align:start", "Text")]);
    }

    #[test]
    fn test_cue_identifiers_and_notes_are_ignored() {
        let content = "WEBVTT\n\nNOTE written by hand\n\nintro\n00:00:01.000 --> 00:00:02.000\nHi\n";
        let doc = parse_document(content, "a.vtt");

        assert_eq!(doc.cues, vec![cue(0, "00:00:01.000", "00:00:02.000", "Hi")]);
    }

    #[test]
    fn test_time_line_without_start_opens_no_cue() {
        let document = parse_document("WEBVTT\n\n --> 00:00:02.000\nOrphan\n", "a.vtt");
        assert!(document.cues.is_empty());

        let document = parse_document(
            "WEBVTT\n\n --> 00:00:02.000\nOrphan\n\n00:00:03.000 --> 00:00:04.000\nKept\n",
            "a.vtt",
        );
        assert_eq!(document.cues, vec![cue(0, "00:00:03.000", "00:00:04.000", "Kept")]);
    }

    #[test]
    fn test_garbage_input_yields_no_cues() {
        assert!(parse_document("", "a.vtt").cues.is_empty());
        assert!(parse_document("just some words\nand more", "a.vtt").cues.is_empty());
        assert!(parse_document("WEBVTT\n\n00:00.000 --> 00:01.000", "a.vtt").cues.is_empty());
    }

    #[test]
    fn test_sequence_index_matches_position() {
        let content = "WEBVTT\n\na --> b\n\nc --> d\none\n\ne --> f\n\ng --> h\ntwo\n\ni --> j\nthree\n";
        let doc = parse_document(content, "a.vtt");

        assert_eq!(doc.cues.len(), 3);
        for (i, cue) in doc.cues.iter().enumerate() {
            assert_eq!(cue.sequence_index, i);
        }
    }

    #[test]
    fn test_round_trip_at_cue_level() {
        let cues = vec![
            cue(0, "00:00:01.000", "00:00:02.000", "Hello"),
            cue(1, "00:00:02.500", "00:00:04.000", "Two\nlines"),
            cue(2, "00:01:00.000", "00:01:05.123", "Ça va? 「はい」"),
        ];

        let reparsed = parse_document(&generate_document(&cues), "a.vtt");
        assert_eq!(reparsed.cues, cues);
    }
}
