use super::{Cue, TIME_SEPARATOR, VTT_MARKER};

/// Generate cue text from an ordered list of cues.
///
/// Output is the marker header, a blank line, then one block per cue
/// separated by a single blank line. Cue identifiers and styling are not
/// reproduced.
pub fn generate_document(cues: &[Cue]) -> String {
    let mut vtt_content = format!("{}\n\n", VTT_MARKER);

    for cue in cues {
        vtt_content.push_str(&format!(
            "{} {} {}\n{}\n\n",
            cue.start_time, TIME_SEPARATOR, cue.end_time, cue.text
        ));
    }

    vtt_content
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_document() {
        let cues = vec![
            Cue {
                sequence_index: 0,
                start_time: "00:00:01.000".to_string(),
                end_time: "00:00:02.000".to_string(),
                text: "Hello".to_string(),
            },
            Cue {
                sequence_index: 1,
                start_time: "00:00:03.000".to_string(),
                end_time: "00:00:04.000".to_string(),
                text: "Line one\nLine two".to_string(),
            },
        ];

        assert_eq!(
            generate_document(&cues),
            "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nHello\n\n00:00:03.000 --> 00:00:04.000\nLine one\nLine two\n\n"
        );
    }

    #[test]
    fn test_generate_empty_document() {
        assert_eq!(generate_document(&[]), "WEBVTT\n\n");
    }
}
