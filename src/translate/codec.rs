use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

/// `N. "text"` with optional quotes, on a trimmed response line
static NUMBERED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(\d+)\.\s*["']?(.*?)["']?$"#).expect("numbered line pattern is valid")
});

static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\d+\.\s*["']?"#).expect("leading number pattern is valid"));

static TRAILING_QUOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"["']?$"#).expect("trailing quote pattern is valid"));

/// Build the single prompt that asks for all texts to be translated at once.
///
/// Texts are numbered from 1 and quoted; the model is asked to answer with
/// the same numbering, one item per line. No texts, no prompt.
pub fn encode_batch(
    texts: &[String],
    source_language: &str,
    target_language: &str,
    instructions: &str,
) -> String {
    if texts.is_empty() {
        return String::new();
    }

    let numbered_texts = texts
        .iter()
        .enumerate()
        .map(|(idx, text)| format!("{}. \"{}\"", idx + 1, text))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a professional subtitle translator. Translate ALL the following subtitle texts from {} to {}.\n\
         \n\
         Translation Style: {}\n\
         \n\
         Rules:\n\
         1. Keep translations concise and suitable for subtitles\n\
         2. Preserve the meaning and tone\n\
         3. Use natural, fluent language\n\
         4. Keep line breaks if present within each subtitle\n\
         5. Keep technical terms in brackets\n\
         6. Return ONLY the translated texts in the same numbered format\n\
         7. Do not add any explanations or notes\n\
         8. Maintain the exact same numbering (1., 2., 3., etc.)\n\
         \n\
         Subtitle texts to translate:\n\
         {}\n\
         \n\
         Return format: Each translated text on a new line with its number:\n\
         1. \"translated text 1\"\n\
         2. \"translated text 2\"\n\
         etc.",
        source_language, target_language, instructions, numbered_texts
    )
}

/// Build the prompt for translating one subtitle text on its own
pub fn encode_single(
    text: &str,
    source_language: &str,
    target_language: &str,
    instructions: &str,
) -> String {
    format!(
        "You are a professional subtitle translator. Translate the following subtitle text from {} to {}.\n\
         \n\
         Translation Style: {}\n\
         \n\
         Rules:\n\
         1. Keep the translation concise and suitable for subtitles\n\
         2. Preserve the meaning and tone\n\
         3. Use natural, fluent language\n\
         4. Keep line breaks if present\n\
         5. Don't add any explanations or notes\n\
         6. Only return the translated text\n\
         7. Keep the technical terms in brackets [] after translating them\n\
         8. Each sentence must connect with the others; check the previous and next parts for the final meaning.\n\
         \n\
         Text to translate:\n\
         \"{}\"",
        source_language, target_language, instructions, text
    )
}

/// Recover `expected` texts from a numbered model response.
///
/// The number at the start of a line addresses the item, so reordered
/// answers still land in the right slot. Items that cannot be found by
/// number fall back to the line at the same position, and to an empty
/// string when there is no such line. The result always has `expected`
/// entries.
pub fn decode_batch(response: &str, expected: usize) -> Vec<String> {
    if expected == 0 {
        return Vec::new();
    }

    let lines: Vec<&str> = response
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect();

    // first pass: index -> captured text, first line per index wins
    let mut numbered: HashMap<usize, String> = HashMap::new();
    for line in &lines {
        if let Some(caps) = NUMBERED_LINE.captures(line.trim()) {
            let Ok(index) = caps[1].parse::<usize>() else {
                continue;
            };
            numbered
                .entry(index)
                .or_insert_with(|| caps[2].trim().to_string());
        }
    }

    // second pass: fill every slot, falling back to position
    let mut results = Vec::with_capacity(expected);
    for position in 0..expected {
        let index = position + 1;
        let text = match numbered.get(&index) {
            Some(captured) if !captured.is_empty() => captured.clone(),
            Some(_) => {
                debug!("Item {} matched with empty text, using line {}", index, position);
                positional_fallback(&lines, position)
            }
            None => {
                warn!("Item {} missing from response, using line {}", index, position);
                positional_fallback(&lines, position)
            }
        };
        results.push(text);
    }

    results
}

/// The line at `position` with any number prefix and quotes stripped
fn positional_fallback(lines: &[&str], position: usize) -> String {
    match lines.get(position) {
        Some(line) => {
            let without_number = LEADING_NUMBER.replace(line.trim(), "");
            TRAILING_QUOTE.replace(&without_number, "").trim().to_string()
        }
        None => String::new(),
    }
}
