//! Lexes raw text for balanced `{...}` spans that might be JSON.
//!
//! The scanner is deliberately ignorant of JSON validity: it only tracks
//! brace depth, string state and escape sequences, and leaves decoding to
//! the orchestrator. Braces inside quoted strings never affect depth, so
//! `{"code": "if x { y }"}` is one span, not two.

/// A candidate JSON substring and its byte offsets in the original content.
///
/// `end` is exclusive. Both offsets always land on brace boundaries, so
/// slicing the content with them is safe even for multi-byte text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonBlock {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Collect every maximal balanced-brace span in `content`.
///
/// Spans do not overlap: once a top-level `{...}` closes, scanning resumes
/// after it, so nested objects are only visible by re-parsing the emitted
/// span. A span still open at end of input is discarded, and scanning
/// resumes right after its opening brace; objects nested inside truncated
/// output are still found that way.
pub fn scan_json_blocks(content: &str) -> Vec<JsonBlock> {
    let mut blocks = Vec::new();
    let mut search_from = 0;

    while let Some(offset) = content[search_from..].find('{') {
        let start = search_from + offset;
        match balanced_span_len(&content[start..]) {
            Some(len) => {
                let end = start + len;
                blocks.push(JsonBlock {
                    text: content[start..end].to_string(),
                    start,
                    end,
                });
                search_from = end;
            }
            None => {
                // Unterminated: drop the dangling open and rescan from the
                // next character.
                search_from = start + 1;
            }
        }
    }

    blocks
}

/// Byte length of the balanced span starting at `text[0]`, which must be an
/// opening brace. Returns `None` when the input ends before depth returns
/// to zero.
fn balanced_span_len(text: &str) -> Option<usize> {
    let mut depth: u32 = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for (index, ch) in text.char_indices() {
        if escape_next {
            // The escaped character is consumed without reinterpretation,
            // which keeps `\"` from ending the string.
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(index + 1);
                }
            }
            _ => {}
        }
    }

    None
}
