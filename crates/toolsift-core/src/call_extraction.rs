//! Orchestrates extraction of embedded tool calls from model text.
//!
//! The full pass scans the content for balanced JSON spans, interprets each
//! one, and cuts accepted spans out of the text. Malformed fragments are
//! common in model output and are skipped without noise. Callers that
//! handle high volumes of plain prose should gate with
//! [`content_suggests_tool_call`] first to skip the scan entirely.

use serde_json::Value;
use tracing::{debug, info};

use crate::block_scanner::scan_json_blocks;
use crate::call_builder::{build_tool_call, CallIdSource, UuidCallIds};
use crate::call_shapes::interpret_candidate;
use crate::ToolCall;

/// Lexical markers that make content worth scanning. Quoted entries match
/// JSON keys; the bare ones catch bash-flavored attempts like `-lc`.
const CALL_INDICATORS: [&str; 10] = [
    "\"cmd\"",
    "\"name\"",
    "\"function\"",
    "\"tool\"",
    "\"arguments\"",
    "\"args\"",
    "\"parameters\"",
    "bash",
    "python",
    "-lc",
];

/// Everything recovered from one piece of content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// Accepted calls in left-to-right discovery order.
    pub tool_calls: Vec<ToolCall>,
    /// Content with accepted spans removed and whitespace collapsed.
    /// Returned unchanged when nothing was recognized.
    pub cleaned_content: String,
}

/// Cheap gate deciding whether content is worth the full scan.
///
/// Permissive on purpose: a false positive wastes one linear pass, a false
/// negative silently drops a real tool call.
pub fn content_suggests_tool_call(content: &str) -> bool {
    if content.is_empty() || !content.contains('{') {
        return false;
    }
    let lowered = content.to_lowercase();
    CALL_INDICATORS
        .iter()
        .any(|indicator| lowered.contains(indicator))
}

/// Extract embedded tool calls using the default id source.
pub fn extract_tool_calls(content: &str, registry: &[String]) -> Extraction {
    extract_tool_calls_with(content, registry, &UuidCallIds)
}

/// Extract embedded tool calls from `content`.
///
/// Accepted spans are removed in descending offset order so earlier cuts
/// never shift later ones, then whitespace runs collapse to single spaces.
/// Never fails: any input, however malformed, yields an [`Extraction`].
pub fn extract_tool_calls_with(
    content: &str,
    registry: &[String],
    ids: &dyn CallIdSource,
) -> Extraction {
    if content.is_empty() {
        return Extraction::default();
    }

    let mut tool_calls: Vec<ToolCall> = Vec::new();
    let mut accepted_spans: Vec<(usize, usize)> = Vec::new();

    for block in scan_json_blocks(content) {
        let candidate: Value = match serde_json::from_str(&block.text) {
            Ok(value) => value,
            Err(error) => {
                debug!(%error, offset = block.start, "candidate span is not valid JSON");
                continue;
            }
        };
        let Some(object) = candidate.as_object() else {
            continue;
        };

        let interpreted = match interpret_candidate(object, registry) {
            Ok(interpreted) => interpreted,
            Err(rejection) => {
                debug!(%rejection, offset = block.start, "candidate span skipped");
                continue;
            }
        };

        match build_tool_call(&interpreted.name, interpreted.arguments, registry, ids) {
            Ok(call) => {
                info!(tool = %call.name, "extracted tool call from content");
                tool_calls.push(call);
                accepted_spans.push((block.start, block.end));
            }
            Err(rejection) => {
                debug!(%rejection, offset = block.start, "candidate span skipped");
            }
        }
    }

    if accepted_spans.is_empty() {
        return Extraction {
            tool_calls,
            cleaned_content: content.to_string(),
        };
    }

    let mut cleaned = content.to_string();
    for &(start, end) in accepted_spans.iter().rev() {
        cleaned.replace_range(start..end, "");
    }
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    Extraction {
        tool_calls,
        cleaned_content: cleaned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_accepts_tool_indicators() {
        assert!(content_suggests_tool_call(r#"{"cmd": ["bash"]}"#));
        assert!(content_suggests_tool_call(r#"Using {"name": "tool"}"#));
        assert!(content_suggests_tool_call(r#"{"function": "test"}"#));
        assert!(content_suggests_tool_call(r#"{"x": "run bash now"}"#));
    }

    #[test]
    fn test_gate_rejects_plain_text() {
        assert!(!content_suggests_tool_call("Plain text"));
        assert!(!content_suggests_tool_call(""));
    }

    #[test]
    fn test_gate_rejects_json_without_indicators() {
        assert!(!content_suggests_tool_call(r#"{"user": "john", "age": 30}"#));
    }

    #[test]
    fn test_gate_requires_an_opening_brace() {
        // Indicators alone are not enough without JSON-ish structure.
        assert!(!content_suggests_tool_call("run the bash command please"));
    }

    #[test]
    fn test_gate_is_case_insensitive() {
        assert!(content_suggests_tool_call(r#"{"NAME": "tool"}"#));
    }

    #[test]
    fn test_empty_content_yields_empty_extraction() {
        let result = extract_tool_calls("", &[]);
        assert!(result.tool_calls.is_empty());
        assert_eq!(result.cleaned_content, "");
    }
}
