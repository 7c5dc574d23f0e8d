//! Builds canonical [`ToolCall`] records out of interpreted candidates.

use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use crate::call_shapes::Rejection;
use crate::name_resolver::resolve_tool_name;
use crate::ToolCall;

/// Source of unique call ids, injected so extraction stays deterministic
/// under test. Implementations must be usable from concurrent extractions
/// without coordination.
pub trait CallIdSource {
    fn next_id(&self) -> String;
}

/// Default id source: `call_` plus a random UUID. Unique across the process
/// lifetime with no shared counter.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidCallIds;

impl CallIdSource for UuidCallIds {
    fn next_id(&self) -> String {
        format!("call_{}", Uuid::new_v4().simple())
    }
}

/// Assemble the canonical record for one accepted candidate.
///
/// An unresolved name is not fatal: the call is synthesized with the
/// model's own wording and the execution layer decides what an unknown tool
/// means. Mapping arguments serialize to JSON; non-mapping values keep
/// their string representation (a bare string stays unquoted).
pub fn build_tool_call(
    name: &str,
    arguments: Value,
    registry: &[String],
    ids: &dyn CallIdSource,
) -> Result<ToolCall, Rejection> {
    if name.is_empty() {
        return Err(Rejection::InvalidName);
    }

    let resolved = if registry.is_empty() {
        name.to_string()
    } else {
        match resolve_tool_name(name, registry) {
            Some(tool) => tool.to_string(),
            None => {
                warn!(tool = %name, "tool not found in registry, forwarding name as-is");
                name.to_string()
            }
        }
    };

    let arguments = match arguments {
        Value::String(text) => text,
        other => other.to_string(),
    };

    Ok(ToolCall {
        id: ids.next_id(),
        name: resolved,
        arguments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry(tools: &[&str]) -> Vec<String> {
        tools.iter().map(|tool| tool.to_string()).collect()
    }

    #[test]
    fn test_mapping_arguments_serialize_to_json() {
        let call = build_tool_call("t", json!({"x": 1}), &[], &UuidCallIds).unwrap();
        assert_eq!(
            call.parsed_arguments().unwrap(),
            json!({"x": 1})
        );
    }

    #[test]
    fn test_scalar_arguments_coerce_to_string_representation() {
        let call = build_tool_call("t", json!(5), &[], &UuidCallIds).unwrap();
        assert_eq!(call.arguments, "5");

        let call = build_tool_call("t", json!("raw text"), &[], &UuidCallIds).unwrap();
        assert_eq!(call.arguments, "raw text");
    }

    #[test]
    fn test_name_resolution_applied() {
        let tools = registry(&["pdfbasic_extract_pdf_text"]);
        let call = build_tool_call("extract_pdf", json!({}), &tools, &UuidCallIds).unwrap();
        assert_eq!(call.name, "pdfbasic_extract_pdf_text");
    }

    #[test]
    fn test_unresolved_name_fails_open() {
        let tools = registry(&["other_tool"]);
        let call = build_tool_call("mystery_tool", json!({}), &tools, &UuidCallIds).unwrap();
        assert_eq!(call.name, "mystery_tool");
    }

    #[test]
    fn test_empty_registry_passes_name_through() {
        let call = build_tool_call("whatever", json!({}), &[], &UuidCallIds).unwrap();
        assert_eq!(call.name, "whatever");
    }

    #[test]
    fn test_empty_name_is_rejected() {
        assert_eq!(
            build_tool_call("", json!({}), &[], &UuidCallIds),
            Err(Rejection::InvalidName)
        );
    }

    #[test]
    fn test_ids_are_fresh_per_call() {
        let first = build_tool_call("t", json!({}), &[], &UuidCallIds).unwrap();
        let second = build_tool_call("t", json!({}), &[], &UuidCallIds).unwrap();
        assert_ne!(first.id, second.id);
        assert!(first.id.starts_with("call_"));
    }
}
