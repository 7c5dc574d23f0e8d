//! Recognizes tool-call shapes in decoded JSON objects.
//!
//! Models improvise several layouts for the same intent. Dispatch walks a
//! fixed-priority table: the three keyed shapes (`name`, `function`,
//! `tool`), then the bash-style `cmd` special case, then a fallback that
//! treats object keys themselves as tool names. First match wins, and a
//! rule that fires never falls through to later rules.

use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::name_resolver::resolve_tool_name;

/// Why a syntactically valid JSON object was not turned into a tool call.
///
/// Rejections are skip decisions, not failures: the orchestrator logs them
/// at debug level and moves on to the next candidate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("no recognized tool call shape")]
    UnrecognizedShape,
    #[error("bash command with no python executor in the registry")]
    NoBashExecutor,
    #[error("tool name is empty or not a string")]
    InvalidName,
}

/// Tentative call extracted from one candidate object. The name may still
/// be unresolved; [`crate::call_builder::build_tool_call`] owns resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpretedCall {
    pub name: String,
    pub arguments: Value,
}

/// One keyed layout: which key carries the tool name, and which keys are
/// probed, in order, for the argument payload.
struct KeyedShape {
    name_key: &'static str,
    argument_keys: [&'static str; 3],
}

/// Dispatch priority order. `{"name": ...}` beats `{"function": ...}`
/// beats `{"tool": ...}` when several keys are present.
const KEYED_SHAPES: [KeyedShape; 3] = [
    KeyedShape {
        name_key: "name",
        argument_keys: ["arguments", "args", "parameters"],
    },
    KeyedShape {
        name_key: "function",
        argument_keys: ["args", "arguments", "parameters"],
    },
    KeyedShape {
        name_key: "tool",
        argument_keys: ["parameters", "args", "arguments"],
    },
];

/// Interpret one decoded candidate as a tentative tool call.
pub fn interpret_candidate(
    candidate: &Map<String, Value>,
    registry: &[String],
) -> Result<InterpretedCall, Rejection> {
    for shape in &KEYED_SHAPES {
        let Some(name_value) = candidate.get(shape.name_key) else {
            continue;
        };
        let name = string_name(name_value)?;
        let arguments = shape
            .argument_keys
            .iter()
            .find_map(|key| candidate.get(*key))
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()));
        return Ok(InterpretedCall {
            name,
            arguments: decode_double_encoded(arguments),
        });
    }

    if let Some(command) = candidate.get("cmd").and_then(Value::as_array) {
        if !command.is_empty() {
            return interpret_bash_command(command, registry);
        }
    }

    if !registry.is_empty() {
        // Iterates in the object's own key order, so the model's first
        // recognizable key wins.
        for (key, value) in candidate {
            let Some(tool) = resolve_tool_name(key, registry) else {
                continue;
            };
            let arguments = match value {
                Value::String(_) => decode_double_encoded(value.clone()),
                Value::Object(_) => value.clone(),
                other => json!({ "input": other }),
            };
            return Ok(InterpretedCall {
                name: tool.to_string(),
                arguments,
            });
        }
    }

    Err(Rejection::UnrecognizedShape)
}

/// Bash-style `{"cmd": [...]}` requests are either redirected to a Python
/// executor or dropped; they are never matched against other shapes.
fn interpret_bash_command(
    command: &[Value],
    registry: &[String],
) -> Result<InterpretedCall, Rejection> {
    let executor = registry.iter().find(|tool| {
        let tool = tool.to_lowercase();
        (tool.contains("execute") || tool.contains("run")) && tool.contains("python")
    });
    let Some(executor) = executor else {
        return Err(Rejection::NoBashExecutor);
    };

    let attempted = command
        .iter()
        .map(|part| match part {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ");

    Ok(InterpretedCall {
        name: executor.clone(),
        arguments: json!({
            "code": format!(
                "# Model attempted bash command: {attempted}\nprint('Bash commands not supported. Use Python instead.')"
            ),
        }),
    })
}

fn string_name(value: &Value) -> Result<String, Rejection> {
    match value.as_str() {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(Rejection::InvalidName),
    }
}

/// Some models double-encode arguments as a JSON string. Decode when
/// possible; otherwise keep the raw text under an `input` key.
fn decode_double_encoded(arguments: Value) -> Value {
    match arguments {
        Value::String(text) => {
            serde_json::from_str(&text).unwrap_or_else(|_| json!({ "input": text }))
        }
        other => other,
    }
}
