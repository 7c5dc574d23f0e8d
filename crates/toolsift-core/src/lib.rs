//! Core engine for recovering tool calls embedded in model text.
//!
//! Some models ignore the structured function-call channel and emit the
//! intended invocation as JSON inside their free-text answer, usually mixed
//! with commentary. This crate finds those fragments, rebuilds canonical
//! tool call records for the dispatch layer, and strips the recognized JSON
//! from the visible text so the user-facing message stays clean.
//!
//! The pipeline is pure and stateless: [`content_suggests_tool_call`] is a
//! cheap gate, and [`extract_tool_calls`] runs block scanner, shape
//! interpreter, name resolver and call builder over one piece of content,
//! returning an [`Extraction`]. Concurrent extractions need no
//! coordination.

pub mod block_scanner;
pub mod call_builder;
pub mod call_extraction;
pub mod call_shapes;
pub mod name_resolver;

pub use block_scanner::{scan_json_blocks, JsonBlock};
pub use call_builder::{build_tool_call, CallIdSource, UuidCallIds};
pub use call_extraction::{
    content_suggests_tool_call, extract_tool_calls, extract_tool_calls_with, Extraction,
};
pub use call_shapes::{interpret_candidate, InterpretedCall, Rejection};
pub use name_resolver::resolve_tool_name;

use serde::{Deserialize, Serialize};

/// A tool call recovered from model text, in the shape the execution layer
/// consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique per call; never reused within the process lifetime.
    pub id: String,
    /// Resolved tool name, or the model's own wording when the registry has
    /// no match (the execution layer rejects unknown names).
    pub name: String,
    /// Arguments as serialized JSON.
    pub arguments: String,
}

impl ToolCall {
    /// Decode `arguments` back into a JSON value.
    pub fn parsed_arguments(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.arguments)
    }
}
