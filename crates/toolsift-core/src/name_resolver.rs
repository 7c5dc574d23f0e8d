//! Maps tentative tool names onto registry identifiers.
//!
//! Models rarely reproduce a registry identifier exactly. Matching runs in
//! tiers (exact, containment, token overlap) so each strategy can be
//! exercised on its own; within a tier the first registry entry wins, in
//! registry order, not the best-scored one.

use std::collections::HashSet;

/// Resolve `name` against `registry`, returning the matched identifier.
///
/// Both sides are normalized first: lowercased, with `-` and spaces treated
/// as `_`. Returns `None` when no tier hits; the caller decides whether to
/// proceed with the tentative name anyway.
pub fn resolve_tool_name<'a>(name: &str, registry: &'a [String]) -> Option<&'a str> {
    let needle = normalize(name);
    let normalized: Vec<String> = registry.iter().map(|tool| normalize(tool)).collect();

    exact_match(&needle, &normalized)
        .or_else(|| containment_match(&needle, &normalized))
        .or_else(|| token_overlap_match(&needle, &normalized))
        .map(|index| registry[index].as_str())
}

fn normalize(name: &str) -> String {
    name.to_lowercase().replace(['-', ' '], "_")
}

fn exact_match(needle: &str, registry: &[String]) -> Option<usize> {
    registry.iter().position(|tool| tool == needle)
}

/// Either side containing the other counts: models often emit a fragment of
/// the identifier, or pad it with extra qualifiers.
fn containment_match(needle: &str, registry: &[String]) -> Option<usize> {
    registry
        .iter()
        .position(|tool| tool.contains(needle) || needle.contains(tool.as_str()))
}

/// Token-set overlap on `_` boundaries. Single-token names need one shared
/// token; anything longer needs two.
fn token_overlap_match(needle: &str, registry: &[String]) -> Option<usize> {
    let needle_tokens: HashSet<&str> = needle.split('_').collect();
    let required = needle_tokens.len().min(2);

    registry.iter().position(|tool| {
        let tool_tokens: HashSet<&str> = tool.split('_').collect();
        tool_tokens.intersection(&needle_tokens).count() >= required
    })
}
