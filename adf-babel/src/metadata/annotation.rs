//! Annotation markers and identifiers.
//!
//! An annotated fragment looks like:
//!
//! ```text
//! <!-- ADF-START
//! adfType="panel"
//! localId="adf-3"
//! panelColor: "#deebff"
//! -->
//! !!! info "Heads up"
//! <!-- ADF-END adfType="panel" localId="adf-3" -->
//! ```
//!
//! The `localId` appears in both markers so the pair can be matched when the
//! tree is rebuilt.

use crate::adf::AdfNode;
use serde_json::Value;

pub const START_MARKER: &str = "<!-- ADF-START";
pub const END_MARKER: &str = "<!-- ADF-END";

/// Where a node's annotation id came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalIdSource {
    /// `attrs.localId`
    LocalId,
    /// `attrs.id`
    Id,
    /// Generated for this conversion
    Generated,
}

/// Annotation identifier for one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalId {
    pub value: String,
    pub source: LocalIdSource,
}

/// Deterministic id generator: `<prefix>-<pre-order ordinal>`.
///
/// The ordinal is the node's position in a pre-order walk of the converted
/// tree, so ids do not depend on which sibling finishes converting first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalIdAllocator {
    prefix: String,
}

impl LocalIdAllocator {
    pub fn new(prefix: impl Into<String>) -> Self {
        LocalIdAllocator {
            prefix: prefix.into(),
        }
    }

    /// Reuses `attrs.localId` or `attrs.id` when present, else generates one.
    pub fn assign(&self, node: &AdfNode, ordinal: usize) -> LocalId {
        if let Some(id) = id_attr(node, "localId") {
            return LocalId {
                value: id,
                source: LocalIdSource::LocalId,
            };
        }
        if let Some(id) = id_attr(node, "id") {
            return LocalId {
                value: id,
                source: LocalIdSource::Id,
            };
        }
        LocalId {
            value: format!("{}-{ordinal}", self.prefix),
            source: LocalIdSource::Generated,
        }
    }
}

impl Default for LocalIdAllocator {
    fn default() -> Self {
        Self::new("adf")
    }
}

fn id_attr(node: &AdfNode, name: &str) -> Option<String> {
    match node.attr(name)? {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// Opening comment: marker line, identity lines, then one `key: <json>` line per entry.
pub fn start_block(adf_type: &str, local_id: &str, body: &[(String, Value)]) -> String {
    let mut block = format!("{START_MARKER}\nadfType=\"{adf_type}\"\nlocalId=\"{local_id}\"\n");
    for (key, value) in body {
        block.push_str(key);
        block.push_str(": ");
        block.push_str(&escape_comment(&value.to_string()));
        block.push('\n');
    }
    block.push_str("-->");
    block
}

pub fn end_marker(adf_type: &str, local_id: &str) -> String {
    format!("{END_MARKER} adfType=\"{adf_type}\" localId=\"{local_id}\" -->")
}

/// Whether a legacy converter's `yaml_block` is already a finished start comment.
pub fn is_finished_block(yaml_block: &str) -> bool {
    yaml_block.starts_with(START_MARKER) && yaml_block.trim_end().ends_with("-->")
}

/// `--` cannot appear inside an HTML comment body; JSON never needs it literally.
fn escape_comment(json: &str) -> String {
    json.replace("--", "-\\u002d")
}

/// Folds every HTML comment in `text` onto a single line.
pub fn compact_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find("<!--") {
        out.push_str(&rest[..open]);
        let after_open = &rest[open..];
        let close = after_open
            .find("-->")
            .map(|idx| idx + 3)
            .unwrap_or(after_open.len());
        let comment = &after_open[..close];
        let folded = comment
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&folded);
        rest = &after_open[close..];
    }
    out.push_str(rest);
    out
}
