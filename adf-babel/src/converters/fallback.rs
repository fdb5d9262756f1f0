//! Nodes without a converter.
//!
//! The whole original node goes into the annotation and the Markdown stays
//! empty, so nothing is lost and nothing misleading is shown.

use super::NodeInput;
use crate::metadata::annotation::start_block;
use crate::output::{Converted, MarkdownBlock};
use tracing::debug;

pub fn not_implemented(input: &NodeInput) -> Converted {
    debug!(
        node_type = input.kind.tag(),
        local_id = %input.local_id.value,
        "no converter; node preserved in annotation"
    );
    let node = serde_json::to_value(input.node).unwrap_or_default();
    Converted::Block(MarkdownBlock {
        yaml_block: start_block(
            input.kind.tag(),
            &input.local_id.value,
            &[("adfNode".to_string(), node)],
        ),
        markdown: String::new(),
    })
}
