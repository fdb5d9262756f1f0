//! Media nodes. External media link to their URL; Confluence-hosted files
//! only have an id, which is kept as a `media:<id>` reference.

use super::NodeInput;
use crate::output::Converted;

pub fn media(input: &NodeInput) -> Converted {
    let node = input.node;
    let alt = node.attr_str("alt").unwrap_or_default();
    let target = match node.attr_str("type") {
        Some("external") => node.attr_str("url").map(str::to_string),
        _ => node
            .attr_str("id")
            .map(|id| format!("media:{id}"))
            .or_else(|| node.attr_str("url").map(str::to_string)),
    };
    match target {
        Some(target) => format!("![{alt}]({target})").into(),
        None => "".into(),
    }
}

/// `mediaSingle` and `mediaGroup`: one item per line.
pub fn media_container(input: &NodeInput) -> Converted {
    input.block_children("\n").into()
}
