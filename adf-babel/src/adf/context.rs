//! Whole-document visibility for converters that need it.

use super::nodes::AdfNode;

/// Read-only view of the entire document, built once per conversion.
///
/// Only converters that look beyond their own subtree (the table of contents)
/// consult it. Nodes are borrowed from the tree being converted.
#[derive(Debug, Clone)]
pub struct DocumentContext<'a> {
    /// Every node of the document in pre-order.
    pub all_nodes: Vec<&'a AdfNode>,
    pub root_document: &'a AdfNode,
}

impl<'a> DocumentContext<'a> {
    /// Flattens `root` in pre-order.
    pub fn collect(root: &'a AdfNode) -> Self {
        let mut all_nodes = Vec::with_capacity(root.subtree_size());
        flatten(root, &mut all_nodes);
        DocumentContext {
            all_nodes,
            root_document: root,
        }
    }

    /// Headings in document order.
    pub fn headings(&self) -> impl Iterator<Item = &'a AdfNode> + '_ {
        self.all_nodes
            .iter()
            .copied()
            .filter(|node| node.node_type == "heading")
    }
}

fn flatten<'a>(node: &'a AdfNode, out: &mut Vec<&'a AdfNode>) {
    out.push(node);
    for child in node.children() {
        flatten(child, out);
    }
}
