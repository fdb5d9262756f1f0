//! Builders and helpers shared by the integration tests.
#![allow(dead_code)]

use adf_babel::{AdfConverter, AdfNode, ConvertOptions};
use comrak::nodes::{AstNode, NodeValue};
use comrak::{parse_document, Arena, Options};
use serde_json::{json, Value};

pub fn doc(content: Vec<AdfNode>) -> AdfNode {
    AdfNode::new("doc")
        .with_attrs(json!({"version": 1}))
        .with_content(content)
}

pub fn paragraph(text: &str) -> AdfNode {
    AdfNode::new("paragraph").with_content(vec![AdfNode::text(text)])
}

pub fn heading(level: u8, text: &str) -> AdfNode {
    AdfNode::new("heading")
        .with_attrs(json!({ "level": level }))
        .with_content(vec![AdfNode::text(text)])
}

pub fn bullet_list(items: Vec<AdfNode>) -> AdfNode {
    AdfNode::new("bulletList").with_content(items)
}

pub fn ordered_list(order: i64, items: Vec<AdfNode>) -> AdfNode {
    AdfNode::new("orderedList")
        .with_attrs(json!({ "order": order }))
        .with_content(items)
}

pub fn item(content: Vec<AdfNode>) -> AdfNode {
    AdfNode::new("listItem").with_content(content)
}

/// A list item holding a single paragraph.
pub fn text_item(text: &str) -> AdfNode {
    item(vec![paragraph(text)])
}

pub fn code_block(language: Option<&str>, code: &str) -> AdfNode {
    let node = AdfNode::new("codeBlock").with_content(vec![AdfNode::text(code)]);
    match language {
        Some(language) => node.with_attrs(json!({ "language": language })),
        None => node,
    }
}

pub fn node(value: Value) -> AdfNode {
    serde_json::from_value(value).expect("valid ADF")
}

pub fn convert(root: &AdfNode) -> String {
    AdfConverter::default().convert_blocking(root)
}

pub fn convert_with(options: ConvertOptions, root: &AdfNode) -> String {
    AdfConverter::new(options).convert_blocking(root)
}

pub fn parse_markdown<'a>(arena: &'a Arena<AstNode<'a>>, markdown: &str) -> &'a AstNode<'a> {
    let mut options = Options::default();
    options.extension.table = true;
    parse_document(arena, markdown, &options)
}

/// Deepest list nesting in a comrak tree.
pub fn max_list_depth<'a>(node: &'a AstNode<'a>) -> usize {
    let own = usize::from(matches!(node.data.borrow().value, NodeValue::List(_)));
    own + node.children().map(max_list_depth).max().unwrap_or(0)
}

/// `(START|END, adfType, localId)` for every marker, in document order.
pub fn markers(markdown: &str) -> Vec<(String, String, String)> {
    let pattern =
        regex::Regex::new(r#"<!-- ADF-(START|END)\s+adfType="([^"]+)"\s+localId="([^"]+)""#)
            .unwrap();
    pattern
        .captures_iter(markdown)
        .map(|captures| {
            (
                captures[1].to_string(),
                captures[2].to_string(),
                captures[3].to_string(),
            )
        })
        .collect()
}

/// Asserts that markers pair up like brackets with matching type and id.
pub fn assert_balanced(markdown: &str) {
    let mut open: Vec<(String, String)> = Vec::new();
    for (side, adf_type, local_id) in markers(markdown) {
        if side == "START" {
            open.push((adf_type, local_id));
        } else {
            let start = open.pop().expect("END without START");
            assert_eq!(start, (adf_type, local_id), "mismatched markers in:\n{markdown}");
        }
    }
    assert!(open.is_empty(), "unclosed markers {open:?} in:\n{markdown}");
}
