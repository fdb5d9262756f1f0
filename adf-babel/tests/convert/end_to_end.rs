//! Whole documents from JSON.

use crate::common::*;
use adf_babel::{AdfConverter, ConvertError, ConvertOptions};
use comrak::nodes::NodeValue;
use comrak::Arena;
use insta::assert_snapshot;
use serde_json::json;

fn kitchen_sink() -> serde_json::Value {
    json!({
        "type": "doc",
        "version": 1,
        "content": [
            {"type": "heading", "attrs": {"level": 1}, "content": [{"type": "text", "text": "Overview"}]},
            {"type": "paragraph", "content": [
                {"type": "text", "text": "Ship "},
                {"type": "text", "text": "fast", "marks": [{"type": "strong"}]},
                {"type": "text", "text": "."}
            ]},
            {"type": "panel", "attrs": {"panelType": "info"}, "content": [
                {"type": "paragraph", "content": [{"type": "text", "text": "Heads up"}]},
                {"type": "paragraph", "content": [{"type": "text", "text": "Read this first."}]}
            ]},
            {"type": "codeBlock", "attrs": {"language": "rust"}, "content": [{"type": "text", "text": "fn main() {}"}]},
            {"type": "rule"},
            {"type": "orderedList", "attrs": {"order": 3}, "content": [
                {"type": "listItem", "content": [{"type": "paragraph", "content": [{"type": "text", "text": "a"}]}]},
                {"type": "listItem", "content": [{"type": "paragraph", "content": [{"type": "text", "text": "b"}]}]}
            ]}
        ]
    })
}

#[test]
fn test_single_paragraph_is_exactly_its_text() {
    let json = r#"{"type":"doc","content":[{"type":"paragraph","content":[{"type":"text","text":"Hello world"}]}]}"#;
    let markdown = futures::executor::block_on(AdfConverter::default().convert_json(json)).unwrap();
    assert_eq!(markdown, "Hello world");
}

#[test]
fn test_kitchen_sink() {
    let markdown = convert(&node(kitchen_sink()));
    assert_snapshot!(markdown, @r###"
# Overview

Ship **fast**.

!!! info "Heads up"
    Read this first.

```rust
fn main() {}
```

---

<!-- ADF-START
adfType="orderedList"
localId="adf-15"
order: 3
-->
3. a
4. b
<!-- ADF-END adfType="orderedList" localId="adf-15" -->
"###);

    let arena = Arena::new();
    let root = parse_markdown(&arena, &markdown);
    let headings = root
        .children()
        .filter(|child| matches!(child.data.borrow().value, NodeValue::Heading(_)))
        .count();
    assert_eq!(headings, 1);
    let lists = root
        .children()
        .filter(|child| matches!(child.data.borrow().value, NodeValue::List(_)))
        .count();
    assert_eq!(lists, 1);
}

#[test]
fn test_output_is_deterministic() {
    let tree = node(kitchen_sink());
    let first = convert(&tree);
    let converter = AdfConverter::default();
    for _ in 0..5 {
        assert_eq!(converter.convert_blocking(&tree), first);
    }
}

#[tokio::test]
async fn test_async_and_blocking_agree() {
    let tree = node(kitchen_sink());
    let converter = AdfConverter::default();
    assert_eq!(converter.convert(&tree).await, converter.convert_blocking(&tree));
}

#[test]
fn test_id_prefix() {
    let tree = node(kitchen_sink());
    let markdown = convert_with(ConvertOptions::default().with_id_prefix("page42"), &tree);
    assert!(markdown.contains("localId=\"page42-15\""));
}

#[test]
fn test_any_node_can_be_the_root() {
    let list = ordered_list(1, vec![text_item("solo")]);
    assert_eq!(convert(&list), "1. solo");
}

#[test]
fn test_empty_children_are_skipped() {
    let tree = doc(vec![
        paragraph("one"),
        serde_json::from_value(json!({"type": "paragraph"})).unwrap(),
        paragraph("two"),
    ]);
    assert_eq!(convert(&tree), "one\n\ntwo");
}

#[tokio::test]
async fn test_invalid_json() {
    let error = AdfConverter::default()
        .convert_json(r#"{"content": []}"#)
        .await
        .unwrap_err();
    assert!(matches!(error, ConvertError::InvalidJson(_)));
    assert!(error.to_string().starts_with("Invalid ADF JSON"));
}
