//! When annotations appear, what they carry, and that they pair up.

use crate::common::*;
use adf_babel::{AdfNode, Mark};
use insta::assert_snapshot;
use serde_json::json;

#[test]
fn test_plain_structure_is_not_annotated() {
    let tree = doc(vec![
        heading(2, "Title"),
        paragraph("Body"),
        bullet_list(vec![text_item("a"), text_item("b")]),
        ordered_list(1, vec![text_item("one")]),
        code_block(Some("rust"), "fn main() {}"),
        AdfNode::new("blockquote").with_content(vec![paragraph("quoted")]),
        AdfNode::new("rule"),
        AdfNode::new("expand")
            .with_attrs(json!({"title": "More"}))
            .with_content(vec![paragraph("hidden")]),
        AdfNode::new("panel")
            .with_attrs(json!({"panelType": "warning"}))
            .with_content(vec![paragraph("Careful"), paragraph("Details here.")]),
    ]);

    let markdown = convert(&tree);
    assert!(!markdown.contains("ADF-START"), "{markdown}");
    assert_snapshot!(markdown, @r###"
## Title

Body

- a
- b

1. one

```rust
fn main() {}
```

> quoted

---

> **More**
>
> hidden

!!! warning "Careful"
    Details here.
"###);
}

#[test]
fn test_mention_id_moves_to_markers() {
    let mention = AdfNode::new("mention").with_attrs(json!({"id": "u123", "text": "@Ada"}));
    let tree = doc(vec![AdfNode::new("paragraph").with_content(vec![
        AdfNode::text("Ping "),
        mention,
        AdfNode::text(" please"),
    ])]);

    assert_eq!(
        convert(&tree),
        "Ping <!-- ADF-START adfType=\"mention\" localId=\"u123\" text: \"@Ada\" -->@Ada<!-- ADF-END adfType=\"mention\" localId=\"u123\" --> please"
    );
}

#[test]
fn test_custom_panel() {
    let panel = AdfNode::new("panel")
        .with_attrs(json!({"panelType": "custom", "panelColor": "#abc", "localId": "p-1"}))
        .with_content(vec![paragraph("Note to self")]);

    assert_snapshot!(convert(&doc(vec![panel])), @r###"
<!-- ADF-START
adfType="panel"
localId="p-1"
panelType: "custom"
panelColor: "#abc"
-->
!!! note "Note to self"
<!-- ADF-END adfType="panel" localId="p-1" -->
"###);
}

#[test]
fn test_nested_expand_records_original_syntax() {
    let nested = AdfNode::new("nestedExpand")
        .with_attrs(json!({"title": "Inner"}))
        .with_content(vec![paragraph("deep")]);
    let markdown = convert(&doc(vec![nested]));
    assert!(markdown.contains("adfType=\"nestedExpand\""));
    assert!(markdown.contains("originalType: \"expand\""));
    assert!(markdown.contains("> **Inner**\n>\n> deep"));
}

#[test]
fn test_unexpressible_marks_are_kept() {
    let colored = AdfNode::text("red").with_marks(vec![
        Mark::new("strong"),
        Mark::new("textColor").with_attrs(json!({"color": "#ff0000"})),
    ]);
    let tree = doc(vec![AdfNode::new("paragraph").with_content(vec![colored])]);

    assert_eq!(
        convert(&tree),
        "<!-- ADF-START adfType=\"text\" localId=\"adf-2\" marks: [{\"type\":\"textColor\",\"attrs\":{\"color\":\"#ff0000\"}}] -->**red**<!-- ADF-END adfType=\"text\" localId=\"adf-2\" -->"
    );
}

#[test]
fn test_inferred_mermaid_language() {
    let tree = doc(vec![code_block(None, "graph TD\nA-->B")]);
    assert_snapshot!(convert(&tree), @r###"
<!-- ADF-START
adfType="codeBlock"
localId="adf-1"
inferredLanguage: "mermaid"
-->
```mermaid
graph TD
A-->B
```
<!-- ADF-END adfType="codeBlock" localId="adf-1" -->
"###);
}

#[test]
fn test_unknown_node_is_preserved_whole() {
    let unknown = node(json!({
        "type": "syncBlock",
        "attrs": {"resourceId": "r-1"},
        "content": [{"type": "paragraph", "content": [{"type": "text", "text": "synced"}]}]
    }));
    let markdown = convert(&doc(vec![paragraph("before"), unknown, paragraph("after")]));

    assert!(markdown.starts_with("before\n\n<!-- ADF-START\nadfType=\"syncBlock\""));
    assert!(markdown.contains("adfNode: {\"type\":\"syncBlock\",\"attrs\":{\"resourceId\":\"r-1\"},\"content\":[{\"type\":\"paragraph\",\"content\":[{\"type\":\"text\",\"text\":\"synced\"}]}]}"));
    assert!(markdown.ends_with("-->\n<!-- ADF-END adfType=\"syncBlock\" localId=\"adf-3\" -->\n\nafter"));
}

#[test]
fn test_extension_fallback_placeholder() {
    let roadmap = AdfNode::new("extension").with_attrs(json!({
        "extensionType": "com.atlassian.confluence.macro.core",
        "extensionKey": "roadmap",
        "localId": "ext-7"
    }));
    assert_snapshot!(convert(&doc(vec![roadmap])), @r###"
<!-- ADF-START
adfType="extension"
localId="ext-7"
extensionType: "com.atlassian.confluence.macro.core"
extensionKey: "roadmap"
-->
⚙️ Extension preserved in metadata
<!-- ADF-END adfType="extension" localId="ext-7" -->
"###);
}

#[test]
fn test_markers_always_pair_up() {
    let tree = doc(vec![
        AdfNode::new("tableOfContents"),
        heading(1, "Status"),
        AdfNode::new("paragraph").with_content(vec![
            AdfNode::new("status").with_attrs(json!({"text": "in progress", "color": "blue"})),
            AdfNode::text(" since "),
            AdfNode::new("date").with_attrs(json!({"timestamp": "1700000000000"})),
        ]),
        bullet_list(vec![item(vec![
            paragraph("nested"),
            ordered_list(4, vec![text_item("four")]),
        ])]),
        AdfNode::new("bodiedExtension")
            .with_attrs(json!({"extensionKey": "details"}))
            .with_content(vec![paragraph("inside")]),
        AdfNode::new("unknownThing"),
    ]);

    let markdown = convert(&tree);
    assert_balanced(&markdown);
    assert!(markers(&markdown).len() >= 12);
    assert!(markdown.contains("-->🔵 In Progress<!-- ADF-END"));
    assert!(markdown.contains("-->2023-11-14<!-- ADF-END"));
}
