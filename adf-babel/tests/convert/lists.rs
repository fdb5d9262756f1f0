//! List rendering through the engine: nesting, numbering, tasks and decisions.

use crate::common::*;
use adf_babel::AdfNode;
use comrak::nodes::NodeValue;
use comrak::Arena;
use insta::assert_snapshot;
use serde_json::json;

fn task(state: &str, text: &str) -> AdfNode {
    AdfNode::new("taskItem")
        .with_attrs(json!({ "state": state }))
        .with_content(vec![AdfNode::text(text)])
}

#[test]
fn test_three_level_bullets() {
    let tree = doc(vec![bullet_list(vec![item(vec![
        paragraph("one"),
        bullet_list(vec![item(vec![
            paragraph("two"),
            bullet_list(vec![text_item("three")]),
        ])]),
    ])])]);

    let markdown = convert(&tree);
    assert_snapshot!(markdown, @r###"
- one
  * two
    - three
"###);

    let arena = Arena::new();
    let root = parse_markdown(&arena, &markdown);
    assert_eq!(max_list_depth(root), 3);
}

#[test]
fn test_sibling_items_keep_their_order() {
    let tree = doc(vec![bullet_list(vec![
        text_item("first"),
        text_item("second"),
        text_item("third"),
    ])]);
    assert_eq!(convert(&tree), "- first\n- second\n- third");
}

#[test]
fn test_ordered_list_start() {
    let default_start = doc(vec![ordered_list(1, vec![text_item("a"), text_item("b")])]);
    assert_eq!(convert(&default_start), "1. a\n2. b");

    let custom_start = doc(vec![ordered_list(3, vec![text_item("a"), text_item("b")])]);
    assert_snapshot!(convert(&custom_start), @r###"
<!-- ADF-START
adfType="orderedList"
localId="adf-1"
order: 3
-->
3. a
4. b
<!-- ADF-END adfType="orderedList" localId="adf-1" -->
"###);
}

#[test]
fn test_numbered_list_inside_bullets() {
    let tree = doc(vec![bullet_list(vec![item(vec![
        paragraph("steps"),
        ordered_list(1, vec![text_item("build"), text_item("ship")]),
    ])])]);
    assert_eq!(convert(&tree), "- steps\n   1. build\n   2. ship");
}

#[test]
fn test_item_continuation_is_indented() {
    let tree = doc(vec![bullet_list(vec![item(vec![
        paragraph("Run:"),
        code_block(Some("sh"), "make"),
    ])])]);
    assert_eq!(convert(&tree), "- Run:\n  ```sh\n  make\n  ```");
}

#[test]
fn test_code_inside_item_stays_fenced() {
    let tree = doc(vec![bullet_list(vec![item(vec![
        paragraph("config:"),
        code_block(Some("yaml"), "- a\n- b"),
    ])])]);
    let markdown = convert(&tree);
    assert_eq!(markdown, "- config:\n  ```yaml\n  - a\n  - b\n  ```");

    let arena = Arena::new();
    let root = parse_markdown(&arena, &markdown);
    let code: Vec<String> = root
        .descendants()
        .filter_map(|node| match &node.data.borrow().value {
            NodeValue::CodeBlock(block) => Some(block.literal.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(code, vec!["- a\n- b\n".to_string()]);
    assert_eq!(max_list_depth(root), 1);
}

#[test]
fn test_code_inside_nested_item_keeps_its_indentation() {
    let tree = doc(vec![bullet_list(vec![item(vec![
        paragraph("outer"),
        bullet_list(vec![item(vec![
            paragraph("inner"),
            code_block(Some("text"), "- x"),
        ])]),
    ])])]);
    assert_eq!(
        convert(&tree),
        "- outer\n  * inner\n    ```text\n    - x\n    ```"
    );
}

#[test]
fn test_huge_start_numbers_saturate() {
    let tree = doc(vec![ordered_list(i64::MAX, vec![text_item("a"), text_item("b")])]);
    let markdown = convert(&tree);
    assert!(
        markdown.contains("-->\n9223372036854775807. a\n9223372036854775807. b\n<!-- ADF-END"),
        "{markdown}"
    );

    let float_order = node(json!({
        "type": "orderedList",
        "attrs": {"order": 1e30},
        "content": [
            {"type": "listItem", "content": [{"type": "paragraph", "content": [{"type": "text", "text": "a"}]}]},
            {"type": "listItem", "content": [{"type": "paragraph", "content": [{"type": "text", "text": "b"}]}]}
        ]
    }));
    let markdown = convert(&float_order);
    assert!(markdown.contains("9223372036854775807. a\n9223372036854775807. b"), "{markdown}");
}

#[test]
fn test_task_list() {
    let tree = doc(vec![AdfNode::new("taskList").with_content(vec![
        task("DONE", "Write docs"),
        task("TODO", "Review"),
    ])]);
    assert_eq!(convert(&tree), "- [x] Write docs\n- [ ] Review");
}

#[test]
fn test_nested_task_list() {
    let tree = doc(vec![AdfNode::new("taskList").with_content(vec![
        task("TODO", "Parent"),
        AdfNode::new("taskList").with_content(vec![task("TODO", "Child")]),
    ])]);
    assert_eq!(convert(&tree), "- [ ] Parent\n  * [ ] Child");
}

#[test]
fn test_unusual_task_state_is_annotated() {
    let blocked = AdfNode::new("taskItem")
        .with_attrs(json!({"localId": "t9", "state": "BLOCKED"}))
        .with_content(vec![AdfNode::text("Blocked thing")]);
    let tree = doc(vec![AdfNode::new("taskList").with_content(vec![blocked])]);

    assert_snapshot!(convert(&tree), @r###"
<!-- ADF-START
adfType="taskItem"
localId="t9"
state: "BLOCKED"
-->
- [ ] Blocked thing
<!-- ADF-END adfType="taskItem" localId="t9" -->
"###);
}

#[test]
fn test_decision_list() {
    let decision = |state: &str, text: &str| {
        AdfNode::new("decisionItem")
            .with_attrs(json!({ "state": state }))
            .with_content(vec![AdfNode::text(text)])
    };
    let tree = doc(vec![AdfNode::new("decisionList").with_content(vec![
        decision("DECIDED", "Use Rust"),
        decision("UNDECIDED", "Pick a name"),
    ])]);
    assert_eq!(convert(&tree), "- ✅ Use Rust\n- ❓ Pick a name");
}
