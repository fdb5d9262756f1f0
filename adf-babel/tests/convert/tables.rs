//! Tables: property tables, pipe tables, and cells Markdown cannot hold on one line.

use crate::common::*;
use adf_babel::AdfNode;
use comrak::nodes::NodeValue;
use comrak::Arena;
use serde_json::json;

fn cell(tag: &str, content: Vec<AdfNode>) -> AdfNode {
    AdfNode::new(tag).with_content(content)
}

fn header(text: &str) -> AdfNode {
    cell("tableHeader", vec![paragraph(text)])
}

fn data(text: &str) -> AdfNode {
    cell("tableCell", vec![paragraph(text)])
}

fn row(cells: Vec<AdfNode>) -> AdfNode {
    AdfNode::new("tableRow").with_content(cells)
}

fn table(rows: Vec<AdfNode>) -> AdfNode {
    AdfNode::new("table")
        .with_attrs(json!({"isNumberColumnEnabled": false, "layout": "default"}))
        .with_content(rows)
}

#[test]
fn test_property_table_becomes_key_value_lines() {
    let tree = doc(vec![table(vec![
        row(vec![header("Owner"), data("Platform team")]),
        row(vec![data("Active"), header("Status:")]),
    ])]);
    assert_eq!(convert(&tree), "**Owner:** Platform team\n**Status:** Active");
}

#[test]
fn test_pipe_table() {
    let tree = doc(vec![table(vec![
        row(vec![header("Name"), header("Role")]),
        row(vec![data("Ada"), data("Engineer")]),
        row(vec![data("Linus"), data("Kernel | maintainer")]),
    ])]);

    let markdown = convert(&tree);
    assert_eq!(
        markdown,
        "| Name | Role |\n| --- | --- |\n| Ada | Engineer |\n| Linus | Kernel \\| maintainer |"
    );

    let arena = Arena::new();
    let root = parse_markdown(&arena, &markdown);
    let tables = root
        .descendants()
        .filter(|node| matches!(node.data.borrow().value, NodeValue::Table(_)))
        .count();
    assert_eq!(tables, 1);
    let rows = root
        .descendants()
        .filter(|node| matches!(node.data.borrow().value, NodeValue::TableRow(_)))
        .count();
    assert_eq!(rows, 3);
}

#[test]
fn test_three_cell_rows_are_not_properties() {
    let tree = doc(vec![table(vec![
        row(vec![header("Key"), data("Value"), data("Extra")]),
        row(vec![header("Other"), data("Thing"), data("More")]),
    ])]);
    let markdown = convert(&tree);
    assert!(markdown.starts_with("| Key | Value | Extra |\n| --- | --- | --- |"));
    assert!(!markdown.contains("**Key:**"));
}

#[test]
fn test_list_cell_is_flattened_and_annotated() {
    let notes = cell(
        "tableCell",
        vec![bullet_list(vec![
            text_item("a"),
            item(vec![paragraph("b"), bullet_list(vec![text_item("c")])]),
        ])],
    );
    let tree = doc(vec![table(vec![
        row(vec![header("Step"), header("Notes")]),
        row(vec![data("1"), notes]),
    ])]);

    let markdown = convert(&tree);
    // Structural table attributes are kept once any cell is complex.
    assert!(markdown.starts_with("<!-- ADF-START\nadfType=\"table\""));
    assert!(markdown.contains("isNumberColumnEnabled: false\nlayout: \"default\"\n-->"));

    let row = markdown
        .lines()
        .find(|line| line.starts_with("| 1 |"))
        .expect("data row");
    assert!(row.starts_with("| 1 | <!-- ADF-START adfType=\"tableCell\""));
    assert!(row.contains("contentType: \"list\" -->- a<br>- b<br>-- c<!-- ADF-END adfType=\"tableCell\""));
    assert!(row.ends_with("--> |"));
    assert_balanced(&markdown);
}

#[test]
fn test_multi_paragraph_cell() {
    let tree = doc(vec![table(vec![
        row(vec![header("Topic"), header("Details")]),
        row(vec![
            data("Scope"),
            cell("tableCell", vec![paragraph("first"), paragraph("second")]),
        ]),
    ])]);
    let markdown = convert(&tree);
    assert!(markdown.contains("contentType: \"multiParagraph\" -->first<br>second<!-- ADF-END"));
}

#[test]
fn test_merged_cells_keep_their_span() {
    let wide = AdfNode::new("tableCell")
        .with_attrs(json!({"colspan": 2, "rowspan": 1}))
        .with_content(vec![paragraph("wide")]);
    let tree = doc(vec![table(vec![
        row(vec![header("A"), header("B")]),
        row(vec![wide]),
    ])]);
    let markdown = convert(&tree);
    assert!(markdown.contains("colspan: 2 rowspan: 1 -->wide<!-- ADF-END"));
    assert!(!markdown.starts_with("<!-- ADF-START"));
    assert_balanced(&markdown);
}
