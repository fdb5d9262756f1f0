//! Table rendering.
//!
//! Key/value tables (see [`crate::common::property_table`]) become
//! `**Key:** Value` lines. Everything else is a pipe table whose cells are
//! folded onto one line: blocks joined with `<br>`, nested lists flattened to
//! `-`/`--` depth markers, annotations compacted.
//!
//! Cells holding more than one block, or any list, report their content shape
//! so that the annotation records what the single-line form cannot.

use super::NodeInput;
use crate::adf::AdfNode;
use crate::common::property_table::{header_position, is_property_table};
use crate::output::{ConversionHints, Converted, ConverterResult, RenderedNode};

/// Shape of a cell's block content, when it is more than a single paragraph.
pub fn content_shape(cell: &AdfNode) -> Option<&'static str> {
    let blocks = cell.children();
    let lists = blocks.iter().filter(|block| block.kind().is_list()).count();
    match lists {
        0 if blocks.len() > 1 => Some("multiParagraph"),
        0 => None,
        n if n == blocks.len() => Some("list"),
        _ => Some("mixed"),
    }
}

fn cell_markdown(cell: &RenderedNode) -> String {
    cell.to_cell().replace('|', "\\|")
}

pub fn table(input: &NodeInput) -> Converted {
    let complex = input
        .node
        .children()
        .iter()
        .flat_map(AdfNode::children)
        .any(|cell| content_shape(cell).is_some());

    let markdown = if is_property_table(input.node) {
        property_lines(input)
    } else {
        pipe_table(input)
    };

    let result = ConverterResult::new(markdown);
    if complex {
        result
            .with_hints(ConversionHints {
                has_complex_content: true,
                ..Default::default()
            })
            .into()
    } else {
        result.into()
    }
}

fn property_lines(input: &NodeInput) -> String {
    input
        .node
        .children()
        .iter()
        .zip(input.children)
        .filter_map(|(row, rendered)| {
            let key_at = header_position(row)?;
            let key = rendered.children.get(key_at)?.to_cell();
            let value = rendered.children.get(1 - key_at)?.to_cell();
            let key = key.trim().trim_end_matches(':');
            Some(format!("**{key}:** {value}"))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Rows in order. The separator follows the first row only when all of its
/// cells have content, since an empty header cell means there is no header.
fn pipe_table(input: &NodeInput) -> String {
    let mut lines = Vec::new();
    for (index, row) in input
        .children
        .iter()
        .filter(|row| !row.is_empty())
        .enumerate()
    {
        lines.push(row.to_markdown());
        if index == 0 {
            let has_header = !row.children.is_empty()
                && row
                    .children
                    .iter()
                    .all(|cell| !cell_markdown(cell).trim().is_empty());
            if has_header {
                lines.push(separator(row.children.len()));
            }
        }
    }
    lines.join("\n")
}

fn separator(columns: usize) -> String {
    format!("|{}", " --- |".repeat(columns))
}

pub fn table_row(input: &NodeInput) -> Converted {
    let cells: Vec<String> = input.children.iter().map(cell_markdown).collect();
    if cells.is_empty() {
        return "".into();
    }
    format!("| {} |", cells.join(" | ")).into()
}

pub fn table_cell(input: &NodeInput) -> Converted {
    let result = ConverterResult::new(input.block_children("\n"));
    match content_shape(input.node) {
        Some(shape) => result
            .with_hints(ConversionHints {
                has_complex_content: true,
                content_type: Some(shape.to_string()),
                ..Default::default()
            })
            .into(),
        None => result.into(),
    }
}
