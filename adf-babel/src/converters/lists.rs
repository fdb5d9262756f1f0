//! List rendering.
//!
//! Lists are rendered with absolute indentation: a list at nesting `level`
//! indents its items by `level` units (2 spaces for bullets, 3 for numbers).
//! An item's first line gets the bullet or number; its continuation lines are
//! moved under the first line's text, except the lines of nested lists, which
//! already carry the indentation of their own level.
//!
//! Bullets alternate `-` and `*` by depth so adjacent levels stay distinct.

use super::NodeInput;
use crate::adf::NodeKind;
use crate::metadata::annotation::end_marker;
use crate::output::{Converted, RenderedNode};
use once_cell::sync::Lazy;
use regex::Regex;

const BULLET_UNIT: usize = 2;
const ORDERED_UNIT: usize = 3;

static LIST_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)([-*]|\d+\.)(?:\s+(.*))?$").unwrap());

/// Whether `line` opens a list item (`-`, `*` or `1.`), at any indentation.
pub fn is_list_line(line: &str) -> bool {
    LIST_LINE.is_match(line)
}

/// A list line as a `-`/`--`/`---` depth marker, for single-line contexts.
/// Other lines are returned trimmed.
pub fn flatten_list_line(line: &str) -> String {
    let Some(captures) = LIST_LINE.captures(line) else {
        return line.trim().to_string();
    };
    let indent = captures.get(1).map_or(0, |m| m.as_str().len());
    let unit = if captures[2].starts_with(|c: char| c.is_ascii_digit()) {
        ORDERED_UNIT
    } else {
        BULLET_UNIT
    };
    let depth = indent / unit + 1;
    let rest = captures.get(3).map_or("", |m| m.as_str().trim());
    if rest.is_empty() {
        "-".repeat(depth)
    } else {
        format!("{} {rest}", "-".repeat(depth))
    }
}

fn bullet(level: usize) -> &'static str {
    if level % 2 == 0 {
        "-"
    } else {
        "*"
    }
}

pub fn bullet_list(input: &NodeInput) -> Converted {
    let glyph = bullet(input.level);
    render_items(input, BULLET_UNIT, |_| format!("{glyph} ")).into()
}

/// Numbered from `attrs.order`; missing, non-numeric or negative orders start at 1.
pub fn ordered_list(input: &NodeInput) -> Converted {
    let start = input
        .node
        .attr_i64("order")
        .filter(|order| *order >= 0)
        .unwrap_or(1);
    render_items(input, ORDERED_UNIT, |index| {
        format!("{}. ", start.saturating_add(index as i64))
    })
    .into()
}

pub fn task_list(input: &NodeInput) -> Converted {
    bullet_list(input)
}

pub fn decision_list(input: &NodeInput) -> Converted {
    bullet_list(input)
}

pub fn list_item(input: &NodeInput) -> Converted {
    input.block_children("\n").into()
}

pub fn task_item(input: &NodeInput) -> Converted {
    let checkbox = match input.node.attr_str("state") {
        Some("DONE") => "[x]",
        _ => "[ ]",
    };
    format!("{checkbox} {}", input.mixed_children()).into()
}

pub fn decision_item(input: &NodeInput) -> Converted {
    let glyph = match input.node.attr_str("state") {
        Some("DECIDED") => "✅",
        _ => "❓",
    };
    format!("{glyph} {}", input.mixed_children()).into()
}

/// Lays out list items. `marker` gets the zero-based index among items.
fn render_items(input: &NodeInput, unit: usize, mut marker: impl FnMut(usize) -> String) -> String {
    let base = " ".repeat(input.level * unit);
    let mut lines: Vec<String> = Vec::new();
    let mut index = 0;

    for child in input.children.iter().filter(|child| !child.is_empty()) {
        if !child.kind.is_list_item() {
            // Sibling lists (nested task lists) and stray blocks keep their own layout.
            lines.push(child.to_markdown());
            continue;
        }

        let prefix = format!("{base}{}", marker(index));
        index += 1;

        if child.block.is_annotated() {
            lines.extend(child.block.yaml_block.lines().map(|line| format!("{base}{line}")));
        }
        lines.push(item_lines(child, &prefix));
        if child.block.is_annotated() {
            lines.push(format!("{base}{}", end_marker(child.kind.tag(), &child.local_id)));
        }
    }

    lines.join("\n")
}

/// Lines of one item under `prefix`. A list item's block children are laid
/// out one by one: nested lists already carry their absolute indentation and
/// keep it, every other block moves under the first line's text.
fn item_lines(item: &RenderedNode, prefix: &str) -> String {
    let indent = " ".repeat(prefix.chars().count());
    let blocks: Vec<(bool, String)> = if item.kind == NodeKind::ListItem {
        item.children
            .iter()
            .filter(|child| !child.is_empty())
            .map(|child| (child.kind.is_list(), child.to_markdown()))
            .collect()
    } else {
        vec![(false, item.markdown().to_string())]
    };

    let mut out: Vec<String> = Vec::new();
    for (nested_list, text) in &blocks {
        for line in text.lines() {
            if out.is_empty() {
                if !nested_list {
                    out.push(format!("{prefix}{line}"));
                    continue;
                }
                out.push(prefix.trim_end().to_string());
            }
            if line.trim().is_empty() {
                out.push(String::new());
            } else if *nested_list && (is_list_line(line) || leading_spaces(line) >= indent.len()) {
                out.push(line.to_string());
            } else {
                out.push(format!("{indent}{line}"));
            }
        }
    }
    if out.is_empty() {
        out.push(prefix.trim_end().to_string());
    }

    out.join("\n")
}

fn leading_spaces(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}
