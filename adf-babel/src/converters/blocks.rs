//! Block converters: document root, paragraphs, headings, code, quotes,
//! panels, expands and layouts.

use super::inline::marks_result;
use super::{fenced, indent_lines, NodeInput};
use crate::adf::NodeKind;
use crate::common::mermaid::is_mermaid;
use crate::output::{ConversionHints, Converted, ConverterResult};
use serde_json::Value;

/// Document children, separated by blank lines.
pub fn doc(input: &NodeInput) -> Converted {
    input.block_children("\n\n").into()
}

/// Inline children concatenated. Block marks (alignment, indentation) have no
/// Markdown spelling and go to the annotation.
pub fn paragraph(input: &NodeInput) -> Converted {
    marks_result(input.inline_children(), block_marks(input))
}

fn block_marks(input: &NodeInput) -> Vec<Value> {
    input.node.marks().iter().map(|mark| mark.to_value()).collect()
}

/// `#` repeated by `attrs.level`, clamped to 1..=6. An ATX heading is one
/// line, so hard breaks become spaces.
pub fn heading(input: &NodeInput) -> Converted {
    let level = input.node.attr_i64("level").unwrap_or(1).clamp(1, 6) as usize;
    let text = input
        .children
        .iter()
        .map(|child| match child.kind {
            NodeKind::HardBreak => " ".to_string(),
            _ => child.to_inline(),
        })
        .collect::<String>()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let hashes = "#".repeat(level);
    let markdown = if text.trim().is_empty() {
        hashes
    } else {
        format!("{hashes} {}", text.trim())
    };
    marks_result(markdown, block_marks(input))
}

/// Fenced code. Untagged code that looks like Mermaid is tagged `mermaid`, and
/// the guess is recorded so the language is not invented on the way back.
pub fn code_block(input: &NodeInput) -> Converted {
    let body = input
        .node
        .children()
        .iter()
        .filter_map(|child| child.text.as_deref())
        .collect::<Vec<_>>()
        .join("\n");

    match input.node.attr_str("language") {
        Some(language) => fenced(language, &body).into(),
        None if is_mermaid(&body) => ConverterResult::new(fenced("mermaid", &body))
            .with_hints(ConversionHints::needs_yaml().with_extra("inferredLanguage", Value::from("mermaid")))
            .into(),
        None => fenced("", &body).into(),
    }
}

pub fn blockquote(input: &NodeInput) -> Converted {
    quote(&input.block_children("\n\n")).into()
}

fn quote(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                ">".to_string()
            } else {
                format!("> {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn rule(_input: &NodeInput) -> Converted {
    "---".into()
}

/// `!!! <keyword> "<title>"` admonition with a 4-space indented body.
///
/// The first child is the title when it is a single-line paragraph or
/// heading; the rest is body. Panel types missing from the keyword map use
/// the fallback keyword and need an annotation.
pub fn panel(input: &NodeInput) -> Converted {
    let (keyword, mapped) = input.options.panel_keyword(input.node.attr_str("panelType"));

    let mut children = input.children.iter().filter(|child| !child.is_empty());
    let first = children.clone().next();
    let title = first.and_then(|child| {
        let text = child.to_markdown();
        let titled = matches!(child.kind, NodeKind::Paragraph | NodeKind::Heading)
            && !child.block.is_annotated()
            && !text.contains('\n');
        let text = if child.kind == NodeKind::Heading {
            text.trim_start_matches('#')
        } else {
            text.as_str()
        };
        titled.then(|| text.trim().to_string())
    });
    if title.is_some() {
        children.next();
    }
    let body = children
        .map(|child| child.to_markdown())
        .collect::<Vec<_>>()
        .join("\n\n");

    let markdown = admonition(keyword, title.as_deref(), &body);
    if mapped {
        markdown.into()
    } else {
        ConverterResult::new(markdown)
            .with_hints(ConversionHints::needs_yaml())
            .into()
    }
}

pub(crate) fn admonition(keyword: &str, title: Option<&str>, body: &str) -> String {
    let mut out = format!("!!! {keyword}");
    if let Some(title) = title.filter(|title| !title.is_empty()) {
        out.push_str(&format!(" \"{}\"", title.replace('"', "\\\"")));
    }
    if !body.trim().is_empty() {
        out.push('\n');
        out.push_str(&indent_lines(body, "    "));
    }
    out
}

/// Blockquote with the bolded title on its first line.
pub fn expand(input: &NodeInput) -> Converted {
    expand_markdown(input).into()
}

/// Same rendering as `expand`; the annotation records the nested variant.
pub fn nested_expand(input: &NodeInput) -> Converted {
    ConverterResult::new(expand_markdown(input))
        .with_hints(ConversionHints::rendered_as("expand"))
        .into()
}

fn expand_markdown(input: &NodeInput) -> String {
    let title = input.node.attr_str("title").unwrap_or("Details");
    let body = input.block_children("\n\n");
    let mut out = format!("> **{title}**");
    if !body.trim().is_empty() {
        out.push_str("\n>\n");
        out.push_str(&quote(&body));
    }
    out
}

pub fn layout(input: &NodeInput) -> Converted {
    input.block_children("\n\n").into()
}
