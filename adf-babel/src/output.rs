//! Converter output types.
//!
//! Converters hand back a [`ConverterResult`] (markdown plus declarative hints
//! for the metadata policy). The engine turns that into a [`MarkdownBlock`]
//! and keeps the converted subtree as a [`RenderedNode`] so parents can pick
//! the rendering they need.

use crate::adf::NodeKind;
use crate::converters::lists::flatten_list_line;
use crate::metadata::annotation::{compact_comments, end_marker, END_MARKER};
use serde_json::Value;

/// The converted fragment for one node.
///
/// `yaml_block` is empty unless reversibility needs an annotation; when set it
/// holds the complete opening `ADF-START` comment.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarkdownBlock {
    pub yaml_block: String,
    pub markdown: String,
}

impl MarkdownBlock {
    pub fn plain(markdown: impl Into<String>) -> Self {
        MarkdownBlock {
            yaml_block: String::new(),
            markdown: markdown.into(),
        }
    }

    pub fn is_annotated(&self) -> bool {
        !self.yaml_block.is_empty()
    }
}

/// Hints a converter passes to the metadata policy. Never read by other converters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConversionHints {
    /// Content shape that Markdown indentation cannot fully express (e.g. a
    /// table cell holding a list).
    pub has_complex_content: bool,
    /// The converter knows it lost information.
    pub needs_yaml: bool,
    /// The node type whose Markdown syntax was used, when it differs from the node's own.
    pub original_type: Option<String>,
    /// Short description of the content shape, recorded with complex content.
    pub content_type: Option<String>,
    /// Additional annotation entries, appended after the node's attributes.
    pub extra: Vec<(String, Value)>,
}

impl ConversionHints {
    pub fn needs_yaml() -> Self {
        ConversionHints {
            needs_yaml: true,
            ..Default::default()
        }
    }

    pub fn rendered_as(original_type: impl Into<String>) -> Self {
        ConversionHints {
            original_type: Some(original_type.into()),
            ..Default::default()
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.push((key.into(), value));
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == ConversionHints::default()
    }
}

/// Preferred converter return shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConverterResult {
    pub markdown: String,
    pub context: Option<ConversionHints>,
}

impl ConverterResult {
    pub fn new(markdown: impl Into<String>) -> Self {
        ConverterResult {
            markdown: markdown.into(),
            context: None,
        }
    }

    pub fn with_hints(mut self, hints: ConversionHints) -> Self {
        self.context = if hints.is_empty() { None } else { Some(hints) };
        self
    }
}

/// What a converter produces.
#[derive(Debug, Clone, PartialEq)]
pub enum Converted {
    /// Markdown plus hints; the engine asks the policy whether to annotate.
    Result(ConverterResult),
    /// A finished block from a converter that writes its own annotation. Passed
    /// through untouched when its `yaml_block` already carries the start marker.
    Block(MarkdownBlock),
}

impl From<ConverterResult> for Converted {
    fn from(result: ConverterResult) -> Self {
        Converted::Result(result)
    }
}

impl From<String> for Converted {
    fn from(markdown: String) -> Self {
        Converted::Result(ConverterResult::new(markdown))
    }
}

impl From<&str> for Converted {
    fn from(markdown: &str) -> Self {
        Converted::Result(ConverterResult::new(markdown))
    }
}

/// A fully converted subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedNode {
    pub kind: NodeKind,
    pub block: MarkdownBlock,
    pub local_id: String,
    pub children: Vec<RenderedNode>,
}

impl RenderedNode {
    /// The fragment with its annotation wrapper, if any.
    pub fn to_markdown(&self) -> String {
        if !self.block.is_annotated() {
            return self.block.markdown.clone();
        }
        let end = end_marker(self.kind.tag(), &self.local_id);
        if self.block.markdown.is_empty() {
            format!("{}\n{end}", self.block.yaml_block)
        } else {
            format!("{}\n{}\n{end}", self.block.yaml_block, self.block.markdown)
        }
    }

    /// Rendering for inline positions (inside a paragraph or heading): the
    /// annotation comments are compacted onto single lines and glued to the
    /// markdown.
    pub fn to_inline(&self) -> String {
        if !self.block.is_annotated() {
            return self.block.markdown.clone();
        }
        let start = compact_comments(&self.block.yaml_block);
        let end = end_marker(self.kind.tag(), &self.local_id);
        format!("{start}{}{end}", self.block.markdown)
    }

    /// Rendering for pipe-table cells. See [`single_line`].
    pub fn to_cell(&self) -> String {
        single_line(&self.to_markdown())
    }

    /// Bare markdown without this node's own wrapper.
    pub fn markdown(&self) -> &str {
        &self.block.markdown
    }

    pub fn is_empty(&self) -> bool {
        self.block.markdown.is_empty() && !self.block.is_annotated()
    }
}

/// Folds a multi-line fragment onto one line.
///
/// Annotation comments are compacted and glued to the content they wrap,
/// blank lines are dropped, list lines become `-`/`--`/`---` depth markers and
/// the remaining lines are joined with `<br>`.
pub fn single_line(text: &str) -> String {
    let compacted = compact_comments(text);
    let mut parts: Vec<String> = Vec::new();
    let mut opening = String::new();
    for line in compacted.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with("<!--") && trimmed.ends_with("-->") {
            if trimmed.starts_with(END_MARKER) && opening.is_empty() {
                match parts.last_mut() {
                    Some(last) => last.push_str(trimmed),
                    None => parts.push(trimmed.to_string()),
                }
            } else {
                opening.push_str(trimmed);
            }
            continue;
        }
        let mut part = std::mem::take(&mut opening);
        part.push_str(&flatten_list_line(line));
        parts.push(part);
    }
    if !opening.is_empty() {
        parts.push(opening);
    }
    parts.join("<br>")
}

/// Concatenates inline children, compacting any annotations onto their line.
pub(crate) fn join_inline(children: &[RenderedNode]) -> String {
    children.iter().map(RenderedNode::to_inline).collect()
}

/// Joins rendered children with `separator`, skipping empty ones.
pub(crate) fn join_rendered(children: &[RenderedNode], separator: &str) -> String {
    children
        .iter()
        .filter(|child| !child.is_empty())
        .map(RenderedNode::to_markdown)
        .collect::<Vec<_>>()
        .join(separator)
}
