//! Per-type converters.
//!
//! Every supported [`NodeKind`] maps to one plain function taking a
//! [`NodeInput`] and returning a [`Converted`]. Converters see their node, the
//! already converted children and a few bits of shared context; they never
//! decide about annotations themselves; they report hints and the
//! [`crate::metadata::MetadataPolicy`] decides.
//!
//!     blocks      doc, paragraph, heading, code, quotes, panels, expands, layouts
//!     inline      text and marks, mentions, emoji, status, dates, breaks
//!     lists       bullet/ordered/task/decision lists and their items
//!     table       property tables and pipe tables
//!     toc         table of contents
//!     extension   macro dispatch table
//!     media       images and attachments
//!     cards       smart links
//!     fallback    nodes without a converter

pub mod blocks;
pub mod cards;
pub mod extension;
pub mod fallback;
pub mod inline;
pub mod lists;
pub mod media;
pub mod table;
pub mod toc;

use crate::adf::{AdfNode, DocumentContext, NodeKind};
use crate::common::links::ResolvedLink;
use crate::metadata::LocalId;
use crate::options::ConvertOptions;
use crate::output::{join_inline, join_rendered, Converted, RenderedNode};
use serde_json::{Map, Value};

/// Signature shared by every converter.
pub type Converter = fn(&NodeInput) -> Converted;

/// Everything a converter may look at.
#[derive(Debug, Clone, Copy)]
pub struct NodeInput<'a> {
    pub node: &'a AdfNode,
    pub kind: &'a NodeKind,
    /// Converted children, in document order.
    pub children: &'a [RenderedNode],
    /// List nesting depth.
    pub level: usize,
    pub options: &'a ConvertOptions,
    /// Present when the conversion started at a `doc` root.
    pub document: Option<&'a DocumentContext<'a>>,
    pub local_id: &'a LocalId,
    /// Pre-resolved link, for card kinds.
    pub link: Option<&'a ResolvedLink>,
}

impl<'a> NodeInput<'a> {
    pub fn attrs(&self) -> Option<&'a Map<String, Value>> {
        self.node.attrs.as_ref()
    }

    /// Children joined as blocks, skipping empty ones.
    pub fn block_children(&self, separator: &str) -> String {
        join_rendered(self.children, separator)
    }

    /// Children concatenated inline.
    pub fn inline_children(&self) -> String {
        join_inline(self.children)
    }

    /// Inline concatenation when every child is inline, else newline-joined blocks.
    pub fn mixed_children(&self) -> String {
        if self.children.iter().all(|child| child.kind.is_inline()) {
            self.inline_children()
        } else {
            self.block_children("\n")
        }
    }
}

/// The converter for a node kind. Total: unsupported kinds get the fallback.
pub fn converter_for(kind: &NodeKind) -> Converter {
    match kind {
        NodeKind::Doc => blocks::doc,
        NodeKind::Paragraph => blocks::paragraph,
        NodeKind::Text => inline::text,
        NodeKind::Heading => blocks::heading,
        NodeKind::BulletList => lists::bullet_list,
        NodeKind::OrderedList => lists::ordered_list,
        NodeKind::ListItem => lists::list_item,
        NodeKind::TaskList => lists::task_list,
        NodeKind::TaskItem => lists::task_item,
        NodeKind::DecisionList => lists::decision_list,
        NodeKind::DecisionItem => lists::decision_item,
        NodeKind::CodeBlock => blocks::code_block,
        NodeKind::Blockquote => blocks::blockquote,
        NodeKind::Rule => blocks::rule,
        NodeKind::HardBreak => inline::hard_break,
        NodeKind::Panel => blocks::panel,
        NodeKind::Expand => blocks::expand,
        NodeKind::NestedExpand => blocks::nested_expand,
        NodeKind::Table => table::table,
        NodeKind::TableRow => table::table_row,
        NodeKind::TableHeader | NodeKind::TableCell => table::table_cell,
        NodeKind::Mention => inline::mention,
        NodeKind::Emoji => inline::emoji,
        NodeKind::Status => inline::status,
        NodeKind::Date => inline::date,
        NodeKind::InlineCard => cards::inline_card,
        NodeKind::BlockCard | NodeKind::EmbedCard => cards::block_card,
        NodeKind::MediaSingle | NodeKind::MediaGroup => media::media_container,
        NodeKind::MediaInline | NodeKind::Media => media::media,
        NodeKind::Extension | NodeKind::BodiedExtension | NodeKind::InlineExtension => {
            extension::extension
        }
        NodeKind::LayoutSection | NodeKind::LayoutColumn => blocks::layout,
        NodeKind::TableOfContents => toc::table_of_contents,
        NodeKind::Placeholder => inline::placeholder,
        NodeKind::Unsupported(_) => fallback::not_implemented,
    }
}

pub fn convert(input: &NodeInput) -> Converted {
    converter_for(input.kind)(input)
}

/// Longest run of `ch` in `text`.
pub(crate) fn longest_run(text: &str, ch: char) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in text.chars() {
        if c == ch {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

/// Markdown code fence for `body`, long enough to survive backticks inside it.
pub(crate) fn fenced(language: &str, body: &str) -> String {
    let fence = "`".repeat(longest_run(body, '`').max(2) + 1);
    format!("{fence}{language}\n{body}\n{fence}")
}

/// Prefixes every non-blank line of `text` with `indent`.
pub(crate) fn indent_lines(text: &str, indent: &str) -> String {
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{indent}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
