//! The closed set of ADF node types the converter knows about.
//!
//! Dispatch never looks at the raw `type` string past this point: every tag
//! maps to exactly one variant, and anything unrecognised lands in
//! [`NodeKind::Unsupported`] so that it can still be preserved.

use std::fmt;

/// Tagged variant for every supported ADF node type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Doc,
    Paragraph,
    Text,
    Heading,
    BulletList,
    OrderedList,
    ListItem,
    TaskList,
    TaskItem,
    DecisionList,
    DecisionItem,
    CodeBlock,
    Blockquote,
    Rule,
    HardBreak,
    Panel,
    Expand,
    NestedExpand,
    Table,
    TableRow,
    TableHeader,
    TableCell,
    Mention,
    Emoji,
    Status,
    Date,
    InlineCard,
    BlockCard,
    EmbedCard,
    MediaSingle,
    MediaGroup,
    MediaInline,
    Media,
    Extension,
    BodiedExtension,
    InlineExtension,
    LayoutSection,
    LayoutColumn,
    TableOfContents,
    Placeholder,
    /// Any tag without a dedicated converter; carries the original tag.
    Unsupported(String),
}

const KNOWN_TAGS: &[&str] = &[
    "doc",
    "paragraph",
    "text",
    "heading",
    "bulletList",
    "orderedList",
    "listItem",
    "taskList",
    "taskItem",
    "decisionList",
    "decisionItem",
    "codeBlock",
    "blockquote",
    "rule",
    "hardBreak",
    "panel",
    "expand",
    "nestedExpand",
    "table",
    "tableRow",
    "tableHeader",
    "tableCell",
    "mention",
    "emoji",
    "status",
    "date",
    "inlineCard",
    "blockCard",
    "embedCard",
    "mediaSingle",
    "mediaGroup",
    "mediaInline",
    "media",
    "extension",
    "bodiedExtension",
    "inlineExtension",
    "layoutSection",
    "layoutColumn",
    "tableOfContents",
    "placeholder",
];

impl NodeKind {
    /// Maps an ADF `type` tag to its variant. Total: unknown tags become `Unsupported`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "doc" => NodeKind::Doc,
            "paragraph" => NodeKind::Paragraph,
            "text" => NodeKind::Text,
            "heading" => NodeKind::Heading,
            "bulletList" => NodeKind::BulletList,
            "orderedList" => NodeKind::OrderedList,
            "listItem" => NodeKind::ListItem,
            "taskList" => NodeKind::TaskList,
            "taskItem" => NodeKind::TaskItem,
            "decisionList" => NodeKind::DecisionList,
            "decisionItem" => NodeKind::DecisionItem,
            "codeBlock" => NodeKind::CodeBlock,
            "blockquote" => NodeKind::Blockquote,
            "rule" => NodeKind::Rule,
            "hardBreak" => NodeKind::HardBreak,
            "panel" => NodeKind::Panel,
            "expand" => NodeKind::Expand,
            "nestedExpand" => NodeKind::NestedExpand,
            "table" => NodeKind::Table,
            "tableRow" => NodeKind::TableRow,
            "tableHeader" => NodeKind::TableHeader,
            "tableCell" => NodeKind::TableCell,
            "mention" => NodeKind::Mention,
            "emoji" => NodeKind::Emoji,
            "status" => NodeKind::Status,
            "date" => NodeKind::Date,
            "inlineCard" => NodeKind::InlineCard,
            "blockCard" => NodeKind::BlockCard,
            "embedCard" => NodeKind::EmbedCard,
            "mediaSingle" => NodeKind::MediaSingle,
            "mediaGroup" => NodeKind::MediaGroup,
            "mediaInline" => NodeKind::MediaInline,
            "media" => NodeKind::Media,
            "extension" => NodeKind::Extension,
            "bodiedExtension" => NodeKind::BodiedExtension,
            "inlineExtension" => NodeKind::InlineExtension,
            "layoutSection" => NodeKind::LayoutSection,
            "layoutColumn" => NodeKind::LayoutColumn,
            "tableOfContents" => NodeKind::TableOfContents,
            "placeholder" => NodeKind::Placeholder,
            other => NodeKind::Unsupported(other.to_string()),
        }
    }

    /// The ADF `type` tag for this variant.
    pub fn tag(&self) -> &str {
        match self {
            NodeKind::Doc => "doc",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Text => "text",
            NodeKind::Heading => "heading",
            NodeKind::BulletList => "bulletList",
            NodeKind::OrderedList => "orderedList",
            NodeKind::ListItem => "listItem",
            NodeKind::TaskList => "taskList",
            NodeKind::TaskItem => "taskItem",
            NodeKind::DecisionList => "decisionList",
            NodeKind::DecisionItem => "decisionItem",
            NodeKind::CodeBlock => "codeBlock",
            NodeKind::Blockquote => "blockquote",
            NodeKind::Rule => "rule",
            NodeKind::HardBreak => "hardBreak",
            NodeKind::Panel => "panel",
            NodeKind::Expand => "expand",
            NodeKind::NestedExpand => "nestedExpand",
            NodeKind::Table => "table",
            NodeKind::TableRow => "tableRow",
            NodeKind::TableHeader => "tableHeader",
            NodeKind::TableCell => "tableCell",
            NodeKind::Mention => "mention",
            NodeKind::Emoji => "emoji",
            NodeKind::Status => "status",
            NodeKind::Date => "date",
            NodeKind::InlineCard => "inlineCard",
            NodeKind::BlockCard => "blockCard",
            NodeKind::EmbedCard => "embedCard",
            NodeKind::MediaSingle => "mediaSingle",
            NodeKind::MediaGroup => "mediaGroup",
            NodeKind::MediaInline => "mediaInline",
            NodeKind::Media => "media",
            NodeKind::Extension => "extension",
            NodeKind::BodiedExtension => "bodiedExtension",
            NodeKind::InlineExtension => "inlineExtension",
            NodeKind::LayoutSection => "layoutSection",
            NodeKind::LayoutColumn => "layoutColumn",
            NodeKind::TableOfContents => "tableOfContents",
            NodeKind::Placeholder => "placeholder",
            NodeKind::Unsupported(tag) => tag,
        }
    }

    /// Every tag with a dedicated converter, in declaration order.
    pub fn known_tags() -> impl Iterator<Item = &'static str> {
        KNOWN_TAGS.iter().copied()
    }

    pub fn is_list(&self) -> bool {
        matches!(
            self,
            NodeKind::BulletList | NodeKind::OrderedList | NodeKind::TaskList | NodeKind::DecisionList
        )
    }

    pub fn is_list_item(&self) -> bool {
        matches!(
            self,
            NodeKind::ListItem | NodeKind::TaskItem | NodeKind::DecisionItem
        )
    }

    pub fn is_table_part(&self) -> bool {
        matches!(
            self,
            NodeKind::Table | NodeKind::TableRow | NodeKind::TableHeader | NodeKind::TableCell
        )
    }

    /// Nodes that live inside a paragraph-like parent.
    pub fn is_inline(&self) -> bool {
        matches!(
            self,
            NodeKind::Text
                | NodeKind::HardBreak
                | NodeKind::Mention
                | NodeKind::Emoji
                | NodeKind::Status
                | NodeKind::Date
                | NodeKind::InlineCard
                | NodeKind::MediaInline
                | NodeKind::InlineExtension
                | NodeKind::Placeholder
        )
    }

    /// Nodes whose display text depends on [`crate::common::links::LinkResolver`].
    pub fn needs_link_resolution(&self) -> bool {
        matches!(
            self,
            NodeKind::InlineCard | NodeKind::BlockCard | NodeKind::EmbedCard
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
