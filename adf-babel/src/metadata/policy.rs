//! The reversibility policy: which nodes need an annotation, and what goes in it.
//!
//! Decision rules, in priority order:
//!
//! 1. Types whose information Markdown cannot carry at all always annotate
//!    (extensions, cards, unimplemented nodes, table of contents).
//! 2. A converter that rendered the node with another type's syntax
//!    (`original_type` differs from the node type) forces an annotation.
//! 3. A converter that reports `needs_yaml` forces an annotation.
//! 4. Otherwise the [`CriticalAttributes`] table decides: `All` annotates when
//!    any attribute is present, `Only(list)` annotates when a listed attribute
//!    carries a non-default value.
//! 5. Table parts with complex content annotate when they carry a structural
//!    attribute (defaults included) or report a content type.
//!
//! `type`, `localId` and the attribute that supplied the marker id never
//! appear in the body; they travel in the START/END markers.

use super::annotation::{start_block, LocalId, LocalIdSource};
use crate::adf::NodeKind;
use crate::output::ConversionHints;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Types that always carry an annotation.
pub const ALWAYS_ANNOTATE: &[&str] = &[
    "extension",
    "bodiedExtension",
    "inlineExtension",
    "inlineCard",
    "blockCard",
    "embedCard",
    "tableOfContents",
];

static EVERY_ATTRIBUTE: AttributeRule = AttributeRule::All;

/// Which attributes of a type cannot be recovered from its Markdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeRule {
    /// Every attribute is critical.
    All,
    /// Only the listed attributes are critical.
    Only(Vec<String>),
}

impl AttributeRule {
    pub fn only(names: &[&str]) -> Self {
        AttributeRule::Only(names.iter().map(|name| name.to_string()).collect())
    }

    fn allows(&self, key: &str) -> bool {
        match self {
            AttributeRule::All => true,
            AttributeRule::Only(names) => names.iter().any(|name| name == key),
        }
    }
}

/// Per-type critical attribute table. Immutable once handed to a converter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriticalAttributes {
    rules: BTreeMap<String, AttributeRule>,
}

impl CriticalAttributes {
    pub fn empty() -> Self {
        CriticalAttributes {
            rules: BTreeMap::new(),
        }
    }

    /// The built-in table.
    pub fn standard() -> Self {
        let mut table = Self::empty();
        for tag in [
            "doc",
            "paragraph",
            "text",
            "heading",
            "bulletList",
            "listItem",
            "taskList",
            "decisionList",
            "codeBlock",
            "blockquote",
            "rule",
            "hardBreak",
            "expand",
            "nestedExpand",
            "tableRow",
            "mediaGroup",
            "layoutSection",
        ] {
            table.set(tag, AttributeRule::only(&[]));
        }
        table.set("orderedList", AttributeRule::only(&["order"]));
        table.set("taskItem", AttributeRule::only(&["state"]));
        table.set("decisionItem", AttributeRule::only(&["state"]));
        table.set(
            "panel",
            AttributeRule::only(&[
                "panelType",
                "panelIcon",
                "panelIconId",
                "panelIconText",
                "panelColor",
            ]),
        );
        table.set(
            "table",
            AttributeRule::only(&["layout", "isNumberColumnEnabled", "width", "displayMode"]),
        );
        for cell in ["tableCell", "tableHeader"] {
            table.set(
                cell,
                AttributeRule::only(&["colspan", "rowspan", "colwidth", "background"]),
            );
        }
        table.set(
            "mention",
            AttributeRule::only(&["id", "text", "accessLevel", "userType"]),
        );
        table.set("emoji", AttributeRule::only(&["shortName", "id", "text"]));
        table.set("status", AttributeRule::only(&["text", "color", "style"]));
        table.set("date", AttributeRule::only(&["timestamp"]));
        table.set(
            "mediaSingle",
            AttributeRule::only(&["layout", "width", "widthType"]),
        );
        table.set("layoutColumn", AttributeRule::only(&["width"]));
        for tag in [
            "media",
            "mediaInline",
            "placeholder",
            "extension",
            "bodiedExtension",
            "inlineExtension",
            "inlineCard",
            "blockCard",
            "embedCard",
            "tableOfContents",
        ] {
            table.set(tag, AttributeRule::All);
        }
        table
    }

    pub fn set(&mut self, tag: &str, rule: AttributeRule) {
        self.rules.insert(tag.to_string(), rule);
    }

    /// Rule for a type. Unknown types treat every attribute as critical.
    pub fn rule(&self, tag: &str) -> &AttributeRule {
        self.rules.get(tag).unwrap_or(&EVERY_ATTRIBUTE)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeRule)> {
        self.rules.iter().map(|(tag, rule)| (tag.as_str(), rule))
    }
}

impl Default for CriticalAttributes {
    fn default() -> Self {
        Self::standard()
    }
}

/// Values that the Markdown rendering already implies.
fn is_default_value(tag: &str, key: &str, value: &Value) -> bool {
    match (tag, key) {
        ("orderedList", "order") => as_integer(value) == Some(1),
        ("taskItem", "state") => matches!(value.as_str(), Some("TODO") | Some("DONE")),
        ("decisionItem", "state") => {
            matches!(value.as_str(), Some("DECIDED") | Some("UNDECIDED"))
        }
        ("panel", "panelType") => matches!(
            value.as_str(),
            Some("info" | "note" | "warning" | "error" | "success" | "tip")
        ),
        ("table", "layout") => value.as_str() == Some("default"),
        ("table", "isNumberColumnEnabled") => value == &Value::Bool(false),
        ("tableCell" | "tableHeader", "colspan" | "rowspan") => as_integer(value) == Some(1),
        ("mediaSingle", "layout") => value.as_str() == Some("center"),
        _ => false,
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(raw) => raw.trim().parse().ok(),
        _ => None,
    }
}

/// Keys that never appear in an annotation body.
fn is_identity_key(key: &str) -> bool {
    key == "type" || key == "localId"
}

/// Centralised annotate/serialize decisions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MetadataPolicy {
    critical: CriticalAttributes,
}

impl MetadataPolicy {
    pub fn new(critical: CriticalAttributes) -> Self {
        MetadataPolicy { critical }
    }

    pub fn critical_attributes(&self) -> &CriticalAttributes {
        &self.critical
    }

    pub fn always_annotates(kind: &NodeKind) -> bool {
        matches!(kind, NodeKind::Unsupported(_))
            || ALWAYS_ANNOTATE.iter().any(|tag| *tag == kind.tag())
    }

    pub fn should_annotate(
        &self,
        kind: &NodeKind,
        attrs: Option<&Map<String, Value>>,
        hints: Option<&ConversionHints>,
    ) -> bool {
        if Self::always_annotates(kind) {
            return true;
        }

        if let Some(hints) = hints {
            if hints
                .original_type
                .as_deref()
                .is_some_and(|original| original != kind.tag())
            {
                return true;
            }
            if hints.needs_yaml {
                return true;
            }
        }

        let tag = kind.tag();
        let present = attrs
            .into_iter()
            .flat_map(|attrs| attrs.iter())
            .filter(|(key, value)| !is_identity_key(key) && !value.is_null());

        let critical = match self.critical.rule(tag) {
            AttributeRule::All => present.count() > 0,
            AttributeRule::Only(names) => {
                let mut critical = false;
                let mut structural = false;
                for (key, value) in present {
                    if names.iter().any(|name| name == key) {
                        structural = true;
                        if !is_default_value(tag, key, value) {
                            critical = true;
                        }
                    }
                }
                critical || (structural && hints.is_some_and(|h| h.has_complex_content))
            }
        };
        if critical {
            return true;
        }

        kind.is_table_part()
            && hints.is_some_and(|h| h.has_complex_content && h.content_type.is_some())
    }

    /// Renders the opening annotation comment for a node.
    pub fn render_annotation(
        &self,
        kind: &NodeKind,
        local_id: &LocalId,
        attrs: Option<&Map<String, Value>>,
        hints: Option<&ConversionHints>,
    ) -> String {
        let rule = self.critical.rule(kind.tag());
        let mut body: Vec<(String, Value)> = attrs
            .into_iter()
            .flat_map(|attrs| attrs.iter())
            .filter(|(key, value)| {
                !is_identity_key(key)
                    && !(key.as_str() == "id" && local_id.source == LocalIdSource::Id)
                    && !value.is_null()
                    && rule.allows(key)
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        if let Some(hints) = hints {
            if hints.has_complex_content {
                if let Some(content_type) = &hints.content_type {
                    body.push(("contentType".to_string(), Value::from(content_type.as_str())));
                }
            }
            if let Some(original) = &hints.original_type {
                if original != kind.tag() {
                    body.push(("originalType".to_string(), Value::from(original.as_str())));
                }
            }
            body.extend(hints.extra.iter().cloned());
        }

        start_block(kind.tag(), &local_id.value, &body)
    }
}
