//! Macro (extension) rendering.
//!
//! Extensions always carry their full attributes in the annotation, so the
//! Markdown only has to be readable. The renderer is picked by the first rule
//! whose predicate accepts the lower-cased `extensionKey`; the last rule
//! accepts everything.

use super::blocks::admonition;
use super::toc::{render_toc, TocParams};
use super::{fenced, NodeInput};
use crate::output::{ConversionHints, Converted, ConverterResult};
use serde_json::Value;
use tracing::debug;

pub const PRESERVED_PLACEHOLDER: &str = "⚙️ Extension preserved in metadata";

/// One dispatch rule: a name for logs and tests, a predicate on the
/// lower-cased extension key, and the renderer.
pub struct ExtensionRule {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
    pub render: fn(&NodeInput) -> Converted,
}

/// Dispatch order. Earlier rules win.
pub const EXTENSION_RULES: &[ExtensionRule] = &[
    ExtensionRule {
        name: "toc",
        matches: |key| key.contains("toc"),
        render: toc,
    },
    ExtensionRule {
        name: "mermaid",
        matches: |key| key.contains("mermaid"),
        render: mermaid,
    },
    ExtensionRule {
        name: "math",
        matches: |key| key.contains("math") || key.contains("latex"),
        render: math,
    },
    ExtensionRule {
        name: "jira",
        matches: |key| key.contains("jira"),
        render: jira,
    },
    ExtensionRule {
        name: "children",
        matches: |key| key.contains("children"),
        render: children,
    },
    ExtensionRule {
        name: "attachments",
        matches: |key| key.contains("attachments"),
        render: attachments,
    },
    ExtensionRule {
        name: "admonition",
        matches: |key| ["info", "note", "tip", "warning"].iter().any(|name| key.contains(name)),
        render: admonition_macro,
    },
    ExtensionRule {
        name: "code",
        matches: |key| key.contains("code"),
        render: code,
    },
    ExtensionRule {
        name: "include",
        matches: |key| key.contains("include") || key.contains("excerpt"),
        render: include,
    },
    ExtensionRule {
        name: "layout",
        matches: |key| key.contains("layout") || key.contains("column"),
        render: body_only,
    },
    ExtensionRule {
        name: "fallback",
        matches: |_| true,
        render: preserved,
    },
];

/// The rule an extension key dispatches to.
pub fn rule_for(extension_key: &str) -> &'static ExtensionRule {
    let key = extension_key.to_lowercase();
    let last = &EXTENSION_RULES[EXTENSION_RULES.len() - 1];
    EXTENSION_RULES
        .iter()
        .find(|rule| (rule.matches)(&key))
        .unwrap_or(last)
}

pub fn extension(input: &NodeInput) -> Converted {
    let key = input.node.attr_str("extensionKey").unwrap_or_default();
    let rule = rule_for(key);
    debug!(extension_key = key, rule = rule.name, "extension dispatch");
    (rule.render)(input)
}

/// `attrs.parameters.macroParams.<name>.value` as text.
fn macro_param(input: &NodeInput, name: &str) -> Option<String> {
    let value = input
        .node
        .attr("parameters")?
        .get("macroParams")?
        .get(name)?
        .get("value")?;
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

/// Source text of a code-like macro: the body's text, else a parameter, else `attrs.text`.
fn source_text(input: &NodeInput) -> String {
    let body = input.node.plain_text();
    if !body.trim().is_empty() {
        return body;
    }
    ["code", "content", "body", "data"]
        .iter()
        .find_map(|name| macro_param(input, name))
        .or_else(|| input.node.attr_str("text").map(str::to_string))
        .unwrap_or_default()
}

fn body(input: &NodeInput) -> String {
    input.block_children("\n\n")
}

fn toc(input: &NodeInput) -> Converted {
    let params = TocParams::from_attrs(input.attrs(), input.options);
    render_toc(&params, input.document, input.options).into()
}

fn mermaid(input: &NodeInput) -> Converted {
    fenced("mermaid", &source_text(input)).into()
}

/// A ```` ```math ```` fence, recorded as rendered with code block syntax.
fn math(input: &NodeInput) -> Converted {
    ConverterResult::new(fenced("math", &source_text(input)))
        .with_hints(ConversionHints::rendered_as("codeBlock"))
        .into()
}

fn jira(input: &NodeInput) -> Converted {
    if let Some(key) = macro_param(input, "key") {
        return format!("🎫 Jira issue {key}").into();
    }
    if let Some(jql) = macro_param(input, "jqlQuery") {
        return format!("🎫 Jira issues: `{jql}`").into();
    }
    "🎫 Jira issues".into()
}

fn children(_input: &NodeInput) -> Converted {
    "📄 *Child pages are listed here*".into()
}

fn attachments(_input: &NodeInput) -> Converted {
    "📎 *Attachments are listed here*".into()
}

fn admonition_macro(input: &NodeInput) -> Converted {
    let key = input
        .node
        .attr_str("extensionKey")
        .unwrap_or_default()
        .to_lowercase();
    let panel_type = ["info", "note", "tip", "warning"]
        .into_iter()
        .find(|name| key.contains(name));
    let (keyword, _) = input.options.panel_keyword(panel_type);
    let title = macro_param(input, "title");
    admonition(keyword, title.as_deref(), &body(input)).into()
}

fn code(input: &NodeInput) -> Converted {
    let language = macro_param(input, "language").unwrap_or_default();
    fenced(&language, &source_text(input)).into()
}

fn include(input: &NodeInput) -> Converted {
    let body = body(input);
    if !body.trim().is_empty() {
        return body.into();
    }
    match macro_param(input, "").or_else(|| macro_param(input, "page")) {
        Some(page) => format!("📎 *Included content from {page}*").into(),
        None => "📎 *Included content*".into(),
    }
}

fn body_only(input: &NodeInput) -> Converted {
    body(input).into()
}

fn preserved(input: &NodeInput) -> Converted {
    let body = body(input);
    if body.trim().is_empty() {
        PRESERVED_PLACEHOLDER.into()
    } else {
        format!("{PRESERVED_PLACEHOLDER}\n\n{body}").into()
    }
}
