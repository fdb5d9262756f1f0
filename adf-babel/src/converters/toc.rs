//! Table of contents.
//!
//! A filtering pipeline over the document's headings:
//!
//!     parameters  read from the macro parameters or plain attributes
//!     select      headings within [minLevel, maxLevel], include/exclude filters
//!     number      outline numbering from a per-level counter
//!     render      nested list or separator-joined flat line of links
//!
//! Used both by `tableOfContents` nodes and by `toc` macros.

use super::NodeInput;
use crate::adf::DocumentContext;
use crate::common::slug::slugify;
use crate::options::ConvertOptions;
use crate::output::Converted;
use regex::{Regex, RegexBuilder};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::warn;

pub const NO_HEADINGS: &str = "*No headings found*";
pub const NO_CONTEXT: &str =
    "*Table of contents: headings are listed when the whole document is converted*";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TocType {
    List,
    Flat,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TocParams {
    pub toc_type: TocType,
    pub outline: bool,
    /// Bullet for list entries; `None` for style `none`.
    pub bullet: Option<String>,
    pub min_level: u8,
    pub max_level: u8,
    pub include: Option<String>,
    pub exclude: Option<String>,
    pub separator: Separator,
    pub printable: bool,
    pub absolute_url: bool,
}

/// How flat entries are joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Separator {
    Brackets,
    Braces,
    Parens,
    Pipe,
    Literal(String),
}

impl Separator {
    fn parse(raw: &str) -> Self {
        match raw.trim() {
            "brackets" => Separator::Brackets,
            "braces" => Separator::Braces,
            "parens" => Separator::Parens,
            "pipe" => Separator::Pipe,
            _ => Separator::Literal(raw.to_string()),
        }
    }

    fn join(&self, entries: &[String]) -> String {
        let wrap = |open: &str, close: &str| {
            entries
                .iter()
                .map(|entry| format!("{open} {entry} {close}"))
                .collect::<Vec<_>>()
                .join(" ")
        };
        match self {
            Separator::Brackets => wrap("[", "]"),
            Separator::Braces => wrap("{", "}"),
            Separator::Parens => wrap("(", ")"),
            Separator::Pipe => entries.join(" | "),
            Separator::Literal(separator) => entries.join(separator),
        }
    }
}

impl TocParams {
    pub fn defaults(options: &ConvertOptions) -> Self {
        TocParams {
            toc_type: TocType::List,
            outline: false,
            bullet: Some("-".to_string()),
            min_level: 1,
            max_level: options.toc_max_level.clamp(1, 6),
            include: None,
            exclude: None,
            separator: Separator::Brackets,
            printable: true,
            absolute_url: false,
        }
    }

    /// Reads `attrs.parameters.macroParams.<name>.value`, falling back to
    /// `attrs.<name>`. Missing or malformed values keep their defaults.
    pub fn from_attrs(attrs: Option<&Map<String, Value>>, options: &ConvertOptions) -> Self {
        let mut params = Self::defaults(options);
        let Some(attrs) = attrs else {
            return params;
        };
        let get = |name: &str| param(attrs, name);

        if let Some(toc_type) = get("type") {
            params.toc_type = if toc_type.trim().eq_ignore_ascii_case("flat") {
                TocType::Flat
            } else {
                TocType::List
            };
        }
        if let Some(outline) = get("outline").and_then(|v| parse_bool(&v)) {
            params.outline = outline;
        }
        if let Some(style) = get("style") {
            params.bullet = match style.trim() {
                "none" => None,
                bullet @ ("*" | "+" | "-") => Some(bullet.to_string()),
                _ => Some("-".to_string()),
            };
        }
        if let Some(level) = get("minLevel").and_then(|v| parse_level(&v)) {
            params.min_level = level;
        }
        if let Some(level) = get("maxLevel").and_then(|v| parse_level(&v)) {
            params.max_level = level;
        }
        params.include = get("include").filter(|pattern| !pattern.trim().is_empty());
        params.exclude = get("exclude").filter(|pattern| !pattern.trim().is_empty());
        if let Some(separator) = get("separator").filter(|s| !s.is_empty()) {
            params.separator = Separator::parse(&separator);
        }
        if let Some(printable) = get("printable").and_then(|v| parse_bool(&v)) {
            params.printable = printable;
        }
        if let Some(absolute) = get("absoluteUrl").and_then(|v| parse_bool(&v)) {
            params.absolute_url = absolute;
        }
        params
    }
}

fn param(attrs: &Map<String, Value>, name: &str) -> Option<String> {
    let value = attrs
        .get("parameters")
        .and_then(|p| p.get("macroParams"))
        .and_then(|p| p.get(name))
        .and_then(|p| p.get("value"))
        .or_else(|| attrs.get(name))?;
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

fn parse_level(raw: &str) -> Option<u8> {
    raw.trim().parse::<u8>().ok().map(|level| level.clamp(1, 6))
}

/// Case-insensitive heading filter. Invalid regexes match as substrings.
enum TextFilter {
    Pattern(Regex),
    Substring(String),
}

impl TextFilter {
    fn new(pattern: &str) -> Self {
        match RegexBuilder::new(pattern).case_insensitive(true).build() {
            Ok(regex) => TextFilter::Pattern(regex),
            Err(e) => {
                warn!(pattern, error = %e, "invalid TOC filter; matching as text");
                TextFilter::Substring(pattern.to_lowercase())
            }
        }
    }

    fn matches(&self, text: &str) -> bool {
        match self {
            TextFilter::Pattern(regex) => regex.is_match(text),
            TextFilter::Substring(needle) => text.to_lowercase().contains(needle),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    level: u8,
    text: String,
    slug: String,
    number: Option<String>,
}

/// Selected headings, numbered when `outline` is set.
fn collect_entries(params: &TocParams, document: &DocumentContext) -> Vec<Entry> {
    let include = params.include.as_deref().map(TextFilter::new);
    let exclude = params.exclude.as_deref().map(TextFilter::new);
    let mut seen_slugs: HashMap<String, usize> = HashMap::new();
    let mut entries = Vec::new();

    for heading in document.headings() {
        let level = heading.attr_i64("level").unwrap_or(1).clamp(1, 6) as u8;
        let text = heading.plain_text().trim().to_string();
        if text.is_empty() {
            continue;
        }

        // Slugs are assigned over every heading so anchors match the rendered document.
        let base = slugify(&text);
        let count = seen_slugs.entry(base.clone()).or_insert(0);
        let slug = if *count == 0 {
            base
        } else {
            format!("{base}-{count}")
        };
        *count += 1;

        if level < params.min_level || level > params.max_level {
            continue;
        }
        if include.as_ref().is_some_and(|filter| !filter.matches(&text)) {
            continue;
        }
        if exclude.as_ref().is_some_and(|filter| filter.matches(&text)) {
            continue;
        }
        entries.push(Entry {
            level,
            text,
            slug,
            number: None,
        });
    }

    if params.outline {
        number_outline(&mut entries, params.min_level);
    }
    entries
}

/// Hierarchical numbers (`1`, `1.1`, `1.2`, `2`). Counters of levels deeper
/// than the current heading reset on each step.
fn number_outline(entries: &mut [Entry], min_level: u8) {
    let mut counters = [0usize; 7];
    for entry in entries.iter_mut() {
        let level = entry.level as usize;
        counters[level] += 1;
        for deeper in counters.iter_mut().skip(level + 1) {
            *deeper = 0;
        }
        let parts: Vec<String> = counters[min_level as usize..=level]
            .iter()
            .skip_while(|count| **count == 0)
            .map(|count| count.to_string())
            .collect();
        entry.number = Some(parts.join("."));
    }
}

/// Renders a table of contents for `document`.
pub fn render_toc(
    params: &TocParams,
    document: Option<&DocumentContext>,
    options: &ConvertOptions,
) -> String {
    let Some(document) = document else {
        return NO_CONTEXT.to_string();
    };
    let entries = collect_entries(params, document);
    if entries.is_empty() {
        return NO_HEADINGS.to_string();
    }

    let base = match (params.absolute_url, options.base_url.as_deref()) {
        (true, Some(base)) => base.trim_end_matches('/'),
        _ => "",
    };
    let link = |entry: &Entry| {
        let number = entry
            .number
            .as_deref()
            .map(|number| format!("{number} "))
            .unwrap_or_default();
        format!("{number}[{}]({base}#{})", entry.text, entry.slug)
    };

    match params.toc_type {
        TocType::Flat => {
            let links: Vec<String> = entries.iter().map(link).collect();
            params.separator.join(&links)
        }
        TocType::List => {
            let shallowest = entries
                .iter()
                .map(|entry| entry.level)
                .min()
                .unwrap_or(params.min_level);
            entries
                .iter()
                .map(|entry| {
                    let indent = "  ".repeat((entry.level - shallowest) as usize);
                    match &params.bullet {
                        Some(bullet) => format!("{indent}{bullet} {}", link(entry)),
                        None => format!("{indent}{}", link(entry)),
                    }
                })
                .collect::<Vec<_>>()
                .join("\n")
        }
    }
}

pub fn table_of_contents(input: &NodeInput) -> Converted {
    let params = TocParams::from_attrs(input.attrs(), input.options);
    render_toc(&params, input.document, input.options).into()
}
