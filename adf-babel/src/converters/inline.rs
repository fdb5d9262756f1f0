//! Inline converters: text with marks, mentions, emoji, status lozenges,
//! dates, hard breaks and placeholders.

use super::{longest_run, NodeInput};
use crate::adf::Mark;
use crate::output::{ConversionHints, Converted, ConverterResult};
use chrono::DateTime;
use serde_json::Value;

/// Text leaf with its marks applied in encounter order.
///
/// Marks with no Markdown spelling are kept verbatim in the annotation.
pub fn text(input: &NodeInput) -> Converted {
    let mut out = input.node.text.clone().unwrap_or_default();
    let mut unexpressed: Vec<Value> = Vec::new();

    for mark in input.node.marks() {
        out = match mark.mark_type.as_str() {
            "code" => code_span(&out),
            "strong" => wrap_trimmed(&out, "**", "**"),
            "em" => wrap_trimmed(&out, "*", "*"),
            "strike" => wrap_trimmed(&out, "~~", "~~"),
            "underline" => format!("<u>{out}</u>"),
            "subsup" => match mark.attr_str("type") {
                Some("sub") => format!("<sub>{out}</sub>"),
                _ => format!("<sup>{out}</sup>"),
            },
            "link" => match mark.attr_str("href") {
                Some(href) => {
                    if has_extra_link_attrs(mark) {
                        unexpressed.push(mark.to_value());
                    }
                    format!("[{out}]({href})")
                }
                None => {
                    unexpressed.push(mark.to_value());
                    out
                }
            },
            _ => {
                unexpressed.push(mark.to_value());
                out
            }
        };
    }

    marks_result(out, unexpressed)
}

/// Result carrying unexpressed marks, if any, as an annotation extra.
pub(crate) fn marks_result(markdown: String, unexpressed: Vec<Value>) -> Converted {
    let result = ConverterResult::new(markdown);
    if unexpressed.is_empty() {
        return result.into();
    }
    result
        .with_hints(ConversionHints::needs_yaml().with_extra("marks", Value::Array(unexpressed)))
        .into()
}

fn has_extra_link_attrs(mark: &Mark) -> bool {
    mark.attrs.as_ref().is_some_and(|attrs| {
        attrs
            .iter()
            .any(|(key, value)| key != "href" && !value.is_null())
    })
}

fn code_span(text: &str) -> String {
    let ticks = "`".repeat(longest_run(text, '`') + 1);
    if text.starts_with('`') || text.ends_with('`') {
        format!("{ticks} {text} {ticks}")
    } else {
        format!("{ticks}{text}{ticks}")
    }
}

/// Wraps the text between its leading and trailing whitespace; `** x**` is not bold.
fn wrap_trimmed(text: &str, open: &str, close: &str) -> String {
    let core = text.trim();
    if core.is_empty() {
        return text.to_string();
    }
    let start = text.len() - text.trim_start().len();
    let end = start + core.len();
    format!("{}{open}{core}{close}{}", &text[..start], &text[end..])
}

pub fn hard_break(_input: &NodeInput) -> Converted {
    "  \n".into()
}

pub fn mention(input: &NodeInput) -> Converted {
    let text = input
        .node
        .attr_str("text")
        .map(str::to_string)
        .or_else(|| input.node.attr_str("id").map(|id| format!("@{id}")))
        .unwrap_or_else(|| "@unknown".to_string());
    if text.starts_with('@') {
        text.into()
    } else {
        format!("@{text}").into()
    }
}

pub fn emoji(input: &NodeInput) -> Converted {
    input
        .node
        .attr_str("text")
        .or_else(|| input.node.attr_str("shortName"))
        .unwrap_or_default()
        .to_string()
        .into()
}

pub fn status(input: &NodeInput) -> Converted {
    let glyph = input.options.status_glyph(input.node.attr_str("color"));
    let text = title_case(input.node.attr_str("text").unwrap_or_default());
    match (glyph.is_empty(), text.is_empty()) {
        (true, _) => text.into(),
        (false, true) => glyph.to_string().into(),
        (false, false) => format!("{glyph} {text}").into(),
    }
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// `attrs.timestamp` (epoch milliseconds) as `YYYY-MM-DD`.
pub fn date(input: &NodeInput) -> Converted {
    let Some(raw) = input.node.attr("timestamp") else {
        return "".into();
    };
    let millis = match raw {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    };
    match millis.and_then(DateTime::from_timestamp_millis) {
        Some(date) => date.format("%Y-%m-%d").to_string().into(),
        None => match raw {
            Value::String(text) => text.clone().into(),
            other => other.to_string().into(),
        },
    }
}

pub fn placeholder(input: &NodeInput) -> Converted {
    match input.node.attr_str("text") {
        Some(text) => format!("*{text}*").into(),
        None => "".into(),
    }
}
