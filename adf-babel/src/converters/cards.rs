//! Smart-link cards. The engine resolves the link before the converter runs;
//! the resolution provenance travels into the annotation.

use super::NodeInput;
use crate::common::links::url_tail_text;
use crate::output::{ConversionHints, Converted, ConverterResult};
use serde_json::Value;

/// Card target: `attrs.url`, else `attrs.data.url`.
pub fn card_url(attrs: Option<&serde_json::Map<String, Value>>) -> String {
    let Some(attrs) = attrs else {
        return String::new();
    };
    attrs
        .get("url")
        .and_then(Value::as_str)
        .or_else(|| {
            attrs
                .get("data")
                .and_then(|data| data.get("url"))
                .and_then(Value::as_str)
        })
        .unwrap_or_default()
        .to_string()
}

pub fn inline_card(input: &NodeInput) -> Converted {
    card(input)
}

/// `blockCard` and `embedCard`. Same link; the block join puts it on its own line.
pub fn block_card(input: &NodeInput) -> Converted {
    card(input)
}

fn card(input: &NodeInput) -> Converted {
    let Some(link) = input.link else {
        let url = card_url(input.attrs());
        if url.is_empty() {
            return "".into();
        }
        return format!("[{}]({url})", url_tail_text(&url)).into();
    };

    let markdown = if link.url.is_empty() {
        link.text.clone()
    } else {
        link.to_markdown()
    };
    let hints = link
        .yaml
        .iter()
        .fold(ConversionHints::default(), |hints, (key, value)| {
            hints.with_extra(key.clone(), value.clone())
        });
    ConverterResult::new(markdown).with_hints(hints).into()
}
