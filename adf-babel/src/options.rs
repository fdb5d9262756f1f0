//! Conversion settings.
//!
//! Every table the converters consult (critical attributes, panel keywords,
//! status glyphs) lives here and is handed to the engine once. Nothing in the
//! conversion reads global state.

use crate::metadata::MetadataPolicy;
use std::collections::BTreeMap;

pub const DEFAULT_ID_PREFIX: &str = "adf";
pub const DEFAULT_PANEL_FALLBACK: &str = "note";

#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    /// Root URL of "this" Confluence instance, e.g. `https://acme.atlassian.net`.
    pub base_url: Option<String>,
    /// Prefix for generated annotation ids.
    pub id_prefix: String,
    pub policy: MetadataPolicy,
    /// `panelType` to admonition keyword.
    pub panel_types: BTreeMap<String, String>,
    /// Keyword for panel types missing from `panel_types`.
    pub panel_fallback: String,
    /// Status colour to glyph.
    pub status_glyphs: BTreeMap<String, String>,
    /// Deepest heading level a table of contents lists when it does not say.
    pub toc_max_level: u8,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            base_url: None,
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
            policy: MetadataPolicy::default(),
            panel_types: standard_panel_types(),
            panel_fallback: DEFAULT_PANEL_FALLBACK.to_string(),
            status_glyphs: standard_status_glyphs(),
            toc_max_level: 6,
        }
    }
}

impl ConvertOptions {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    pub fn with_policy(mut self, policy: MetadataPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Admonition keyword for a panel type, and whether it came from the map
    /// rather than the fallback.
    pub fn panel_keyword(&self, panel_type: Option<&str>) -> (&str, bool) {
        match panel_type.and_then(|panel_type| self.panel_types.get(panel_type)) {
            Some(keyword) => (keyword.as_str(), true),
            None => (self.panel_fallback.as_str(), false),
        }
    }

    /// Glyph for a status colour; unknown colours use the neutral glyph.
    pub fn status_glyph(&self, color: Option<&str>) -> &str {
        color
            .map(str::to_lowercase)
            .and_then(|color| self.status_glyphs.get(&color))
            .or_else(|| self.status_glyphs.get("neutral"))
            .map(String::as_str)
            .unwrap_or("")
    }
}

pub fn standard_panel_types() -> BTreeMap<String, String> {
    [
        ("info", "info"),
        ("note", "note"),
        ("warning", "warning"),
        ("error", "danger"),
        ("success", "success"),
        ("tip", "tip"),
    ]
    .into_iter()
    .map(|(panel, keyword)| (panel.to_string(), keyword.to_string()))
    .collect()
}

pub fn standard_status_glyphs() -> BTreeMap<String, String> {
    [
        ("neutral", "⚪"),
        ("purple", "🟣"),
        ("blue", "🔵"),
        ("red", "🔴"),
        ("yellow", "🟡"),
        ("green", "🟢"),
    ]
    .into_iter()
    .map(|(color, glyph)| (color.to_string(), glyph.to_string()))
    .collect()
}
