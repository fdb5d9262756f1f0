//! Shared configuration loader for the adfmd toolchain.
//!
//! `defaults/adf.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`AdfConfig`].

use adf_babel::options::DEFAULT_ID_PREFIX;
use adf_babel::ConvertOptions;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../defaults/adf.default.toml");

/// Top-level configuration consumed by adfmd applications.
#[derive(Debug, Clone, Deserialize)]
pub struct AdfConfig {
    pub convert: ConvertSection,
    pub toc: TocSection,
    #[serde(default)]
    pub lookup: LookupSection,
}

/// Conversion knobs that end up in [`ConvertOptions`].
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertSection {
    #[serde(default)]
    pub base_url: Option<String>,
    pub id_prefix: String,
    pub panel_fallback: String,
    pub panel_types: BTreeMap<String, String>,
    pub status_glyphs: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TocSection {
    pub default_max_level: u8,
}

/// Where page titles come from when no live lookup is wired in.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LookupSection {
    #[serde(default)]
    pub page_titles: Option<PathBuf>,
}

impl From<&ConvertSection> for ConvertOptions {
    fn from(config: &ConvertSection) -> Self {
        let id_prefix = if config.id_prefix.trim().is_empty() {
            DEFAULT_ID_PREFIX.to_string()
        } else {
            config.id_prefix.clone()
        };
        ConvertOptions {
            base_url: config
                .base_url
                .clone()
                .filter(|base_url| !base_url.trim().is_empty()),
            id_prefix,
            panel_types: config.panel_types.clone(),
            panel_fallback: config.panel_fallback.clone(),
            status_glyphs: config.status_glyphs.clone(),
            ..ConvertOptions::default()
        }
    }
}

impl From<&AdfConfig> for ConvertOptions {
    fn from(config: &AdfConfig) -> Self {
        ConvertOptions {
            toc_max_level: config.toc.default_max_level.clamp(1, 6),
            ..ConvertOptions::from(&config.convert)
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<AdfConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<AdfConfig, ConfigError> {
    Loader::new().build()
}
