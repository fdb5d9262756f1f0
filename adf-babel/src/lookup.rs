//! Page-title lookup collaborator.
//!
//! Link resolution asks a [`PageLookup`] for the title of a Confluence page
//! on the configured instance. The converter never assumes the lookup is
//! available or fast; every failure degrades to text derived from the URL.

use crate::error::LookupError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// What a lookup knows about a page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl PageInfo {
    pub fn titled(title: impl Into<String>) -> Self {
        PageInfo {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// Resolves a Confluence page id to its metadata.
///
/// `Ok(None)` means the page does not exist; `Err` means the lookup itself failed.
#[async_trait]
pub trait PageLookup: Send + Sync {
    async fn get_page_by_id(&self, id: &str) -> Result<Option<PageInfo>, LookupError>;
}

/// A lookup that knows no pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLookup;

#[async_trait]
impl PageLookup for NoLookup {
    async fn get_page_by_id(&self, _id: &str) -> Result<Option<PageInfo>, LookupError> {
        Ok(None)
    }
}

/// In-memory id to page map.
///
/// The JSON form maps page ids either to a bare title or to a page object:
///
/// ```json
/// { "123": "Release notes", "456": { "title": "Runbook", "spaceId": "OPS" } }
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticPageLookup {
    pages: HashMap<String, PageInfo>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PageEntry {
    Title(String),
    Page(PageInfo),
}

impl StaticPageLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, id: impl Into<String>, page: PageInfo) -> Self {
        self.pages.insert(id.into(), page);
        self
    }

    pub fn insert(&mut self, id: impl Into<String>, page: PageInfo) {
        self.pages.insert(id.into(), page);
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn from_json(json: &str) -> Result<Self, LookupError> {
        let entries: HashMap<String, PageEntry> = serde_json::from_str(json)
            .map_err(|e| LookupError::Malformed(format!("page titles: {e}")))?;
        let pages = entries
            .into_iter()
            .map(|(id, entry)| {
                let page = match entry {
                    PageEntry::Title(title) => PageInfo::titled(title),
                    PageEntry::Page(page) => page,
                };
                (id, page)
            })
            .collect();
        Ok(StaticPageLookup { pages })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LookupError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| LookupError::Unavailable(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }
}

#[async_trait]
impl PageLookup for StaticPageLookup {
    async fn get_page_by_id(&self, id: &str) -> Result<Option<PageInfo>, LookupError> {
        Ok(self.pages.get(id).cloned())
    }
}
