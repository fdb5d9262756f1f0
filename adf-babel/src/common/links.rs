//! Link classification and display-text derivation for cards.
//!
//! Cards only carry a URL, so the text shown in `[text](url)` has to be made
//! up. Three classes are recognised, in this order:
//!
//! - **Jira issues** (`/browse/KEY-123`): the issue key, in words.
//! - **Confluence pages on the configured instance**: the page title from the
//!   [`PageLookup`] collaborator, when it answers.
//! - **Everything else**, including Confluence pages on another instance and
//!   failed lookups: the last path segment, decoded and turned into words.
//!
//! Resolution never fails. Lookup errors are logged and absorbed.

use crate::lookup::{NoLookup, PageLookup};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

static JIRA_ISSUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/browse/[A-Za-z][A-Za-z0-9_]*-\d+/?$").unwrap());

static CONFLUENCE_PAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/spaces/[^/]+/pages/([^/?#]+)").unwrap());

/// What a URL points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Jira,
    ConfluencePage,
    External,
}

impl LinkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkKind::Jira => "jira",
            LinkKind::ConfluencePage => "confluencePage",
            LinkKind::External => "external",
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display text and provenance for one URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLink {
    pub text: String,
    pub url: String,
    pub kind: LinkKind,
    /// Annotation entries recording how `text` was obtained.
    pub yaml: Vec<(String, Value)>,
}

impl ResolvedLink {
    fn derived(url: &str, text: String, kind: LinkKind) -> Self {
        ResolvedLink {
            text,
            url: url.to_string(),
            kind,
            yaml: vec![("linkKind".to_string(), Value::from(kind.as_str()))],
        }
    }

    pub fn to_markdown(&self) -> String {
        format!("[{}]({})", self.text, self.url)
    }
}

/// Resolves card URLs against one Confluence instance.
#[derive(Clone)]
pub struct LinkResolver {
    base_url: Option<Url>,
    lookup: Arc<dyn PageLookup>,
}

impl fmt::Debug for LinkResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkResolver")
            .field("base_url", &self.base_url.as_ref().map(Url::as_str))
            .finish_non_exhaustive()
    }
}

impl Default for LinkResolver {
    fn default() -> Self {
        LinkResolver {
            base_url: None,
            lookup: Arc::new(NoLookup),
        }
    }
}

impl LinkResolver {
    /// An unparsable `base_url` is treated as absent: no URL counts as same-instance.
    pub fn new(base_url: Option<&str>, lookup: Arc<dyn PageLookup>) -> Self {
        let base_url = base_url.and_then(|raw| match Url::parse(raw) {
            Ok(url) => Some(url),
            Err(e) => {
                warn!(base_url = raw, error = %e, "ignoring unparsable base URL");
                None
            }
        });
        LinkResolver { base_url, lookup }
    }

    /// Display text for `url`. `attrs` are the card's attributes; a card with
    /// no URL falls back to `attrs.data.name`.
    pub async fn resolve(&self, url: &str, attrs: Option<&Map<String, Value>>) -> ResolvedLink {
        if url.trim().is_empty() {
            let text = attrs
                .and_then(|attrs| attrs.get("data"))
                .and_then(|data| data.get("name"))
                .and_then(Value::as_str)
                .unwrap_or("link")
                .to_string();
            return ResolvedLink::derived(url, text, LinkKind::External);
        }

        let parsed = Url::parse(url).ok();

        if let Some(parsed) = &parsed {
            if JIRA_ISSUE.is_match(parsed.path()) {
                return ResolvedLink::derived(url, url_tail_text(url), LinkKind::Jira);
            }

            if self.is_same_instance(parsed) {
                if let Some(page_id) = confluence_page_id(parsed) {
                    return self.resolve_page(url, &page_id).await;
                }
            }
        }

        ResolvedLink::derived(url, url_tail_text(url), LinkKind::External)
    }

    async fn resolve_page(&self, url: &str, page_id: &str) -> ResolvedLink {
        if !page_id.chars().all(|c| c.is_ascii_digit()) {
            debug!(url, page_id, "non-numeric page id; using URL text");
            return ResolvedLink::derived(url, url_tail_text(url), LinkKind::ConfluencePage);
        }

        match self.lookup.get_page_by_id(page_id).await {
            Ok(Some(page)) if !page.title.trim().is_empty() => {
                let mut link = ResolvedLink::derived(url, page.title, LinkKind::ConfluencePage);
                link.yaml
                    .push(("pageId".to_string(), Value::from(page_id)));
                link
            }
            Ok(_) => {
                debug!(url, page_id, "page not found; using URL text");
                ResolvedLink::derived(url, url_tail_text(url), LinkKind::ConfluencePage)
            }
            Err(e) => {
                warn!(url, page_id, error = %e, "page lookup failed; using URL text");
                ResolvedLink::derived(url, url_tail_text(url), LinkKind::ConfluencePage)
            }
        }
    }

    fn is_same_instance(&self, url: &Url) -> bool {
        match &self.base_url {
            Some(base) => {
                base.host_str().is_some()
                    && base.host_str() == url.host_str()
                    && base.port_or_known_default() == url.port_or_known_default()
            }
            None => false,
        }
    }
}

/// Page id from `/spaces/<key>/pages/<id>` or a `pageId=` query parameter.
pub fn confluence_page_id(url: &Url) -> Option<String> {
    if let Some(captures) = CONFLUENCE_PAGE.captures(url.path()) {
        return Some(captures[1].to_string());
    }
    url.query_pairs()
        .find(|(key, _)| key == "pageId")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Words from the last path segment of a URL.
///
/// Percent-decoded, `-`, `_` and `+` read as spaces, whitespace collapsed.
/// Falls back to the host for URLs with an empty path, and to the raw input
/// for anything unparsable.
pub fn url_tail_text(raw: &str) -> String {
    let Ok(url) = Url::parse(raw) else {
        return raw.to_string();
    };

    let segment = url
        .path_segments()
        .and_then(|segments| segments.filter(|segment| !segment.is_empty()).last());

    let text = segment
        .map(|segment| {
            let decoded = urlencoding::decode(segment)
                .map(|cow| cow.into_owned())
                .unwrap_or_else(|_| segment.to_string());
            words(&decoded)
        })
        .unwrap_or_default();

    if !text.is_empty() {
        return text;
    }
    url.host_str()
        .map(str::to_string)
        .unwrap_or_else(|| raw.to_string())
}

fn words(segment: &str) -> String {
    segment
        .split(|c: char| c == '-' || c == '_' || c == '+' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
