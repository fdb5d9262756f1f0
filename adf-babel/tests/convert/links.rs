//! Smart-link cards resolved through the page lookup collaborator.

use crate::common::*;
use adf_babel::{AdfConverter, AdfNode, ConvertOptions, LookupError, PageInfo, PageLookup, StaticPageLookup};
use async_trait::async_trait;
use insta::assert_snapshot;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

const BASE: &str = "https://acme.atlassian.net";
const PAGE_URL: &str = "https://acme.atlassian.net/wiki/spaces/ENG/pages/123/Release+notes";

struct BrokenLookup;

#[async_trait]
impl PageLookup for BrokenLookup {
    async fn get_page_by_id(&self, _id: &str) -> Result<Option<PageInfo>, LookupError> {
        Err(LookupError::Unavailable("503 from upstream".to_string()))
    }
}

/// Answers after a per-page delay, so later siblings can finish first.
struct DelayedLookup {
    pages: HashMap<String, (String, u64)>,
}

#[async_trait]
impl PageLookup for DelayedLookup {
    async fn get_page_by_id(&self, id: &str) -> Result<Option<PageInfo>, LookupError> {
        let Some((title, delay)) = self.pages.get(id) else {
            return Ok(None);
        };
        tokio::time::sleep(Duration::from_millis(*delay)).await;
        Ok(Some(PageInfo::titled(title.clone())))
    }
}

fn inline_card(url: &str) -> AdfNode {
    AdfNode::new("inlineCard").with_attrs(json!({ "url": url }))
}

fn block_card(url: &str) -> AdfNode {
    AdfNode::new("blockCard").with_attrs(json!({ "url": url }))
}

fn converter(lookup: Arc<dyn PageLookup>) -> AdfConverter {
    AdfConverter::with_lookup(ConvertOptions::default().with_base_url(BASE), lookup)
}

#[tokio::test]
async fn test_lookup_title_is_used() {
    let lookup = StaticPageLookup::new().with_page("123", PageInfo::titled("Release Notes 2024"));
    let tree = doc(vec![AdfNode::new("paragraph").with_content(vec![
        AdfNode::text("See "),
        inline_card(PAGE_URL),
    ])]);

    let markdown = converter(Arc::new(lookup)).convert(&tree).await;
    assert_snapshot!(markdown, @r###"See <!-- ADF-START adfType="inlineCard" localId="adf-3" url: "https://acme.atlassian.net/wiki/spaces/ENG/pages/123/Release+notes" linkKind: "confluencePage" pageId: "123" -->[Release Notes 2024](https://acme.atlassian.net/wiki/spaces/ENG/pages/123/Release+notes)<!-- ADF-END adfType="inlineCard" localId="adf-3" -->"###);
}

#[tokio::test]
async fn test_failed_lookup_falls_back_to_url_text() {
    let tree = doc(vec![block_card(PAGE_URL)]);
    let markdown = converter(Arc::new(BrokenLookup)).convert(&tree).await;

    assert!(markdown.contains(&format!("[Release notes]({PAGE_URL})")));
    assert!(markdown.contains("linkKind: \"confluencePage\""));
    assert!(!markdown.contains("pageId"));
    assert_balanced(&markdown);
}

#[tokio::test]
async fn test_jira_and_external_cards() {
    let tree = doc(vec![
        block_card("https://acme.atlassian.net/browse/PROJ-123"),
        block_card("https://example.com/blog/rust-in-production"),
    ]);
    let markdown = converter(Arc::new(StaticPageLookup::new())).convert(&tree).await;

    assert!(markdown.contains("[PROJ 123](https://acme.atlassian.net/browse/PROJ-123)"));
    assert!(markdown.contains("linkKind: \"jira\""));
    assert!(markdown.contains("[rust in production](https://example.com/blog/rust-in-production)"));
    assert!(markdown.contains("linkKind: \"external\""));
}

#[tokio::test]
async fn test_sibling_order_survives_slow_lookups() {
    let lookup = DelayedLookup {
        pages: HashMap::from([
            ("1".to_string(), ("Slow page".to_string(), 60)),
            ("2".to_string(), ("Medium page".to_string(), 20)),
            ("3".to_string(), ("Fast page".to_string(), 0)),
        ]),
    };
    let tree = doc(
        ["1", "2", "3"]
            .iter()
            .map(|id| block_card(&format!("{BASE}/wiki/spaces/ENG/pages/{id}")))
            .collect(),
    );

    let markdown = converter(Arc::new(lookup)).convert(&tree).await;
    let slow = markdown.find("[Slow page]").expect("slow page");
    let medium = markdown.find("[Medium page]").expect("medium page");
    let fast = markdown.find("[Fast page]").expect("fast page");
    assert!(slow < medium && medium < fast, "{markdown}");
}

#[test]
fn test_blocking_conversion_resolves_links() {
    let lookup = StaticPageLookup::new().with_page("123", PageInfo::titled("Release Notes 2024"));
    let markdown = converter(Arc::new(lookup)).convert_blocking(&doc(vec![block_card(PAGE_URL)]));
    assert!(markdown.contains("[Release Notes 2024]"));
}
