//! Traversal engine.
//!
//!     The engine is an async fold over the ADF tree. For each node it converts
//!     all children concurrently (results kept in content order), resolves the
//!     node's link when it is a card, runs the node's converter and finally
//!     asks the metadata policy whether the fragment needs an annotation.
//!
//!     The only suspension points are page lookups. Everything else is pure,
//!     so converting the same tree twice yields identical bytes, generated ids
//!     included: ids come from the node's pre-order position, which is known
//!     before any child starts converting.
//!
//!     When the root is a `doc`, a [`DocumentContext`] is collected first and
//!     shared read-only with every converter for the rest of the conversion.

use crate::adf::{AdfNode, DocumentContext, NodeKind};
use crate::common::links::LinkResolver;
use crate::converters::{self, cards::card_url, NodeInput};
use crate::error::ConvertError;
use crate::lookup::{NoLookup, PageLookup};
use crate::metadata::annotation::is_finished_block;
use crate::metadata::{LocalId, LocalIdAllocator};
use crate::options::ConvertOptions;
use crate::output::{ConversionHints, Converted, MarkdownBlock, RenderedNode};
use futures::future::{join_all, BoxFuture, FutureExt};
use std::sync::Arc;
use tracing::debug;

/// Converts ADF trees to annotated Markdown.
///
/// Cheap to clone and safe to share; one converter can serve many conversions.
///
/// # Example
///
/// ```ignore
/// let converter = AdfConverter::new(ConvertOptions::default());
/// let markdown = converter.convert_json(r#"{"type":"doc","content":[]}"#).await?;
/// ```
#[derive(Debug, Clone)]
pub struct AdfConverter {
    options: Arc<ConvertOptions>,
    resolver: LinkResolver,
    ids: LocalIdAllocator,
}

impl Default for AdfConverter {
    fn default() -> Self {
        AdfConverter::new(ConvertOptions::default())
    }
}

impl AdfConverter {
    /// A converter without page lookups: same-instance page links fall back to URL text.
    pub fn new(options: ConvertOptions) -> Self {
        AdfConverter::with_lookup(options, Arc::new(NoLookup))
    }

    pub fn with_lookup(options: ConvertOptions, lookup: Arc<dyn PageLookup>) -> Self {
        let resolver = LinkResolver::new(options.base_url.as_deref(), lookup);
        let ids = LocalIdAllocator::new(options.id_prefix.clone());
        AdfConverter {
            options: Arc::new(options),
            resolver,
            ids,
        }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Converts a tree to Markdown. Any node may be the root.
    pub async fn convert(&self, root: &AdfNode) -> String {
        self.render(root).await.to_markdown()
    }

    /// Converts a tree and keeps the per-node results.
    pub async fn render(&self, root: &AdfNode) -> RenderedNode {
        let kind = root.kind();
        debug!(root = %kind, nodes = root.subtree_size(), "converting");
        let document = (kind == NodeKind::Doc).then(|| DocumentContext::collect(root));
        self.render_node(root, 0, 0, document.as_ref()).await
    }

    /// [`AdfConverter::convert`] on the current thread, for callers without a runtime.
    pub fn convert_blocking(&self, root: &AdfNode) -> String {
        futures::executor::block_on(self.convert(root))
    }

    /// Parses ADF JSON and converts it.
    pub async fn convert_json(&self, json: &str) -> Result<String, ConvertError> {
        let root: AdfNode = serde_json::from_str(json)?;
        Ok(self.convert(&root).await)
    }

    fn render_node<'a>(
        &'a self,
        node: &'a AdfNode,
        level: usize,
        ordinal: usize,
        document: Option<&'a DocumentContext<'a>>,
    ) -> BoxFuture<'a, RenderedNode> {
        async move {
            let kind = node.kind();

            // Unsupported nodes are serialized whole; their children are never rendered.
            let children = if matches!(kind, NodeKind::Unsupported(_)) {
                Vec::new()
            } else {
                let mut pending = Vec::with_capacity(node.children().len());
                let mut next = ordinal + 1;
                for child in node.children() {
                    let child_level = nested_level(&kind, child, level);
                    pending.push(self.render_node(child, child_level, next, document));
                    next += child.subtree_size();
                }
                join_all(pending).await
            };

            let link = if kind.needs_link_resolution() {
                let attrs = node.attrs.as_ref();
                Some(self.resolver.resolve(&card_url(attrs), attrs).await)
            } else {
                None
            };

            let local_id = self.ids.assign(node, ordinal);
            let input = NodeInput {
                node,
                kind: &kind,
                children: &children,
                level,
                options: &self.options,
                document,
                local_id: &local_id,
                link: link.as_ref(),
            };
            let converted = converters::convert(&input);
            let block = self.finish(&kind, node, &local_id, converted);

            RenderedNode {
                kind,
                block,
                local_id: local_id.value,
                children,
            }
        }
        .boxed()
    }

    fn finish(
        &self,
        kind: &NodeKind,
        node: &AdfNode,
        local_id: &LocalId,
        converted: Converted,
    ) -> MarkdownBlock {
        match converted {
            Converted::Block(block) if is_finished_block(&block.yaml_block) => block,
            Converted::Block(block) => self.annotate(kind, node, local_id, block.markdown, None),
            Converted::Result(result) => {
                self.annotate(kind, node, local_id, result.markdown, result.context.as_ref())
            }
        }
    }

    fn annotate(
        &self,
        kind: &NodeKind,
        node: &AdfNode,
        local_id: &LocalId,
        markdown: String,
        hints: Option<&ConversionHints>,
    ) -> MarkdownBlock {
        let policy = &self.options.policy;
        let attrs = node.attrs.as_ref();
        if *kind == NodeKind::Doc || !policy.should_annotate(kind, attrs, hints) {
            return MarkdownBlock::plain(markdown);
        }
        MarkdownBlock {
            yaml_block: policy.render_annotation(kind, local_id, attrs, hints),
            markdown,
        }
    }
}

/// Nesting depth for `child`. A list one level down is a list inside a list
/// item, or a list directly inside a list of the same kind (task lists nest
/// that way).
fn nested_level(parent: &NodeKind, child: &AdfNode, level: usize) -> usize {
    let child_kind = child.kind();
    if child_kind.is_list() && (parent.is_list_item() || *parent == child_kind) {
        level + 1
    } else {
        level
    }
}
