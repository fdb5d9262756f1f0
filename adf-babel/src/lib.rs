//! Reversible Atlassian Document Format to Markdown conversion
//!
//!     This crate turns ADF trees (the JSON document model Confluence and Jira store pages in)
//!     into Markdown that a person can read and edit, while keeping enough information in HTML
//!     comments to rebuild the original tree later.
//!
//!     TLDR:
//!         - Markdown is the primary output; annotations are only added when Markdown alone would lose something.
//!         - Every node kind has exactly one converter; unknown kinds are preserved whole.
//!         - Whether a node is annotated is decided in one place, the metadata policy, never by converters.
//!         - Output is deterministic: same input, same bytes.
//!
//!     This is a pure lib: it powers adfmd but is shell agnostic, no code here prints, reads env
//!     vars or touches files except where a caller asks for it explicitly (StaticPageLookup::from_path).
//!
//! Annotations
//!
//!     A node that needs reversibility data is wrapped as:
//!
//!         <!-- ADF-START
//!         adfType="panel"
//!         localId="adf-3"
//!         panelType: "custom"
//!         -->
//!         !!! note
//!             body
//!         <!-- ADF-END adfType="panel" localId="adf-3" -->
//!
//!     Both markers carry the same localId. Inside paragraphs and table cells the comments are
//!     folded onto one line so the surrounding Markdown structure survives.
//!
//! Architecture
//!
//!     .
//!     ├── adf                 # input model: AdfNode, Mark, NodeKind, DocumentContext
//!     ├── metadata            # annotate/serialize policy, markers, id allocation
//!     ├── common              # heuristics: mermaid, slugs, property tables, link resolution
//!     ├── converters          # one function per node kind
//!     ├── engine.rs           # async traversal
//!     ├── lookup.rs           # PageLookup collaborator
//!     ├── options.rs          # ConvertOptions
//!     ├── output.rs           # converter results and rendered nodes
//!     └── error.rs
//!
//!     Data flows one way: JSON → AdfNode → engine → (per node) converter → metadata policy →
//!     fragment, fragments joined bottom-up into the document.
//!
//! Testing
//!     tests
//!     └── <area>
//!         └── <testname>.rs
//!
//!     Rust does not discover tests in subdirectories by default, so tests/lib.rs includes them.
//!
pub mod adf;
pub mod common;
pub mod converters;
pub mod engine;
pub mod error;
pub mod lookup;
pub mod metadata;
pub mod options;
pub mod output;

pub use adf::{AdfNode, DocumentContext, Mark, NodeKind};
pub use engine::AdfConverter;
pub use error::{ConvertError, LookupError};
pub use lookup::{NoLookup, PageInfo, PageLookup, StaticPageLookup};
pub use metadata::{AttributeRule, CriticalAttributes, MetadataPolicy};
pub use options::ConvertOptions;
pub use output::{MarkdownBlock, RenderedNode};
