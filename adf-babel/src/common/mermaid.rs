//! Mermaid diagram sniffing for code blocks that declare no language.
//!
//! A block is Mermaid when its first meaningful line (skipping blank lines and
//! `%%` comments) opens with a diagram keyword, or when most of its lines look
//! like flowchart edges (`A --> B`, `A -.-> B`, `A ==> B`) and nothing looks like
//! a statement terminator or brace-delimited body.

use once_cell::sync::Lazy;
use regex::Regex;

const DIAGRAM_KEYWORDS: &[&str] = &[
    "graph",
    "flowchart",
    "sequenceDiagram",
    "classDiagram",
    "stateDiagram",
    "stateDiagram-v2",
    "erDiagram",
    "gantt",
    "pie",
    "journey",
    "gitGraph",
    "mindmap",
    "timeline",
    "quadrantChart",
    "requirementDiagram",
    "C4Context",
    "C4Container",
    "C4Component",
    "sankey-beta",
    "xychart-beta",
    "block-beta",
];

static GRAPH_DIRECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(graph|flowchart)(\s+(TB|TD|BT|RL|LR))?\s*;?$").unwrap());

static EDGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[\w\]\)\}]+(\[[^\]]*\]|\([^\)]*\)|\{[^\}]*\})?\s*(-->|---|-\.->|==>|--[ox]|->>|-->>)\s*(\|[^|]*\|\s*)?\w+")
        .unwrap()
});

/// Whether `code` looks like a Mermaid diagram.
pub fn is_mermaid(code: &str) -> bool {
    let meaningful: Vec<&str> = code
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("%%"))
        .collect();

    let Some(first) = meaningful.first() else {
        return false;
    };

    if GRAPH_DIRECTION.is_match(first) {
        return true;
    }

    let first_word = first
        .split(|c: char| c.is_whitespace() || c == ':')
        .next()
        .unwrap_or_default();
    if first_word != "graph"
        && first_word != "flowchart"
        && DIAGRAM_KEYWORDS.iter().any(|keyword| *keyword == first_word)
    {
        return true;
    }

    looks_like_edge_list(&meaningful)
}

fn looks_like_edge_list(lines: &[&str]) -> bool {
    if lines
        .iter()
        .any(|line| (line.ends_with(';') && !line.contains("-->")) || line.ends_with('{'))
    {
        return false;
    }
    let edges = lines.iter().filter(|line| EDGE.is_match(line)).count();
    edges >= 2 && edges * 2 >= lines.len()
}
