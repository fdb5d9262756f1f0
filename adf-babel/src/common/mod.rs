//! Heuristics and helpers shared by several converters.

pub mod links;
pub mod mermaid;
pub mod property_table;
pub mod slug;
