//! ADF input model: nodes, marks, the node-kind variant type and the
//! document context.

pub mod context;
pub mod kind;
pub mod nodes;

pub use context::DocumentContext;
pub use kind::NodeKind;
pub use nodes::{AdfNode, Mark};
