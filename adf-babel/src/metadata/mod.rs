//! Reversibility metadata: the annotate/serialize policy and the markers it emits.

pub mod annotation;
pub mod policy;

pub use annotation::{LocalId, LocalIdAllocator, LocalIdSource};
pub use policy::{AttributeRule, CriticalAttributes, MetadataPolicy};
