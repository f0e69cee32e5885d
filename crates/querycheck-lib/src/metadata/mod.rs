//! Persistence metadata reconstructed from type declarations.
//!
//! `resolver` holds the stateless classification rules; `graph` caches
//! their results per run and answers path lookups.

mod graph;
pub mod resolver;
mod types;


pub use graph::MetadataGraph;
pub use types::{
    AccessType, BasicKind, BasicType, CollectionElement, CollectionMetadata, CollectionShape,
    ComponentMetadata, EntityId, EntityMetadata, PropertyDescriptor, PropertyKind, PropertyType,
};
