//! Type descriptors and the registry the walker dispatches through.
//!
//! Descriptors are declarative: each field names its kind and cardinality,
//! oneof groups list their members, and cross-field rules are data attached
//! to the owning type. The walker consults this module; it contains no
//! validation logic of its own.

pub mod base;
pub mod registry;
pub mod types;

pub use base::{base_registry, default_registry};
pub use registry::SchemaRegistry;
pub use types::{
    ElementKind, ElementSchema, OneofGroup, PrimitiveType, SemanticCheck, TypeSchema,
};
