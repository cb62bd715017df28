//! Reflex Type System
//!
//! Type records, registry, metadata side-table, and reflective operations
//! for the Reflex object-model runtime.

#![warn(missing_docs)]

pub mod ty;
pub mod registry;
pub mod metadata;
pub mod assignability;
pub mod enums;
pub mod error;

pub use ty::{MemberKind, TypeId, TypeKind, TypeRecord};
pub use registry::TypeRegistry;
pub use metadata::{Attribute, Member, MetadataStore, TypeMetadata};
pub use assignability::{base_type, is_assignable_from};
pub use error::ReflectError;
