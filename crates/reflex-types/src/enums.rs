//! Enum introspection
//!
//! Name/value lookups over a registered enum's declared entries.

use crate::metadata::MetadataStore;
use crate::registry::TypeRegistry;
use crate::ty::{TypeId, TypeKind};

/// True if `ty` is a registered enum
pub fn is_enum(registry: &TypeRegistry, ty: TypeId) -> bool {
    registry.record(ty).kind == Some(TypeKind::Enum)
}

/// Render `value` using the enum's declared entry names
///
/// For value `0` and for flag-less enums, scans the entries for an exact
/// match and falls back to the stringified raw value. For flags enums,
/// joins over every entry with `|`; entries whose value does not intersect
/// contribute the stringified raw value rather than being skipped. That
/// substitution matches the long-standing behavior of the metadata
/// consumers and is kept as-is.
pub fn to_string(
    registry: &TypeRegistry,
    metadata: &MetadataStore,
    ty: TypeId,
    value: i32,
) -> String {
    let record = registry.record(ty);
    if value == 0 || !metadata.enum_flags(ty) {
        for (key, entry) in &record.enum_entries {
            if *entry == value {
                return key.clone();
            }
        }
        value.to_string()
    } else {
        let mut parts = Vec::with_capacity(record.enum_entries.len());
        for (key, entry) in &record.enum_entries {
            if entry & value != 0 {
                parts.push(key.clone());
            } else {
                parts.push(value.to_string());
            }
        }
        parts.join(" | ")
    }
}

/// All declared entry values, declaration order
pub fn get_values(registry: &TypeRegistry, ty: TypeId) -> Vec<i32> {
    registry
        .record(ty)
        .enum_entries
        .iter()
        .map(|(_, value)| *value)
        .collect()
}
