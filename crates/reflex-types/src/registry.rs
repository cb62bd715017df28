//! Process-wide type registry
//!
//! Arena of type records plus the name index. The registry is an explicitly
//! constructed object passed by reference; [`TypeRegistry::global`] exists
//! only for backward-compatible ergonomics.

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::ty::{TypeId, TypeKind, TypeRecord};

static GLOBAL: Lazy<RwLock<TypeRegistry>> = Lazy::new(|| RwLock::new(TypeRegistry::new()));

/// Registry of type records with a full-name index
///
/// Entries are created at registration and never removed; registering the
/// same name twice overwrites the index entry (last write wins).
#[derive(Debug)]
pub struct TypeRegistry {
    records: Vec<TypeRecord>,
    by_name: FxHashMap<String, TypeId>,
}

impl TypeRegistry {
    /// Create a registry pre-seeded with the root `Object` class
    pub fn new() -> Self {
        let mut registry = TypeRegistry {
            records: Vec::new(),
            by_name: FxHashMap::default(),
        };
        let root = registry.declare(Some("Object"), true);
        registry.records[root.index()].kind = Some(TypeKind::Class);
        registry.by_name.insert("Object".to_string(), root);
        registry
    }

    /// The process-wide default registry
    pub fn global() -> &'static RwLock<TypeRegistry> {
        &GLOBAL
    }

    /// The root object type every callable record descends from
    pub fn object_type(&self) -> TypeId {
        TypeId(0)
    }

    /// Allocate an unregistered record
    ///
    /// Callable records default their parent link to the root object type;
    /// plain object types have no parent.
    pub fn declare(&mut self, native_name: Option<&str>, callable: bool) -> TypeId {
        let base = if callable && !self.records.is_empty() {
            Some(self.object_type())
        } else {
            None
        };
        self.push_record(TypeRecord {
            native_name: native_name.map(str::to_string),
            callable,
            base,
            ..TypeRecord::default()
        })
    }

    /// Allocate an unregistered record with an explicit parent link
    pub fn declare_with_base(
        &mut self,
        native_name: Option<&str>,
        callable: bool,
        base: TypeId,
    ) -> TypeId {
        self.push_record(TypeRecord {
            native_name: native_name.map(str::to_string),
            callable,
            base: Some(base),
            ..TypeRecord::default()
        })
    }

    /// Allocate an unregistered enum-shaped record from its named entries
    pub fn declare_enum(&mut self, native_name: Option<&str>, entries: Vec<(String, i32)>) -> TypeId {
        self.push_record(TypeRecord {
            native_name: native_name.map(str::to_string),
            enum_entries: entries,
            ..TypeRecord::default()
        })
    }

    fn push_record(&mut self, record: TypeRecord) -> TypeId {
        let id = TypeId(self.records.len() as u32);
        self.records.push(record);
        id
    }

    /// Borrow a record
    pub fn record(&self, ty: TypeId) -> &TypeRecord {
        &self.records[ty.index()]
    }

    /// Mutably borrow a record
    pub fn record_mut(&mut self, ty: TypeId) -> &mut TypeRecord {
        &mut self.records[ty.index()]
    }

    /// Register `ty` as a class under `name`, merging `interfaces` into its
    /// declared interface list
    pub fn register_class(&mut self, ty: TypeId, name: &str, interfaces: &[TypeId]) {
        self.register_type(ty, name, interfaces);
        self.records[ty.index()].kind = Some(TypeKind::Class);
    }

    /// Register `ty` as an interface under `name`
    ///
    /// An interface answers assignability by declared membership: a candidate
    /// is assignable iff its own interface list contains this interface.
    /// The check is single-level on purpose; it does not chase base types.
    pub fn register_interface(&mut self, ty: TypeId, name: &str, interfaces: &[TypeId]) {
        self.register_type(ty, name, interfaces);
        self.records[ty.index()].kind = Some(TypeKind::Interface);
    }

    /// Register `ty` as an enum under `name`
    pub fn register_enum(&mut self, ty: TypeId, name: &str) {
        self.register_type(ty, name, &[]);
        self.records[ty.index()].kind = Some(TypeKind::Enum);
    }

    fn register_type(&mut self, ty: TypeId, name: &str, interfaces: &[TypeId]) {
        if !name.is_empty() {
            self.set_type_name(ty, name);
        } else if let Some(existing) = self.records[ty.index()].name.clone() {
            if !existing.is_empty() {
                self.by_name.insert(existing, ty);
            }
        }

        if !interfaces.is_empty() {
            let record = &mut self.records[ty.index()];
            for &intf in interfaces {
                if !record.interfaces.contains(&intf) {
                    record.interfaces.push(intf);
                }
            }
        }
    }

    /// Assign a registered name to `ty` and index it
    pub fn set_type_name(&mut self, ty: TypeId, name: &str) {
        self.records[ty.index()].name = Some(name.to_string());
        self.by_name.insert(name.to_string(), ty);
    }

    /// Look up a registered type by full name; never errors
    pub fn get_type(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    /// All registered types, in id order
    pub fn get_types(&self) -> Vec<TypeId> {
        let mut result: Vec<TypeId> = self.by_name.values().copied().collect();
        result.sort_by_key(|t| t.0);
        result.dedup();
        result
    }

    /// Full name of `ty`: registered name, else native name, else `"Object"`
    pub fn full_name(&self, ty: TypeId) -> String {
        let record = self.record(ty);
        record
            .name
            .clone()
            .or_else(|| record.native_name.clone())
            .unwrap_or_else(|| "Object".to_string())
    }

    /// Short name of `ty`: the full-name segment after the last `.` that
    /// precedes any `[` generic-arity marker
    pub fn short_name(&self, ty: TypeId) -> String {
        let full = self.full_name(ty);
        let search_end = full.find('[').unwrap_or(full.len());
        match full[..search_end].rfind('.') {
            Some(ns_index) if ns_index > 0 => full[ns_index + 1..].to_string(),
            _ => full,
        }
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        TypeRegistry::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_object_seed() {
        let registry = TypeRegistry::new();
        let root = registry.object_type();
        assert_eq!(registry.get_type("Object"), Some(root));
        assert_eq!(registry.record(root).kind, Some(TypeKind::Class));
        assert_eq!(registry.record(root).base, None);
    }

    #[test]
    fn test_register_class_sets_kind_and_name() {
        let mut registry = TypeRegistry::new();
        let ty = registry.declare(Some("CustomerDialog"), true);
        registry.register_class(ty, "App.CustomerDialog", &[]);

        assert_eq!(registry.get_type("App.CustomerDialog"), Some(ty));
        assert_eq!(registry.record(ty).kind, Some(TypeKind::Class));
        assert_eq!(registry.full_name(ty), "App.CustomerDialog");
        assert_eq!(registry.short_name(ty), "CustomerDialog");
    }

    #[test]
    fn test_register_empty_name_falls_back_to_existing() {
        let mut registry = TypeRegistry::new();
        let ty = registry.declare(Some("Widget"), true);
        registry.set_type_name(ty, "App.Widget");
        registry.register_class(ty, "", &[]);

        assert_eq!(registry.get_type("App.Widget"), Some(ty));
        assert_eq!(registry.full_name(ty), "App.Widget");
    }

    #[test]
    fn test_duplicate_name_last_write_wins() {
        let mut registry = TypeRegistry::new();
        let first = registry.declare(Some("A"), true);
        let second = registry.declare(Some("B"), true);
        registry.register_class(first, "App.Thing", &[]);
        registry.register_class(second, "App.Thing", &[]);

        assert_eq!(registry.get_type("App.Thing"), Some(second));
    }

    #[test]
    fn test_interface_merge_is_distinct() {
        let mut registry = TypeRegistry::new();
        let i1 = registry.declare(None, false);
        registry.register_interface(i1, "App.IFirst", &[]);
        let i2 = registry.declare(None, false);
        registry.register_interface(i2, "App.ISecond", &[]);

        let ty = registry.declare(Some("Thing"), true);
        registry.register_class(ty, "App.Thing", &[i1, i2]);
        registry.register_class(ty, "App.Thing", &[i2, i1]);

        assert_eq!(registry.record(ty).interfaces, vec![i1, i2]);
    }

    #[test]
    fn test_full_name_fallback_chain() {
        let mut registry = TypeRegistry::new();
        let named = registry.declare(Some("LooseType"), true);
        assert_eq!(registry.full_name(named), "LooseType");

        let anonymous = registry.declare(None, true);
        assert_eq!(registry.full_name(anonymous), "Object");
    }

    #[test]
    fn test_short_name_with_generic_marker() {
        let mut registry = TypeRegistry::new();
        let ty = registry.declare(None, true);
        registry.register_class(ty, "App.Grids.EntityGrid[TItem]", &[]);
        assert_eq!(registry.short_name(ty), "EntityGrid[TItem]");

        let plain = registry.declare(Some("Plain"), true);
        assert_eq!(registry.short_name(plain), "Plain");
    }
}
