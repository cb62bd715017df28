//! Assignability rules for the Reflex type system
//!
//! Implements the relationship checks UI components consult continuously:
//! identity, explicit base-link descent, and single-level interface
//! membership.

use crate::registry::TypeRegistry;
use crate::ty::TypeId;

/// Check whether a value of type `ty` can be assigned where `target` is
/// expected
///
/// True on identity, when `ty`'s parent chain reaches `target`, or when
/// `target` is an interface that `ty` declares in its own interface list.
/// The interface rule is single-level: a base type's declarations do not
/// carry over to derived types.
pub fn is_assignable_from(registry: &TypeRegistry, target: TypeId, ty: TypeId) -> bool {
    if target == ty {
        return true;
    }

    let mut current = registry.record(ty).base;
    while let Some(parent) = current {
        if parent == target {
            return true;
        }
        current = registry.record(parent).base;
    }

    if registry.record(target).is_interface() {
        return registry.record(ty).interfaces.contains(&target);
    }

    false
}

/// Parent type of `ty`
///
/// Absent for the root object type, for interfaces, and for records with no
/// parent link.
pub fn base_type(registry: &TypeRegistry, ty: TypeId) -> Option<TypeId> {
    if ty == registry.object_type() || registry.record(ty).is_interface() {
        return None;
    }
    registry.record(ty).base
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflexivity() {
        let mut registry = TypeRegistry::new();
        let ty = registry.declare(Some("Widget"), true);
        assert!(is_assignable_from(&registry, ty, ty));
    }

    #[test]
    fn test_base_chain_descent() {
        let mut registry = TypeRegistry::new();
        let base = registry.declare(Some("Widget"), true);
        registry.register_class(base, "App.Widget", &[]);
        let mid = registry.declare_with_base(Some("EditorWidget"), true, base);
        registry.register_class(mid, "App.EditorWidget", &[]);
        let leaf = registry.declare_with_base(Some("StringEditor"), true, mid);
        registry.register_class(leaf, "App.StringEditor", &[]);

        assert!(is_assignable_from(&registry, base, leaf));
        assert!(is_assignable_from(&registry, mid, leaf));
        assert!(!is_assignable_from(&registry, leaf, base));

        // every callable descends from the root object type
        assert!(is_assignable_from(&registry, registry.object_type(), leaf));
    }

    #[test]
    fn test_interface_membership_is_single_level() {
        let mut registry = TypeRegistry::new();
        let intf = registry.declare(None, false);
        registry.register_interface(intf, "App.IEditDialog", &[]);

        let base = registry.declare(Some("BaseDialog"), true);
        registry.register_class(base, "App.BaseDialog", &[intf]);
        let derived = registry.declare_with_base(Some("OrderDialog"), true, base);
        registry.register_class(derived, "App.OrderDialog", &[]);

        assert!(is_assignable_from(&registry, intf, base));
        // the declaration does not flow down the base chain
        assert!(!is_assignable_from(&registry, intf, derived));

        let other = registry.declare(Some("Plain"), true);
        registry.register_class(other, "App.Plain", &[]);
        assert!(!is_assignable_from(&registry, intf, other));
    }

    #[test]
    fn test_base_type_rules() {
        let mut registry = TypeRegistry::new();
        let root = registry.object_type();
        assert_eq!(base_type(&registry, root), None);

        let intf = registry.declare(None, false);
        registry.register_interface(intf, "App.IThing", &[]);
        assert_eq!(base_type(&registry, intf), None);

        let class = registry.declare(Some("Thing"), true);
        assert_eq!(base_type(&registry, class), Some(root));
    }
}
