//! Auto-discovery of types in the namespace graph
//!
//! At startup the scanner walks the global namespace graph and registers
//! type objects it can classify: formatter classes by structural heuristic,
//! and plain candidates whose base is already a registered class. Already
//! named records are skipped, so re-running the scan is a no-op.

use reflex_types::{TypeId, TypeKind, TypeRegistry};

use crate::object::{Heap, ObjectId, Value};

/// Registered full name of the well-known grid formatter interface
pub const FORMATTER_INTERFACE: &str = "Reflex.IFormatter";

/// Get or register the well-known grid formatter interface
pub fn ensure_formatter_interface(registry: &mut TypeRegistry) -> TypeId {
    if let Some(ty) = registry.get_type(FORMATTER_INTERFACE) {
        return ty;
    }
    let ty = registry.declare(Some("IFormatter"), false);
    registry.register_interface(ty, FORMATTER_INTERFACE, &[]);
    ty
}

/// Scan `root` and register discoverable types under `name_prefix`
///
/// Keys must start with an ASCII uppercase letter, must not be
/// `prototype`, and must not contain the `$` marker. Array, date, string,
/// and number children are skipped. Recursion descends into every object
/// child regardless of registration outcome, bounded by `depth_limit`.
pub fn initialize_types(
    registry: &mut TypeRegistry,
    heap: &Heap,
    root: ObjectId,
    name_prefix: &str,
    depth_limit: u32,
) {
    let formatter = ensure_formatter_interface(registry);
    walk(registry, heap, root, name_prefix, depth_limit, formatter);
}

fn walk(
    registry: &mut TypeRegistry,
    heap: &Heap,
    node: ObjectId,
    prefix: &str,
    limit: u32,
    formatter: TypeId,
) {
    for (key, value) in heap.get(node).props() {
        if !key.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
            continue;
        }
        if key.contains('$') || key == "prototype" {
            continue;
        }

        match value {
            Value::Array(_) | Value::Date(_) | Value::Str(_) | Value::Number(_) => continue,
            Value::Type(ty) => {
                try_register(registry, *ty, key, prefix, formatter);
            }
            Value::Object(child) => {
                if limit > 0 {
                    let child_prefix = format!("{prefix}{key}.");
                    walk(registry, heap, *child, &child_prefix, limit - 1, formatter);
                }
            }
            Value::Null | Value::Bool(_) => {}
        }
    }
}

fn try_register(
    registry: &mut TypeRegistry,
    ty: TypeId,
    key: &str,
    prefix: &str,
    formatter: TypeId,
) {
    if registry.record(ty).name.is_some() {
        return;
    }
    // candidates are constructor-like objects or records already kind-tagged
    if !registry.record(ty).callable && registry.record(ty).kind.is_none() {
        return;
    }

    let record = registry.record(ty);
    if record.interfaces.is_empty()
        && record.methods.iter().any(|m| m == "format")
        && key.ends_with("Formatter")
    {
        let record = registry.record_mut(ty);
        if record.kind.is_none() {
            record.kind = Some(TypeKind::Class);
        }
        record.interfaces = vec![formatter];
    }

    if registry.record(ty).kind.is_none() {
        // inherit the class flag from a registered class base; the root
        // object seed does not count as one
        if let Some(base) = registry.record(ty).base {
            if base != registry.object_type()
                && registry.record(base).kind == Some(TypeKind::Class)
            {
                registry.record_mut(ty).kind = Some(TypeKind::Class);
            }
        }
    }

    if registry.record(ty).kind.is_some() {
        let full_name = format!("{prefix}{key}");
        registry.set_type_name(ty, &full_name);
    }
}

/// Collect every type object reachable under uppercase-named keys of `root`
pub fn get_types_under(heap: &Heap, root: ObjectId) -> Vec<TypeId> {
    let mut result = Vec::new();
    collect(heap, root, &mut result);
    result
}

fn collect(heap: &Heap, node: ObjectId, result: &mut Vec<TypeId>) {
    for (key, value) in heap.get(node).props() {
        if !key.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
            continue;
        }
        match value {
            Value::Type(ty) => result.push(*ty),
            Value::Object(child) => collect(heap, *child, result),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Object;

    fn namespace(heap: &mut Heap) -> ObjectId {
        heap.alloc(Object::new())
    }

    #[test]
    fn test_formatter_heuristic_registers_class() {
        let mut registry = TypeRegistry::new();
        let mut heap = Heap::new();

        let ty = registry.declare(Some("UrlFormatter"), true);
        registry.record_mut(ty).methods.push("format".to_string());

        let root = namespace(&mut heap);
        heap.get_mut(root).set_prop("UrlFormatter", Value::Type(ty));

        initialize_types(&mut registry, &heap, root, "App.", 3);

        let formatter = registry.get_type(FORMATTER_INTERFACE).unwrap();
        assert_eq!(registry.get_type("App.UrlFormatter"), Some(ty));
        assert_eq!(registry.record(ty).kind, Some(TypeKind::Class));
        assert_eq!(registry.record(ty).interfaces, vec![formatter]);
    }

    #[test]
    fn test_format_method_without_suffix_not_registered() {
        let mut registry = TypeRegistry::new();
        let mut heap = Heap::new();

        let ty = registry.declare(Some("UrlHelper"), true);
        registry.record_mut(ty).methods.push("format".to_string());

        let root = namespace(&mut heap);
        heap.get_mut(root).set_prop("UrlHelper", Value::Type(ty));

        initialize_types(&mut registry, &heap, root, "App.", 3);
        assert_eq!(registry.get_type("App.UrlHelper"), None);
        assert!(registry.record(ty).name.is_none());
    }

    #[test]
    fn test_base_class_flag_is_inherited() {
        let mut registry = TypeRegistry::new();
        let mut heap = Heap::new();

        let base = registry.declare(Some("Widget"), true);
        registry.register_class(base, "App.Widget", &[]);
        let derived = registry.declare_with_base(Some("MoneyEditor"), true, base);
        // a loose callable whose base chain stops at the root object seed
        let loose = registry.declare(Some("Helper"), true);

        let root = namespace(&mut heap);
        heap.get_mut(root).set_prop("MoneyEditor", Value::Type(derived));
        heap.get_mut(root).set_prop("Helper", Value::Type(loose));

        initialize_types(&mut registry, &heap, root, "App.", 3);

        assert_eq!(registry.get_type("App.MoneyEditor"), Some(derived));
        assert_eq!(registry.record(derived).kind, Some(TypeKind::Class));
        assert_eq!(registry.get_type("App.Helper"), None);
    }

    #[test]
    fn test_walk_descends_namespaces_with_depth_limit() {
        let mut registry = TypeRegistry::new();
        let mut heap = Heap::new();

        let base = registry.declare(Some("Widget"), true);
        registry.register_class(base, "App.Widget", &[]);
        let shallow = registry.declare_with_base(Some("ShallowEditor"), true, base);
        let deep = registry.declare_with_base(Some("DeepEditor"), true, base);

        let inner = namespace(&mut heap);
        heap.get_mut(inner).set_prop("DeepEditor", Value::Type(deep));
        let middle = namespace(&mut heap);
        heap.get_mut(middle).set_prop("ShallowEditor", Value::Type(shallow));
        heap.get_mut(middle).set_prop("Inner", Value::Object(inner));
        let root = namespace(&mut heap);
        heap.get_mut(root).set_prop("Forms", Value::Object(middle));

        initialize_types(&mut registry, &heap, root, "App.", 1);

        assert_eq!(registry.get_type("App.Forms.ShallowEditor"), Some(shallow));
        // depth limit stops before the inner namespace
        assert_eq!(registry.get_type("App.Forms.Inner.DeepEditor"), None);

        initialize_types(&mut registry, &heap, root, "App.", 5);
        assert_eq!(registry.get_type("App.Forms.Inner.DeepEditor"), Some(deep));
    }

    #[test]
    fn test_skips_marker_lowercase_and_value_children() {
        let mut registry = TypeRegistry::new();
        let mut heap = Heap::new();

        let base = registry.declare(Some("Widget"), true);
        registry.register_class(base, "App.Widget", &[]);
        let hidden = registry.declare_with_base(Some("Hidden"), true, base);
        let lower = registry.declare_with_base(Some("lower"), true, base);

        let root = namespace(&mut heap);
        heap.get_mut(root).set_prop("Hidden$Type", Value::Type(hidden));
        heap.get_mut(root).set_prop("lowerType", Value::Type(lower));
        heap.get_mut(root).set_prop("Count", Value::Number(3.0));
        heap.get_mut(root)
            .set_prop("Names", Value::Array(vec![Value::Str("x".to_string())]));

        initialize_types(&mut registry, &heap, root, "", 3);

        assert!(registry.record(hidden).name.is_none());
        assert!(registry.record(lower).name.is_none());
    }

    #[test]
    fn test_scan_is_idempotent() {
        let mut registry = TypeRegistry::new();
        let mut heap = Heap::new();

        let ty = registry.declare(Some("RowFormatter"), true);
        registry.record_mut(ty).methods.push("format".to_string());

        let root = namespace(&mut heap);
        heap.get_mut(root).set_prop("RowFormatter", Value::Type(ty));

        initialize_types(&mut registry, &heap, root, "App.", 3);
        let first_types = registry.get_types();
        initialize_types(&mut registry, &heap, root, "App.", 3);

        assert_eq!(registry.get_types(), first_types);
        assert_eq!(registry.full_name(ty), "App.RowFormatter");
    }

    #[test]
    fn test_get_types_under_collects_type_objects() {
        let mut registry = TypeRegistry::new();
        let mut heap = Heap::new();

        let a = registry.declare(Some("A"), true);
        let b = registry.declare(Some("B"), true);

        let inner = namespace(&mut heap);
        heap.get_mut(inner).set_prop("B", Value::Type(b));
        let root = namespace(&mut heap);
        heap.get_mut(root).set_prop("A", Value::Type(a));
        heap.get_mut(root).set_prop("Nested", Value::Object(inner));
        heap.get_mut(root).set_prop("skipped", Value::Type(b));

        assert_eq!(get_types_under(&heap, root), vec![a, b]);
    }
}
