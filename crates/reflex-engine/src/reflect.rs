//! Instance-level reflective operations
//!
//! Type lookup against the registry and the object graph, runtime type of
//! an instance, instance checks, and casts. Lookups are failure-tolerant:
//! "not found" is a normal outcome here, not an error.

use reflex_types::{is_assignable_from, ReflectError, TypeId, TypeRegistry};

use crate::object::{Heap, ObjectId, Value};

/// Resolve a type by name
///
/// With no explicit search target the registry is consulted first and the
/// heap's global namespace root is the fallback. Dotted names drill down
/// through object properties; only callable type objects resolve.
pub fn get_type(
    registry: &TypeRegistry,
    heap: &Heap,
    name: &str,
    target: Option<ObjectId>,
) -> Option<TypeId> {
    let target = match target {
        Some(target) => target,
        None => {
            if let Some(ty) = registry.get_type(name) {
                return Some(ty);
            }
            heap.global()?
        }
    };

    match heap.get_nested(target, name) {
        Some(Value::Type(ty)) if registry.record(ty).callable => Some(ty),
        _ => None,
    }
}

/// Runtime type of an instance
///
/// Errors with [`ReflectError::NullReference`] for null. Instances with no
/// type tag, and primitive values, fall back to the root object type.
pub fn instance_type_of(
    registry: &TypeRegistry,
    heap: &Heap,
    instance: &Value,
) -> Result<TypeId, ReflectError> {
    match instance {
        Value::Null => Err(ReflectError::null_reference_msg("Cannot get type of null")),
        Value::Type(_) => Ok(registry.object_type()),
        Value::Object(id) => Ok(heap.get(*id).ty.unwrap_or_else(|| registry.object_type())),
        _ => Ok(registry.object_type()),
    }
}

/// Check whether `instance` is an instance of `ty`
///
/// False for null. Interfaces apply their declared-membership predicate to
/// the instance's runtime type; otherwise this is assignability of the
/// runtime type to `ty`.
pub fn is_instance_of(
    registry: &TypeRegistry,
    heap: &Heap,
    instance: &Value,
    ty: TypeId,
) -> bool {
    if instance.is_null() {
        return false;
    }
    match instance_type_of(registry, heap, instance) {
        Ok(runtime_ty) => is_assignable_from(registry, ty, runtime_ty),
        Err(_) => false,
    }
}

/// The instance when it is assignable to `ty`, else `None`
pub fn safe_cast(
    registry: &TypeRegistry,
    heap: &Heap,
    instance: Value,
    ty: TypeId,
) -> Option<Value> {
    if is_instance_of(registry, heap, &instance, ty) {
        Some(instance)
    } else {
        None
    }
}

/// The instance when null or assignable to `ty`; otherwise an
/// [`ReflectError::InvalidCast`] naming the target type
pub fn cast(
    registry: &TypeRegistry,
    heap: &Heap,
    instance: Value,
    ty: TypeId,
) -> Result<Value, ReflectError> {
    if instance.is_null() {
        return Ok(instance);
    }
    if is_instance_of(registry, heap, &instance, ty) {
        Ok(instance)
    } else {
        Err(ReflectError::InvalidCast {
            type_name: registry.full_name(ty),
        })
    }
}
