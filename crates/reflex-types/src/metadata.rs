//! Metadata side-table for types
//!
//! Attributes and member descriptors are attached per-type in a store keyed
//! by [`TypeId`], never on the type record itself. Inheritance is resolved
//! at query time by walking explicit parent links.

use rustc_hash::FxHashMap;

use crate::assignability::{base_type, is_assignable_from};
use crate::registry::TypeRegistry;
use crate::ty::{MemberKind, TypeId};

/// An attribute instance attached to a type or member
///
/// Carries its runtime type and an optional payload. Attributes are small
/// value objects; merge de-duplication compares by value.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Runtime type of the attribute instance
    pub ty: TypeId,
    /// Optional payload, e.g. a display name or category
    pub payload: Option<String>,
}

impl Attribute {
    /// Attribute with no payload
    pub fn new(ty: TypeId) -> Self {
        Attribute { ty, payload: None }
    }

    /// Attribute carrying a payload string
    pub fn with_payload(ty: TypeId, payload: impl Into<String>) -> Self {
        Attribute {
            ty,
            payload: Some(payload.into()),
        }
    }
}

/// A member descriptor: a named field or property with its own attributes
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    /// Member name, unique per type at a given inheritance level
    pub name: String,
    /// Kind bitmask; [`MemberKind::NONE`] means unspecified
    pub kind: MemberKind,
    /// Attributes attached to this member
    pub attrs: Vec<Attribute>,
    /// Getter accessor name, properties only
    pub getter: Option<String>,
    /// Setter accessor name, properties only
    pub setter: Option<String>,
}

impl Member {
    /// A field member with no attributes
    pub fn field(name: impl Into<String>) -> Self {
        Member {
            name: name.into(),
            kind: MemberKind::FIELD,
            attrs: Vec::new(),
            getter: None,
            setter: None,
        }
    }

    /// A property member with no accessors set
    pub fn property(name: impl Into<String>) -> Self {
        Member {
            name: name.into(),
            kind: MemberKind::PROPERTY,
            attrs: Vec::new(),
            getter: None,
            setter: None,
        }
    }

    /// Attach an attribute, builder style
    pub fn with_attr(mut self, attr: Attribute) -> Self {
        self.attrs.push(attr);
        self
    }
}

/// Metadata attached to a single type
#[derive(Debug, Clone, Default)]
pub struct TypeMetadata {
    /// Attribute instances, attach order
    pub attrs: Vec<Attribute>,
    /// Member descriptors, attach order
    pub members: Vec<Member>,
    /// Whether the type is a flags enum
    pub enum_flags: bool,
}

/// Store of per-type metadata
#[derive(Debug, Default)]
pub struct MetadataStore {
    entries: FxHashMap<TypeId, TypeMetadata>,
}

impl MetadataStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata for `ty`, if any was ever attached
    pub fn get(&self, ty: TypeId) -> Option<&TypeMetadata> {
        self.entries.get(&ty)
    }

    /// Metadata for `ty`, created on first use
    pub fn get_or_create(&mut self, ty: TypeId) -> &mut TypeMetadata {
        self.entries.entry(ty).or_default()
    }

    /// Attach an attribute instance to `ty`
    pub fn add_attribute(&mut self, ty: TypeId, attr: Attribute) {
        self.get_or_create(ty).attrs.push(attr);
    }

    /// Mark `ty` as a flags enum
    pub fn set_enum_flags(&mut self, ty: TypeId, flags: bool) {
        self.get_or_create(ty).enum_flags = flags;
    }

    /// Whether `ty` was marked as a flags enum
    pub fn enum_flags(&self, ty: TypeId) -> bool {
        self.entries.get(&ty).is_some_and(|m| m.enum_flags)
    }

    /// Add a member to `ty`, merging into an existing member of the same name
    ///
    /// Merge overwrites the kind and accessors when supplied and unions the
    /// attribute lists, de-duplicated; it never produces a second entry for
    /// the name.
    pub fn add_member(&mut self, ty: TypeId, member: Member) -> &Member {
        let metadata = self.get_or_create(ty);

        let position = metadata.members.iter().position(|m| m.name == member.name);
        match position {
            Some(index) => {
                let existing = &mut metadata.members[index];
                if !member.kind.is_empty() {
                    existing.kind = member.kind;
                }
                if !member.attrs.is_empty() {
                    for attr in member.attrs {
                        if !existing.attrs.contains(&attr) {
                            existing.attrs.push(attr);
                        }
                    }
                }
                if member.getter.is_some() {
                    existing.getter = member.getter;
                }
                if member.setter.is_some() {
                    existing.setter = member.setter;
                }
                &metadata.members[index]
            }
            None => {
                metadata.members.push(member);
                let index = metadata.members.len() - 1;
                &metadata.members[index]
            }
        }
    }

    /// Register a property member whose accessor names default to
    /// `get_<name>` / `set_<name>`
    pub fn add_property(
        &mut self,
        ty: TypeId,
        name: &str,
        getter: Option<&str>,
        setter: Option<&str>,
    ) -> &Member {
        let member = Member {
            name: name.to_string(),
            kind: MemberKind::PROPERTY,
            attrs: Vec::new(),
            getter: Some(getter.map(str::to_string).unwrap_or_else(|| format!("get_{name}"))),
            setter: Some(setter.map(str::to_string).unwrap_or_else(|| format!("set_{name}"))),
        };
        self.add_member(ty, member)
    }

    /// Attributes of `ty`, optionally filtered by attribute type and merged
    /// with inherited attributes
    ///
    /// With `inherit`, base-type attributes come first; an own attribute
    /// removes every inherited attribute that is an instance of its runtime
    /// type before being appended (own overrides inherited, by type).
    pub fn get_attributes(
        &self,
        registry: &TypeRegistry,
        ty: TypeId,
        attr_type: Option<TypeId>,
        inherit: bool,
    ) -> Vec<Attribute> {
        let mut result = Vec::new();
        if inherit {
            if let Some(base) = base_type(registry, ty) {
                result = self.get_attributes(registry, base, attr_type, true);
            }
        }

        if let Some(metadata) = self.entries.get(&ty) {
            for attr in &metadata.attrs {
                let matches = match attr_type {
                    None => true,
                    Some(filter) => is_assignable_from(registry, filter, attr.ty),
                };
                if matches {
                    result.retain(|prior| !is_assignable_from(registry, attr.ty, prior.ty));
                    result.push(attr.clone());
                }
            }
        }

        result
    }

    /// Members of `ty` whose kind intersects `mask`, inherited first
    ///
    /// Base-type members are collected with bit 1 of the mask cleared, a
    /// legacy quirk preserved as-is. An own member with a name already
    /// collected replaces the inherited entry rather than duplicating it.
    pub fn get_members(
        &self,
        registry: &TypeRegistry,
        ty: TypeId,
        mask: MemberKind,
    ) -> Vec<Member> {
        let mut result = match base_type(registry, ty) {
            Some(base) => self.get_members(registry, base, MemberKind(mask.0 & !1)),
            None => Vec::new(),
        };

        if let Some(metadata) = self.entries.get(&ty) {
            for member in &metadata.members {
                if mask.intersects(member.kind) {
                    result.retain(|prior| prior.name != member.name);
                    result.push(member.clone());
                }
            }
        }

        result
    }
}
