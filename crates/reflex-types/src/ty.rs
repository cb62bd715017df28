//! Core type definitions for the Reflex object model

use std::fmt;
use std::ops::{BitAnd, BitOr};

/// Unique identifier for a type record in a registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(pub(crate) u32);

impl TypeId {
    /// Raw index of this id within its registry's arena
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

/// Kind of a registered type
///
/// Replaces the legacy tri-state flag (`false` = class, `true` = interface,
/// `null` = enum). An unregistered record has no kind at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// A constructible class type
    Class,
    /// A capability-marker interface; assignability is determined by the
    /// candidate's own declared interface list, single level only
    Interface,
    /// An enumeration of named integral values
    Enum,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Class => write!(f, "class"),
            TypeKind::Interface => write!(f, "interface"),
            TypeKind::Enum => write!(f, "enum"),
        }
    }
}

/// Bitmask of member kinds, composable with `|`
///
/// The numeric values match the wire/metadata convention consumed by
/// property grids: fields are bit 2, properties bit 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MemberKind(pub u32);

impl MemberKind {
    /// No member kind set
    pub const NONE: MemberKind = MemberKind(0);
    /// A plain data field
    pub const FIELD: MemberKind = MemberKind(4);
    /// A property backed by getter/setter accessors
    pub const PROPERTY: MemberKind = MemberKind(16);

    /// True if no kind bit is set
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if any kind bit is shared with `other`
    pub fn intersects(self, other: MemberKind) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for MemberKind {
    type Output = MemberKind;

    fn bitor(self, rhs: MemberKind) -> MemberKind {
        MemberKind(self.0 | rhs.0)
    }
}

impl BitAnd for MemberKind {
    type Output = MemberKind;

    fn bitand(self, rhs: MemberKind) -> MemberKind {
        MemberKind(self.0 & rhs.0)
    }
}

/// A single type record in the registry arena
///
/// Carries the explicit relationships the legacy runtime recovered from the
/// host environment: the parent link replaces prototype-chain walking, and
/// the structural method list is the declared capability set the
/// auto-discovery scanner inspects.
#[derive(Debug, Clone, Default)]
pub struct TypeRecord {
    /// Registered full name, set at registration time
    pub name: Option<String>,
    /// Construction-time name, used as the full-name fallback
    pub native_name: Option<String>,
    /// Kind once registered or inferred; `None` means unregistered
    pub kind: Option<TypeKind>,
    /// Declared interfaces, deduplicated, first-seen order
    pub interfaces: Vec<TypeId>,
    /// Explicit parent link
    pub base: Option<TypeId>,
    /// Whether the type is constructor-like (vs a plain object type)
    pub callable: bool,
    /// Structural method names exposed by the type's instances
    pub methods: Vec<String>,
    /// Named integral entries, declaration order; enums only
    pub enum_entries: Vec<(String, i32)>,
}

impl TypeRecord {
    /// True once the record has been registered (or inferred) as an interface
    pub fn is_interface(&self) -> bool {
        self.kind == Some(TypeKind::Interface)
    }

    /// True once the record has been registered as an enum
    pub fn is_enum(&self) -> bool {
        self.kind == Some(TypeKind::Enum)
    }
}
