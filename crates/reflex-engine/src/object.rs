//! Dynamic object graph
//!
//! Arena-backed values forming the namespace-like graph the scanner walks
//! and the instance model the reflective operations run against. Objects
//! keep their own-enumerable properties in insertion order.

use reflex_types::TypeId;

/// Handle to an object in a [`Heap`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub(crate) u32);

impl ObjectId {
    /// Raw index of this id within its heap
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A dynamic value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value
    Null,
    /// Boolean
    Bool(bool),
    /// Numeric value
    Number(f64),
    /// String value
    Str(String),
    /// Array of values
    Array(Vec<Value>),
    /// Point in time, milliseconds since the epoch
    Date(i64),
    /// A type object
    Type(TypeId),
    /// Reference to a heap object
    Object(ObjectId),
}

impl Value {
    /// True for [`Value::Null`]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The type id if this is a type object
    pub fn as_type(&self) -> Option<TypeId> {
        match self {
            Value::Type(ty) => Some(*ty),
            _ => None,
        }
    }

    /// The object handle if this is an object reference
    pub fn as_object(&self) -> Option<ObjectId> {
        match self {
            Value::Object(id) => Some(*id),
            _ => None,
        }
    }
}

/// A heap object: an optional runtime type tag plus ordered properties
#[derive(Debug, Clone, Default)]
pub struct Object {
    /// Runtime type of the instance, absent for untyped objects and
    /// namespace nodes
    pub ty: Option<TypeId>,
    props: Vec<(String, Value)>,
}

impl Object {
    /// An untyped object with no properties
    pub fn new() -> Self {
        Object::default()
    }

    /// An instance of `ty` with no properties
    pub fn with_type(ty: TypeId) -> Self {
        Object {
            ty: Some(ty),
            props: Vec::new(),
        }
    }

    /// Property value by name
    pub fn prop(&self, name: &str) -> Option<&Value> {
        self.props
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Set a property, replacing an existing one of the same name
    pub fn set_prop(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.props.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.props.push((name, value)),
        }
    }

    /// Own-enumerable properties in insertion order
    pub fn props(&self) -> &[(String, Value)] {
        &self.props
    }
}

/// Arena of objects with a designated global namespace root
#[derive(Debug, Default)]
pub struct Heap {
    objects: Vec<Object>,
    global: Option<ObjectId>,
}

impl Heap {
    /// An empty heap with no global root
    pub fn new() -> Self {
        Heap::default()
    }

    /// Allocate an object, returning its handle
    pub fn alloc(&mut self, object: Object) -> ObjectId {
        let id = ObjectId(self.objects.len() as u32);
        self.objects.push(object);
        id
    }

    /// Borrow an object
    pub fn get(&self, id: ObjectId) -> &Object {
        &self.objects[id.index()]
    }

    /// Mutably borrow an object
    pub fn get_mut(&mut self, id: ObjectId) -> &mut Object {
        &mut self.objects[id.index()]
    }

    /// Designate the ambient global namespace root
    pub fn set_global(&mut self, id: ObjectId) {
        self.global = Some(id);
    }

    /// The ambient global namespace root, if designated
    pub fn global(&self) -> Option<ObjectId> {
        self.global
    }

    /// Resolve a dotted path by successive property lookup
    ///
    /// Returns `None` as soon as any segment is missing or an intermediate
    /// segment is not an object.
    pub fn get_nested(&self, from: ObjectId, path: &str) -> Option<Value> {
        let mut current = Value::Object(from);
        for segment in path.split('.') {
            let id = current.as_object()?;
            current = self.get(id).prop(segment)?.clone();
        }
        Some(current)
    }
}
