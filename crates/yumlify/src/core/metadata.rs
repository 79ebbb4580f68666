//! Type metadata abstraction
//!
//! The builder never inspects types directly. Everything it knows about a type
//! comes from a [`TypeMetadataProvider`], which hands out structured
//! [`TypeDescriptor`]s for opaque [`TypeRef`] handles.

use std::fmt;

use super::DiagramError;

/// Opaque handle to a described type
///
/// Equality is handle identity: two distinct types that happen to share a
/// name never compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeRef(u32);

impl TypeRef {
    /// Create a handle from a provider slot index
    pub fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// Provider slot index of this handle
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Broad category of a type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum TypeKind {
    /// Reference type with identity; the only kind drawn as a class block
    #[default]
    Class,
    Interface,
    /// User-defined value type (struct)
    ValueType,
    Enum,
    /// Built-in scalar such as `Int32` or `Boolean`
    Primitive,
}

impl TypeKind {
    /// Returns true if types of this kind are drawn as class blocks
    pub fn is_class_like(&self) -> bool {
        matches!(self, TypeKind::Class)
    }

    /// Parse a kind name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "class" => Some(TypeKind::Class),
            "interface" => Some(TypeKind::Interface),
            "struct" | "value" | "value_type" => Some(TypeKind::ValueType),
            "enum" => Some(TypeKind::Enum),
            "primitive" => Some(TypeKind::Primitive),
            _ => None,
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Class => write!(f, "class"),
            TypeKind::Interface => write!(f, "interface"),
            TypeKind::ValueType => write!(f, "struct"),
            TypeKind::Enum => write!(f, "enum"),
            TypeKind::Primitive => write!(f, "primitive"),
        }
    }
}

/// Declared visibility of a method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Internal,
    Private,
}

impl Visibility {
    /// Only `Public` members count as public in a member summary
    pub fn is_public(&self) -> bool {
        matches!(self, Visibility::Public)
    }

    /// Parse a visibility keyword (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "public" => Some(Visibility::Public),
            "protected" => Some(Visibility::Protected),
            "internal" => Some(Visibility::Internal),
            "private" => Some(Visibility::Private),
            _ => None,
        }
    }
}

/// A declared property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyInfo {
    pub name: String,
    pub value_type: TypeRef,
    /// Has an externally accessible setter
    pub settable: bool,
    pub is_static: bool,
}

impl PropertyInfo {
    pub fn new(name: impl Into<String>, value_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            value_type,
            settable: true,
            is_static: false,
        }
    }

    pub fn read_only(mut self) -> Self {
        self.settable = false;
        self
    }

    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }
}

/// A declared method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInfo {
    pub name: String,
    pub visibility: Visibility,
    pub is_static: bool,
    /// Compiler-generated member such as a property or event accessor
    pub special: bool,
}

impl MethodInfo {
    pub fn new(name: impl Into<String>, visibility: Visibility) -> Self {
        Self {
            name: name.into(),
            visibility,
            is_static: false,
            special: false,
        }
    }

    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn special(mut self) -> Self {
        self.special = true;
        self
    }
}

/// Everything the builder may ask about one type
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeDescriptor {
    pub name: String,
    pub kind: TypeKind,
    pub base: Option<TypeRef>,
    /// Implemented interfaces in declaration order
    pub interfaces: Vec<TypeRef>,
    /// Declared (non-inherited) properties in declaration order
    pub properties: Vec<PropertyInfo>,
    /// Declared (non-inherited) methods in declaration order
    pub methods: Vec<MethodInfo>,
    /// Generic definition this type was instantiated from, if any
    pub generic_definition: Option<TypeRef>,
    pub generic_arguments: Vec<TypeRef>,
    /// Implements the enumerable capability
    pub enumerable: bool,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Self::default()
        }
    }

    /// Returns true if this is a constructed generic type
    pub fn is_generic(&self) -> bool {
        !self.generic_arguments.is_empty()
    }
}

/// Source of type metadata
///
/// Implementations must be pure: the same handle always describes the same
/// type. A handle the provider does not know is reported as
/// [`DiagramError::UnknownType`].
pub trait TypeMetadataProvider {
    /// Describe a type
    fn describe(&self, ty: TypeRef) -> Result<&TypeDescriptor, DiagramError>;

    /// Walk the base-type chain of `ty`, nearest ancestor first
    fn ancestors(&self, ty: TypeRef) -> Result<Vec<TypeRef>, DiagramError> {
        let mut chain = Vec::new();
        let mut current = self.describe(ty)?.base;
        while let Some(base) = current {
            // A malformed provider must not send us round in circles
            if base == ty || chain.contains(&base) {
                break;
            }
            chain.push(base);
            current = self.describe(base)?.base;
        }
        Ok(chain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Slots(Vec<TypeDescriptor>);

    impl TypeMetadataProvider for Slots {
        fn describe(&self, ty: TypeRef) -> Result<&TypeDescriptor, DiagramError> {
            self.0
                .get(ty.index())
                .ok_or_else(|| DiagramError::unknown_type(ty))
        }
    }

    #[test]
    fn test_type_ref_identity() {
        assert_eq!(TypeRef::from_index(3), TypeRef::from_index(3));
        assert_ne!(TypeRef::from_index(3), TypeRef::from_index(4));
        assert_eq!(TypeRef::from_index(3).index(), 3);
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let mut animal = TypeDescriptor::new("Animal", TypeKind::Class);
        animal.base = None;
        let mut dog = TypeDescriptor::new("Dog", TypeKind::Class);
        dog.base = Some(TypeRef::from_index(0));
        let mut puppy = TypeDescriptor::new("Puppy", TypeKind::Class);
        puppy.base = Some(TypeRef::from_index(1));
        let slots = Slots(vec![animal, dog, puppy]);

        let chain = slots.ancestors(TypeRef::from_index(2)).unwrap();
        assert_eq!(chain, vec![TypeRef::from_index(1), TypeRef::from_index(0)]);
    }

    #[test]
    fn test_ancestors_stops_on_cycle() {
        let mut a = TypeDescriptor::new("A", TypeKind::Class);
        a.base = Some(TypeRef::from_index(1));
        let mut b = TypeDescriptor::new("B", TypeKind::Class);
        b.base = Some(TypeRef::from_index(0));
        let slots = Slots(vec![a, b]);

        let chain = slots.ancestors(TypeRef::from_index(0)).unwrap();
        assert_eq!(chain, vec![TypeRef::from_index(1)]);
    }

    #[test]
    fn test_unknown_handle() {
        let slots = Slots(vec![]);
        assert!(matches!(
            slots.describe(TypeRef::from_index(0)),
            Err(DiagramError::UnknownType { .. })
        ));
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!(TypeKind::from_str("Class"), Some(TypeKind::Class));
        assert_eq!(TypeKind::from_str("struct"), Some(TypeKind::ValueType));
        assert_eq!(TypeKind::from_str("widget"), None);
        assert!(TypeKind::Class.is_class_like());
        assert!(!TypeKind::Interface.is_class_like());
    }

    #[test]
    fn test_visibility() {
        assert!(Visibility::Public.is_public());
        assert!(!Visibility::Protected.is_public());
        assert_eq!(Visibility::from_str("PRIVATE"), Some(Visibility::Private));
    }
}
