//! In-memory type registry
//!
//! A [`TypeMetadataProvider`] whose types are declared up front through a
//! small builder API. Every registration occupies one slot and the slot index
//! is the [`TypeRef`], so identity never depends on the name.

use std::collections::HashMap;

use tracing::trace;

use crate::core::{
    DiagramError, MethodInfo, PropertyInfo, TypeDescriptor, TypeKind, TypeMetadataProvider,
    TypeRef, Visibility,
};

/// Registry of described types
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: Vec<TypeDescriptor>,
    instances: HashMap<(TypeRef, Vec<TypeRef>), TypeRef>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fully built descriptor
    pub fn register(&mut self, descriptor: TypeDescriptor) -> TypeRef {
        let ty = TypeRef::from_index(self.types.len());
        trace!(name = %descriptor.name, kind = %descriptor.kind, %ty, "Registered type");
        self.types.push(descriptor);
        ty
    }

    /// Declare a class
    pub fn class(&mut self, name: impl Into<String>) -> TypeRef {
        self.register(TypeDescriptor::new(name, TypeKind::Class))
    }

    /// Declare an interface
    pub fn interface(&mut self, name: impl Into<String>) -> TypeRef {
        self.register(TypeDescriptor::new(name, TypeKind::Interface))
    }

    /// Declare a built-in scalar type
    pub fn primitive(&mut self, name: impl Into<String>) -> TypeRef {
        self.register(TypeDescriptor::new(name, TypeKind::Primitive))
    }

    /// Declare a user value type
    pub fn value_type(&mut self, name: impl Into<String>) -> TypeRef {
        self.register(TypeDescriptor::new(name, TypeKind::ValueType))
    }

    /// Declare an open generic class such as `List`
    pub fn generic_definition(&mut self, name: impl Into<String>, enumerable: bool) -> TypeRef {
        let mut descriptor = TypeDescriptor::new(name, TypeKind::Class);
        descriptor.enumerable = enumerable;
        self.register(descriptor)
    }

    /// Construct `definition<arguments...>`
    ///
    /// The same definition and arguments always yield the same handle.
    pub fn instantiate(
        &mut self,
        definition: TypeRef,
        arguments: &[TypeRef],
    ) -> Result<TypeRef, DiagramError> {
        let key = (definition, arguments.to_vec());
        if let Some(existing) = self.instances.get(&key) {
            return Ok(*existing);
        }
        for argument in arguments {
            self.describe(*argument)?;
        }

        let template = self.describe(definition)?;
        let descriptor = TypeDescriptor {
            name: template.name.clone(),
            kind: template.kind,
            base: template.base,
            interfaces: template.interfaces.clone(),
            enumerable: template.enumerable,
            generic_definition: Some(definition),
            generic_arguments: arguments.to_vec(),
            ..TypeDescriptor::default()
        };
        let ty = self.register(descriptor);
        self.instances.insert(key, ty);
        Ok(ty)
    }

    /// Edit a registered type
    pub fn edit(&mut self, ty: TypeRef) -> Result<TypeBuilder<'_>, DiagramError> {
        let descriptor = self
            .types
            .get_mut(ty.index())
            .ok_or_else(|| DiagramError::unknown_type(ty))?;
        Ok(TypeBuilder { descriptor })
    }

    /// Find the first type registered under `name`
    pub fn find(&self, name: &str) -> Option<TypeRef> {
        self.types
            .iter()
            .position(|d| d.name == name && d.generic_definition.is_none())
            .map(TypeRef::from_index)
    }

    /// Iterate over all handles with their descriptors
    pub fn iter(&self) -> impl Iterator<Item = (TypeRef, &TypeDescriptor)> {
        self.types
            .iter()
            .enumerate()
            .map(|(i, d)| (TypeRef::from_index(i), d))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeMetadataProvider for TypeRegistry {
    fn describe(&self, ty: TypeRef) -> Result<&TypeDescriptor, DiagramError> {
        self.types
            .get(ty.index())
            .ok_or_else(|| DiagramError::unknown_type(ty))
    }
}

/// Mutable view used to declare members and supertypes
pub struct TypeBuilder<'a> {
    descriptor: &'a mut TypeDescriptor,
}

impl TypeBuilder<'_> {
    pub fn base(self, base: TypeRef) -> Self {
        self.descriptor.base = Some(base);
        self
    }

    pub fn implements(self, interface: TypeRef) -> Self {
        self.descriptor.interfaces.push(interface);
        self
    }

    /// Declare that the type is enumerable
    pub fn enumerable(self) -> Self {
        self.descriptor.enumerable = true;
        self
    }

    /// Property with a public setter
    pub fn property(self, name: impl Into<String>, value_type: TypeRef) -> Self {
        self.descriptor
            .properties
            .push(PropertyInfo::new(name, value_type));
        self
    }

    /// Property without an externally accessible setter
    pub fn readonly_property(self, name: impl Into<String>, value_type: TypeRef) -> Self {
        self.descriptor
            .properties
            .push(PropertyInfo::new(name, value_type).read_only());
        self
    }

    pub fn static_property(self, name: impl Into<String>, value_type: TypeRef) -> Self {
        self.descriptor
            .properties
            .push(PropertyInfo::new(name, value_type).with_static());
        self
    }

    pub fn method(self, name: impl Into<String>, visibility: Visibility) -> Self {
        self.descriptor
            .methods
            .push(MethodInfo::new(name, visibility));
        self
    }

    pub fn static_method(self, name: impl Into<String>, visibility: Visibility) -> Self {
        self.descriptor
            .methods
            .push(MethodInfo::new(name, visibility).with_static());
        self
    }

    /// Compiler-generated accessor, never shown in member summaries
    pub fn accessor(self, name: impl Into<String>) -> Self {
        self.descriptor
            .methods
            .push(MethodInfo::new(name, Visibility::Public).special());
        self
    }

    pub fn push_property(self, property: PropertyInfo) -> Self {
        self.descriptor.properties.push(property);
        self
    }

    pub fn push_method(self, method: MethodInfo) -> Self {
        self.descriptor.methods.push(method);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_distinct_identity() {
        let mut registry = TypeRegistry::new();
        let a = registry.class("Node");
        let b = registry.class("Node");
        assert_ne!(a, b);
        assert_eq!(registry.find("Node"), Some(a));
    }

    #[test]
    fn test_instantiate_interns() {
        let mut registry = TypeRegistry::new();
        let list = registry.generic_definition("List`1", true);
        let dog = registry.class("Dog");
        let first = registry.instantiate(list, &[dog]).unwrap();
        let second = registry.instantiate(list, &[dog]).unwrap();
        assert_eq!(first, second);

        let descriptor = registry.describe(first).unwrap();
        assert!(descriptor.enumerable);
        assert_eq!(descriptor.generic_arguments, vec![dog]);
        assert_eq!(descriptor.generic_definition, Some(list));
    }

    #[test]
    fn test_instantiate_unknown_argument() {
        let mut registry = TypeRegistry::new();
        let list = registry.generic_definition("List`1", true);
        let result = registry.instantiate(list, &[TypeRef::from_index(99)]);
        assert!(matches!(result, Err(DiagramError::UnknownType { .. })));
    }

    #[test]
    fn test_builder_declares_members() {
        let mut registry = TypeRegistry::new();
        let string = registry.class("String");
        let animal = registry.class("Animal");
        let dog = registry.class("Dog");
        registry
            .edit(dog)
            .unwrap()
            .base(animal)
            .property("Breed", string)
            .readonly_property("Id", string)
            .method("Bark", Visibility::Public)
            .accessor("get_Breed");

        let descriptor = registry.describe(dog).unwrap();
        assert_eq!(descriptor.base, Some(animal));
        assert_eq!(descriptor.properties.len(), 2);
        assert!(!descriptor.properties[1].settable);
        assert!(descriptor.methods[1].special);
    }

    #[test]
    fn test_enumerable_marked_after_declaration() {
        let mut registry = TypeRegistry::new();
        let point = registry.value_type("Point");
        let bag = registry.generic_definition("Bag`1", false);
        registry.edit(bag).unwrap().enumerable();

        let points = registry.instantiate(bag, &[point]).unwrap();
        let descriptor = registry.describe(points).unwrap();
        assert!(descriptor.enumerable);
        assert_eq!(descriptor.generic_arguments, vec![point]);
        assert_eq!(registry.describe(point).unwrap().kind, TypeKind::ValueType);
        assert!(!registry.describe(point).unwrap().kind.is_class_like());
    }

    #[test]
    fn test_edit_unknown_type() {
        let mut registry = TypeRegistry::new();
        assert!(registry.edit(TypeRef::from_index(0)).is_err());
    }
}
