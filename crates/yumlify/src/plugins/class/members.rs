//! Member summaries
//!
//! Serializes the properties and methods of one type into the `;`-joined
//! member lists that sit inside a class block.

use crate::core::{
    DetailFlag, DetailLevel, DiagramError, DisplayNames, TypeMetadataProvider, TypeRef,
};

/// Formats member summaries for class blocks
pub struct MemberSerializer<'a, P: ?Sized> {
    provider: &'a P,
    names: &'a DisplayNames,
}

impl<'a, P> MemberSerializer<'a, P>
where
    P: TypeMetadataProvider + ?Sized,
{
    pub fn new(provider: &'a P, names: &'a DisplayNames) -> Self {
        Self { provider, names }
    }

    /// Declared instance properties as `- Name : Type` / `+ Name : Type`
    ///
    /// A property without an external setter is private. Private entries come
    /// first, each group sorted by name.
    pub fn properties(&self, ty: TypeRef, detail: DetailLevel) -> Result<String, DiagramError> {
        if !detail.wants_properties() {
            return Ok(String::new());
        }

        let descriptor = self.provider.describe(ty)?;
        let mut selected = Vec::new();
        for property in descriptor.properties.iter().filter(|p| !p.is_static) {
            let public = property.settable;
            if !wanted(
                detail,
                public,
                DetailFlag::PublicProperties,
                DetailFlag::PrivateProperties,
            ) {
                continue;
            }
            let type_name = self.names.display_name(self.provider, property.value_type)?;
            selected.push((public, property.name.as_str(), type_name));
        }

        selected.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
        Ok(selected
            .into_iter()
            .map(|(public, name, type_name)| {
                format!("{} {} : {}", marker(public), name, type_name)
            })
            .collect::<Vec<_>>()
            .join(";"))
    }

    /// Declared, non-special instance methods as `- Name()` / `+ Name()`
    pub fn methods(&self, ty: TypeRef, detail: DetailLevel) -> Result<String, DiagramError> {
        if !detail.wants_methods() {
            return Ok(String::new());
        }

        let descriptor = self.provider.describe(ty)?;
        let mut selected: Vec<(bool, &str)> = descriptor
            .methods
            .iter()
            .filter(|m| !m.is_static && !m.special)
            .map(|m| (m.visibility.is_public(), m.name.as_str()))
            .filter(|(public, _)| {
                wanted(
                    detail,
                    *public,
                    DetailFlag::PublicMethods,
                    DetailFlag::PrivateMethods,
                )
            })
            .collect();

        selected.sort();
        Ok(selected
            .into_iter()
            .map(|(public, name)| format!("{} {}()", marker(public), name))
            .collect::<Vec<_>>()
            .join(";"))
    }
}

fn wanted(
    detail: DetailLevel,
    public: bool,
    public_flag: DetailFlag,
    private_flag: DetailFlag,
) -> bool {
    if public {
        detail.contains(public_flag)
    } else {
        detail.contains(private_flag)
    }
}

fn marker(public: bool) -> char {
    if public {
        '+'
    } else {
        '-'
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Visibility;
    use crate::plugins::class::TypeRegistry;

    fn person() -> (TypeRegistry, TypeRef) {
        let mut registry = TypeRegistry::new();
        let string = registry.class("String");
        let int = registry.primitive("Int32");
        let person = registry.class("Person");
        registry
            .edit(person)
            .unwrap()
            .property("Name", string)
            .readonly_property("Id", int)
            .property("Age", int)
            .readonly_property("Created", string)
            .static_property("Count", int)
            .method("Save", Visibility::Public)
            .method("Validate", Visibility::Private)
            .method("Audit", Visibility::Protected)
            .method("Load", Visibility::Public)
            .accessor("get_Name")
            .static_method("Create", Visibility::Public);
        (registry, person)
    }

    #[test]
    fn test_properties_private_first_then_alphabetical() {
        let (registry, person) = person();
        let names = DisplayNames::new();
        let serializer = MemberSerializer::new(&registry, &names);
        let detail = DetailLevel::none()
            .with(DetailFlag::PublicProperties)
            .with(DetailFlag::PrivateProperties);

        assert_eq!(
            serializer.properties(person, detail).unwrap(),
            "- Created : String;- Id : Int32;+ Age : Int32;+ Name : String"
        );
    }

    #[test]
    fn test_properties_filtered_by_flag() {
        let (registry, person) = person();
        let names = DisplayNames::new();
        let serializer = MemberSerializer::new(&registry, &names);

        let public = serializer
            .properties(person, DetailFlag::PublicProperties.into())
            .unwrap();
        assert_eq!(public, "+ Age : Int32;+ Name : String");

        let private = serializer
            .properties(person, DetailFlag::PrivateProperties.into())
            .unwrap();
        assert_eq!(private, "- Created : String;- Id : Int32");
    }

    #[test]
    fn test_methods_skip_accessors_and_statics() {
        let (registry, person) = person();
        let names = DisplayNames::new();
        let serializer = MemberSerializer::new(&registry, &names);
        let detail = DetailLevel::none()
            .with(DetailFlag::PublicMethods)
            .with(DetailFlag::PrivateMethods);

        assert_eq!(
            serializer.methods(person, detail).unwrap(),
            "- Audit();- Validate();+ Load();+ Save()"
        );
    }

    #[test]
    fn test_nothing_requested_is_empty() {
        let (registry, person) = person();
        let names = DisplayNames::new();
        let serializer = MemberSerializer::new(&registry, &names);

        assert_eq!(serializer.properties(person, DetailLevel::none()).unwrap(), "");
        assert_eq!(
            serializer
                .methods(person, DetailFlag::PublicProperties.into())
                .unwrap(),
            ""
        );
    }

    #[test]
    fn test_generic_property_type_shorthand() {
        let mut registry = TypeRegistry::new();
        let list = registry.generic_definition("List`1", true);
        let dog = registry.class("Dog");
        let dogs = registry.instantiate(list, &[dog]).unwrap();
        let kennel = registry.class("Kennel");
        registry.edit(kennel).unwrap().property("Dogs", dogs);

        let names = DisplayNames::new();
        let serializer = MemberSerializer::new(&registry, &names);
        assert_eq!(
            serializer
                .properties(kennel, DetailFlag::PublicProperties.into())
                .unwrap(),
            "+ Dogs : List<Dog>"
        );
    }
}
