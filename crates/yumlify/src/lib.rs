//! yumlify - Turn type metadata into yUML class diagrams
//!
//! Describes a set of types, serializes the ones you ask for into a yUML
//! class diagram fragment and resolves that fragment to a diagram URL.
//!
//! # Quick Start
//!
//! ```rust
//! use yumlify::prelude::*;
//!
//! let mut registry = TypeRegistry::new();
//! let string = registry.class("String");
//! let animal = registry.class("Animal");
//! let dog = registry.class("Dog");
//! registry.edit(animal)?.property("Name", string);
//! registry.edit(dog)?.base(animal).property("Breed", string);
//!
//! let dsl = DiagramFragmentBuilder::new(&registry).build(
//!     &[animal, dog],
//!     DiagramStyle::default(),
//!     DetailFlag::PublicProperties.into(),
//! )?;
//! assert_eq!(
//!     dsl,
//!     "[Animal|+ Name : String],[Dog|+ Breed : String]^-[Animal|+ Name : String]"
//! );
//! # Ok::<(), yumlify::DiagramError>(())
//! ```
//!
//! # From a model file
//!
//! ```rust
//! let model = r#"{
//!     "types": [
//!         { "name": "Owner" },
//!         { "name": "Car", "properties": [{ "name": "Owner", "type": "Owner" }] }
//!     ],
//!     "diagram": ["Car", "Owner"]
//! }"#;
//! let dsl = yumlify::render_model(model, yumlify::DetailLevel::none()).unwrap();
//! assert_eq!(dsl, "[Car]->[Owner],[Owner]");
//! ```

pub mod core;
pub mod plugins;
pub mod resolver;

pub use crate::core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        DetailFlag, DetailLevel, DiagramError, DiagramStyle, Direction, DisplayNames, Palette,
        Scale, TypeKind, TypeMetadataProvider, TypeRef, Visibility,
    };
    pub use crate::plugins::class::{
        DiagramFragment, DiagramFragmentBuilder, Relationship, RelationshipKind, TypeModel,
        TypeRegistry,
    };
    pub use crate::resolver::{
        DiagramService, DiagramUriResolver, FragmentCache, MemoryFragmentCache,
        MokaFragmentCache, ResolverConfig, YumlClient, YumlResolver,
    };
}

/// Build the fragment for a JSON type model
///
/// # Example
/// ```rust
/// let model = r#"{"types":[{"name":"Animal"},{"name":"Dog","base":"Animal"}]}"#;
/// let dsl = yumlify::render_model(model, yumlify::DetailLevel::none()).unwrap();
/// assert_eq!(dsl, "[Animal],[Dog]^-[Animal]");
/// ```
pub fn render_model(json: &str, detail: DetailLevel) -> anyhow::Result<String> {
    use crate::plugins::class::{DiagramFragmentBuilder, TypeModel};

    let loaded = TypeModel::from_json(json)?.load()?;
    let dsl = DiagramFragmentBuilder::new(&loaded.registry).build(
        &loaded.roots,
        DiagramStyle::default(),
        detail,
    )?;
    Ok(dsl)
}

/// Build the fragment for a JSON type model and resolve it to a URL
///
/// Pass the same resolver across calls so repeated models hit its cache.
pub async fn resolve_model<S, C>(
    resolver: &resolver::DiagramUriResolver<S, C>,
    json: &str,
    style: DiagramStyle,
    detail: DetailLevel,
) -> anyhow::Result<String>
where
    S: resolver::DiagramService,
    C: resolver::FragmentCache,
{
    use anyhow::Context;

    let dsl = render_model(json, detail)?;
    resolver
        .resolve(&dsl, &style)
        .await
        .context("Failed to resolve diagram URL")
}
