//! JSON type models
//!
//! A [`TypeModel`] describes a set of types and the ordered list of types to
//! draw. Loading it produces a [`TypeRegistry`] plus the diagram roots.
//!
//! ```json
//! {
//!   "types": [
//!     { "name": "String" },
//!     { "name": "List`1", "enumerable": true },
//!     { "name": "Animal", "properties": [{ "name": "Name", "type": "String" }] },
//!     { "name": "Dog", "base": "Animal",
//!       "properties": [{ "name": "Toys", "type": "List<Toy>", "settable": false }],
//!       "methods": [{ "name": "Bark", "visibility": "public" }] },
//!     { "name": "Toy" }
//!   ],
//!   "diagram": ["Animal", "Dog", "Toy"]
//! }
//! ```

use std::collections::HashMap;
use std::io::Read;

use serde::{Deserialize, Serialize};
use tracing::{debug, span, Level};

use super::registry::TypeRegistry;
use super::type_expr::{parse_type_expr, TypeExpr};
use crate::core::{
    DiagramError, MethodInfo, PropertyInfo, TypeDescriptor, TypeKind, TypeRef, Visibility,
};

fn default_kind() -> String {
    "class".to_string()
}

fn default_visibility() -> String {
    "public".to_string()
}

fn default_true() -> bool {
    true
}

/// A property declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySpec {
    pub name: String,
    /// Type expression, e.g. `String` or `List<Dog>`
    #[serde(rename = "type")]
    pub value_type: String,
    #[serde(default = "default_true")]
    pub settable: bool,
    #[serde(default, rename = "static")]
    pub is_static: bool,
}

/// A method declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSpec {
    pub name: String,
    #[serde(default = "default_visibility")]
    pub visibility: String,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default)]
    pub accessor: bool,
}

/// A type declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSpec {
    pub name: String,
    #[serde(default = "default_kind")]
    pub kind: String,
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub enumerable: bool,
    #[serde(default)]
    pub properties: Vec<PropertySpec>,
    #[serde(default)]
    pub methods: Vec<MethodSpec>,
}

/// A complete model file
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TypeModel {
    pub types: Vec<TypeSpec>,
    /// Types to draw, in order; every declared type when empty
    #[serde(default)]
    pub diagram: Vec<String>,
}

/// A loaded model
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub registry: TypeRegistry,
    pub roots: Vec<TypeRef>,
}

impl TypeModel {
    /// Parse a model from JSON text
    pub fn from_json(input: &str) -> Result<Self, DiagramError> {
        serde_json::from_str(input)
            .map_err(|e| DiagramError::model_error(format!("invalid model JSON: {}", e)))
    }

    /// Parse a model from a reader
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, DiagramError> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        Self::from_json(&input)
    }

    /// Resolve every name and build the registry
    pub fn load(&self) -> Result<LoadedModel, DiagramError> {
        let load_span = span!(Level::DEBUG, "load_model", type_count = self.types.len());
        let _enter = load_span.enter();

        let mut loader = Loader {
            registry: TypeRegistry::new(),
            declared: HashMap::new(),
        };

        // Declare first so members may refer to types declared later
        for spec in &self.types {
            let kind = TypeKind::from_str(&spec.kind).ok_or_else(|| {
                DiagramError::model_error(format!(
                    "unknown kind `{}` for `{}`",
                    spec.kind, spec.name
                ))
            })?;
            if loader.declared.contains_key(spec.name.as_str()) {
                return Err(DiagramError::model_error(format!(
                    "type `{}` declared twice",
                    spec.name
                )));
            }
            let mut descriptor = TypeDescriptor::new(spec.name.clone(), kind);
            descriptor.enumerable = spec.enumerable;
            let ty = loader.registry.register(descriptor);
            loader.declared.insert(spec.name.clone(), ty);
        }

        for spec in &self.types {
            loader.define(spec)?;
        }

        let roots = if self.diagram.is_empty() {
            self.types
                .iter()
                .map(|spec| loader.declared[spec.name.as_str()])
                .collect()
        } else {
            self.diagram
                .iter()
                .map(|expr| loader.resolve_str(expr))
                .collect::<Result<Vec<_>, _>>()?
        };

        debug!(
            types = loader.registry.len(),
            roots = roots.len(),
            "Loaded type model"
        );
        Ok(LoadedModel {
            registry: loader.registry,
            roots,
        })
    }
}

struct Loader {
    registry: TypeRegistry,
    declared: HashMap<String, TypeRef>,
}

impl Loader {
    fn define(&mut self, spec: &TypeSpec) -> Result<(), DiagramError> {
        let ty = self.declared[spec.name.as_str()];

        let base = spec
            .base
            .as_deref()
            .map(|expr| self.resolve_str(expr))
            .transpose()?;
        let interfaces = spec
            .interfaces
            .iter()
            .map(|expr| self.resolve_str(expr))
            .collect::<Result<Vec<_>, _>>()?;

        let mut properties = Vec::with_capacity(spec.properties.len());
        for property in &spec.properties {
            let value_type = self.resolve_str(&property.value_type)?;
            let mut info = PropertyInfo::new(property.name.clone(), value_type);
            info.settable = property.settable;
            info.is_static = property.is_static;
            properties.push(info);
        }

        let mut methods = Vec::with_capacity(spec.methods.len());
        for method in &spec.methods {
            let visibility = Visibility::from_str(&method.visibility).ok_or_else(|| {
                DiagramError::model_error(format!(
                    "unknown visibility `{}` on `{}.{}`",
                    method.visibility, spec.name, method.name
                ))
            })?;
            let mut info = MethodInfo::new(method.name.clone(), visibility);
            info.is_static = method.is_static;
            info.special = method.accessor;
            methods.push(info);
        }

        let mut builder = self.registry.edit(ty)?;
        if let Some(base) = base {
            builder = builder.base(base);
        }
        for interface in interfaces {
            builder = builder.implements(interface);
        }
        for property in properties {
            builder = builder.push_property(property);
        }
        for method in methods {
            builder = builder.push_method(method);
        }
        Ok(())
    }

    fn resolve_str(&mut self, input: &str) -> Result<TypeRef, DiagramError> {
        let expr = parse_type_expr(input)?;
        self.resolve(&expr)
    }

    fn resolve(&mut self, expr: &TypeExpr) -> Result<TypeRef, DiagramError> {
        if !expr.is_generic() {
            return self.lookup(&expr.name);
        }

        // `List<Dog>` may be declared as `List` or as `List`1`
        let definition = self
            .lookup(&expr.name)
            .or_else(|_| self.lookup(&format!("{}`{}", expr.name, expr.arguments.len())))?;
        let arguments = expr
            .arguments
            .iter()
            .map(|argument| self.resolve(argument))
            .collect::<Result<Vec<_>, _>>()?;
        self.registry.instantiate(definition, &arguments)
    }

    fn lookup(&self, name: &str) -> Result<TypeRef, DiagramError> {
        self.declared
            .get(name)
            .copied()
            .ok_or_else(|| DiagramError::model_error(format!("no type named `{}`", name)))
    }
}
