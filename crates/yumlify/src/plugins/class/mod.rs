//! Class diagram plugin
//!
//! Turns type metadata into yUML class diagram fragments.

mod builder;
mod ledger;
mod members;
mod model;
mod registry;
mod type_expr;

pub use builder::{DiagramFragment, DiagramFragmentBuilder};
pub use ledger::{Relationship, RelationshipKind, RelationshipLedger};
pub use members::MemberSerializer;
pub use model::{LoadedModel, MethodSpec, PropertySpec, TypeModel, TypeSpec};
pub use registry::{TypeBuilder, TypeRegistry};
pub use type_expr::{parse_type_expr, TypeExpr};
