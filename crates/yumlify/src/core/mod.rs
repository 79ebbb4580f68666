//! Core abstractions for diagram generation
//!
//! Type metadata, member detail selection, display names, styling options,
//! errors and logging shared by the class-diagram plugin and the resolver.

mod detail;
mod error;
pub mod logging;
mod metadata;
mod names;
mod types;

pub use detail::*;
pub use error::*;
pub use logging::*;
pub use metadata::*;
pub use names::*;
pub use types::*;
