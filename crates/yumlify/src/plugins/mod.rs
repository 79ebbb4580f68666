//! Diagram plugins
//!
//! Each plugin turns described types into one yUML diagram kind.

pub mod class;

pub use class::*;
