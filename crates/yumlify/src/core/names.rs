//! Display names for types
//!
//! Maps a type's own name to the name shown in class blocks and member
//! summaries. Generic arity suffixes (`` List`1 ``) are stripped, an alias
//! table is consulted, and constructed generics render as `List<Dog>`.

use std::collections::HashMap;

use super::{DiagramError, TypeMetadataProvider, TypeRef};

/// Name lookup table
#[derive(Debug, Clone, Default)]
pub struct DisplayNames {
    aliases: HashMap<String, String>,
}

impl DisplayNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `raw` as `display` wherever it appears
    pub fn alias(mut self, raw: impl Into<String>, display: impl Into<String>) -> Self {
        self.aliases.insert(raw.into(), display.into());
        self
    }

    /// Look up the display form of a bare name
    pub fn lookup<'a>(&'a self, raw: &'a str) -> &'a str {
        let stripped = strip_arity(raw);
        self.aliases
            .get(raw)
            .or_else(|| self.aliases.get(stripped))
            .map(String::as_str)
            .unwrap_or(stripped)
    }

    /// Display name of a described type
    pub fn display_name<P>(&self, provider: &P, ty: TypeRef) -> Result<String, DiagramError>
    where
        P: TypeMetadataProvider + ?Sized,
    {
        let descriptor = provider.describe(ty)?;
        let name = self.lookup(&descriptor.name).to_string();
        if !descriptor.is_generic() {
            return Ok(name);
        }

        let arguments = descriptor
            .generic_arguments
            .iter()
            .map(|arg| self.display_name(provider, *arg))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("{}<{}>", name, arguments.join(", ")))
    }
}

/// Drop a trailing `` `N `` arity marker
fn strip_arity(name: &str) -> &str {
    match name.rsplit_once('`') {
        Some((head, tail)) if !tail.is_empty() && tail.chars().all(|c| c.is_ascii_digit()) => head,
        _ => name,
    }
}
