//! Member detail selection
//!
//! A [`DetailLevel`] is a set of [`DetailFlag`]s. Flags combine freely and the
//! order or repetition in which they are given never matters.

use std::fmt;

/// One category of members to include in class blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetailFlag {
    PublicProperties,
    PrivateProperties,
    PublicMethods,
    PrivateMethods,
}

impl DetailFlag {
    fn bit(self) -> u8 {
        match self {
            DetailFlag::PublicProperties => 0b0001,
            DetailFlag::PrivateProperties => 0b0010,
            DetailFlag::PublicMethods => 0b0100,
            DetailFlag::PrivateMethods => 0b1000,
        }
    }

    /// Parse a flag name, accepting `public-properties` and `PublicProperties` spellings
    pub fn from_str(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "publicproperties" => Some(DetailFlag::PublicProperties),
            "privateproperties" => Some(DetailFlag::PrivateProperties),
            "publicmethods" => Some(DetailFlag::PublicMethods),
            "privatemethods" => Some(DetailFlag::PrivateMethods),
            _ => None,
        }
    }
}

impl fmt::Display for DetailFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetailFlag::PublicProperties => write!(f, "public-properties"),
            DetailFlag::PrivateProperties => write!(f, "private-properties"),
            DetailFlag::PublicMethods => write!(f, "public-methods"),
            DetailFlag::PrivateMethods => write!(f, "private-methods"),
        }
    }
}

/// Set of requested member categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct DetailLevel(u8);

impl DetailLevel {
    /// No members at all: class blocks carry only the type name
    pub fn none() -> Self {
        Self(0)
    }

    /// Every member category
    pub fn all() -> Self {
        [
            DetailFlag::PublicProperties,
            DetailFlag::PrivateProperties,
            DetailFlag::PublicMethods,
            DetailFlag::PrivateMethods,
        ]
        .into_iter()
        .collect()
    }

    pub fn with(mut self, flag: DetailFlag) -> Self {
        self.insert(flag);
        self
    }

    pub fn insert(&mut self, flag: DetailFlag) {
        self.0 |= flag.bit();
    }

    pub fn contains(&self, flag: DetailFlag) -> bool {
        self.0 & flag.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns true if any property category is requested
    pub fn wants_properties(&self) -> bool {
        self.contains(DetailFlag::PublicProperties) || self.contains(DetailFlag::PrivateProperties)
    }

    /// Returns true if any method category is requested
    pub fn wants_methods(&self) -> bool {
        self.contains(DetailFlag::PublicMethods) || self.contains(DetailFlag::PrivateMethods)
    }
}

impl FromIterator<DetailFlag> for DetailLevel {
    fn from_iter<I: IntoIterator<Item = DetailFlag>>(iter: I) -> Self {
        let mut level = DetailLevel::none();
        for flag in iter {
            level.insert(flag);
        }
        level
    }
}

impl From<DetailFlag> for DetailLevel {
    fn from(flag: DetailFlag) -> Self {
        DetailLevel::none().with(flag)
    }
}

impl From<&[DetailFlag]> for DetailLevel {
    fn from(flags: &[DetailFlag]) -> Self {
        flags.iter().copied().collect()
    }
}
