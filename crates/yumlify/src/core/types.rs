//! Core type definitions for diagram styling
//!
//! This module contains the options that control how the remote service draws
//! a diagram: palette, layout direction and scale.

use std::fmt;

/// Drawing palette used by the rendering service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Palette {
    /// Clean black-and-white boxes
    #[default]
    Plain,
    /// Flat shaded boxes
    Boring,
    /// Hand-drawn look
    Scruffy,
}

impl Palette {
    /// Parse a palette name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "plain" => Some(Palette::Plain),
            "boring" => Some(Palette::Boring),
            "scruffy" => Some(Palette::Scruffy),
            _ => None,
        }
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Palette::Plain => write!(f, "plain"),
            Palette::Boring => write!(f, "boring"),
            Palette::Scruffy => write!(f, "scruffy"),
        }
    }
}

/// Layout direction of the diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Direction {
    /// Left to right (LR)
    #[default]
    LeftToRight,
    /// Top to bottom (TB)
    TopToBottom,
    /// Right to left (RL)
    RightToLeft,
}

impl Direction {
    /// Parse direction from its short code (LR, TB, TD, RL)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "LR" => Some(Direction::LeftToRight),
            "TB" | "TD" => Some(Direction::TopToBottom),
            "RL" => Some(Direction::RightToLeft),
            _ => None,
        }
    }

    /// Short code used in the style fragment
    pub fn code(&self) -> &'static str {
        match self {
            Direction::LeftToRight => "LR",
            Direction::TopToBottom => "TB",
            Direction::RightToLeft => "RL",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Output scale of the rendered image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Scale {
    Tiny,
    Small,
    #[default]
    Normal,
    Big,
    Huge,
}

impl Scale {
    /// Scale as a percentage of the service's natural size
    pub fn percent(&self) -> u32 {
        match self {
            Scale::Tiny => 50,
            Scale::Small => 80,
            Scale::Normal => 100,
            Scale::Big => 120,
            Scale::Huge => 180,
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scale::Tiny => write!(f, "tiny"),
            Scale::Small => write!(f, "small"),
            Scale::Normal => write!(f, "normal"),
            Scale::Big => write!(f, "big"),
            Scale::Huge => write!(f, "huge"),
        }
    }
}

/// Style of a single diagram request
///
/// Fixed for the lifetime of one request; the builder ignores it and the
/// resolver turns it into the URL path segment sent to the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct DiagramStyle {
    pub palette: Palette,
    pub direction: Direction,
    pub scale: Scale,
}

impl DiagramStyle {
    /// Create a new diagram style
    pub fn new(palette: Palette, direction: Direction, scale: Scale) -> Self {
        Self {
            palette,
            direction,
            scale,
        }
    }

    /// Render the style as a service path segment, e.g. `plain;dir:LR;scale:100`
    pub fn fragment(&self) -> String {
        format!(
            "{};dir:{};scale:{}",
            self.palette,
            self.direction.code(),
            self.scale.percent()
        )
    }
}
