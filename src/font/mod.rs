//! # Font Catalog
//!
//! Resolution of font family names into [`Font`] handles.
//!
//! The engine never parses font files; glyph measurement belongs to the
//! drawing surface. What the catalog guarantees is that every family name
//! a style refers to is one the host can actually produce, so a typo in a
//! configured bold face fails the pass up front instead of rendering in a
//! silently substituted font.
//!
//! [`FontContext::new`] seeds the catalog with the 14 standard PDF font
//! names, which every common backend can satisfy without embedding.
//! Hosts with custom faces register their family names on top.

pub mod metrics;

use crate::error::LayoutError;
use crate::style::Font;
use std::collections::HashSet;

/// Family names of the 14 standard PDF fonts.
const STANDARD_FAMILIES: [&str; 14] = [
    "Helvetica",
    "Helvetica-Bold",
    "Helvetica-Oblique",
    "Helvetica-BoldOblique",
    "Times-Roman",
    "Times-Bold",
    "Times-Italic",
    "Times-BoldItalic",
    "Courier",
    "Courier-Bold",
    "Courier-Oblique",
    "Courier-BoldOblique",
    "Symbol",
    "ZapfDingbats",
];

/// A catalog of resolvable font family names.
#[derive(Debug, Clone)]
pub struct FontContext {
    families: HashSet<String>,
}

impl Default for FontContext {
    fn default() -> Self {
        Self::new()
    }
}

impl FontContext {
    /// A catalog seeded with the standard font families.
    pub fn new() -> Self {
        Self {
            families: STANDARD_FAMILIES.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// An empty catalog, for hosts that supply every face themselves.
    pub fn empty() -> Self {
        Self {
            families: HashSet::new(),
        }
    }

    /// Register an additional resolvable family name.
    pub fn register(&mut self, family: impl Into<String>) {
        self.families.insert(family.into());
    }

    /// Whether `family` resolves in this catalog.
    pub fn knows(&self, family: &str) -> bool {
        self.families.contains(family)
    }

    /// Resolve a family name at a point size into a [`Font`] handle.
    pub fn resolve(&self, family: &str, size: f64) -> Result<Font, LayoutError> {
        if !self.families.contains(family) {
            return Err(LayoutError::FontResolution {
                name: family.to_string(),
            });
        }
        Ok(Font {
            family: family.to_string(),
            size,
        })
    }
}
