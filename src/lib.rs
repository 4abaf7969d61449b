//! # textflow
//!
//! A minimal rich-text layout engine. A parsed markup tree (a restricted
//! HTML/Markdown subset) goes in; positioned draw commands come out:
//! filled text runs and stroked rules on a rectangular surface.
//!
//! The engine walks the tree with a cursor and a current text style,
//! wrapping text greedily at spaces and hyphens so nothing crosses the
//! surface's right edge. It does not parse markup and it does not
//! rasterize glyphs; both sit behind capabilities the caller supplies.
//!
//! ## Architecture
//!
//! ```text
//! markup bytes → [external parser] → node tree
//!                                        ↓
//!   [model]    — the tree: text runs, tagged elements, containers
//!        ↓
//!   [layout]   — tree walk: cursor motion, scoped style overrides
//!        ↓ per text node
//!   [text]     — greedy line breaker
//!        ↓
//!   [surface]  — fill text runs, stroke rules, measure widths
//! ```
//!
//! ## Example
//!
//! ```
//! use textflow::{layout, Node, Recorder, Rect, Tag};
//!
//! let tree = Node::document(vec![Node::element(
//!     Tag::Paragraph,
//!     vec![Node::text("Hello world!")],
//! )]);
//! let mut surface = Recorder::new(Rect::new(0.0, 0.0, 400.0, 400.0));
//! let (end, result) = layout(&mut surface, &tree);
//! assert!(result.is_ok());
//! assert_eq!(surface.texts(), vec!["Hello world!"]);
//! assert!(end.y < 400.0);
//! ```

pub mod error;
pub mod font;
pub mod layout;
pub mod model;
pub mod style;
pub mod surface;
pub mod text;

pub use error::LayoutError;
pub use font::FontContext;
pub use layout::{Cursor, HeadingOptions, LayoutEngine, Options};
pub use model::{Node, NodeKind, Tag};
pub use style::{Color, Font, LineStyle, TextStyle};
pub use surface::{DrawCommand, Point, Recorder, Rect, Surface};

/// Lay out `root` on `surface` with default options and the standard
/// font catalog.
///
/// This is the one-call path. Construct a [`LayoutEngine`] instead to
/// reuse options and the font catalog across passes.
pub fn layout(surface: &mut impl Surface, root: &Node) -> (Point, Result<(), LayoutError>) {
    LayoutEngine::default().layout(surface, root)
}

/// Lay out a JSON-encoded node tree (see [`Node::from_json`]).
///
/// Returns the final cursor position; a parse failure surfaces as
/// [`LayoutError::MalformedInput`] before anything is drawn.
pub fn layout_json(surface: &mut impl Surface, json: &str) -> Result<Point, LayoutError> {
    let root = Node::from_json(json)?;
    let (at, result) = layout(surface, &root);
    result.map(|()| at)
}
