//! Structured error types for the layout engine.
//!
//! Three variants cover the real failure sources: font resolution, markup
//! with no layout handler, and structurally invalid node trees. Every
//! variant is fatal to the pass that raised it: layout position is
//! cumulative, so continuing past a skipped element would silently
//! misplace everything after it.

use thiserror::Error;

/// The unified error type returned by a layout pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// A named font has no entry in the font catalog.
    #[error("font '{name}' cannot be resolved")]
    FontResolution { name: String },

    /// The markup contains an element with no layout handler.
    ///
    /// This aborts the pass rather than skipping the element. A partial,
    /// silently incomplete layout is worse than a visible failure.
    #[error("element '{tag}' is not supported")]
    UnsupportedElement { tag: String },

    /// The node tree violates structural assumptions, e.g. it contains an
    /// error marker emitted by the parser.
    #[error("malformed input: {reason}")]
    MalformedInput { reason: String },
}
