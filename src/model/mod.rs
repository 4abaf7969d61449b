//! # Document Model
//!
//! The input representation for the layout engine: a tree of nodes, each
//! with a kind and ordered children. The tree is produced by an external
//! markup parser (an HTML or Markdown front end); the engine only ever
//! borrows it read-only for the duration of one pass.
//!
//! The model is intentionally close to what a lenient HTML parser emits:
//! a document root, text runs, tagged elements, plus doctype/comment
//! nodes that layout walks through, and an error marker for parsers that
//! report recoverable damage in-band.

use crate::error::LayoutError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A node in the parsed markup tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// What kind of node this is.
    pub kind: NodeKind,

    /// Child nodes, in document order.
    #[serde(default)]
    pub children: Vec<Node>,
}

/// The different kinds of nodes in the markup tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NodeKind {
    /// The root of a parsed document.
    Document,

    /// A doctype declaration. Layout visits its children (there are
    /// normally none) and draws nothing for the node itself.
    Doctype,

    /// A comment. Same treatment as doctype.
    Comment,

    /// A literal text run.
    Text { content: String },

    /// A tagged element.
    Element { tag: Tag },

    /// An error marker emitted by the parser. Encountering one fails the
    /// pass with [`LayoutError::MalformedInput`].
    Error { reason: String },
}

/// The closed set of element tags the engine lays out.
///
/// Anything the parser emits outside this set arrives as
/// [`Tag::Unknown`] and fails the pass, by design: the handler set is
/// closed and statically checkable, and dropping content silently would
/// misplace everything drawn after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Tag {
    /// `<p>`
    Paragraph,
    /// `<h1>`
    H1,
    /// `<h2>`
    H2,
    /// `<h3>`
    H3,
    /// `<h4>`
    H4,
    /// `<h5>`
    H5,
    /// `<h6>`
    H6,
    /// `<strong>` / `<b>`
    Bold,
    /// `<em>` / `<i>`
    Italic,
    /// `<sup>`
    Superscript,
    /// `<sub>`
    Subscript,
    /// `<hr>`
    Rule,
    /// `<html>` / `<head>` / `<body>`: passthrough wrappers with no
    /// style or cursor effect of their own.
    Container,
    /// Any tag name with no layout handler.
    Unknown(String),
}

impl Tag {
    /// Map a tag name, as emitted by the parser, to its variant.
    pub fn from_name(name: &str) -> Tag {
        match name {
            "p" => Tag::Paragraph,
            "h1" => Tag::H1,
            "h2" => Tag::H2,
            "h3" => Tag::H3,
            "h4" => Tag::H4,
            "h5" => Tag::H5,
            "h6" => Tag::H6,
            "strong" | "b" => Tag::Bold,
            "em" | "i" => Tag::Italic,
            "sup" => Tag::Superscript,
            "sub" => Tag::Subscript,
            "hr" => Tag::Rule,
            "html" | "head" | "body" => Tag::Container,
            other => Tag::Unknown(other.to_string()),
        }
    }

    /// The canonical name for this tag. Aliased names (`b`, `i`, `html`,
    /// `head`) collapse to one spelling per variant.
    pub fn name(&self) -> &str {
        match self {
            Tag::Paragraph => "p",
            Tag::H1 => "h1",
            Tag::H2 => "h2",
            Tag::H3 => "h3",
            Tag::H4 => "h4",
            Tag::H5 => "h5",
            Tag::H6 => "h6",
            Tag::Bold => "strong",
            Tag::Italic => "em",
            Tag::Superscript => "sup",
            Tag::Subscript => "sub",
            Tag::Rule => "hr",
            Tag::Container => "body",
            Tag::Unknown(name) => name,
        }
    }
}

impl From<String> for Tag {
    fn from(name: String) -> Self {
        Tag::from_name(&name)
    }
}

impl From<Tag> for String {
    fn from(tag: Tag) -> Self {
        tag.name().to_string()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Node {
    /// Create a document root with children.
    pub fn document(children: Vec<Node>) -> Self {
        Self {
            kind: NodeKind::Document,
            children,
        }
    }

    /// Create a text node.
    pub fn text(content: &str) -> Self {
        Self {
            kind: NodeKind::Text {
                content: content.to_string(),
            },
            children: vec![],
        }
    }

    /// Create an element node with children.
    pub fn element(tag: Tag, children: Vec<Node>) -> Self {
        Self {
            kind: NodeKind::Element { tag },
            children,
        }
    }

    /// Parse a JSON-encoded node tree.
    ///
    /// This is how hosts without an in-process parser hand trees to the
    /// engine; a deserialization failure is reported as structurally
    /// malformed input.
    pub fn from_json(json: &str) -> Result<Node, LayoutError> {
        serde_json::from_str(json).map_err(|e| LayoutError::MalformedInput {
            reason: e.to_string(),
        })
    }
}
