//! # Layout Engine
//!
//! The stateful tree walk that turns a markup tree into draw commands.
//!
//! One pass owns exactly two pieces of mutable state: a cursor (current
//! position plus the active line height) and the current text style.
//! Block handlers move the cursor between paragraphs, headings, and
//! rules; inline handlers override the style for the duration of their
//! children and always restore it; text nodes hand the cursor and style
//! to the line breaker. Everything lives in a pass-scoped value threaded
//! through the recursion, never on the engine, so one engine instance
//! serves any number of sequential passes and is freely shared across
//! threads.
//!
//! ## Cursor discipline
//!
//! Coordinates are y-up and the cursor starts at the top-left corner of
//! the surface. Over a pass the cursor's y never increases (superscript
//! shifts raise it transiently and restore it before the scope ends) and
//! x snaps back to the surface's left edge at every line break. The
//! engine never draws past the right edge while wrapping is on; running
//! past the bottom edge is the caller's concern, detected by comparing
//! the returned cursor against the bounds.

use crate::error::LayoutError;
use crate::font::FontContext;
use crate::model::{Node, NodeKind, Tag};
use crate::style::{Color, HAlign, LineStyle, TextStyle, VAlign};
use crate::surface::{Point, Rect, Surface};
use crate::text;
use log::debug;
use serde::{Deserialize, Serialize};

/// Per-level heading parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingOptions {
    /// Font size as a multiple of the base size.
    pub scale: f64,
    /// Space above, in base-size units.
    pub margin_top: f64,
    /// Space below. Applied twice: once at the heading's own size, once
    /// at the base size.
    pub margin_bottom: f64,
    /// Whether the heading uses the configured bold face.
    pub bold: bool,
}

/// Flat engine configuration, supplied once at construction.
///
/// Margins, offsets, and stroke widths are expressed in text-height
/// units: multiples of the base font size (or of the current scaled size
/// where a handler says so).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    /// Font family for regular text.
    pub font: String,
    /// Font family for bold text and bold headings.
    pub bold_font: String,
    /// Font family for italic text.
    pub italic_font: String,
    /// Font family for bold-italic text. Carried for hosts that restyle
    /// trees; the bold and italic handlers themselves do not compose.
    pub bold_italic_font: String,
    /// Base font size in points.
    pub font_size: f64,
    /// Text color.
    pub color: Color,

    /// Space above a paragraph, in base-size units.
    pub p_margin_top: f64,
    /// Space below a paragraph, in addition to the paragraph's own last
    /// line height.
    pub p_margin_bottom: f64,

    /// Per-level heading parameters, h1 through h6.
    pub headings: [HeadingOptions; 6],

    /// Baseline raise for superscripts, as a fraction of the scaled size.
    pub superscript_position: f64,
    /// Baseline drop for subscripts, as a fraction of the scaled size
    /// (negative moves down).
    pub subscript_position: f64,
    /// Font scale for superscript and subscript text.
    pub super_sub_scale: f64,

    /// Space above a horizontal rule, in base-size units.
    pub hr_margin_top: f64,
    /// Space below a horizontal rule.
    pub hr_margin_bottom: f64,
    /// Stroke width of a rule, as a fraction of the base size.
    pub hr_scale: f64,
    /// Stroke color of a rule.
    pub hr_color: Color,

    /// Whether text wraps at the surface's right edge.
    pub wrap_lines: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            font: "Helvetica".to_string(),
            bold_font: "Helvetica-Bold".to_string(),
            italic_font: "Helvetica-Oblique".to_string(),
            bold_italic_font: "Helvetica-BoldOblique".to_string(),
            font_size: 12.0,
            color: Color::BLACK,
            p_margin_top: 0.0,
            p_margin_bottom: 0.833,
            headings: [
                HeadingOptions {
                    scale: 2.0,
                    margin_top: 1.0,
                    margin_bottom: 1.0,
                    bold: true,
                },
                HeadingOptions {
                    scale: 1.5,
                    margin_top: 0.833,
                    margin_bottom: 0.833,
                    bold: true,
                },
                HeadingOptions {
                    scale: 1.25,
                    margin_top: 0.75,
                    margin_bottom: 0.75,
                    bold: true,
                },
                HeadingOptions {
                    scale: 1.0,
                    margin_top: 0.5,
                    margin_bottom: 0.5,
                    bold: true,
                },
                HeadingOptions {
                    scale: 1.0,
                    margin_top: 0.5,
                    margin_bottom: 0.5,
                    bold: true,
                },
                HeadingOptions {
                    scale: 1.0,
                    margin_top: 0.5,
                    margin_bottom: 0.5,
                    bold: false,
                },
            ],
            superscript_position: 0.75,
            subscript_position: -0.25,
            super_sub_scale: 0.583,
            hr_margin_top: 0.0,
            hr_margin_bottom: 1.833,
            hr_scale: 0.1,
            hr_color: Color::BLACK,
            wrap_lines: true,
        }
    }
}

/// The current drawing position and the active line height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    /// Where the next run is anchored.
    pub at: Point,
    /// Vertical step of the next line break, set by the enclosing block.
    pub line_height: f64,
}

impl Cursor {
    pub fn new(at: Point, line_height: f64) -> Self {
        Self { at, line_height }
    }

    /// Snap to the left edge and step down one line.
    pub fn new_line(&mut self, left: f64) {
        self.at.x = left;
        self.at.y -= self.line_height;
    }
}

/// The layout engine. Construct once, lay out any number of trees.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    options: Options,
    fonts: FontContext,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl LayoutEngine {
    /// An engine over the standard font catalog.
    pub fn new(options: Options) -> Self {
        Self {
            options,
            fonts: FontContext::new(),
        }
    }

    /// An engine over a caller-supplied font catalog.
    pub fn with_fonts(options: Options, fonts: FontContext) -> Self {
        Self { options, fonts }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Lay out `root` on `surface`.
    ///
    /// Returns the cursor position after the last draw together with the
    /// pass outcome. On an error the position is where the pass stopped;
    /// draw calls already issued are not rolled back, the surface has no
    /// transactional semantics. On success the position lets the caller
    /// compute the total consumed height.
    pub fn layout<S: Surface>(
        &self,
        surface: &mut S,
        root: &Node,
    ) -> (Point, Result<(), LayoutError>) {
        let bounds = surface.bounds();
        let cursor = Cursor::new(
            Point::new(bounds.min.x, bounds.max.y),
            self.options.font_size,
        );

        let font = match self
            .fonts
            .resolve(&self.options.font, self.options.font_size)
        {
            Ok(font) => font,
            Err(e) => return (cursor.at, Err(e)),
        };

        debug!(
            "layout pass over {:.1} x {:.1} pt surface in {}pt {}",
            bounds.width(),
            bounds.height(),
            font.size,
            font.family,
        );

        let mut pass = Pass {
            surface,
            bounds,
            options: &self.options,
            fonts: &self.fonts,
            cursor,
            style: TextStyle {
                font,
                color: self.options.color,
                h_align: HAlign::Left,
                v_align: VAlign::Top,
            },
        };
        let result = pass.visit(root);
        (pass.cursor.at, result)
    }
}

/// Pass-scoped mutable state, threaded through the recursive walk.
struct Pass<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
    bounds: Rect,
    options: &'a Options,
    fonts: &'a FontContext,
    cursor: Cursor,
    style: TextStyle,
}

impl<S: Surface + ?Sized> Pass<'_, S> {
    fn visit(&mut self, node: &Node) -> Result<(), LayoutError> {
        match &node.kind {
            NodeKind::Document | NodeKind::Doctype | NodeKind::Comment => {
                self.visit_children(node)
            }
            NodeKind::Text { content } => {
                self.write_lines(content);
                Ok(())
            }
            NodeKind::Element { tag } => self.element(tag, node),
            NodeKind::Error { reason } => Err(LayoutError::MalformedInput {
                reason: reason.clone(),
            }),
        }
    }

    fn visit_children(&mut self, node: &Node) -> Result<(), LayoutError> {
        for child in &node.children {
            self.visit(child)?;
        }
        Ok(())
    }

    fn element(&mut self, tag: &Tag, node: &Node) -> Result<(), LayoutError> {
        match tag {
            Tag::Paragraph => self.paragraph(node),
            Tag::H1 => {
                let h = self.options.headings[0];
                self.heading(node, h)
            }
            Tag::H2 => {
                let h = self.options.headings[1];
                self.heading(node, h)
            }
            Tag::H3 => {
                let h = self.options.headings[2];
                self.heading(node, h)
            }
            Tag::H4 => {
                let h = self.options.headings[3];
                self.heading(node, h)
            }
            Tag::H5 => {
                let h = self.options.headings[4];
                self.heading(node, h)
            }
            Tag::H6 => {
                let h = self.options.headings[5];
                self.heading(node, h)
            }
            Tag::Bold => {
                let family = self.options.bold_font.clone();
                self.with_font_family(family, |pass| pass.visit_children(node))
            }
            Tag::Italic => {
                let family = self.options.italic_font.clone();
                self.with_font_family(family, |pass| pass.visit_children(node))
            }
            Tag::Superscript => {
                let position = self.options.superscript_position;
                self.sub_superscript(node, position)
            }
            Tag::Subscript => {
                let position = self.options.subscript_position;
                self.sub_superscript(node, position)
            }
            Tag::Rule => {
                self.rule();
                Ok(())
            }
            Tag::Container => self.visit_children(node),
            Tag::Unknown(name) => Err(LayoutError::UnsupportedElement {
                tag: name.clone(),
            }),
        }
    }

    /// A block paragraph: margin above, children as wrapped lines, then
    /// margin below plus the paragraph's own last line height so two
    /// paragraphs never overlap.
    fn paragraph(&mut self, node: &Node) -> Result<(), LayoutError> {
        let base = self.options.font_size;
        self.cursor.at = Point::new(
            self.bounds.min.x,
            self.cursor.at.y - base * self.options.p_margin_top,
        );
        self.cursor.line_height = self.style.font.size;
        self.visit_children(node)?;
        self.cursor.at = Point::new(
            self.bounds.min.x,
            self.cursor.at.y - base * (1.0 + self.options.p_margin_bottom),
        );
        Ok(())
    }

    fn heading(&mut self, node: &Node, h: HeadingOptions) -> Result<(), LayoutError> {
        if h.bold {
            let family = self.options.bold_font.clone();
            self.with_font_family(family, |pass| pass.heading_body(node, h))
        } else {
            self.heading_body(node, h)
        }
    }

    /// Heading spacing is two-stage: the bottom margin is applied once at
    /// the heading's scaled size and once more at the base size after the
    /// scale scope ends.
    fn heading_body(&mut self, node: &Node, h: HeadingOptions) -> Result<(), LayoutError> {
        let base = self.options.font_size;
        self.cursor.at.x = self.bounds.min.x;
        self.cursor.at.y -= base * h.margin_top;
        self.with_scaled_font(h.scale, |pass| {
            pass.cursor.line_height = pass.style.font.size;
            pass.visit_children(node)?;
            pass.cursor.at.y -= pass.style.font.size * h.margin_bottom;
            Ok(())
        })?;
        self.cursor.at.x = self.bounds.min.x;
        self.cursor.at.y -= base * h.margin_bottom;
        Ok(())
    }

    /// Superscript and subscript: smaller text on a shifted baseline.
    /// The shift is a fraction of the scaled size, so the scale scope
    /// encloses the shift scope; following inline text resumes at the
    /// original size and baseline.
    fn sub_superscript(&mut self, node: &Node, position: f64) -> Result<(), LayoutError> {
        let scale = self.options.super_sub_scale;
        self.with_scaled_font(scale, |pass| {
            let shift = pass.style.font.size * position;
            pass.with_baseline_shift(shift, |pass| pass.visit_children(node))
        })
    }

    /// A horizontal rule spanning the full surface width at the current
    /// vertical position.
    fn rule(&mut self) {
        let base = self.options.font_size;
        self.cursor.at.y -= base * self.options.hr_margin_top;
        let style = LineStyle {
            color: self.options.hr_color,
            width: base * self.options.hr_scale,
        };
        self.surface.stroke_line(
            &style,
            Point::new(self.bounds.min.x, self.cursor.at.y),
            Point::new(self.bounds.max.x, self.cursor.at.y),
        );
        self.cursor.at.y -= base * self.options.hr_margin_bottom;
    }

    fn write_lines(&mut self, content: &str) {
        text::write_lines(
            &mut *self.surface,
            self.bounds,
            &mut self.cursor,
            &self.style,
            self.options.wrap_lines,
            content,
        );
    }

    // ── Scoped style overrides ──────────────────────────────────────
    //
    // Enter, run the body, always restore. Restoration happens on every
    // exit path, including an error from the body, without relying on
    // unwinding.

    /// Multiply the font size for the duration of `body`.
    fn with_scaled_font<F>(&mut self, scale: f64, body: F) -> Result<(), LayoutError>
    where
        F: FnOnce(&mut Self) -> Result<(), LayoutError>,
    {
        let prior = self.style.font.size;
        self.style.font.size *= scale;
        let result = body(self);
        self.style.font.size = prior;
        result
    }

    /// Swap the font family, keeping size and color, for the duration of
    /// `body`. An unresolvable family fails the scope before the body
    /// runs.
    fn with_font_family<F>(&mut self, family: String, body: F) -> Result<(), LayoutError>
    where
        F: FnOnce(&mut Self) -> Result<(), LayoutError>,
    {
        let resolved = self.fonts.resolve(&family, self.style.font.size)?;
        let prior = std::mem::replace(&mut self.style.font.family, resolved.family);
        let result = body(self);
        self.style.font.family = prior;
        result
    }

    /// Offset the cursor's baseline by `dy` for the duration of `body`,
    /// then undo the offset. Line breaks inside the body keep their
    /// effect; only the shift itself is undone.
    fn with_baseline_shift<F>(&mut self, dy: f64, body: F) -> Result<(), LayoutError>
    where
        F: FnOnce(&mut Self) -> Result<(), LayoutError>,
    {
        self.cursor.at.y += dy;
        let result = body(self);
        self.cursor.at.y -= dy;
        result
    }
}
