//! # Drawing Surface
//!
//! The capability the engine draws against. A surface owns a bounded
//! rectangle in a y-up coordinate system, measures text in a given style,
//! and accepts two primitives: filled text runs and stroked lines. The
//! engine treats it as append-only; apart from the bounds query and
//! measurement it never reads anything back.
//!
//! [`Recorder`] is the built-in implementation: it appends backend
//! agnostic [`DrawCommand`]s to a vector and measures through the
//! built-in standard-font tables. It doubles as the test double for the
//! whole crate and as a real backend for hosts that want a retained draw
//! list to replay against their own rasterizer.

use crate::font::metrics;
use crate::style::{LineStyle, TextStyle};
use serde::{Deserialize, Serialize};

/// A 2D point in surface coordinates. The y axis grows upward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle spanning `min` to `max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min: Point::new(min_x, min_y),
            max: Point::new(max_x, max_y),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// The drawing capability consumed by a layout pass.
pub trait Surface {
    /// The drawable bounds. Queried once at the start of a pass.
    fn bounds(&self) -> Rect;

    /// Measure the rendered width of `text` in `style`, in points.
    fn measure_width(&self, style: &TextStyle, text: &str) -> f64;

    /// Fill a text run anchored at `at` according to the style's
    /// alignment (the engine always anchors left/top).
    fn fill_text(&mut self, style: &TextStyle, at: Point, text: &str);

    /// Stroke a straight line from `from` to `to`.
    fn stroke_line(&mut self, style: &LineStyle, from: Point, to: Point);
}

/// One backend-agnostic draw command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op")]
pub enum DrawCommand {
    /// A filled text run.
    TextRun {
        style: TextStyle,
        at: Point,
        text: String,
    },
    /// A stroked line.
    Rule {
        style: LineStyle,
        from: Point,
        to: Point,
    },
}

/// A surface that records draw commands instead of rasterizing.
#[derive(Debug, Clone)]
pub struct Recorder {
    bounds: Rect,
    /// Recorded commands, in draw order.
    pub commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            commands: Vec::new(),
        }
    }

    /// The recorded text runs, in draw order.
    pub fn text_runs(&self) -> impl Iterator<Item = (&TextStyle, Point, &str)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::TextRun { style, at, text } => Some((style, *at, text.as_str())),
            DrawCommand::Rule { .. } => None,
        })
    }

    /// The texts of the recorded runs, in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.text_runs().map(|(_, _, text)| text).collect()
    }
}

impl Surface for Recorder {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn measure_width(&self, style: &TextStyle, text: &str) -> f64 {
        metrics::string_width(&style.font.family, text, style.font.size)
    }

    fn fill_text(&mut self, style: &TextStyle, at: Point, text: &str) {
        self.commands.push(DrawCommand::TextRun {
            style: style.clone(),
            at,
            text: text.to_string(),
        });
    }

    fn stroke_line(&mut self, style: &LineStyle, from: Point, to: Point) {
        self.commands.push(DrawCommand::Rule {
            style: *style,
            from,
            to,
        });
    }
}
