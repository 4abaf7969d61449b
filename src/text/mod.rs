//! # Line Breaking
//!
//! Greedy word wrap of a single text run against the remaining
//! horizontal space of the surface.
//!
//! Candidate break positions are spaces and hyphens. The pending line is
//! tentatively extended one candidate at a time and measured in the
//! current style; the first extension that would cross the surface's
//! right edge flushes the line as it stood and wraps. A hyphen break
//! keeps the hyphen on the line it ends; a space break leaves the space
//! at the head of the next segment, where the margin trim removes it.
//!
//! Source line breaks are not semantic: embedded newlines (and any
//! spaces hugging them) are collapsed to single spaces before scanning,
//! so only the measured width decides where visual lines end.

use crate::layout::Cursor;
use crate::style::TextStyle;
use crate::surface::{Rect, Surface};
use log::trace;

/// Collapse embedded newlines, and any spaces around them, to single
/// spaces. Applying this twice yields the same string as applying it
/// once: the first pass leaves no newline behind.
pub fn normalize_newlines(text: &str) -> String {
    text.replace(" \n ", " ")
        .replace(" \n", " ")
        .replace("\n ", " ")
        .replace('\n', " ")
}

/// Write `text` to the surface in `style`, wrapping at spaces and
/// hyphens so no flushed line crosses `bounds.max.x`, and advancing the
/// cursor through the run.
///
/// When `wrap` is false the width checks are skipped and the whole
/// normalized run is flushed as one line.
///
/// A single token wider than the full surface width is never split: it
/// is flushed whole and overflows the right edge. That is the only way
/// a line can exceed the bounds while wrapping is enabled.
pub fn write_lines<S: Surface + ?Sized>(
    surface: &mut S,
    bounds: Rect,
    cursor: &mut Cursor,
    style: &TextStyle,
    wrap: bool,
    text: &str,
) {
    let s = normalize_newlines(text);

    // Byte range of the pending (accepted but unflushed) line.
    let mut line_start = 0usize;
    let mut line_len = 0usize;

    loop {
        let next_break = next_break_after(&s, line_start + line_len);
        let line_end = next_break.unwrap_or(s.len());
        let candidate = &s[line_start..line_end];

        let overflows = wrap
            && surface.measure_width(style, candidate) > bounds.max.x - cursor.at.x;
        // With an empty pending line at the left margin there is nothing
        // shorter to flush; accept the over-wide token so the scan makes
        // progress.
        if overflows && !(line_len == 0 && cursor.at.x == bounds.min.x) {
            flush(surface, bounds, cursor, style, &s[line_start..line_start + line_len]);
            line_start += line_len;
            line_len = 0;
            cursor.new_line(bounds.min.x);
            trace!("wrapped line, cursor now at y={:.2}", cursor.at.y);
            continue;
        }

        line_len = line_end - line_start;

        if next_break.is_none() {
            let width = flush(surface, bounds, cursor, style, &s[line_start..]);
            cursor.at.x += width;
            return;
        }
    }
}

/// Issue the fill for one line and return its drawn width. Lines that
/// start at the left margin lose their leading spaces first (the space
/// carried over from the break that ended the previous line); a line
/// that is empty after the trim issues no draw call at all.
fn flush<S: Surface + ?Sized>(
    surface: &mut S,
    bounds: Rect,
    cursor: &Cursor,
    style: &TextStyle,
    line: &str,
) -> f64 {
    let line = if cursor.at.x == bounds.min.x {
        line.trim_start_matches(' ')
    } else {
        line
    };
    if line.is_empty() {
        return 0.0;
    }
    surface.fill_text(style, cursor.at, line);
    surface.measure_width(style, line)
}

/// Find the next candidate break strictly after the character at `from`,
/// and return the byte index ending the extended segment: the index of a
/// space (the space moves to the next segment) or the index just past a
/// hyphen (the hyphen stays on this one). The character at `from` itself
/// is the candidate that ended the previous extension; skip it.
fn next_break_after(s: &str, from: usize) -> Option<usize> {
    let mut chars = s[from..].char_indices();
    chars.next();
    for (i, ch) in chars {
        match ch {
            ' ' => return Some(from + i),
            '-' => return Some(from + i + 1),
            _ => {}
        }
    }
    None
}
