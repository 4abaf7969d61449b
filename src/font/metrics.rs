//! Built-in advance widths for the standard font families.
//!
//! Widths are stored per mille of the point size, the unit used by AFM
//! files, and cover the printable ASCII range for the Helvetica family.
//! The oblique variants share their upright widths and the Courier
//! family is fixed-pitch, so two tables cover everything the built-in
//! recorder surface needs. Characters and families outside the tables
//! fall back to a half-em advance.
//!
//! These metrics exist for the [`Recorder`](crate::surface::Recorder)
//! surface; surfaces backed by a real rasterizer measure with their own
//! font machinery and never consult this module.

/// Advance width of one character, in points.
pub fn advance(family: &str, ch: char, size: f64) -> f64 {
    per_mille(family, ch) as f64 / 1000.0 * size
}

/// Width of a whole string laid on one line, in points.
pub fn string_width(family: &str, text: &str, size: f64) -> f64 {
    text.chars().map(|ch| advance(family, ch, size)).sum()
}

/// Fallback advance for characters or families without a table entry.
const FALLBACK: u16 = 500;

fn per_mille(family: &str, ch: char) -> u16 {
    match family {
        "Helvetica" | "Helvetica-Oblique" => lookup(&HELVETICA, ch),
        "Helvetica-Bold" | "Helvetica-BoldOblique" => lookup(&HELVETICA_BOLD, ch),
        f if f.starts_with("Courier") => 600,
        _ => FALLBACK,
    }
}

fn lookup(table: &[u16; 95], ch: char) -> u16 {
    let code = ch as usize;
    if (0x20..=0x7e).contains(&code) {
        table[code - 0x20]
    } else {
        FALLBACK
    }
}

/// Helvetica advance widths for U+0020 ..= U+007E.
const HELVETICA: [u16; 95] = [
    278, // space
    278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ! - /
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0 - 9
    278, 278, 584, 584, 584, 556, 1015, // : - @
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A - M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N - Z
    278, 278, 278, 469, 556, 333, // [ - `
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a - m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n - z
    334, 260, 334, 584, // { - ~
];

/// Helvetica-Bold advance widths for U+0020 ..= U+007E.
const HELVETICA_BOLD: [u16; 95] = [
    278, // space
    333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ! - /
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0 - 9
    333, 333, 584, 584, 584, 611, 975, // : - @
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // A - M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N - Z
    333, 278, 333, 584, 556, 333, // [ - `
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // a - m
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // n - z
    389, 280, 389, 584, // { - ~
];
