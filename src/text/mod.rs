//! # Text Measurement
//!
//! Width estimation and line breaking for the standard PDF fonts.
//!
//! The renderer only ever draws with the base-14 fonts, so widths come from
//! the Helvetica AFM advance table (scaled for the other families) instead of
//! a font file. Break opportunities follow UAX#14 via `unicode-linebreak`,
//! with a per-character fallback for words wider than the line.

use unicode_linebreak::{linebreaks, BreakOpportunity};

use crate::style::{Font, FontFamily};

/// Helvetica advance widths for U+0020..=U+007E, in 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0-9
    278, 278, 584, 584, 584, 556, 1015, // :;<=>?@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A-M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N-Z
    278, 278, 278, 469, 556, 333, // [\]^_`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a-m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n-z
    334, 260, 334, 584, // {|}~
];

/// Advance width of one character in points.
pub fn char_width(ch: char, font: &Font, size: f64) -> f64 {
    let em = match font.family {
        FontFamily::Courier => 600.0,
        FontFamily::Dingbats => 800.0,
        FontFamily::Helvetica | FontFamily::Times => {
            let base = match ch as u32 {
                cp @ 0x20..=0x7E => HELVETICA_WIDTHS[(cp - 0x20) as usize] as f64,
                _ => 556.0,
            };
            let family_scale = if matches!(font.family, FontFamily::Times) {
                0.9
            } else {
                1.0
            };
            let weight_scale = if font.bold { 1.06 } else { 1.0 };
            base * family_scale * weight_scale
        }
    };
    em / 1000.0 * size
}

/// Width of a run of text in points.
pub fn text_width(text: &str, font: &Font, size: f64) -> f64 {
    text.chars().map(|ch| char_width(ch, font, size)).sum()
}

/// Break text into lines no wider than `max_width`. Explicit newlines are
/// honoured. Always returns at least one (possibly empty) line.
pub fn wrap(text: &str, font: &Font, size: f64, max_width: f64) -> Vec<String> {
    if text.is_empty() {
        return vec![String::new()];
    }

    let fits = |s: &str| text_width(s.trim_end(), font, size) <= max_width;
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    let mut start = 0;

    for (end, opportunity) in linebreaks(text) {
        let segment = text[start..end].trim_end_matches(['\n', '\r']);
        start = end;

        let mut candidate = line.clone();
        candidate.push_str(segment);
        if fits(&candidate) {
            line = candidate;
        } else {
            if !line.trim_end().is_empty() {
                lines.push(line.trim_end().to_string());
                line.clear();
            }
            if fits(segment) {
                line.push_str(segment);
            } else {
                // A single word wider than the line: split it by character.
                for ch in segment.chars() {
                    line.push(ch);
                    if !fits(&line) && line.chars().count() > 1 {
                        line.pop();
                        lines.push(line.trim_end().to_string());
                        line.clear();
                        line.push(ch);
                    }
                }
            }
        }

        if opportunity == BreakOpportunity::Mandatory {
            lines.push(line.trim_end().to_string());
            line.clear();
        }
    }

    if !line.is_empty() || lines.is_empty() {
        lines.push(line.trim_end().to_string());
    }

    lines
}
