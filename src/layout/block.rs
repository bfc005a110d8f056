//! Blocks: one field, formatted and line-broken for a given column width.
//!
//! Preparing a block is style-independent apart from the fonts and sizes it
//! measures with; a style then decides how tall the block is and what to
//! draw for it.

use crate::model::*;
use crate::style::{Font, FontFamily, StyleConfig, TextStyle};
use crate::text::wrap;

use super::format::{format_value, FormattedValue};

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub field_id: FieldId,
    pub content: BlockContent,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BlockContent {
    /// An input field: label plus formatted value.
    Pair {
        label_lines: Vec<String>,
        value: FormattedValue,
        value_lines: Vec<String>,
    },
    Heading {
        level: u8,
        lines: Vec<String>,
    },
    Paragraph {
        lines: Vec<String>,
    },
    Divider,
}

impl Block {
    /// Prepare a visible field for drawing in a column `inner_width` wide.
    /// Returns `None` for fields that have nothing to draw (an input without
    /// a label, a heading without content).
    pub fn prepare(
        field: &Field,
        submission: &Submission,
        config: &StyleConfig,
        inner_width: f64,
    ) -> Option<Block> {
        let width = inner_width.max(1.0);
        let lines = |text: &str, style: &TextStyle| wrap(text, &style.font, style.size, width);

        let content = match &field.kind {
            FieldKind::Divider => BlockContent::Divider,
            FieldKind::Heading1(c) | FieldKind::Heading2(c) => {
                if c.content.trim().is_empty() {
                    return None;
                }
                let (level, style) = match field.field_type() {
                    FieldType::Heading1 => (1, &config.heading1),
                    _ => (2, &config.heading2),
                };
                BlockContent::Heading {
                    level,
                    lines: lines(&c.content, style),
                }
            }
            FieldKind::Paragraph(c) => {
                if c.content.trim().is_empty() {
                    return None;
                }
                BlockContent::Paragraph {
                    lines: lines(&c.content, &config.paragraph),
                }
            }
            _ => {
                let label = field.label().unwrap_or_default();
                if label.trim().is_empty() {
                    return None;
                }
                let value = format_value(field, submission.get(&field.id), config);
                let value_style = value_text_style(&value, config);
                let value_lines = if value.symbols.is_some() {
                    vec![value.text.clone()]
                } else {
                    lines(&value.text, value_style)
                };
                BlockContent::Pair {
                    label_lines: lines(label, &config.label),
                    value,
                    value_lines,
                }
            }
        };

        Some(Block {
            field_id: field.id.clone(),
            content,
        })
    }
}

/// Text style a value is drawn in: the placeholder style for missing values.
pub fn value_text_style<'a>(value: &FormattedValue, config: &'a StyleConfig) -> &'a TextStyle {
    if value.is_placeholder {
        &config.placeholder_text
    } else {
        &config.value
    }
}

/// Font for rating symbols.
pub fn symbol_font(config: &StyleConfig) -> Font {
    if config.symbols.rating_dingbats {
        Font::regular(FontFamily::Dingbats)
    } else {
        config.value.font
    }
}
