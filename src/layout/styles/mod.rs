//! # Document Styles
//!
//! Each style turns the same stream of prepared blocks into its own draw
//! ops: a banner header (modern), a framed page with boxed fields (classic),
//! or plain text (minimal). Block heights come from the style too, so the
//! shared pagination loop in [`super::Renderer`] never needs to know which
//! style it is driving.

mod classic;
mod minimal;
mod modern;

pub use classic::Classic;
pub use minimal::Minimal;
pub use modern::Modern;

use crate::model::DocumentSettings;
use crate::style::{StyleConfig, StyleName, TextStyle};
use crate::text::text_width;

use super::block::{symbol_font, value_text_style, Block};
use super::format::FormattedValue;
use super::DrawOp;

/// A visual rendering of the document.
pub trait DocumentStyle: Send + Sync {
    fn config(&self) -> &StyleConfig;

    /// Draw ops for the page-one header and the y position where fields
    /// start below it. Only called when the settings have something to show.
    fn header(&self, settings: &DocumentSettings) -> (Vec<DrawOp>, f64);

    /// Framing drawn on every page before any content.
    fn page_frame(&self) -> Vec<DrawOp> {
        Vec::new()
    }

    /// Horizontal padding between a column edge and its text.
    fn content_inset(&self) -> f64 {
        0.0
    }

    /// Height a block occupies, excluding the spacing after its line.
    fn block_height(&self, block: &Block) -> f64;

    /// Draw a block whose column starts at `x` with the given width; `y` is
    /// the top of the block.
    fn draw_block(&self, block: &Block, x: f64, y: f64, width: f64) -> Vec<DrawOp>;

    /// Footer for one page. `page_number` is 1-based.
    fn footer(
        &self,
        settings: &DocumentSettings,
        page_number: usize,
        total_pages: usize,
    ) -> Vec<DrawOp>;
}

/// The style implementation matching `config.name`, laying out with `config`.
pub fn for_config(config: StyleConfig) -> Box<dyn DocumentStyle> {
    match config.name {
        StyleName::Modern => Box::new(Modern::new(config)),
        StyleName::Classic => Box::new(Classic::new(config)),
        StyleName::Minimal => Box::new(Minimal::new(config)),
    }
}

/// Height of `count` lines in `style`.
pub(crate) fn lines_height(count: usize, style: &TextStyle) -> f64 {
    count as f64 * style.line_height()
}

/// One text op per line, starting with the line whose top is `top`.
/// Returns the ops and the y just below the last line.
pub(crate) fn draw_lines(lines: &[String], x: f64, top: f64, style: &TextStyle) -> (Vec<DrawOp>, f64) {
    let mut ops = Vec::with_capacity(lines.len());
    let mut y = top;
    for line in lines {
        if !line.is_empty() {
            ops.push(DrawOp::text(x, baseline(y, style), line, style));
        }
        y += style.line_height();
    }
    (ops, y)
}

/// Baseline of a line whose box starts at `top`.
pub(crate) fn baseline(top: f64, style: &TextStyle) -> f64 {
    top + style.size
}

/// Height of a formatted value.
pub(crate) fn value_height(value: &FormattedValue, value_lines: &[String], config: &StyleConfig) -> f64 {
    lines_height(value_lines.len(), value_text_style(value, config))
}

/// Draw a formatted value: the symbol run (ratings) followed by its text.
pub(crate) fn draw_value(
    value: &FormattedValue,
    value_lines: &[String],
    x: f64,
    top: f64,
    config: &StyleConfig,
) -> (Vec<DrawOp>, f64) {
    let style = value_text_style(value, config);
    match &value.symbols {
        Some(symbols) => {
            let font = symbol_font(config);
            let symbol_style = TextStyle::new(font, style.size, config.accent);
            let gap = style.size * 0.5;
            let text_x = x + text_width(symbols, &font, style.size) + gap;
            let y = baseline(top, style);
            let ops = vec![
                DrawOp::text(x, y, symbols, &symbol_style),
                DrawOp::text(text_x, y, &value.text, style),
            ];
            (ops, top + style.line_height())
        }
        None => draw_lines(value_lines, x, top, style),
    }
}

/// `Page N of M`.
pub(crate) fn page_label(page_number: usize, total_pages: usize) -> String {
    format!("Page {} of {}", page_number, total_pages)
}

/// Non-empty optional header text.
pub(crate) fn present(text: &Option<String>) -> Option<&str> {
    text.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::block::{Block, BlockContent};
    use crate::model::*;

    fn sample_fields() -> Vec<Field> {
        let mut heading = Field::new(FieldType::Heading1);
        heading.id = FieldId::from("h");
        let mut paragraph = Field::new(FieldType::Paragraph);
        paragraph.id = FieldId::from("p");
        paragraph.set_label("Please read the terms below before signing the agreement.");
        vec![
            Field::input("name", FieldType::Text, "Full name"),
            Field::input("score", FieldType::Rating, "Satisfaction"),
            Field::input("notes", FieldType::Textarea, "Notes"),
            heading,
            paragraph,
        ]
    }

    #[test]
    fn test_every_style_draws_inside_what_it_measures() {
        let sub = Submission::new()
            .with("name", "Grace Hopper")
            .with("score", 4)
            .with("notes", "line one\nline two");
        for name in StyleName::ALL {
            let style = for_config(name.config());
            let width = 240.0;
            let inner = width - 2.0 * style.content_inset();
            for field in sample_fields() {
                let block = Block::prepare(&field, &sub, style.config(), inner).unwrap();
                let height = style.block_height(&block);
                assert!(height > 0.0);
                for op in style.draw_block(&block, 100.0, 200.0, width) {
                    let (top, bottom) = op.vertical_extent();
                    assert!(top >= 200.0 - 1e-6, "{name}: {op:?} above block");
                    assert!(bottom <= 200.0 + height + 1e-6, "{name}: {op:?} below block");
                }
            }
        }
    }

    #[test]
    fn test_footers_carry_page_numbers_and_branding() {
        let settings = DocumentSettings {
            footer: Some("Acme Forms".to_string()),
            ..Default::default()
        };
        for name in StyleName::ALL {
            let style = for_config(name.config());
            let text: String = style
                .footer(&settings, 2, 3)
                .iter()
                .filter_map(DrawOp::as_text)
                .collect::<Vec<_>>()
                .join(" ");
            assert!(text.contains("Page 2 of 3"), "{name}: {text}");
            assert!(text.contains("Acme Forms"), "{name}: {text}");
        }
    }

    #[test]
    fn test_only_classic_frames_pages() {
        assert!(for_config(StyleName::Modern.config()).page_frame().is_empty());
        assert!(!for_config(StyleName::Classic.config()).page_frame().is_empty());
        assert!(for_config(StyleName::Minimal.config()).page_frame().is_empty());
    }

    #[test]
    fn test_header_pushes_fields_down() {
        let settings = DocumentSettings {
            title: "Invoice".to_string(),
            subtitle: Some("March".to_string()),
            date: Some("2024-03-01".to_string()),
            footer: None,
        };
        for name in StyleName::ALL {
            let style = for_config(name.config());
            let (ops, start) = style.header(&settings);
            assert!(!ops.is_empty());
            assert!(start > style.config().margin.top, "{name}");
        }
    }

    #[test]
    fn test_divider_has_height_but_no_text() {
        let block = Block {
            field_id: FieldId::from("d"),
            content: BlockContent::Divider,
        };
        for name in StyleName::ALL {
            let style = for_config(name.config());
            assert!(style.block_height(&block) > 0.0);
            let ops = style.draw_block(&block, 50.0, 50.0, 400.0);
            assert!(ops.iter().all(|op| op.as_text().is_none()));
        }
    }
}
