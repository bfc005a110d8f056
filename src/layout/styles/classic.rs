//! Classic: serif type, a ruled frame on every page, each field in a box.

use crate::layout::block::{Block, BlockContent};
use crate::layout::{DrawOp, Stroke};
use crate::model::DocumentSettings;
use crate::style::{StyleConfig, TextStyle};
use crate::text::{text_width, wrap};

use super::*;

/// Padding inside a field box.
const BOX_PADDING: f64 = 6.0;
/// Distance from the margin to the page frame.
const FRAME_OFFSET: f64 = 24.0;

pub struct Classic {
    config: StyleConfig,
}

impl Classic {
    pub fn new(config: StyleConfig) -> Self {
        Self { config }
    }

    fn centered(&self, text: &str, y: f64, style: &TextStyle) -> DrawOp {
        let c = &self.config;
        let w = text_width(text, &style.font, style.size);
        let x = c.margin.left + ((c.content_width() - w) / 2.0).max(0.0);
        DrawOp::text(x, y, text, style)
    }

    fn rule(&self, y: f64, width: f64) -> DrawOp {
        let c = &self.config;
        DrawOp::Line {
            x1: c.margin.left,
            y1: y,
            x2: c.margin.left + c.content_width(),
            y2: y,
            color: c.rule_color,
            width,
        }
    }
}

impl DocumentStyle for Classic {
    fn config(&self) -> &StyleConfig {
        &self.config
    }

    fn header(&self, settings: &DocumentSettings) -> (Vec<DrawOp>, f64) {
        let c = &self.config;
        let mut ops = Vec::new();
        let mut y = c.margin.top;

        if !settings.title.trim().is_empty() {
            for line in wrap(settings.title.trim(), &c.title.font, c.title.size, c.content_width()) {
                ops.push(self.centered(&line, baseline(y, &c.title), &c.title));
                y += c.title.line_height();
            }
        }
        if let Some(subtitle) = present(&settings.subtitle) {
            ops.push(self.centered(subtitle, baseline(y, &c.subtitle), &c.subtitle));
            y += c.subtitle.line_height();
        }
        if let Some(date) = present(&settings.date) {
            ops.push(self.centered(date, baseline(y, &c.subtitle), &c.subtitle));
            y += c.subtitle.line_height();
        }

        // Double rule under the title block.
        y += 6.0;
        ops.push(self.rule(y, 1.2));
        ops.push(self.rule(y + 3.0, 0.5));
        (ops, y + 3.0 + c.field_spacing * 2.0)
    }

    fn page_frame(&self) -> Vec<DrawOp> {
        let c = &self.config;
        let (page_w, page_h) = c.page_dimensions();
        vec![DrawOp::Rect {
            x: c.margin.left - FRAME_OFFSET,
            y: c.margin.top - FRAME_OFFSET,
            width: page_w - c.margin.horizontal() + 2.0 * FRAME_OFFSET,
            height: page_h - c.margin.top - c.margin.bottom + 2.0 * FRAME_OFFSET,
            fill: None,
            stroke: Some(Stroke {
                color: c.rule_color,
                width: 1.0,
            }),
        }]
    }

    fn content_inset(&self) -> f64 {
        BOX_PADDING
    }

    fn block_height(&self, block: &Block) -> f64 {
        let c = &self.config;
        match &block.content {
            BlockContent::Pair {
                label_lines,
                value,
                value_lines,
            } => {
                2.0 * BOX_PADDING
                    + lines_height(label_lines.len(), &c.label)
                    + 2.0
                    + value_height(value, value_lines, c)
            }
            BlockContent::Heading { level: 1, lines } => lines_height(lines.len(), &c.heading1) + 4.0,
            BlockContent::Heading { lines, .. } => lines_height(lines.len(), &c.heading2),
            BlockContent::Paragraph { lines } => lines_height(lines.len(), &c.paragraph),
            BlockContent::Divider => 14.0,
        }
    }

    fn draw_block(&self, block: &Block, x: f64, y: f64, width: f64) -> Vec<DrawOp> {
        let c = &self.config;
        let inner_x = x + BOX_PADDING;
        match &block.content {
            BlockContent::Pair {
                label_lines,
                value,
                value_lines,
            } => {
                let mut ops = vec![DrawOp::Rect {
                    x,
                    y,
                    width,
                    height: self.block_height(block),
                    fill: None,
                    stroke: Some(Stroke {
                        color: c.rule_color,
                        width: 0.6,
                    }),
                }];
                let (label_ops, below_label) =
                    draw_lines(label_lines, inner_x, y + BOX_PADDING, &c.label);
                ops.extend(label_ops);
                ops.extend(draw_value(value, value_lines, inner_x, below_label + 2.0, c).0);
                ops
            }
            BlockContent::Heading { level: 1, lines } => {
                let (mut ops, below) = draw_lines(lines, inner_x, y, &c.heading1);
                ops.push(DrawOp::Line {
                    x1: inner_x,
                    y1: below + 2.0,
                    x2: x + width - BOX_PADDING,
                    y2: below + 2.0,
                    color: c.rule_color,
                    width: 0.5,
                });
                ops
            }
            BlockContent::Heading { lines, .. } => draw_lines(lines, inner_x, y, &c.heading2).0,
            BlockContent::Paragraph { lines } => draw_lines(lines, inner_x, y, &c.paragraph).0,
            BlockContent::Divider => vec![
                DrawOp::Line {
                    x1: x,
                    y1: y + 6.0,
                    x2: x + width,
                    y2: y + 6.0,
                    color: c.rule_color,
                    width: 0.5,
                },
                DrawOp::Line {
                    x1: x,
                    y1: y + 8.0,
                    x2: x + width,
                    y2: y + 8.0,
                    color: c.rule_color,
                    width: 0.5,
                },
            ],
        }
    }

    fn footer(
        &self,
        settings: &DocumentSettings,
        page_number: usize,
        total_pages: usize,
    ) -> Vec<DrawOp> {
        let c = &self.config;
        let page = page_label(page_number, total_pages);
        let text = match present(&settings.footer) {
            Some(brand) => format!("{}  |  {}", brand, page),
            None => page,
        };
        let base = c.bottom_limit() + c.footer_reserve - 6.0;
        vec![self.centered(&text, base, &c.footer)]
    }
}
