//! Modern: a full-width accent banner, small bold labels, values on an
//! underline.

use crate::layout::block::{Block, BlockContent};
use crate::layout::DrawOp;
use crate::model::DocumentSettings;
use crate::style::StyleConfig;
use crate::text::{text_width, wrap};

use super::*;

const LABEL_GAP: f64 = 3.0;
const UNDERLINE_GAP: f64 = 4.0;
const BANNER_PADDING: f64 = 28.0;

pub struct Modern {
    config: StyleConfig,
}

impl Modern {
    pub fn new(config: StyleConfig) -> Self {
        Self { config }
    }
}

impl DocumentStyle for Modern {
    fn config(&self) -> &StyleConfig {
        &self.config
    }

    fn header(&self, settings: &DocumentSettings) -> (Vec<DrawOp>, f64) {
        let c = &self.config;
        let (page_w, _) = c.page_dimensions();
        let x = c.margin.left;
        let mut text_ops = Vec::new();
        let mut y = BANNER_PADDING;

        if !settings.title.trim().is_empty() {
            let lines = wrap(settings.title.trim(), &c.title.font, c.title.size, c.content_width());
            let (ops, next) = draw_lines(&lines, x, y, &c.title);
            text_ops.extend(ops);
            y = next;
        }
        for meta in [present(&settings.subtitle), present(&settings.date)].into_iter().flatten() {
            let (ops, next) = draw_lines(&[meta.to_string()], x, y, &c.subtitle);
            text_ops.extend(ops);
            y = next;
        }

        let banner_height = y + BANNER_PADDING * 0.6;
        let mut ops = vec![DrawOp::Rect {
            x: 0.0,
            y: 0.0,
            width: page_w,
            height: banner_height,
            fill: Some(c.accent),
            stroke: None,
        }];
        ops.extend(text_ops);
        (ops, banner_height + c.field_spacing * 2.0)
    }

    fn block_height(&self, block: &Block) -> f64 {
        let c = &self.config;
        match &block.content {
            BlockContent::Pair {
                label_lines,
                value,
                value_lines,
            } => {
                lines_height(label_lines.len(), &c.label)
                    + LABEL_GAP
                    + value_height(value, value_lines, c)
                    + UNDERLINE_GAP
            }
            BlockContent::Heading { level: 1, lines } => lines_height(lines.len(), &c.heading1) + 6.0,
            BlockContent::Heading { lines, .. } => lines_height(lines.len(), &c.heading2),
            BlockContent::Paragraph { lines } => lines_height(lines.len(), &c.paragraph),
            BlockContent::Divider => 12.0,
        }
    }

    fn draw_block(&self, block: &Block, x: f64, y: f64, width: f64) -> Vec<DrawOp> {
        let c = &self.config;
        match &block.content {
            BlockContent::Pair {
                label_lines,
                value,
                value_lines,
            } => {
                let (mut ops, below_label) = draw_lines(label_lines, x, y, &c.label);
                let (value_ops, below_value) =
                    draw_value(value, value_lines, x, below_label + LABEL_GAP, c);
                ops.extend(value_ops);
                let rule_y = below_value + UNDERLINE_GAP * 0.5;
                ops.push(DrawOp::Line {
                    x1: x,
                    y1: rule_y,
                    x2: x + width,
                    y2: rule_y,
                    color: c.rule_color,
                    width: 0.75,
                });
                ops
            }
            BlockContent::Heading { level: 1, lines } => {
                let (mut ops, below) = draw_lines(lines, x, y, &c.heading1);
                let bar_y = below + 3.0;
                ops.push(DrawOp::Line {
                    x1: x,
                    y1: bar_y,
                    x2: x + width.min(48.0),
                    y2: bar_y,
                    color: c.accent,
                    width: 2.0,
                });
                ops
            }
            BlockContent::Heading { lines, .. } => draw_lines(lines, x, y, &c.heading2).0,
            BlockContent::Paragraph { lines } => draw_lines(lines, x, y, &c.paragraph).0,
            BlockContent::Divider => vec![DrawOp::Rect {
                x,
                y: y + 5.5,
                width,
                height: 1.0,
                fill: Some(c.rule_color),
                stroke: None,
            }],
        }
    }

    fn footer(
        &self,
        settings: &DocumentSettings,
        page_number: usize,
        total_pages: usize,
    ) -> Vec<DrawOp> {
        let c = &self.config;
        let (page_w, _) = c.page_dimensions();
        let top = c.bottom_limit();
        let right = page_w - c.margin.right;
        let base = top + c.footer_reserve - 4.0;

        let mut ops = vec![DrawOp::Line {
            x1: c.margin.left,
            y1: top + 8.0,
            x2: right,
            y2: top + 8.0,
            color: c.rule_color,
            width: 0.5,
        }];
        if let Some(brand) = present(&settings.footer) {
            ops.push(DrawOp::text(c.margin.left, base, brand, &c.footer));
        }
        let label = page_label(page_number, total_pages);
        let label_x = right - text_width(&label, &c.footer.font, c.footer.size);
        ops.push(DrawOp::text(label_x, base, &label, &c.footer));
        ops
    }
}
