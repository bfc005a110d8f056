//! Minimal: text only. A muted label above each value, no boxes or banners.

use crate::layout::block::{Block, BlockContent};
use crate::layout::DrawOp;
use crate::model::DocumentSettings;
use crate::style::StyleConfig;
use crate::text::{text_width, wrap};

use super::*;

pub struct Minimal {
    config: StyleConfig,
}

impl Minimal {
    pub fn new(config: StyleConfig) -> Self {
        Self { config }
    }
}

impl DocumentStyle for Minimal {
    fn config(&self) -> &StyleConfig {
        &self.config
    }

    fn header(&self, settings: &DocumentSettings) -> (Vec<DrawOp>, f64) {
        let c = &self.config;
        let x = c.margin.left;
        let mut ops = Vec::new();
        let mut y = c.margin.top;

        if !settings.title.trim().is_empty() {
            let lines = wrap(settings.title.trim(), &c.title.font, c.title.size, c.content_width());
            let (title_ops, next) = draw_lines(&lines, x, y, &c.title);
            ops.extend(title_ops);
            y = next;
        }
        let meta: Vec<&str> = [present(&settings.subtitle), present(&settings.date)]
            .into_iter()
            .flatten()
            .collect();
        if !meta.is_empty() {
            let (meta_ops, next) = draw_lines(&[meta.join(" / ")], x, y, &c.subtitle);
            ops.extend(meta_ops);
            y = next;
        }
        (ops, y + c.field_spacing * 2.0)
    }

    fn block_height(&self, block: &Block) -> f64 {
        let c = &self.config;
        match &block.content {
            BlockContent::Pair {
                label_lines,
                value,
                value_lines,
            } => lines_height(label_lines.len(), &c.label) + value_height(value, value_lines, c),
            BlockContent::Heading { level: 1, lines } => lines_height(lines.len(), &c.heading1),
            BlockContent::Heading { lines, .. } => lines_height(lines.len(), &c.heading2),
            BlockContent::Paragraph { lines } => lines_height(lines.len(), &c.paragraph),
            BlockContent::Divider => 10.0,
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
                ops.extend(draw_value(value, value_lines, x, below_label, c).0);
                ops
            }
            BlockContent::Heading { level: 1, lines } => draw_lines(lines, x, y, &c.heading1).0,
            BlockContent::Heading { lines, .. } => draw_lines(lines, x, y, &c.heading2).0,
            BlockContent::Paragraph { lines } => draw_lines(lines, x, y, &c.paragraph).0,
            BlockContent::Divider => vec![DrawOp::Line {
                x1: x,
                y1: y + 5.0,
                x2: x + width,
                y2: y + 5.0,
                color: c.rule_color,
                width: 0.5,
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
        let base = c.bottom_limit() + c.footer_reserve - 4.0;
        let mut ops = Vec::new();
        if let Some(brand) = present(&settings.footer) {
            ops.push(DrawOp::text(c.margin.left, base, brand, &c.footer));
        }
        let label = page_label(page_number, total_pages);
        let x = page_w - c.margin.right - text_width(&label, &c.footer.font, c.footer.size);
        ops.push(DrawOp::text(x, base, &label, &c.footer));
        ops
    }
}
