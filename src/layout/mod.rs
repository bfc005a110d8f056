//! # Page-Aware Document Renderer
//!
//! Lays a form's visible fields onto fixed-size pages. The renderer never
//! builds one tall canvas and slices it; it walks the form top to bottom
//! with a cursor on the current page:
//!
//! 1. Open page one, draw the style's page frame and (if the document has
//!    a title, subtitle or date) the header.
//! 2. Chunk each row's visible fields into lines of `columnCount` blocks.
//!    A line is unbreakable and as tall as its tallest block.
//! 3. Before placing a line, ask: "does this fit above the bottom limit?"
//!    If yes, place it. If not, close the page and place it at the top of a
//!    fresh one. A line taller than a fresh page is placed anyway.
//! 4. Once the page count is known, add the footer to every page.
//!
//! Styles only decide what a block looks like and how tall it is. The
//! pagination loop is shared, so every style honours the same contract.

pub mod block;
pub mod format;
pub mod page_break;
pub mod styles;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{FormpressError, Result};
use crate::model::*;
use crate::style::{Color, Font, StyleConfig, StyleName, TextStyle};
use crate::visibility::VisibilityMap;

use self::block::Block;
use self::page_break::{decide_break, BreakDecision};
use self::styles::DocumentStyle;

/// Outline of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

/// One primitive drawing operation. Coordinates are in points with the
/// origin at the top-left corner of the page; text `y` is the baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum DrawOp {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fill: Option<Color>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stroke: Option<Stroke>,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Color,
        width: f64,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        font: Font,
        size: f64,
        color: Color,
    },
}

impl DrawOp {
    pub fn text(x: f64, y: f64, text: &str, style: &TextStyle) -> Self {
        DrawOp::Text {
            x,
            y,
            text: text.to_string(),
            font: style.font,
            size: style.size,
            color: style.color,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            DrawOp::Text { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Approximate (top, bottom) of the ink. Text extends one size above
    /// its baseline and a quarter size below.
    pub fn vertical_extent(&self) -> (f64, f64) {
        match self {
            DrawOp::Rect { y, height, .. } => (*y, y + height),
            DrawOp::Line { y1, y2, .. } => (y1.min(*y2), y1.max(*y2)),
            DrawOp::Text { y, size, .. } => (y - size, y + size * 0.25),
        }
    }
}

/// One page of the rendered document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInstruction {
    /// 1-based page number.
    pub number: usize,
    pub width: f64,
    pub height: f64,
    pub ops: Vec<DrawOp>,
    /// Fields placed on this page, in placement order.
    pub fields: Vec<FieldId>,
}

impl PageInstruction {
    /// All text runs on the page, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(DrawOp::as_text)
    }
}

/// Per-document renderer state. Only `Done` hands pages back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RenderState {
    Start,
    EmittingHeader,
    EmittingFields { page: usize },
    EmittingFooter { page: usize, last: bool },
    Done,
}

impl RenderState {
    fn can_advance_to(self, next: RenderState) -> bool {
        use RenderState::*;
        matches!(
            (self, next),
            (Start, EmittingHeader)
                | (EmittingHeader, EmittingFields { .. })
                | (EmittingFields { .. }, EmittingFooter { .. })
                | (EmittingFooter { last: false, .. }, EmittingFields { .. })
                | (EmittingFooter { last: true, .. }, Done)
        )
    }

    fn advance(&mut self, next: RenderState) {
        debug_assert!(self.can_advance_to(next), "{:?} -> {:?}", self, next);
        debug!("render: {:?} -> {:?}", self, next);
        *self = next;
    }
}

/// The page currently being filled.
struct PageCursor {
    number: usize,
    width: f64,
    height: f64,
    y: f64,
    bottom: f64,
    ops: Vec<DrawOp>,
    fields: Vec<FieldId>,
    has_content: bool,
}

impl PageCursor {
    fn new(number: usize, style: &dyn DocumentStyle, top: f64) -> Self {
        let config = style.config();
        let (width, height) = config.page_dimensions();
        Self {
            number,
            width,
            height,
            y: top,
            bottom: config.bottom_limit(),
            ops: style.page_frame(),
            fields: Vec::new(),
            has_content: false,
        }
    }

    fn remaining_height(&self) -> f64 {
        (self.bottom - self.y).max(0.0)
    }

    fn new_page(&self, style: &dyn DocumentStyle) -> Self {
        PageCursor::new(self.number + 1, style, style.config().continuation_top)
    }

    fn finalize(self) -> PageInstruction {
        PageInstruction {
            number: self.number,
            width: self.width,
            height: self.height,
            ops: self.ops,
            fields: self.fields,
        }
    }
}

/// Renders forms under one style.
pub struct Renderer {
    style: Box<dyn DocumentStyle>,
}

impl Renderer {
    /// A renderer for a built-in style.
    pub fn new(name: StyleName) -> Self {
        Self {
            style: styles::for_config(name.config()),
        }
    }

    /// A renderer with custom geometry, type or symbols. The drawing style
    /// is picked by `config.name`.
    pub fn with_config(config: StyleConfig) -> Result<Self> {
        let (width, height) = config.page_dimensions();
        if width <= 0.0 || height <= 0.0 {
            return Err(FormpressError::RenderError(format!(
                "page size {}x{} is not positive",
                width, height
            )));
        }
        if config.content_width() <= 0.0 {
            return Err(FormpressError::RenderError(
                "horizontal margins leave no room for content".to_string(),
            ));
        }
        if config.bottom_limit() <= config.margin.top.max(config.continuation_top) {
            return Err(FormpressError::RenderError(
                "vertical margins and footer leave no room for content".to_string(),
            ));
        }
        Ok(Self {
            style: styles::for_config(config),
        })
    }

    pub fn config(&self) -> &StyleConfig {
        self.style.config()
    }

    /// Lay out the visible fields of `form` with their submitted values.
    /// Always returns at least one page.
    pub fn render(
        &self,
        form: &FormDefinition,
        submission: &Submission,
        visibility: &VisibilityMap,
    ) -> Vec<PageInstruction> {
        let style = self.style.as_ref();
        let config = style.config();
        let mut state = RenderState::Start;
        let mut pages: Vec<PageInstruction> = Vec::new();
        let mut cursor = PageCursor::new(1, style, config.margin.top);

        state.advance(RenderState::EmittingHeader);
        if form.settings.has_header() {
            let (ops, content_top) = style.header(&form.settings);
            cursor.ops.extend(ops);
            cursor.y = content_top;
            cursor.has_content = true;
        }

        state.advance(RenderState::EmittingFields { page: 1 });
        for row in &form.rows {
            let columns = row.column_count.clamp(1, 3) as usize;
            if columns != row.column_count as usize {
                debug!(
                    "row {}: column count {} clamped to {}",
                    row.id, row.column_count, columns
                );
            }
            let gap = config.column_gap;
            let column_width =
                (config.content_width() - gap * (columns as f64 - 1.0)) / columns as f64;
            let inner_width = column_width - 2.0 * style.content_inset();

            let blocks: Vec<Block> = row
                .fields
                .iter()
                .filter(|field| visibility.is_visible(&field.id))
                .filter_map(|field| Block::prepare(field, submission, config, inner_width))
                .collect();

            for line in blocks.chunks(columns) {
                let height = line
                    .iter()
                    .map(|block| style.block_height(block))
                    .fold(0.0, f64::max);

                match decide_break(cursor.remaining_height(), height, !cursor.has_content) {
                    BreakDecision::Place => {}
                    BreakDecision::MoveToNextPage => {
                        state.advance(RenderState::EmittingFooter {
                            page: cursor.number,
                            last: false,
                        });
                        let next = cursor.new_page(style);
                        debug!(
                            "page {} full at y={:.1}, line of {:.1}pt moves to page {}",
                            cursor.number, cursor.y, height, next.number
                        );
                        pages.push(std::mem::replace(&mut cursor, next).finalize());
                        state.advance(RenderState::EmittingFields {
                            page: cursor.number,
                        });
                        if height > cursor.remaining_height() {
                            warn!(
                                "row {}: line of {:.1}pt is taller than a page ({:.1}pt available), placing anyway",
                                row.id,
                                height,
                                cursor.remaining_height()
                            );
                        }
                    }
                    BreakDecision::PlaceOversized => {
                        warn!(
                            "row {}: line of {:.1}pt is taller than a page ({:.1}pt available), placing anyway",
                            row.id,
                            height,
                            cursor.remaining_height()
                        );
                    }
                }

                for (i, block) in line.iter().enumerate() {
                    let x = config.margin.left + i as f64 * (column_width + gap);
                    cursor.ops.extend(style.draw_block(block, x, cursor.y, column_width));
                    cursor.fields.push(block.field_id.clone());
                }
                cursor.y += height + config.field_spacing;
                cursor.has_content = true;
            }
        }

        state.advance(RenderState::EmittingFooter {
            page: cursor.number,
            last: true,
        });
        pages.push(cursor.finalize());

        let total = pages.len();
        for page in &mut pages {
            let footer = style.footer(&form.settings, page.number, total);
            page.ops.extend(footer);
        }

        state.advance(RenderState::Done);
        pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::PageSize;
    use crate::visibility::evaluate;

    fn row(id: &str, columns: u8, fields: Vec<Field>) -> Row {
        Row {
            id: RowId::from(id),
            column_count: columns,
            fields,
        }
    }

    fn form(rows: Vec<Row>) -> FormDefinition {
        FormDefinition {
            rows,
            settings: DocumentSettings::default(),
        }
    }

    fn render_all(form: &FormDefinition, submission: &Submission, name: StyleName) -> Vec<PageInstruction> {
        let visibility = evaluate(form, submission);
        Renderer::new(name).render(form, submission, &visibility)
    }

    #[test]
    fn test_empty_form_still_has_one_page() {
        for name in StyleName::ALL {
            let pages = render_all(&FormDefinition::default(), &Submission::new(), name);
            assert_eq!(pages.len(), 1);
            assert_eq!(pages[0].number, 1);
            assert!(pages[0].fields.is_empty());
            assert!(pages[0].texts().any(|t| t.contains("Page 1 of 1")));
        }
    }

    #[test]
    fn test_header_only_when_settings_have_one() {
        let mut f = form(vec![row("r", 1, vec![Field::input("a", FieldType::Text, "Name")])]);
        let plain = render_all(&f, &Submission::new(), StyleName::Minimal);
        assert!(!plain[0].texts().any(|t| t == "Quarterly report"));

        f.settings.title = "Quarterly report".to_string();
        let titled = render_all(&f, &Submission::new(), StyleName::Minimal);
        assert!(titled[0].texts().any(|t| t == "Quarterly report"));
    }

    #[test]
    fn test_header_is_drawn_on_the_first_page_only() {
        let fields = (0..80)
            .map(|i| Field::input(format!("f{i}"), FieldType::Text, "Line item"))
            .collect();
        let mut f = form(vec![row("r", 1, fields)]);
        f.settings.title = "Quarterly report".to_string();
        for name in StyleName::ALL {
            let pages = render_all(&f, &Submission::new(), name);
            assert!(pages.len() > 1, "{name}");
            let titles: Vec<usize> = pages
                .iter()
                .map(|p| p.texts().filter(|t| *t == "Quarterly report").count())
                .collect();
            assert_eq!(titles[0], 1, "{name}");
            assert!(titles[1..].iter().all(|&n| n == 0), "{name}: {titles:?}");
        }
    }

    #[test]
    fn test_hidden_fields_are_not_drawn() {
        let target = Field::input("b", FieldType::Text, "Secret").with_conditions(vec![Condition::new(
            ConditionAction::Hide,
            ConditionLogic::All,
            vec![Rule::new("a", Operator::Equals, "hide")],
        )]);
        let f = form(vec![row(
            "r",
            1,
            vec![Field::input("a", FieldType::Text, "Switch"), target],
        )]);
        let sub = Submission::new().with("a", "hide").with("b", "classified");
        let pages = render_all(&f, &sub, StyleName::Modern);
        assert_eq!(pages[0].fields, vec![FieldId::from("a")]);
        assert!(!pages[0].texts().any(|t| t.contains("classified")));
    }

    #[test]
    fn test_columns_share_a_baseline() {
        let f = form(vec![row(
            "r",
            2,
            vec![
                Field::input("a", FieldType::Text, "First"),
                Field::input("b", FieldType::Text, "Last"),
                Field::input("c", FieldType::Text, "Middle"),
            ],
        )]);
        let pages = render_all(&f, &Submission::new(), StyleName::Minimal);
        let position = |label: &str| {
            pages[0]
                .ops
                .iter()
                .find_map(|op| match op {
                    DrawOp::Text { x, y, text, .. } if text == label => Some((*x, *y)),
                    _ => None,
                })
                .unwrap()
        };
        let (ax, ay) = position("First");
        let (bx, by) = position("Last");
        let (cx, cy) = position("Middle");
        assert_eq!(ay, by);
        assert!(bx > ax);
        assert_eq!(cx, ax);
        assert!(cy > ay);
    }

    #[test]
    fn test_classic_frames_every_page() {
        let fields = (0..60)
            .map(|i| Field::input(format!("f{i}"), FieldType::Text, "Line item"))
            .collect();
        let f = form(vec![row("r", 1, fields)]);
        let pages = render_all(&f, &Submission::new(), StyleName::Classic);
        assert!(pages.len() > 1);
        for page in &pages {
            assert!(matches!(
                page.ops.first(),
                Some(DrawOp::Rect { fill: None, stroke: Some(_), .. })
            ));
        }
    }

    #[test]
    fn test_oversized_line_is_placed_on_its_own_page() {
        let mut paragraph = Field::new(FieldType::Paragraph);
        paragraph.id = FieldId::from("p");
        paragraph.set_label(&"A very long clause. ".repeat(600));
        let f = form(vec![
            row("r1", 1, vec![Field::input("a", FieldType::Text, "Before")]),
            row("r2", 1, vec![paragraph]),
            row("r3", 1, vec![Field::input("b", FieldType::Text, "After")]),
        ]);
        let pages = render_all(&f, &Submission::new(), StyleName::Minimal);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[1].fields, vec![FieldId::from("p")]);
        assert_eq!(pages[2].fields, vec![FieldId::from("b")]);
    }

    #[test]
    fn test_fields_stay_above_the_bottom_limit() {
        let fields = (0..80)
            .map(|i| Field::input(format!("f{i}"), FieldType::Text, "Item"))
            .collect();
        let f = form(vec![row("r", 3, fields)]);
        for name in StyleName::ALL {
            let renderer = Renderer::new(name);
            let limit = renderer.config().bottom_limit();
            let sub = Submission::new();
            let pages = renderer.render(&f, &sub, &evaluate(&f, &sub));
            let total = pages.len();
            for page in &pages {
                let frame_len = renderer.style.page_frame().len();
                let footer_len = renderer
                    .style
                    .footer(&f.settings, page.number, total)
                    .len();
                let body = &page.ops[frame_len..page.ops.len() - footer_len];
                for op in body {
                    assert!(op.vertical_extent().1 <= limit + 1e-6, "{name}: {op:?}");
                }
            }
        }
    }

    #[test]
    fn test_with_config_rejects_degenerate_pages() {
        let mut config = StyleName::Modern.config();
        config.page_size = PageSize::Custom {
            width: 80.0,
            height: 80.0,
        };
        assert!(matches!(
            Renderer::with_config(config),
            Err(FormpressError::RenderError(_))
        ));

        let mut letter = StyleName::Classic.config();
        letter.page_size = PageSize::Letter;
        let renderer = Renderer::with_config(letter).unwrap();
        let pages = renderer.render(
            &FormDefinition::default(),
            &Submission::new(),
            &VisibilityMap::default(),
        );
        assert_eq!((pages[0].width, pages[0].height), (612.0, 792.0));
    }

    #[test]
    fn test_state_machine_rejects_skipped_steps() {
        assert!(RenderState::Start.can_advance_to(RenderState::EmittingHeader));
        assert!(!RenderState::Start.can_advance_to(RenderState::Done));
        assert!(!RenderState::EmittingFooter { page: 1, last: false }.can_advance_to(RenderState::Done));
    }
}
