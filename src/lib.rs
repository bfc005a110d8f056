//! # Formpress
//!
//! A form-template document engine.
//!
//! A form is an ordered list of rows of typed fields (invoice lines,
//! contract clauses, intake questions). Fields can carry conditions that
//! show or hide them depending on what was submitted for other fields.
//! Formpress takes the form, the submitted values and a style name and lays
//! the visible label/value pairs onto fixed-size pages, never splitting a
//! field across a page boundary.
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON/API)
//!       ↓
//!   [model]       Rows, typed fields, conditions, submitted values
//!       ↓
//!   [visibility]  Which fields are shown for this submission
//!       ↓
//!   [layout]      Page-aware renderer, one of three styles
//!       ↓
//!   [pdf]         Serialize page instructions to PDF bytes
//! ```
//!
//! The renderer's output, [`PageInstruction`], is style-agnostic: a list of
//! rectangles, lines and positioned text runs per page. [`pdf::PdfWriter`]
//! is one consumer of it; anything else that can draw those three
//! primitives is another.

pub mod error;
pub mod layout;
pub mod model;
pub mod pdf;
pub mod store;
pub mod style;
pub mod text;
pub mod visibility;

pub use error::{FormpressError, Result};
pub use layout::{DrawOp, PageInstruction, Renderer};
pub use model::{FieldId, FieldType, FieldValue, FormDefinition, RowId, Submission};
pub use style::{PageSize, StyleConfig, StyleName};
pub use visibility::{evaluate, VisibilityMap};

use pdf::PdfWriter;

/// Render the visible fields of a form to page instructions.
///
/// `style` must be `modern`, `classic` or `minimal`; anything else is
/// [`FormpressError::UnknownStyle`] and nothing is rendered. Callers that
/// want a fallback instead use [`StyleName::parse_or_default`] and
/// [`Renderer`] directly.
pub fn render(
    form: &FormDefinition,
    submission: &Submission,
    visibility: &VisibilityMap,
    style: &str,
) -> Result<Vec<PageInstruction>> {
    let name: StyleName = style.parse()?;
    Ok(Renderer::new(name).render(form, submission, visibility))
}

/// Evaluate visibility, render and write a PDF in one call.
pub fn render_pdf(form: &FormDefinition, submission: &Submission, style: &str) -> Result<Vec<u8>> {
    let visibility = evaluate(form, submission);
    let pages = render(form, submission, &visibility, style)?;
    PdfWriter::new().write(&pages, &form.settings)
}

/// Render a form and its values, both given as JSON, to PDF bytes.
pub fn render_json(form_json: &str, values_json: &str, style: &str) -> Result<Vec<u8>> {
    let form = parse_form(form_json)?;
    let submission = parse_submission(values_json)?;
    render_pdf(&form, &submission, style)
}

/// Parse a form definition from JSON.
pub fn parse_form(json: &str) -> Result<FormDefinition> {
    Ok(serde_json::from_str(json)?)
}

/// Parse submitted values (an object of field id to value) from JSON.
pub fn parse_submission(json: &str) -> Result<Submission> {
    Ok(serde_json::from_str(json)?)
}
