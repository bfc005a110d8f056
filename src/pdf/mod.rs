//! # PDF Serializer
//!
//! Takes the page instructions from the renderer and writes a PDF file.
//!
//! This is a from-scratch PDF 1.7 writer. The renderer only draws filled or
//! stroked rectangles, lines and text in the 14 standard fonts, so the
//! subset of PDF needed is small: no font embedding, no images, one
//! compressed content stream per page.
//!
//! ## PDF Structure (simplified)
//!
//! ```text
//! %PDF-1.7            <- header
//! 1 0 obj ... endobj  <- objects (catalog, page tree, fonts, pages, streams)
//! 2 0 obj ... endobj
//! ...
//! xref                <- cross-reference table (byte offsets of each object)
//! trailer             <- points to the root object
//! %%EOF
//! ```
//!
//! Page instructions use a top-left origin; PDF uses bottom-left, so every
//! y coordinate is flipped against the page height here.

use std::fmt::Write as FmtWrite;
use std::io::Write as IoWrite;

use log::warn;
use miniz_oxide::deflate::compress_to_vec_zlib;

use crate::error::{FormpressError, Result};
use crate::layout::{DrawOp, PageInstruction};
use crate::model::DocumentSettings;
use crate::style::{Color, Font, FontFamily};

pub struct PdfWriter;

/// Tracks allocated PDF objects during writing.
struct PdfBuilder {
    objects: Vec<PdfObject>,
    /// Standard font base names in registration order, with their object ids.
    font_objects: Vec<(&'static str, usize)>,
}

struct PdfObject {
    data: Vec<u8>,
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write rendered pages to a PDF byte vector.
    pub fn write(&self, pages: &[PageInstruction], settings: &DocumentSettings) -> Result<Vec<u8>> {
        if pages.is_empty() {
            return Err(FormpressError::RenderError(
                "cannot write a PDF without pages".to_string(),
            ));
        }

        // 0 = placeholder (PDF objects are 1-indexed), 1 = Catalog, 2 = Pages.
        let mut builder = PdfBuilder {
            objects: vec![
                PdfObject { data: vec![] },
                PdfObject { data: vec![] },
                PdfObject { data: vec![] },
            ],
            font_objects: Vec::new(),
        };

        self.register_fonts(&mut builder, pages);

        let mut page_obj_ids: Vec<usize> = Vec::new();
        for page in pages {
            let content = self.build_content_stream(page, &builder.font_objects);
            let compressed = compress_to_vec_zlib(&content, 6);

            let content_obj_id = builder.objects.len();
            let mut content_data: Vec<u8> = Vec::new();
            let _ = write!(
                content_data,
                "<< /Length {} /Filter /FlateDecode >>\nstream\n",
                compressed.len()
            );
            content_data.extend_from_slice(&compressed);
            content_data.extend_from_slice(b"\nendstream");
            builder.objects.push(PdfObject { data: content_data });

            let page_obj_id = builder.objects.len();
            let page_dict = format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                 /Contents {} 0 R /Resources << /Font << {} >> >> >>",
                page.width,
                page.height,
                content_obj_id,
                Self::font_resource_dict(&builder.font_objects)
            );
            builder.objects.push(PdfObject {
                data: page_dict.into_bytes(),
            });
            page_obj_ids.push(page_obj_id);
        }

        builder.objects[1].data = b"<< /Type /Catalog /Pages 2 0 R >>".to_vec();

        let kids: String = page_obj_ids
            .iter()
            .map(|id| format!("{} 0 R", id))
            .collect::<Vec<_>>()
            .join(" ");
        builder.objects[2].data = format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids,
            page_obj_ids.len()
        )
        .into_bytes();

        let info_obj_id = builder.objects.len();
        let mut info = String::from("<< ");
        if !settings.title.trim().is_empty() {
            let _ = write!(info, "/Title {} ", Self::text_string(&settings.title));
        }
        if let Some(subject) = settings.subtitle.as_deref().filter(|s| !s.trim().is_empty()) {
            let _ = write!(info, "/Subject {} ", Self::text_string(subject));
        }
        let _ = write!(
            info,
            "/Producer (Formpress {}) /Creator (Formpress) >>",
            env!("CARGO_PKG_VERSION")
        );
        builder.objects.push(PdfObject {
            data: info.into_bytes(),
        });

        Ok(self.serialize(&builder, info_obj_id))
    }

    /// Register every standard font used across all pages, once each.
    fn register_fonts(&self, builder: &mut PdfBuilder, pages: &[PageInstruction]) {
        let mut names: Vec<&'static str> = Vec::new();
        for op in pages.iter().flat_map(|p| &p.ops) {
            if let DrawOp::Text { font, .. } = op {
                let name = Self::base_font_name(font);
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        // A page with no text still needs a font resource for the dictionary.
        if names.is_empty() {
            names.push("Helvetica");
        }

        for name in names {
            let id = builder.objects.len();
            let dict = if name == "ZapfDingbats" {
                format!("<< /Type /Font /Subtype /Type1 /BaseFont /{} >>", name)
            } else {
                format!(
                    "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                    name
                )
            };
            builder.objects.push(PdfObject {
                data: dict.into_bytes(),
            });
            builder.font_objects.push((name, id));
        }
    }

    fn font_resource_dict(font_objects: &[(&'static str, usize)]) -> String {
        font_objects
            .iter()
            .enumerate()
            .map(|(i, (_, id))| format!("/F{} {} 0 R", i, id))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The standard-14 font for a family/weight/slant combination.
    fn base_font_name(font: &Font) -> &'static str {
        match (font.family, font.bold, font.italic) {
            (FontFamily::Helvetica, false, false) => "Helvetica",
            (FontFamily::Helvetica, true, false) => "Helvetica-Bold",
            (FontFamily::Helvetica, false, true) => "Helvetica-Oblique",
            (FontFamily::Helvetica, true, true) => "Helvetica-BoldOblique",
            (FontFamily::Times, false, false) => "Times-Roman",
            (FontFamily::Times, true, false) => "Times-Bold",
            (FontFamily::Times, false, true) => "Times-Italic",
            (FontFamily::Times, true, true) => "Times-BoldItalic",
            (FontFamily::Courier, false, false) => "Courier",
            (FontFamily::Courier, true, false) => "Courier-Bold",
            (FontFamily::Courier, false, true) => "Courier-Oblique",
            (FontFamily::Courier, true, true) => "Courier-BoldOblique",
            (FontFamily::Dingbats, _, _) => "ZapfDingbats",
        }
    }

    /// Build the (uncompressed) content stream for a single page.
    fn build_content_stream(
        &self,
        page: &PageInstruction,
        font_objects: &[(&'static str, usize)],
    ) -> Vec<u8> {
        let mut stream = String::new();
        let page_height = page.height;

        for op in &page.ops {
            match op {
                DrawOp::Rect {
                    x,
                    y,
                    width,
                    height,
                    fill,
                    stroke,
                } => {
                    let pdf_y = page_height - y - height;
                    if let Some(c) = fill {
                        let _ = write!(
                            stream,
                            "q\n{} rg\n{:.2} {:.2} {:.2} {:.2} re\nf\nQ\n",
                            Self::color(c),
                            x,
                            pdf_y,
                            width,
                            height
                        );
                    }
                    if let Some(s) = stroke {
                        let _ = write!(
                            stream,
                            "q\n{} RG\n{:.2} w\n{:.2} {:.2} {:.2} {:.2} re\nS\nQ\n",
                            Self::color(&s.color),
                            s.width,
                            x,
                            pdf_y,
                            width,
                            height
                        );
                    }
                }
                DrawOp::Line {
                    x1,
                    y1,
                    x2,
                    y2,
                    color,
                    width,
                } => {
                    let _ = write!(
                        stream,
                        "q\n{} RG\n{:.2} w\n{:.2} {:.2} m\n{:.2} {:.2} l\nS\nQ\n",
                        Self::color(color),
                        width,
                        x1,
                        page_height - y1,
                        x2,
                        page_height - y2
                    );
                }
                DrawOp::Text {
                    x,
                    y,
                    text,
                    font,
                    size,
                    color,
                } => {
                    let name = Self::base_font_name(font);
                    let index = font_objects
                        .iter()
                        .position(|(n, _)| *n == name)
                        .unwrap_or(0);
                    let _ = write!(
                        stream,
                        "BT\n{} rg\n/F{} {:.1} Tf\n{:.2} {:.2} Td\n<{}> Tj\nET\n",
                        Self::color(color),
                        index,
                        size,
                        x,
                        page_height - y,
                        Self::hex_string(&Self::encode_text(text, font.family))
                    );
                }
            }
        }

        stream.into_bytes()
    }

    fn color(c: &Color) -> String {
        format!("{:.3} {:.3} {:.3}", c.r, c.g, c.b)
    }

    fn hex_string(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02X}", b)).collect()
    }

    /// Encode text for a simple font. Characters the font cannot show are
    /// replaced (`?` for WinAnsi fonts, a space for ZapfDingbats).
    fn encode_text(text: &str, family: FontFamily) -> Vec<u8> {
        let mut dropped = 0usize;
        let bytes = text
            .chars()
            .map(|ch| {
                let mapped = match family {
                    FontFamily::Dingbats => Self::unicode_to_dingbats(ch),
                    _ => Self::unicode_to_winansi(ch),
                };
                mapped.unwrap_or_else(|| {
                    dropped += 1;
                    if family == FontFamily::Dingbats {
                        b' '
                    } else {
                        b'?'
                    }
                })
            })
            .collect();
        if dropped > 0 {
            warn!(
                "{} character(s) in {:?} have no {:?} glyph and were replaced",
                dropped, text, family
            );
        }
        bytes
    }

    /// A PDF text string: a literal for ASCII, otherwise UTF-16BE hex with
    /// a byte order mark.
    fn text_string(s: &str) -> String {
        if s.is_ascii() {
            return format!("({})", Self::escape_pdf_string(s));
        }
        let mut bytes = vec![0xFE, 0xFF];
        bytes.extend(s.encode_utf16().flat_map(u16::to_be_bytes));
        format!("<{}>", Self::hex_string(&bytes))
    }

    /// Escape special characters in a PDF literal string.
    fn escape_pdf_string(s: &str) -> String {
        s.replace('\\', "\\\\")
            .replace('(', "\\(")
            .replace(')', "\\)")
    }

    /// Map the symbols the styles use to ZapfDingbats codes.
    fn unicode_to_dingbats(ch: char) -> Option<u8> {
        match ch {
            ' ' => Some(0x20),
            '\u{2605}' => Some(0x48), // Black star
            '\u{2606}' => Some(0x49), // White star (outlined)
            '\u{25CF}' => Some(0x6C), // Black circle
            '\u{25CB}' => Some(0x6D), // White circle (shadowed)
            '\u{2713}' => Some(0x33), // Check mark
            '\u{2714}' => Some(0x34), // Heavy check mark
            '\u{2717}' => Some(0x37), // Ballot X
            '\u{2718}' => Some(0x38), // Heavy ballot X
            _ => None,
        }
    }

    /// Map a Unicode codepoint to a WinAnsiEncoding byte value.
    ///
    /// WinAnsiEncoding is based on Windows-1252. Most codepoints in
    /// 0x20..=0x7E and 0xA0..=0xFF map directly. The 0x80..=0x9F range
    /// contains special mappings for smart quotes, bullets, dashes, etc.
    fn unicode_to_winansi(ch: char) -> Option<u8> {
        let cp = ch as u32;
        if (0x20..=0x7E).contains(&cp) || (0xA0..=0xFF).contains(&cp) {
            return Some(cp as u8);
        }
        match cp {
            0x20AC => Some(0x80), // Euro sign
            0x201A => Some(0x82),
            0x0192 => Some(0x83),
            0x201E => Some(0x84),
            0x2026 => Some(0x85), // Horizontal ellipsis
            0x2020 => Some(0x86),
            0x2021 => Some(0x87),
            0x02C6 => Some(0x88),
            0x2030 => Some(0x89),
            0x0160 => Some(0x8A),
            0x2039 => Some(0x8B),
            0x0152 => Some(0x8C),
            0x017D => Some(0x8E),
            0x2018 => Some(0x91), // Smart quotes
            0x2019 => Some(0x92),
            0x201C => Some(0x93),
            0x201D => Some(0x94),
            0x2022 => Some(0x95), // Bullet
            0x2013 => Some(0x96), // En dash
            0x2014 => Some(0x97), // Em dash
            0x02DC => Some(0x98),
            0x2122 => Some(0x99), // Trade mark sign
            0x0161 => Some(0x9A),
            0x203A => Some(0x9B),
            0x0153 => Some(0x9C),
            0x017E => Some(0x9E),
            0x0178 => Some(0x9F),
            _ => None,
        }
    }

    /// Serialize all objects into the final PDF byte stream.
    fn serialize(&self, builder: &PdfBuilder, info_obj_id: usize) -> Vec<u8> {
        let mut output: Vec<u8> = Vec::new();
        let mut offsets: Vec<usize> = vec![0; builder.objects.len()];

        output.extend_from_slice(b"%PDF-1.7\n");
        output.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");

        for (i, obj) in builder.objects.iter().enumerate().skip(1) {
            offsets[i] = output.len();
            let _ = write!(output, "{} 0 obj\n", i);
            output.extend_from_slice(&obj.data);
            output.extend_from_slice(b"\nendobj\n\n");
        }

        let xref_offset = output.len();
        let _ = write!(output, "xref\n0 {}\n", builder.objects.len());
        let _ = write!(output, "0000000000 65535 f \n");
        for offset in offsets.iter().skip(1) {
            let _ = write!(output, "{:010} 00000 n \n", offset);
        }

        let _ = write!(
            output,
            "trailer\n<< /Size {} /Root 1 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            builder.objects.len(),
            info_obj_id,
            xref_offset
        );

        output
    }
}
