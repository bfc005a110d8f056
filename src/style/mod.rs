//! # Style System
//!
//! The three named document styles and the configuration each one lays out
//! with. A style config holds everything that varies between styles: page
//! geometry, type sizes, colors, the symbols used for ratings and checkboxes,
//! the placeholder for missing values and the value length limit.
//!
//! The pagination contract is identical for all styles; only the numbers fed
//! into it differ.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FormpressError;

/// The built-in visual renderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleName {
    Modern,
    Classic,
    Minimal,
}

impl StyleName {
    pub const ALL: [StyleName; 3] = [StyleName::Modern, StyleName::Classic, StyleName::Minimal];

    pub fn as_str(&self) -> &'static str {
        match self {
            StyleName::Modern => "modern",
            StyleName::Classic => "classic",
            StyleName::Minimal => "minimal",
        }
    }

    /// Parse a style name, falling back to `default` for anything unknown.
    /// This is the only place an unknown name does not produce an error.
    pub fn parse_or_default(name: &str, default: StyleName) -> StyleName {
        name.parse().unwrap_or(default)
    }

    /// The built-in configuration for this style.
    pub fn config(&self) -> StyleConfig {
        match self {
            StyleName::Modern => StyleConfig::modern(),
            StyleName::Classic => StyleConfig::classic(),
            StyleName::Minimal => StyleConfig::minimal(),
        }
    }
}

impl FromStr for StyleName {
    type Err = FormpressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "modern" => Ok(StyleName::Modern),
            "classic" => Ok(StyleName::Classic),
            "minimal" => Ok(StyleName::Minimal),
            other => Err(FormpressError::UnknownStyle(other.to_string())),
        }
    }
}

impl fmt::Display for StyleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Standard page sizes in points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
    Legal,
    Custom {
        width: f64,
        height: f64,
    },
}

impl PageSize {
    /// Returns (width, height) in points.
    pub fn dimensions(&self) -> (f64, f64) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" => Ok(PageSize::Letter),
            "legal" => Ok(PageSize::Legal),
            other => Err(format!("unknown page size {:?}", other)),
        }
    }
}

/// Edge values (top, right, bottom, left) in points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Edges {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Edges {
    pub fn uniform(v: f64) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    pub fn symmetric(vertical: f64, horizontal: f64) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }
}

/// An RGB color, components in 0.0 - 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn hex(hex: &str) -> Self {
        let hex = hex.trim_start_matches('#');
        let (r, g, b) = match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).unwrap_or(0);
                let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).unwrap_or(0);
                let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).unwrap_or(0);
                (r, g, b)
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
                let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
                let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
                (r, g, b)
            }
            _ => (0, 0, 0),
        };
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// The base-14 font families the renderer draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFamily {
    Helvetica,
    Times,
    Courier,
    /// ZapfDingbats, used for rating stars and check marks.
    Dingbats,
}

/// A font selection: family plus weight/slant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Font {
    pub family: FontFamily,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
}

impl Font {
    pub fn regular(family: FontFamily) -> Self {
        Self {
            family,
            bold: false,
            italic: false,
        }
    }

    pub fn bold(family: FontFamily) -> Self {
        Self {
            family,
            bold: true,
            italic: false,
        }
    }

    pub fn italic(family: FontFamily) -> Self {
        Self {
            family,
            bold: false,
            italic: true,
        }
    }
}

/// Text style for one kind of run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font: Font,
    pub size: f64,
    pub color: Color,
}

impl TextStyle {
    pub fn new(font: Font, size: f64, color: Color) -> Self {
        Self { font, size, color }
    }

    /// Baseline-to-baseline distance.
    pub fn line_height(&self) -> f64 {
        self.size * 1.35
    }
}

/// Style-specific symbols for formatted values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symbols {
    pub rating_filled: char,
    pub rating_empty: char,
    /// Drawn in the dingbat font when true, in the value font otherwise.
    pub rating_dingbats: bool,
    pub checkbox_yes: String,
    pub checkbox_no: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_prefix: Option<String>,
}

/// Everything one style needs to lay out a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleConfig {
    pub name: StyleName,
    #[serde(default)]
    pub page_size: PageSize,
    /// Page margins. `margin.top` is where fields start on page one when
    /// there is no header.
    pub margin: Edges,
    /// Where the cursor restarts on continuation pages.
    pub continuation_top: f64,
    /// Vertical space kept free above the bottom margin for the footer.
    pub footer_reserve: f64,
    /// Horizontal gap between columns of a multi-column row.
    pub column_gap: f64,
    /// Vertical gap after each line of fields.
    pub field_spacing: f64,

    pub title: TextStyle,
    pub subtitle: TextStyle,
    pub label: TextStyle,
    pub value: TextStyle,
    pub placeholder_text: TextStyle,
    pub heading1: TextStyle,
    pub heading2: TextStyle,
    pub paragraph: TextStyle,
    pub footer: TextStyle,

    pub accent: Color,
    pub rule_color: Color,

    /// Longest value, in characters, printed before truncation.
    pub max_value_chars: usize,
    /// Printed in place of a missing value.
    pub placeholder: String,
    pub symbols: Symbols,
}

impl StyleConfig {
    /// Bold banner header, uppercase labels, underlined values.
    pub fn modern() -> Self {
        let ink = Color::hex("#1f2937");
        let muted = Color::hex("#6b7280");
        let accent = Color::hex("#4f46e5");
        let helv = FontFamily::Helvetica;
        Self {
            name: StyleName::Modern,
            page_size: PageSize::A4,
            margin: Edges::symmetric(48.0, 48.0),
            continuation_top: 48.0,
            footer_reserve: 28.0,
            column_gap: 18.0,
            field_spacing: 14.0,
            title: TextStyle::new(Font::bold(helv), 22.0, Color::WHITE),
            subtitle: TextStyle::new(Font::regular(helv), 11.0, Color::hex("#e0e7ff")),
            label: TextStyle::new(Font::bold(helv), 8.0, muted),
            value: TextStyle::new(Font::regular(helv), 11.0, ink),
            placeholder_text: TextStyle::new(Font::italic(helv), 11.0, Color::hex("#9ca3af")),
            heading1: TextStyle::new(Font::bold(helv), 16.0, accent),
            heading2: TextStyle::new(Font::bold(helv), 13.0, ink),
            paragraph: TextStyle::new(Font::regular(helv), 10.0, muted),
            footer: TextStyle::new(Font::regular(helv), 8.0, muted),
            accent,
            rule_color: Color::hex("#e5e7eb"),
            max_value_chars: 120,
            placeholder: "(Not provided)".to_string(),
            symbols: Symbols {
                rating_filled: '\u{2605}',
                rating_empty: '\u{2606}',
                rating_dingbats: true,
                checkbox_yes: "Yes".to_string(),
                checkbox_no: "No".to_string(),
                signature_prefix: None,
            },
        }
    }

    /// Serif type, a frame around every page, boxed fields.
    pub fn classic() -> Self {
        let ink = Color::hex("#111111");
        let times = FontFamily::Times;
        Self {
            name: StyleName::Classic,
            page_size: PageSize::A4,
            margin: Edges::symmetric(60.0, 60.0),
            continuation_top: 60.0,
            footer_reserve: 30.0,
            column_gap: 12.0,
            field_spacing: 10.0,
            title: TextStyle::new(Font::bold(times), 20.0, ink),
            subtitle: TextStyle::new(Font::italic(times), 12.0, ink),
            label: TextStyle::new(Font::bold(times), 10.0, ink),
            value: TextStyle::new(Font::regular(times), 11.0, ink),
            placeholder_text: TextStyle::new(Font::italic(times), 11.0, Color::hex("#555555")),
            heading1: TextStyle::new(Font::bold(times), 15.0, ink),
            heading2: TextStyle::new(Font::bold(times), 12.5, ink),
            paragraph: TextStyle::new(Font::regular(times), 10.5, ink),
            footer: TextStyle::new(Font::italic(times), 9.0, ink),
            accent: ink,
            rule_color: Color::hex("#444444"),
            max_value_chars: 90,
            placeholder: "Not provided".to_string(),
            symbols: Symbols {
                rating_filled: '\u{25CF}',
                rating_empty: '\u{25CB}',
                rating_dingbats: true,
                checkbox_yes: "[X] Yes".to_string(),
                checkbox_no: "[ ] No".to_string(),
                signature_prefix: Some("/s/ ".to_string()),
            },
        }
    }

    /// Plain text, no boxes or banners.
    pub fn minimal() -> Self {
        let ink = Color::hex("#000000");
        let muted = Color::hex("#777777");
        let helv = FontFamily::Helvetica;
        Self {
            name: StyleName::Minimal,
            page_size: PageSize::A4,
            margin: Edges::symmetric(56.0, 64.0),
            continuation_top: 56.0,
            footer_reserve: 24.0,
            column_gap: 24.0,
            field_spacing: 12.0,
            title: TextStyle::new(Font::regular(helv), 18.0, ink),
            subtitle: TextStyle::new(Font::regular(helv), 10.0, muted),
            label: TextStyle::new(Font::regular(helv), 9.0, muted),
            value: TextStyle::new(Font::regular(helv), 11.0, ink),
            placeholder_text: TextStyle::new(Font::regular(helv), 11.0, muted),
            heading1: TextStyle::new(Font::bold(helv), 14.0, ink),
            heading2: TextStyle::new(Font::bold(helv), 12.0, ink),
            paragraph: TextStyle::new(Font::regular(helv), 10.0, ink),
            footer: TextStyle::new(Font::regular(helv), 8.0, muted),
            accent: ink,
            rule_color: Color::hex("#dddddd"),
            max_value_chars: 150,
            placeholder: "-".to_string(),
            symbols: Symbols {
                rating_filled: '*',
                rating_empty: '-',
                rating_dingbats: false,
                checkbox_yes: "Yes".to_string(),
                checkbox_no: "No".to_string(),
                signature_prefix: None,
            },
        }
    }

    /// Page (width, height) in points.
    pub fn page_dimensions(&self) -> (f64, f64) {
        self.page_size.dimensions()
    }

    pub fn content_width(&self) -> f64 {
        self.page_dimensions().0 - self.margin.horizontal()
    }

    /// The y position no field may extend past.
    pub fn bottom_limit(&self) -> f64 {
        self.page_dimensions().1 - self.margin.bottom - self.footer_reserve
    }
}
