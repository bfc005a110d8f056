//! Per-type value formatting.
//!
//! The rules are the same for every style; a style only supplies the
//! symbols (rating glyphs, checkbox words, signature prefix), the
//! placeholder and the length limit.

use crate::model::*;
use crate::style::StyleConfig;

/// A submitted value ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedValue {
    /// Symbol run drawn before the text (rating glyphs).
    pub symbols: Option<String>,
    pub text: String,
    /// True when `text` is the style's placeholder for a missing value.
    pub is_placeholder: bool,
}

impl FormattedValue {
    fn text(text: String) -> Self {
        Self {
            symbols: None,
            text,
            is_placeholder: false,
        }
    }

    fn placeholder(config: &StyleConfig) -> Self {
        Self {
            symbols: None,
            text: config.placeholder.clone(),
            is_placeholder: true,
        }
    }
}

/// Format the value of an input field for display.
pub fn format_value(
    field: &Field,
    value: Option<&FieldValue>,
    config: &StyleConfig,
) -> FormattedValue {
    let value = match value {
        Some(v) if !v.is_empty() => v,
        _ => return FormattedValue::placeholder(config),
    };

    match field.field_type() {
        FieldType::Checkbox => match value.as_bool() {
            Some(true) => FormattedValue::text(config.symbols.checkbox_yes.clone()),
            Some(false) => FormattedValue::text(config.symbols.checkbox_no.clone()),
            None => FormattedValue::placeholder(config),
        },
        FieldType::Rating => match value.as_number() {
            Some(n) => {
                let filled = n.round().clamp(0.0, 5.0) as usize;
                let symbols: String = std::iter::repeat(config.symbols.rating_filled)
                    .take(filled)
                    .chain(std::iter::repeat(config.symbols.rating_empty).take(5 - filled))
                    .collect();
                FormattedValue {
                    symbols: Some(symbols),
                    text: format!("{}/5", filled),
                    is_placeholder: false,
                }
            }
            None => FormattedValue::placeholder(config),
        },
        FieldType::Signature => {
            let prefix = config.symbols.signature_prefix.as_deref().unwrap_or("");
            FormattedValue::text(format!("{}{}", prefix, value.canonical()))
        }
        _ => FormattedValue::text(truncate(&display_text(value), config.max_value_chars)),
    }
}

/// Text of a plain value: lists read as `a, b, c`.
fn display_text(value: &FieldValue) -> String {
    match value {
        FieldValue::List(items) => items.join(", "),
        other => other.canonical(),
    }
}

/// Cut `text` to at most `max_chars` characters. Text already within the
/// limit comes back unchanged, so truncating twice is the same as once.
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleName;

    fn fmt(field_type: FieldType, value: Option<FieldValue>, style: StyleName) -> FormattedValue {
        let field = Field::input("f", field_type, "Label");
        format_value(&field, value.as_ref(), &style.config())
    }

    #[test]
    fn test_checkbox_yes_no_and_placeholder() {
        let yes = fmt(FieldType::Checkbox, Some(true.into()), StyleName::Modern);
        assert_eq!(yes.text, "Yes");
        let no = fmt(FieldType::Checkbox, Some("false".into()), StyleName::Modern);
        assert_eq!(no.text, "No");
        let absent = fmt(FieldType::Checkbox, None, StyleName::Modern);
        assert!(absent.is_placeholder);
        assert_eq!(absent.text, "(Not provided)");
    }

    #[test]
    fn test_checkbox_symbols_follow_the_style() {
        let yes = fmt(FieldType::Checkbox, Some(true.into()), StyleName::Classic);
        assert_eq!(yes.text, "[X] Yes");
    }

    #[test]
    fn test_rating_symbols_and_fraction() {
        let r = fmt(FieldType::Rating, Some(3.into()), StyleName::Modern);
        assert_eq!(r.text, "3/5");
        assert_eq!(r.symbols.as_deref(), Some("\u{2605}\u{2605}\u{2605}\u{2606}\u{2606}"));

        let minimal = fmt(FieldType::Rating, Some("4".into()), StyleName::Minimal);
        assert_eq!(minimal.symbols.as_deref(), Some("****-"));
        assert_eq!(minimal.text, "4/5");

        let clamped = fmt(FieldType::Rating, Some(9.into()), StyleName::Minimal);
        assert_eq!(clamped.text, "5/5");

        assert!(fmt(FieldType::Rating, None, StyleName::Modern).is_placeholder);
        assert!(fmt(FieldType::Rating, Some("lots".into()), StyleName::Modern).is_placeholder);
    }

    #[test]
    fn test_signature_prefix() {
        let s = fmt(FieldType::Signature, Some("Ada Lovelace".into()), StyleName::Classic);
        assert_eq!(s.text, "/s/ Ada Lovelace");
        let m = fmt(FieldType::Signature, Some("Ada Lovelace".into()), StyleName::Modern);
        assert_eq!(m.text, "Ada Lovelace");
        assert!(fmt(FieldType::Signature, Some("".into()), StyleName::Modern).is_placeholder);
    }

    #[test]
    fn test_plain_values_are_truncated() {
        let long = "a".repeat(500);
        let config = StyleName::Classic.config();
        let v = fmt(FieldType::Text, Some(long.as_str().into()), StyleName::Classic);
        assert_eq!(v.text.chars().count(), config.max_value_chars);
        assert_eq!(truncate(&v.text, config.max_value_chars), v.text);
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        assert_eq!(truncate("héllo wörld", 5), "héllo");
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exact", 5), "exact");
    }

    #[test]
    fn test_lists_and_numbers() {
        let list = fmt(
            FieldType::Multiselect,
            Some(vec!["Red".to_string(), "Blue".to_string()].into()),
            StyleName::Modern,
        );
        assert_eq!(list.text, "Red, Blue");
        let n = fmt(FieldType::Number, Some(42.into()), StyleName::Modern);
        assert_eq!(n.text, "42");
    }
}
