//! # Form Model
//!
//! The input representation for the engine. A form is an ordered list of
//! rows, each row an ordered list of typed fields. Row order and field order
//! are both significant and survive every edit, serialization round trip and
//! render.
//!
//! Field types are a closed set of tagged variants: each variant carries only
//! the data that is legal for it. A `select` has options, a `heading1` has
//! content, a `divider` has nothing. There is no "options present only for
//! select" convention to check at runtime.

pub mod edit;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable, opaque identifier of a field.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

/// Stable, opaque identifier of a row.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(String);

macro_rules! string_id {
    ($name:ident, $prefix:literal) => {
        impl $name {
            /// Generate a fresh random identifier.
            pub fn generate() -> Self {
                Self(format!("{}-{}", $prefix, uuid::Uuid::new_v4()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

string_id!(FieldId, "field");
string_id!(RowId, "row");

/// A complete form template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDefinition {
    #[serde(default)]
    pub rows: Vec<Row>,

    /// Document-level metadata. Read by the renderer only.
    #[serde(default)]
    pub settings: DocumentSettings,
}

/// Header/footer metadata for the rendered document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSettings {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Display date, already formatted by the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Branding line printed in every page footer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
}

impl DocumentSettings {
    /// Whether there is anything to put in a header at all.
    pub fn has_header(&self) -> bool {
        let filled = |s: &Option<String>| s.as_deref().is_some_and(|v| !v.trim().is_empty());
        !self.title.trim().is_empty() || filled(&self.subtitle) || filled(&self.date)
    }
}

/// A horizontal layout group of fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub id: RowId,

    /// How many fields render side by side (1, 2 or 3).
    #[serde(default = "default_columns")]
    pub column_count: u8,

    #[serde(default)]
    pub fields: Vec<Field>,
}

fn default_columns() -> u8 {
    1
}

impl Row {
    pub fn new() -> Self {
        Self {
            id: RowId::generate(),
            column_count: 1,
            fields: Vec::new(),
        }
    }
}

impl Default for Row {
    fn default() -> Self {
        Self::new()
    }
}

/// One input or layout element of a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: FieldId,

    #[serde(flatten)]
    pub kind: FieldKind,

    /// Visibility rules for this field. Later entries override earlier ones.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

/// The closed set of field types, one variant per `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    Text(InputSpec),
    Textarea(InputSpec),
    Email(InputSpec),
    Tel(InputSpec),
    Number(InputSpec),
    Url(InputSpec),
    Date(InputSpec),
    Time(InputSpec),
    Select(ChoiceSpec),
    Radio(ChoiceSpec),
    Checkbox(InputSpec),
    Multiselect(ChoiceSpec),
    File(InputSpec),
    Rating(InputSpec),
    Signature(InputSpec),
    Heading1(ContentSpec),
    Heading2(ContentSpec),
    Paragraph(ContentSpec),
    Divider,
}

/// Data carried by every input field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputSpec {
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

/// Data carried by fields that choose from a fixed list of options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceSpec {
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
}

/// Data carried by headings and paragraphs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSpec {
    pub content: String,
}

/// The field type tag without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Textarea,
    Email,
    Tel,
    Number,
    Url,
    Date,
    Time,
    Select,
    Radio,
    Checkbox,
    Multiselect,
    File,
    Rating,
    Signature,
    Heading1,
    Heading2,
    Paragraph,
    Divider,
}

impl FieldType {
    pub const ALL: [FieldType; 19] = [
        FieldType::Text,
        FieldType::Textarea,
        FieldType::Email,
        FieldType::Tel,
        FieldType::Number,
        FieldType::Url,
        FieldType::Date,
        FieldType::Time,
        FieldType::Select,
        FieldType::Radio,
        FieldType::Checkbox,
        FieldType::Multiselect,
        FieldType::File,
        FieldType::Rating,
        FieldType::Signature,
        FieldType::Heading1,
        FieldType::Heading2,
        FieldType::Paragraph,
        FieldType::Divider,
    ];

    /// The wire name used in the `type` tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Textarea => "textarea",
            FieldType::Email => "email",
            FieldType::Tel => "tel",
            FieldType::Number => "number",
            FieldType::Url => "url",
            FieldType::Date => "date",
            FieldType::Time => "time",
            FieldType::Select => "select",
            FieldType::Radio => "radio",
            FieldType::Checkbox => "checkbox",
            FieldType::Multiselect => "multiselect",
            FieldType::File => "file",
            FieldType::Rating => "rating",
            FieldType::Signature => "signature",
            FieldType::Heading1 => "heading1",
            FieldType::Heading2 => "heading2",
            FieldType::Paragraph => "paragraph",
            FieldType::Divider => "divider",
        }
    }

    /// Default label (or content) given to a freshly added field.
    pub fn display_name(&self) -> &'static str {
        match self {
            FieldType::Text => "Text Field",
            FieldType::Textarea => "Text Area",
            FieldType::Email => "Email",
            FieldType::Tel => "Phone",
            FieldType::Number => "Number",
            FieldType::Url => "Website",
            FieldType::Date => "Date",
            FieldType::Time => "Time",
            FieldType::Select => "Dropdown",
            FieldType::Radio => "Multiple Choice",
            FieldType::Checkbox => "Checkbox",
            FieldType::Multiselect => "Multi Select",
            FieldType::File => "File Upload",
            FieldType::Rating => "Rating",
            FieldType::Signature => "Signature",
            FieldType::Heading1 => "Heading",
            FieldType::Heading2 => "Subheading",
            FieldType::Paragraph => "Paragraph text",
            FieldType::Divider => "Divider",
        }
    }

    /// Headings, paragraphs and dividers: no label, no value, never required.
    pub fn is_layout(&self) -> bool {
        matches!(
            self,
            FieldType::Heading1 | FieldType::Heading2 | FieldType::Paragraph | FieldType::Divider
        )
    }

    /// Types whose values may be tested with `contains`.
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            FieldType::Text
                | FieldType::Textarea
                | FieldType::Email
                | FieldType::Tel
                | FieldType::Url
                | FieldType::Select
                | FieldType::Radio
                | FieldType::Multiselect
        )
    }

    /// Types whose values may be compared with `greater_than`/`less_than`.
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldType::Number | FieldType::Rating)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Field {
    /// Create a field of the given type with default label/content/options.
    pub fn new(field_type: FieldType) -> Self {
        let input = || InputSpec {
            label: field_type.display_name().to_string(),
            required: false,
            placeholder: None,
        };
        let choice = || ChoiceSpec {
            label: field_type.display_name().to_string(),
            required: false,
            placeholder: None,
            options: vec!["Option 1".to_string(), "Option 2".to_string()],
        };
        let content = || ContentSpec {
            content: field_type.display_name().to_string(),
        };

        let kind = match field_type {
            FieldType::Text => FieldKind::Text(input()),
            FieldType::Textarea => FieldKind::Textarea(input()),
            FieldType::Email => FieldKind::Email(input()),
            FieldType::Tel => FieldKind::Tel(input()),
            FieldType::Number => FieldKind::Number(input()),
            FieldType::Url => FieldKind::Url(input()),
            FieldType::Date => FieldKind::Date(input()),
            FieldType::Time => FieldKind::Time(input()),
            FieldType::Select => FieldKind::Select(choice()),
            FieldType::Radio => FieldKind::Radio(choice()),
            FieldType::Checkbox => FieldKind::Checkbox(input()),
            FieldType::Multiselect => FieldKind::Multiselect(choice()),
            FieldType::File => FieldKind::File(input()),
            FieldType::Rating => FieldKind::Rating(input()),
            FieldType::Signature => FieldKind::Signature(input()),
            FieldType::Heading1 => FieldKind::Heading1(content()),
            FieldType::Heading2 => FieldKind::Heading2(content()),
            FieldType::Paragraph => FieldKind::Paragraph(content()),
            FieldType::Divider => FieldKind::Divider,
        };

        Self {
            id: FieldId::generate(),
            kind,
            conditions: Vec::new(),
        }
    }

    /// Create an input field with an explicit id and label.
    pub fn input(id: impl Into<FieldId>, field_type: FieldType, label: &str) -> Self {
        let mut field = Field::new(field_type);
        field.id = id.into();
        field.set_label(label);
        field
    }

    pub fn field_type(&self) -> FieldType {
        match &self.kind {
            FieldKind::Text(_) => FieldType::Text,
            FieldKind::Textarea(_) => FieldType::Textarea,
            FieldKind::Email(_) => FieldType::Email,
            FieldKind::Tel(_) => FieldType::Tel,
            FieldKind::Number(_) => FieldType::Number,
            FieldKind::Url(_) => FieldType::Url,
            FieldKind::Date(_) => FieldType::Date,
            FieldKind::Time(_) => FieldType::Time,
            FieldKind::Select(_) => FieldType::Select,
            FieldKind::Radio(_) => FieldType::Radio,
            FieldKind::Checkbox(_) => FieldType::Checkbox,
            FieldKind::Multiselect(_) => FieldType::Multiselect,
            FieldKind::File(_) => FieldType::File,
            FieldKind::Rating(_) => FieldType::Rating,
            FieldKind::Signature(_) => FieldType::Signature,
            FieldKind::Heading1(_) => FieldType::Heading1,
            FieldKind::Heading2(_) => FieldType::Heading2,
            FieldKind::Paragraph(_) => FieldType::Paragraph,
            FieldKind::Divider => FieldType::Divider,
        }
    }

    /// The label of an input field; `None` for layout fields.
    pub fn label(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Select(c) | FieldKind::Radio(c) | FieldKind::Multiselect(c) => {
                Some(&c.label)
            }
            FieldKind::Heading1(_)
            | FieldKind::Heading2(_)
            | FieldKind::Paragraph(_)
            | FieldKind::Divider => None,
            FieldKind::Text(i)
            | FieldKind::Textarea(i)
            | FieldKind::Email(i)
            | FieldKind::Tel(i)
            | FieldKind::Number(i)
            | FieldKind::Url(i)
            | FieldKind::Date(i)
            | FieldKind::Time(i)
            | FieldKind::Checkbox(i)
            | FieldKind::File(i)
            | FieldKind::Rating(i)
            | FieldKind::Signature(i) => Some(&i.label),
        }
    }

    /// Set the label of an input field, or the content of a heading/paragraph.
    /// Dividers carry no text and are left unchanged.
    pub fn set_label(&mut self, text: &str) {
        match &mut self.kind {
            FieldKind::Select(c) | FieldKind::Radio(c) | FieldKind::Multiselect(c) => {
                c.label = text.to_string();
            }
            FieldKind::Heading1(c) | FieldKind::Heading2(c) | FieldKind::Paragraph(c) => {
                c.content = text.to_string();
            }
            FieldKind::Divider => {}
            FieldKind::Text(i)
            | FieldKind::Textarea(i)
            | FieldKind::Email(i)
            | FieldKind::Tel(i)
            | FieldKind::Number(i)
            | FieldKind::Url(i)
            | FieldKind::Date(i)
            | FieldKind::Time(i)
            | FieldKind::Checkbox(i)
            | FieldKind::File(i)
            | FieldKind::Rating(i)
            | FieldKind::Signature(i) => {
                i.label = text.to_string();
            }
        }
    }

    pub fn is_required(&self) -> bool {
        match &self.kind {
            FieldKind::Select(c) | FieldKind::Radio(c) | FieldKind::Multiselect(c) => c.required,
            FieldKind::Heading1(_)
            | FieldKind::Heading2(_)
            | FieldKind::Paragraph(_)
            | FieldKind::Divider => false,
            FieldKind::Text(i)
            | FieldKind::Textarea(i)
            | FieldKind::Email(i)
            | FieldKind::Tel(i)
            | FieldKind::Number(i)
            | FieldKind::Url(i)
            | FieldKind::Date(i)
            | FieldKind::Time(i)
            | FieldKind::Checkbox(i)
            | FieldKind::File(i)
            | FieldKind::Rating(i)
            | FieldKind::Signature(i) => i.required,
        }
    }

    /// Mark an input field required. Returns `false` for layout fields,
    /// which can never be required.
    pub fn set_required(&mut self, required: bool) -> bool {
        match &mut self.kind {
            FieldKind::Select(c) | FieldKind::Radio(c) | FieldKind::Multiselect(c) => {
                c.required = required;
                true
            }
            FieldKind::Heading1(_)
            | FieldKind::Heading2(_)
            | FieldKind::Paragraph(_)
            | FieldKind::Divider => false,
            FieldKind::Text(i)
            | FieldKind::Textarea(i)
            | FieldKind::Email(i)
            | FieldKind::Tel(i)
            | FieldKind::Number(i)
            | FieldKind::Url(i)
            | FieldKind::Date(i)
            | FieldKind::Time(i)
            | FieldKind::Checkbox(i)
            | FieldKind::File(i)
            | FieldKind::Rating(i)
            | FieldKind::Signature(i) => {
                i.required = required;
                true
            }
        }
    }

    /// Options of a select/radio/multiselect field.
    pub fn options(&self) -> Option<&[String]> {
        match &self.kind {
            FieldKind::Select(c) | FieldKind::Radio(c) | FieldKind::Multiselect(c) => {
                Some(&c.options)
            }
            _ => None,
        }
    }

    /// Content of a heading or paragraph.
    pub fn content(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Heading1(c) | FieldKind::Heading2(c) | FieldKind::Paragraph(c) => {
                Some(&c.content)
            }
            _ => None,
        }
    }

    pub fn with_conditions(mut self, conditions: Vec<Condition>) -> Self {
        self.conditions = conditions;
        self
    }
}

// ── Conditions ──────────────────────────────────────────────────

/// One show/hide rule attached to a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub action: ConditionAction,
    #[serde(default)]
    pub logic: ConditionLogic,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionAction {
    Show,
    Hide,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionLogic {
    #[default]
    All,
    Any,
}

/// A single comparison against another field's submitted value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub field_id: FieldId,
    pub operator: Operator,
    #[serde(default)]
    pub value: FieldValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Equals,
    NotEquals,
    Contains,
    GreaterThan,
    LessThan,
}

impl Condition {
    pub fn new(action: ConditionAction, logic: ConditionLogic, rules: Vec<Rule>) -> Self {
        Self {
            action,
            logic,
            rules,
        }
    }
}

impl Rule {
    pub fn new(field_id: impl Into<FieldId>, operator: Operator, value: impl Into<FieldValue>) -> Self {
        Self {
            field_id: field_id.into(),
            operator,
            value: value.into(),
        }
    }
}

// ── Submitted values ────────────────────────────────────────────

/// A submitted value. `Null` is treated exactly like a missing key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Absent for display purposes: null, an empty string or an empty list.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Bool(_) | FieldValue::Number(_) => false,
        }
    }

    /// Canonical text used for exact comparisons: `true`/`false`, integral
    /// numbers without a fractional part, list items joined by `,`.
    pub fn canonical(&self) -> String {
        match self {
            FieldValue::Null => String::new(),
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Number(n) => format_number(*n),
            FieldValue::Text(s) => s.clone(),
            FieldValue::List(items) => items.join(","),
        }
    }

    /// Numeric reading of the value, if it has one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) if n.is_finite() => Some(*n),
            FieldValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// Boolean reading of a checkbox-like value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            FieldValue::Number(n) => Some(*n != 0.0),
            FieldValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" | "checked" => Some(true),
                "false" | "no" | "off" | "0" | "" => Some(false),
                _ => None,
            },
            FieldValue::List(items) => Some(!items.is_empty()),
            FieldValue::Null => None,
        }
    }
}

/// Format a number the way a person typed it: `3` rather than `3.0`.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items)
    }
}

/// The values submitted for one filled-in form. Owned by the caller; the
/// engine only reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Submission(BTreeMap<FieldId, FieldValue>);

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    /// The submitted value, or `None` if it is missing or null.
    pub fn get(&self, id: &FieldId) -> Option<&FieldValue> {
        self.0.get(id).filter(|v| !matches!(v, FieldValue::Null))
    }

    pub fn insert(&mut self, id: impl Into<FieldId>, value: impl Into<FieldValue>) {
        self.0.insert(id.into(), value.into());
    }

    pub fn with(mut self, id: impl Into<FieldId>, value: impl Into<FieldValue>) -> Self {
        self.insert(id, value);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<FieldId>, V: Into<FieldValue>> FromIterator<(K, V)> for Submission {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_json_uses_type_tag() {
        let json = r#"{"id":"f1","type":"select","label":"Size","options":["S","M"]}"#;
        let field: Field = serde_json::from_str(json).unwrap();
        assert_eq!(field.field_type(), FieldType::Select);
        assert_eq!(field.label(), Some("Size"));
        assert_eq!(field.options().map(|o| o.len()), Some(2));
        assert!(!field.is_required());
    }

    #[test]
    fn test_layout_field_has_content_not_label() {
        let json = r#"{"id":"h","type":"heading1","content":"Terms"}"#;
        let field: Field = serde_json::from_str(json).unwrap();
        assert_eq!(field.label(), None);
        assert_eq!(field.content(), Some("Terms"));

        let divider: Field = serde_json::from_str(r#"{"id":"d","type":"divider"}"#).unwrap();
        assert_eq!(divider.field_type(), FieldType::Divider);
    }

    #[test]
    fn test_layout_fields_cannot_be_required() {
        let mut heading = Field::new(FieldType::Heading2);
        assert!(!heading.set_required(true));
        assert!(!heading.is_required());

        let mut email = Field::new(FieldType::Email);
        assert!(email.set_required(true));
        assert!(email.is_required());
    }

    #[test]
    fn test_conditions_parse_with_snake_case_operators() {
        let json = r#"{
            "id": "b",
            "type": "text",
            "label": "Why?",
            "conditions": [
                {"action": "show", "logic": "any", "rules": [
                    {"fieldId": "a", "operator": "not_equals", "value": "no"},
                    {"fieldId": "n", "operator": "greater_than", "value": 3}
                ]}
            ]
        }"#;
        let field: Field = serde_json::from_str(json).unwrap();
        let cond = &field.conditions[0];
        assert_eq!(cond.action, ConditionAction::Show);
        assert_eq!(cond.logic, ConditionLogic::Any);
        assert_eq!(cond.rules[0].operator, Operator::NotEquals);
        assert_eq!(cond.rules[1].value, FieldValue::Number(3.0));
    }

    #[test]
    fn test_submission_null_is_absent() {
        let sub: Submission = serde_json::from_str(r#"{"a": null, "b": true, "c": [ "x" ]}"#).unwrap();
        assert!(sub.get(&FieldId::from("a")).is_none());
        assert_eq!(sub.get(&FieldId::from("b")), Some(&FieldValue::Bool(true)));
        assert_eq!(
            sub.get(&FieldId::from("c")),
            Some(&FieldValue::List(vec!["x".to_string()]))
        );
    }

    #[test]
    fn test_canonical_text_drops_integral_fraction() {
        assert_eq!(FieldValue::Number(3.0).canonical(), "3");
        assert_eq!(FieldValue::Number(2.5).canonical(), "2.5");
        assert_eq!(FieldValue::Bool(false).canonical(), "false");
    }

    #[test]
    fn test_header_requires_some_text() {
        let mut settings = DocumentSettings::default();
        assert!(!settings.has_header());
        settings.date = Some("2026-01-01".to_string());
        assert!(settings.has_header());
    }
}
