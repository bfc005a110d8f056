//! Submission checks run before a document is produced.
//!
//! Only visible input fields are checked; a hidden required field is not
//! missing, it is simply not part of this submission.

use std::fmt;

use crate::model::*;
use crate::visibility::VisibilityMap;

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    pub field: FieldId,
    pub kind: ValidationIssueKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationIssueKind {
    MissingRequired,
    InvalidEmail,
    NotANumber,
    RatingOutOfRange,
    UnknownOption(String),
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ValidationIssueKind::MissingRequired => write!(f, "{}: a value is required", self.field),
            ValidationIssueKind::InvalidEmail => {
                write!(f, "{}: not a valid email address", self.field)
            }
            ValidationIssueKind::NotANumber => write!(f, "{}: not a number", self.field),
            ValidationIssueKind::RatingOutOfRange => {
                write!(f, "{}: rating must be between 1 and 5", self.field)
            }
            ValidationIssueKind::UnknownOption(option) => {
                write!(f, "{}: {:?} is not one of the options", self.field, option)
            }
        }
    }
}

/// Check a submission against the visible fields of a form.
pub fn validate(
    form: &FormDefinition,
    submission: &Submission,
    visibility: &VisibilityMap,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for field in form.fields() {
        let field_type = field.field_type();
        if field_type.is_layout() || !visibility.is_visible(&field.id) {
            continue;
        }

        let issue = |kind| ValidationIssue {
            field: field.id.clone(),
            kind,
        };

        let value = match submission.get(&field.id) {
            Some(v) if !v.is_empty() => v,
            _ => {
                // An unticked required checkbox is also "missing".
                if field.is_required() {
                    issues.push(issue(ValidationIssueKind::MissingRequired));
                }
                continue;
            }
        };

        match field_type {
            FieldType::Checkbox => {
                if field.is_required() && value.as_bool() == Some(false) {
                    issues.push(issue(ValidationIssueKind::MissingRequired));
                }
            }
            FieldType::Email => {
                if !looks_like_email(&value.canonical()) {
                    issues.push(issue(ValidationIssueKind::InvalidEmail));
                }
            }
            FieldType::Number => {
                if value.as_number().is_none() {
                    issues.push(issue(ValidationIssueKind::NotANumber));
                }
            }
            FieldType::Rating => match value.as_number() {
                Some(n) if (1.0..=5.0).contains(&n) => {}
                Some(_) => issues.push(issue(ValidationIssueKind::RatingOutOfRange)),
                None => issues.push(issue(ValidationIssueKind::NotANumber)),
            },
            FieldType::Select | FieldType::Radio | FieldType::Multiselect => {
                let options = field.options().unwrap_or_default();
                let chosen: Vec<String> = match value {
                    FieldValue::List(items) => items.clone(),
                    other => vec![other.canonical()],
                };
                for choice in chosen {
                    if !options.contains(&choice) {
                        issues.push(issue(ValidationIssueKind::UnknownOption(choice)));
                    }
                }
            }
            _ => {}
        }
    }

    issues
}

fn looks_like_email(s: &str) -> bool {
    let Some((local, domain)) = s.trim().split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !s.contains(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(fields: Vec<Field>) -> FormDefinition {
        FormDefinition {
            rows: vec![Row {
                id: RowId::from("r"),
                column_count: 1,
                fields,
            }],
            settings: DocumentSettings::default(),
        }
    }

    fn required(id: &str, field_type: FieldType) -> Field {
        let mut f = Field::input(id, field_type, id);
        f.set_required(true);
        f
    }

    #[test]
    fn test_missing_required_only_when_visible() {
        let form = form(vec![required("name", FieldType::Text)]);
        let sub = Submission::new();

        let shown = VisibilityMap::all_visible(&form);
        let issues = validate(&form, &sub, &shown);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, ValidationIssueKind::MissingRequired);

        let mut hidden = VisibilityMap::all_visible(&form);
        hidden.set(FieldId::from("name"), false);
        assert!(validate(&form, &sub, &hidden).is_empty());
    }

    #[test]
    fn test_required_checkbox_must_be_ticked() {
        let form = form(vec![required("agree", FieldType::Checkbox)]);
        let vis = VisibilityMap::all_visible(&form);
        assert_eq!(
            validate(&form, &Submission::new().with("agree", false), &vis).len(),
            1
        );
        assert!(validate(&form, &Submission::new().with("agree", true), &vis).is_empty());
    }

    #[test]
    fn test_typed_values_are_checked() {
        let mut choice = Field::input("size", FieldType::Select, "Size");
        if let FieldKind::Select(spec) = &mut choice.kind {
            spec.options = vec!["S".to_string(), "M".to_string()];
        }
        let form = form(vec![
            Field::input("mail", FieldType::Email, "Mail"),
            Field::input("qty", FieldType::Number, "Qty"),
            Field::input("stars", FieldType::Rating, "Stars"),
            choice,
        ]);
        let sub = Submission::new()
            .with("mail", "not-an-email")
            .with("qty", "ten")
            .with("stars", 7)
            .with("size", "XL");
        let kinds: Vec<_> = validate(&form, &sub, &VisibilityMap::all_visible(&form))
            .into_iter()
            .map(|i| i.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                ValidationIssueKind::InvalidEmail,
                ValidationIssueKind::NotANumber,
                ValidationIssueKind::RatingOutOfRange,
                ValidationIssueKind::UnknownOption("XL".to_string()),
            ]
        );
    }

    #[test]
    fn test_email_shape() {
        assert!(looks_like_email("ada@example.com"));
        assert!(!looks_like_email("ada@example"));
        assert!(!looks_like_email("@example.com"));
        assert!(!looks_like_email("a b@example.com"));
    }
}
