//! # Conditional Visibility
//!
//! Decides, for one submission, which fields of a form are shown.
//!
//! The rules are deliberately simple and fully deterministic:
//!
//! 1. A field without conditions is visible.
//! 2. Every condition is evaluated, in order. The **last** one that matches
//!    decides: `show` makes the field visible, `hide` hides it. Nothing
//!    short-circuits on the first match.
//! 3. If no condition matches the field keeps its default: visible.
//!
//! A rule reads the referenced field's submitted value directly. Whether
//! that referenced field is itself hidden does not matter; there is no
//! transitive resolution. A rule that cannot be evaluated (unknown field,
//! self-reference, operator that does not fit the field type, non-numeric
//! operand) is `false`. Evaluation never fails.

pub mod lint;
pub mod validate;

use std::collections::{BTreeMap, HashMap};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::model::*;

pub use lint::{lint_conditions, ConditionIssue, ConditionIssueKind};
pub use validate::{validate, ValidationIssue, ValidationIssueKind};

/// Per-field visibility for one evaluation. Total over the form it was
/// computed from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisibilityMap(BTreeMap<FieldId, bool>);

impl VisibilityMap {
    /// A map that shows every field of the form.
    pub fn all_visible(form: &FormDefinition) -> Self {
        Self(form.fields().map(|f| (f.id.clone(), true)).collect())
    }

    /// Fields absent from the map count as hidden.
    pub fn is_visible(&self, id: &FieldId) -> bool {
        self.0.get(id).copied().unwrap_or(false)
    }

    pub fn set(&mut self, id: FieldId, visible: bool) {
        self.0.insert(id, visible);
    }

    pub fn hidden(&self) -> impl Iterator<Item = &FieldId> {
        self.0.iter().filter(|(_, v)| !**v).map(|(k, _)| k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldId, bool)> {
        self.0.iter().map(|(k, v)| (k, *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Lookup context for one evaluation: field types by id plus the values.
struct EvalContext<'a> {
    types: HashMap<&'a FieldId, FieldType>,
    submission: &'a Submission,
}

impl<'a> EvalContext<'a> {
    fn new(form: &'a FormDefinition, submission: &'a Submission) -> Self {
        EvalContext {
            types: form.fields().map(|f| (&f.id, f.field_type())).collect(),
            submission,
        }
    }

    /// The value a rule sees: the submitted value, or the empty reading for
    /// the referenced type (`false` for checkboxes, `""` otherwise).
    fn value_of(&self, id: &FieldId, field_type: FieldType) -> FieldValue {
        match self.submission.get(id) {
            Some(v) => v.clone(),
            None if field_type == FieldType::Checkbox => FieldValue::Bool(false),
            None => FieldValue::Text(String::new()),
        }
    }
}

/// Compute the visibility of every field in the form.
pub fn evaluate(form: &FormDefinition, submission: &Submission) -> VisibilityMap {
    let ctx = EvalContext::new(form, submission);
    let mut map = BTreeMap::new();

    for field in form.fields() {
        let visible = field_visibility(field, &ctx);
        if !visible {
            debug!("field {} hidden by its conditions", field.id);
        }
        map.insert(field.id.clone(), visible);
    }

    VisibilityMap(map)
}

fn field_visibility(field: &Field, ctx: &EvalContext) -> bool {
    let mut visible = true;
    for condition in &field.conditions {
        if condition_matches(condition, &field.id, ctx) {
            visible = matches!(condition.action, ConditionAction::Show);
        }
    }
    visible
}

fn condition_matches(condition: &Condition, owner: &FieldId, ctx: &EvalContext) -> bool {
    if condition.rules.is_empty() {
        return false;
    }
    let mut results = condition.rules.iter().map(|r| rule_matches(r, owner, ctx));
    match condition.logic {
        ConditionLogic::All => results.all(|r| r),
        ConditionLogic::Any => results.any(|r| r),
    }
}

fn rule_matches(rule: &Rule, owner: &FieldId, ctx: &EvalContext) -> bool {
    if &rule.field_id == owner {
        return false;
    }
    let field_type = match ctx.types.get(&rule.field_id) {
        Some(t) => *t,
        None => return false,
    };
    let stored = ctx.value_of(&rule.field_id, field_type);

    match rule.operator {
        Operator::Equals => stored.canonical() == rule.value.canonical(),
        Operator::NotEquals => stored.canonical() != rule.value.canonical(),
        Operator::Contains => {
            if !field_type.is_textual() {
                return false;
            }
            let needle = rule.value.canonical();
            match &stored {
                FieldValue::List(items) => items.iter().any(|item| *item == needle),
                other => other.canonical().contains(&needle),
            }
        }
        Operator::GreaterThan | Operator::LessThan => {
            if !field_type.is_numeric() {
                return false;
            }
            match (stored.as_number(), rule.value.as_number()) {
                (Some(a), Some(b)) => match rule.operator {
                    Operator::GreaterThan => a > b,
                    _ => a < b,
                },
                _ => false,
            }
        }
    }
}
