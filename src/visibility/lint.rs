//! Authoring-time diagnostics for conditions.
//!
//! Evaluation tolerates every one of these problems (the rule is just
//! `false`); this pass exists so an editor can point them out.

use std::collections::HashMap;
use std::fmt;

use crate::model::*;

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionIssue {
    /// The field owning the condition.
    pub field: FieldId,
    /// Index of the condition in the field's list.
    pub condition: usize,
    /// Index of the offending rule, if the issue is rule-specific.
    pub rule: Option<usize>,
    pub kind: ConditionIssueKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConditionIssueKind {
    EmptyRules,
    SelfReference,
    UnknownField(FieldId),
    OperatorMismatch {
        operator: Operator,
        field_type: FieldType,
    },
}

impl fmt::Display for ConditionIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} condition #{}", self.field, self.condition + 1)?;
        if let Some(rule) = self.rule {
            write!(f, " rule #{}", rule + 1)?;
        }
        match &self.kind {
            ConditionIssueKind::EmptyRules => write!(f, ": has no rules and never matches"),
            ConditionIssueKind::SelfReference => write!(f, ": refers to its own field"),
            ConditionIssueKind::UnknownField(id) => {
                write!(f, ": refers to missing field {}", id)
            }
            ConditionIssueKind::OperatorMismatch {
                operator,
                field_type,
            } => write!(f, ": {:?} cannot be applied to a {} field", operator, field_type),
        }
    }
}

/// Report every condition that can never evaluate as its author intended.
pub fn lint_conditions(form: &FormDefinition) -> Vec<ConditionIssue> {
    let types: HashMap<&FieldId, FieldType> =
        form.fields().map(|f| (&f.id, f.field_type())).collect();
    let mut issues = Vec::new();

    for field in form.fields() {
        for (ci, condition) in field.conditions.iter().enumerate() {
            if condition.rules.is_empty() {
                issues.push(ConditionIssue {
                    field: field.id.clone(),
                    condition: ci,
                    rule: None,
                    kind: ConditionIssueKind::EmptyRules,
                });
            }

            for (ri, rule) in condition.rules.iter().enumerate() {
                let kind = if rule.field_id == field.id {
                    Some(ConditionIssueKind::SelfReference)
                } else {
                    match types.get(&rule.field_id) {
                        None => Some(ConditionIssueKind::UnknownField(rule.field_id.clone())),
                        Some(field_type) if !operator_fits(rule.operator, *field_type) => {
                            Some(ConditionIssueKind::OperatorMismatch {
                                operator: rule.operator,
                                field_type: *field_type,
                            })
                        }
                        Some(_) => None,
                    }
                };

                if let Some(kind) = kind {
                    issues.push(ConditionIssue {
                        field: field.id.clone(),
                        condition: ci,
                        rule: Some(ri),
                        kind,
                    });
                }
            }
        }
    }

    issues
}

fn operator_fits(operator: Operator, field_type: FieldType) -> bool {
    match operator {
        Operator::Equals | Operator::NotEquals => !field_type.is_layout(),
        Operator::Contains => field_type.is_textual(),
        Operator::GreaterThan | Operator::LessThan => field_type.is_numeric(),
    }
}
