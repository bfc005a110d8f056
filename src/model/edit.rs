//! Structural edits on a form definition.
//!
//! Every edit keeps row order and in-row field order intact except for the
//! element being moved. Removing a field never touches conditions that point
//! at it: conditions are data, not live links, and a rule whose field is
//! gone simply never matches.

use log::debug;

use super::*;
use crate::error::{FormpressError, Result};

impl FormDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an empty single-column row.
    pub fn add_row(&mut self) -> RowId {
        let row = Row::new();
        let id = row.id.clone();
        self.rows.push(row);
        id
    }

    /// Remove a row together with its fields.
    pub fn remove_row(&mut self, row_id: &RowId) -> Result<Row> {
        let idx = self.row_index(row_id)?;
        let row = self.rows.remove(idx);
        debug!("removed row {} with {} field(s)", row.id, row.fields.len());
        Ok(row)
    }

    /// Move a row to `target_index`, clamped to the row count.
    pub fn move_row(&mut self, row_id: &RowId, target_index: usize) -> Result<()> {
        let idx = self.row_index(row_id)?;
        let row = self.rows.remove(idx);
        let target = target_index.min(self.rows.len());
        self.rows.insert(target, row);
        Ok(())
    }

    pub fn set_column_count(&mut self, row_id: &RowId, column_count: u8) -> Result<()> {
        if !(1..=3).contains(&column_count) {
            return Err(FormpressError::InvalidLayout { column_count });
        }
        let idx = self.row_index(row_id)?;
        self.rows[idx].column_count = column_count;
        Ok(())
    }

    /// Append a new field of the given type to a row.
    pub fn add_field(&mut self, row_id: &RowId, field_type: FieldType) -> Result<FieldId> {
        let idx = self.row_index(row_id)?;
        let field = Field::new(field_type);
        let id = field.id.clone();
        self.rows[idx].fields.push(field);
        Ok(id)
    }

    /// Move a field into `target_row` at `target_index` (clamped to the
    /// row's length after the field has been taken out).
    pub fn move_field(
        &mut self,
        field_id: &FieldId,
        target_row: &RowId,
        target_index: usize,
    ) -> Result<()> {
        let (row_idx, field_idx) = self
            .locate(field_id)
            .ok_or_else(|| FormpressError::UnknownField(field_id.clone()))?;
        let target_row_idx = self.row_index(target_row)?;

        let field = self.rows[row_idx].fields.remove(field_idx);
        let fields = &mut self.rows[target_row_idx].fields;
        let target = target_index.min(fields.len());
        fields.insert(target, field);
        Ok(())
    }

    pub fn remove_field(&mut self, field_id: &FieldId) -> Result<Field> {
        let (row_idx, field_idx) = self
            .locate(field_id)
            .ok_or_else(|| FormpressError::UnknownField(field_id.clone()))?;
        let field = self.rows[row_idx].fields.remove(field_idx);

        let dangling = self
            .fields()
            .filter(|f| {
                f.conditions
                    .iter()
                    .any(|c| c.rules.iter().any(|r| &r.field_id == field_id))
            })
            .count();
        if dangling > 0 {
            debug!(
                "removed field {} still referenced by {} field condition(s); those rules will never match",
                field_id, dangling
            );
        }
        Ok(field)
    }

    /// Replace a field's conditions. Rejects rules pointing at the field
    /// itself and conditions without any rules.
    pub fn set_conditions(&mut self, field_id: &FieldId, conditions: Vec<Condition>) -> Result<()> {
        for condition in &conditions {
            if condition.rules.is_empty() {
                return Err(FormpressError::InvalidCondition {
                    field: field_id.clone(),
                    reason: "condition has no rules".to_string(),
                });
            }
            if condition.rules.iter().any(|r| &r.field_id == field_id) {
                return Err(FormpressError::InvalidCondition {
                    field: field_id.clone(),
                    reason: "a field cannot depend on its own value".to_string(),
                });
            }
        }
        let field = self
            .field_mut(field_id)
            .ok_or_else(|| FormpressError::UnknownField(field_id.clone()))?;
        field.conditions = conditions;
        Ok(())
    }

    pub fn row(&self, row_id: &RowId) -> Option<&Row> {
        self.rows.iter().find(|r| &r.id == row_id)
    }

    pub fn field(&self, field_id: &FieldId) -> Option<&Field> {
        self.fields().find(|f| &f.id == field_id)
    }

    pub fn field_mut(&mut self, field_id: &FieldId) -> Option<&mut Field> {
        self.rows
            .iter_mut()
            .flat_map(|r| r.fields.iter_mut())
            .find(|f| &f.id == field_id)
    }

    /// All fields in row-then-field order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.rows.iter().flat_map(|r| r.fields.iter())
    }

    /// (row index, field index) of a field.
    fn locate(&self, field_id: &FieldId) -> Option<(usize, usize)> {
        self.rows.iter().enumerate().find_map(|(ri, row)| {
            row.fields
                .iter()
                .position(|f| &f.id == field_id)
                .map(|fi| (ri, fi))
        })
    }

    fn row_index(&self, row_id: &RowId) -> Result<usize> {
        self.rows
            .iter()
            .position(|r| &r.id == row_id)
            .ok_or_else(|| FormpressError::UnknownRow(row_id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_ids(form: &FormDefinition, row: &RowId) -> Vec<FieldId> {
        form.row(row).unwrap().fields.iter().map(|f| f.id.clone()).collect()
    }

    #[test]
    fn test_add_row_and_fields_preserve_order() {
        let mut form = FormDefinition::new();
        let row = form.add_row();
        let a = form.add_field(&row, FieldType::Text).unwrap();
        let b = form.add_field(&row, FieldType::Rating).unwrap();
        let c = form.add_field(&row, FieldType::Divider).unwrap();
        assert_eq!(field_ids(&form, &row), vec![a, b, c]);
        assert_eq!(form.row(&row).unwrap().column_count, 1);
    }

    #[test]
    fn test_add_field_to_unknown_row_fails() {
        let mut form = FormDefinition::new();
        let err = form.add_field(&RowId::from("nope"), FieldType::Text).unwrap_err();
        assert!(matches!(err, FormpressError::UnknownRow(_)));
    }

    #[test]
    fn test_column_count_must_be_one_to_three() {
        let mut form = FormDefinition::new();
        let row = form.add_row();
        assert!(form.set_column_count(&row, 3).is_ok());
        assert!(matches!(
            form.set_column_count(&row, 0),
            Err(FormpressError::InvalidLayout { column_count: 0 })
        ));
        assert!(matches!(
            form.set_column_count(&row, 4),
            Err(FormpressError::InvalidLayout { column_count: 4 })
        ));
        assert_eq!(form.row(&row).unwrap().column_count, 3);
    }

    #[test]
    fn test_move_field_between_rows() {
        let mut form = FormDefinition::new();
        let r1 = form.add_row();
        let r2 = form.add_row();
        let a = form.add_field(&r1, FieldType::Text).unwrap();
        let b = form.add_field(&r1, FieldType::Email).unwrap();
        let c = form.add_field(&r2, FieldType::Tel).unwrap();

        form.move_field(&a, &r2, 0).unwrap();
        assert_eq!(field_ids(&form, &r1), vec![b.clone()]);
        assert_eq!(field_ids(&form, &r2), vec![a.clone(), c.clone()]);

        // Index past the end is clamped.
        form.move_field(&b, &r2, 99).unwrap();
        assert_eq!(field_ids(&form, &r2), vec![a, c, b]);
    }

    #[test]
    fn test_move_field_within_row() {
        let mut form = FormDefinition::new();
        let row = form.add_row();
        let a = form.add_field(&row, FieldType::Text).unwrap();
        let b = form.add_field(&row, FieldType::Text).unwrap();
        let c = form.add_field(&row, FieldType::Text).unwrap();
        form.move_field(&c, &row, 0).unwrap();
        assert_eq!(field_ids(&form, &row), vec![c, a, b]);
    }

    #[test]
    fn test_move_field_reports_dangling_ids() {
        let mut form = FormDefinition::new();
        let row = form.add_row();
        let a = form.add_field(&row, FieldType::Text).unwrap();
        assert!(matches!(
            form.move_field(&FieldId::from("x"), &row, 0),
            Err(FormpressError::UnknownField(_))
        ));
        assert!(matches!(
            form.move_field(&a, &RowId::from("x"), 0),
            Err(FormpressError::UnknownRow(_))
        ));
        // A failed move leaves the field where it was.
        assert_eq!(field_ids(&form, &row), vec![a]);
    }

    #[test]
    fn test_remove_referenced_field_keeps_conditions() {
        let mut form = FormDefinition::new();
        let row = form.add_row();
        let a = form.add_field(&row, FieldType::Text).unwrap();
        let b = form.add_field(&row, FieldType::Text).unwrap();
        form.set_conditions(
            &b,
            vec![Condition::new(
                ConditionAction::Show,
                ConditionLogic::All,
                vec![Rule::new(a.clone(), Operator::Equals, "yes")],
            )],
        )
        .unwrap();

        let removed = form.remove_field(&a).unwrap();
        assert_eq!(removed.id, a);
        assert_eq!(form.field(&b).unwrap().conditions.len(), 1);
        assert!(matches!(
            form.remove_field(&a),
            Err(FormpressError::UnknownField(_))
        ));
    }

    #[test]
    fn test_self_referencing_condition_is_rejected() {
        let mut form = FormDefinition::new();
        let row = form.add_row();
        let a = form.add_field(&row, FieldType::Text).unwrap();
        let err = form
            .set_conditions(
                &a,
                vec![Condition::new(
                    ConditionAction::Hide,
                    ConditionLogic::Any,
                    vec![Rule::new(a.clone(), Operator::Equals, "x")],
                )],
            )
            .unwrap_err();
        assert!(matches!(err, FormpressError::InvalidCondition { .. }));
    }

    #[test]
    fn test_condition_without_rules_is_rejected() {
        let mut form = FormDefinition::new();
        let row = form.add_row();
        let a = form.add_field(&row, FieldType::Text).unwrap();
        let err = form
            .set_conditions(
                &a,
                vec![Condition::new(ConditionAction::Hide, ConditionLogic::All, vec![])],
            )
            .unwrap_err();
        assert!(matches!(
            err,
            FormpressError::InvalidCondition { ref field, .. } if field == &a
        ));
        assert!(form.field(&a).unwrap().conditions.is_empty());
    }

    #[test]
    fn test_removing_a_row_orphans_rules_on_its_fields() {
        let mut form = FormDefinition::new();
        let r1 = form.add_row();
        let r2 = form.add_row();
        let a = form.add_field(&r1, FieldType::Checkbox).unwrap();
        let b = form.add_field(&r2, FieldType::Text).unwrap();
        form.set_conditions(
            &b,
            vec![Condition::new(
                ConditionAction::Hide,
                ConditionLogic::All,
                vec![Rule::new(a.clone(), Operator::Equals, true)],
            )],
        )
        .unwrap();

        let submission = Submission::new().with(a.clone(), true);
        assert!(!crate::visibility::evaluate(&form, &submission).is_visible(&b));

        form.remove_row(&r1).unwrap();
        assert!(form.field(&a).is_none());
        assert_eq!(form.field(&b).unwrap().conditions.len(), 1);
        assert!(crate::visibility::evaluate(&form, &submission).is_visible(&b));
    }

    #[test]
    fn test_move_and_remove_rows() {
        let mut form = FormDefinition::new();
        let r1 = form.add_row();
        let r2 = form.add_row();
        let r3 = form.add_row();
        form.move_row(&r3, 0).unwrap();
        let order: Vec<_> = form.rows.iter().map(|r| r.id.clone()).collect();
        assert_eq!(order, vec![r3.clone(), r1.clone(), r2.clone()]);

        form.remove_row(&r1).unwrap();
        assert_eq!(form.rows.len(), 2);
        assert!(matches!(form.remove_row(&r1), Err(FormpressError::UnknownRow(_))));
    }
}
