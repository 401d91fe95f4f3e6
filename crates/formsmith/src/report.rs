// File: src/report.rs
// Purpose: Evaluate every field of a form: effective value, then validation

use chrono::NaiveDate;
use formsmith_formulas::{derive_value, derive_value_at};
use formsmith_types::{FormData, FormField, Value};
use formsmith_validation::{validate_with, CustomValidators};
use serde::Serialize;

/// Outcome for a single field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldReport {
    pub id: String,
    pub label: String,
    pub derived: bool,
    /// Effective value: entered value for inputs, computed value for derived fields
    pub value: Option<Value>,
    pub errors: Vec<String>,
}

impl FieldReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Outcome for a whole form, fields in display order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormReport {
    pub fields: Vec<FieldReport>,
}

impl FormReport {
    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(FieldReport::is_valid)
    }

    pub fn field(&self, field_id: &str) -> Option<&FieldReport> {
        self.fields.iter().find(|f| f.id == field_id)
    }

    /// Errors for a field; empty when the field is valid or unknown
    pub fn errors_for(&self, field_id: &str) -> &[String] {
        match self.field(field_id) {
            Some(field) => &field.errors,
            None => &[],
        }
    }

    pub fn value_of(&self, field_id: &str) -> Option<&Value> {
        self.field(field_id).and_then(|f| f.value.as_ref())
    }

    pub fn error_count(&self) -> usize {
        self.fields.iter().map(|f| f.errors.len()).sum()
    }

    pub fn invalid_fields(&self) -> impl Iterator<Item = &FieldReport> {
        self.fields.iter().filter(|f| !f.is_valid())
    }
}

/// Runs derivation then validation for each field.
///
/// Holds only configuration (custom predicates, an optional fixed date);
/// no state carries over between evaluations.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    custom: CustomValidators,
    today: Option<NaiveDate>,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_custom_validators(mut self, custom: CustomValidators) -> Self {
        self.custom = custom;
        self
    }

    /// Pin the reference date used by age formulas
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn effective_value(&self, field: &FormField, data: &FormData, all_fields: &[FormField]) -> Option<Value> {
        match self.today {
            Some(today) => derive_value_at(field, data, all_fields, today),
            None => derive_value(field, data, all_fields),
        }
    }

    /// Validation errors for a field, checked against its effective value
    pub fn errors(&self, field: &FormField, data: &FormData, all_fields: &[FormField]) -> Vec<String> {
        let value = self.effective_value(field, data, all_fields);
        validate_with(value.as_ref(), &field.validation_rules, &self.custom)
    }

    pub fn evaluate(&self, fields: &[FormField], data: &FormData) -> FormReport {
        let mut ordered: Vec<&FormField> = fields.iter().collect();
        ordered.sort_by_key(|f| f.order);

        let reports = ordered
            .into_iter()
            .map(|field| {
                let value = self.effective_value(field, data, fields);
                let errors = validate_with(value.as_ref(), &field.validation_rules, &self.custom);
                FieldReport {
                    id: field.id.clone(),
                    label: field.label.clone(),
                    derived: field.computes_value(),
                    value,
                    errors,
                }
            })
            .collect();

        FormReport { fields: reports }
    }
}

/// Evaluate a form with the default evaluator
pub fn evaluate_form(fields: &[FormField], data: &FormData) -> FormReport {
    Evaluator::default().evaluate(fields, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use formsmith_types::{FieldType, ValidationRule};
    use pretty_assertions::assert_eq;

    fn fields() -> Vec<FormField> {
        vec![
            FormField::new("total", FieldType::Number, "Total")
                .derived("sum", ["a", "b"])
                .with_rule(ValidationRule::required())
                .with_order(2),
            FormField::new("a", FieldType::Number, "A").with_order(0),
            FormField::new("b", FieldType::Number, "B").with_order(1),
            FormField::new("email", FieldType::Text, "Email")
                .required()
                .with_rule(ValidationRule::email())
                .with_order(3),
        ]
    }

    #[test]
    fn test_report_in_display_order() {
        let report = evaluate_form(&fields(), &FormData::new());
        let ids: Vec<&str> = report.fields.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "total", "email"]);
    }

    #[test]
    fn test_derived_field_validated_on_computed_value() {
        // total's raw entry is absent, but the computed sum satisfies `required`
        let data: FormData = [("a", "2"), ("b", "3"), ("email", "x@y.io")].into_iter().collect();
        let report = evaluate_form(&fields(), &data);

        assert_eq!(report.value_of("total"), Some(&Value::Number(5.0)));
        assert!(report.errors_for("total").is_empty());
        assert!(report.field("total").unwrap().derived);
        assert!(report.is_valid());
    }

    #[test]
    fn test_report_collects_errors() {
        let data: FormData = [("email", "nope")].into_iter().collect();
        let report = evaluate_form(&fields(), &data);

        assert!(!report.is_valid());
        assert_eq!(report.errors_for("email"), ["Please enter a valid email address".to_string()]);
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.invalid_fields().count(), 1);
        assert!(report.errors_for("unknown").is_empty());
    }

    #[test]
    fn test_custom_validators_apply() {
        let fields = vec![FormField::new("code", FieldType::Text, "Code")
            .with_rule(ValidationRule::custom(Some("upper")).with_message("Use capitals"))];
        let data: FormData = [("code", "abc")].into_iter().collect();

        assert!(evaluate_form(&fields, &data).is_valid());

        let evaluator = Evaluator::new().with_custom_validators(CustomValidators::new().with(
            "upper",
            |v: Option<&Value>| v.and_then(Value::as_text).map_or(true, |s| s.chars().all(|c| !c.is_lowercase())),
        ));
        assert_eq!(
            evaluator.evaluate(&fields, &data).errors_for("code"),
            ["Use capitals".to_string()]
        );
    }

    #[test]
    fn test_fixed_reference_date() {
        let fields = vec![
            FormField::new("dob", FieldType::Date, "Birthday"),
            FormField::new("age", FieldType::Number, "Age").derived("age_from_dob", ["dob"]),
        ];
        let data: FormData = [("dob", "2000-01-01")].into_iter().collect();
        let evaluator = Evaluator::new().with_today(NaiveDate::from_ymd_opt(2020, 12, 31).unwrap());

        assert_eq!(
            evaluator.effective_value(&fields[1], &data, &fields),
            Some(Value::Number(20.0))
        );
    }
}
