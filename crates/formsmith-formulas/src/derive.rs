// File: formsmith-formulas/src/derive.rs
// Purpose: Compute the effective value of a (possibly derived) field

use crate::age::{age_on, parse_date};
use crate::error::DerivationError;
use crate::formula::Formula;
use chrono::{Local, NaiveDate};
use formsmith_types::{FormData, FormField, Value};

/// A parent field id paired with its raw value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParentValue<'a> {
    pub id: &'a str,
    pub value: Option<&'a Value>,
}

impl<'a> ParentValue<'a> {
    fn truthy(&self) -> Option<&'a Value> {
        self.value.filter(|v| v.is_truthy())
    }
}

/// Effective value of `field`, using today's local date for age formulas.
///
/// Non-derived fields yield their entered value or default. Derived fields
/// are computed from their parents' raw values. A failed computation yields
/// `None` and is logged.
pub fn derive_value(field: &FormField, data: &FormData, all_fields: &[FormField]) -> Option<Value> {
    derive_value_at(field, data, all_fields, Local::now().date_naive())
}

/// [`derive_value`] with an explicit reference date
pub fn derive_value_at(
    field: &FormField,
    data: &FormData,
    all_fields: &[FormField],
    today: NaiveDate,
) -> Option<Value> {
    match try_derive_value(field, data, all_fields, today) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(
                field = %field.id,
                formula = %field.formula,
                error = %err,
                "derived value could not be computed"
            );
            None
        }
    }
}

/// Derivation with failures kept distinct from legitimately empty results
pub fn try_derive_value(
    field: &FormField,
    data: &FormData,
    all_fields: &[FormField],
    today: NaiveDate,
) -> Result<Option<Value>, DerivationError> {
    let formula = match Formula::parse(&field.formula) {
        Some(formula) if field.is_derived && !field.parent_fields.is_empty() => formula,
        _ => return Ok(field.raw_value(data).cloned()),
    };

    let parents = resolve_parents(field, data, all_fields);
    evaluate(&formula, &parents, today)
}

/// Raw values of the field's parents, aligned with `parent_fields`.
///
/// Unknown parent ids resolve to `None`. A derived parent contributes its
/// raw stored value; parents are never derived recursively.
pub fn resolve_parents<'a>(
    field: &'a FormField,
    data: &'a FormData,
    all_fields: &'a [FormField],
) -> Vec<ParentValue<'a>> {
    field
        .parent_fields
        .iter()
        .map(|id| ParentValue {
            id: id.as_str(),
            value: all_fields
                .iter()
                .find(|f| f.id == *id)
                .and_then(|parent| parent.raw_value(data)),
        })
        .collect()
}

/// Apply a formula to resolved parent values
pub fn evaluate(
    formula: &Formula,
    parents: &[ParentValue<'_>],
    today: NaiveDate,
) -> Result<Option<Value>, DerivationError> {
    let value = match formula {
        Formula::AgeFromDob => {
            let Some(dob) = parents.first().and_then(ParentValue::truthy) else {
                return Ok(None);
            };
            let birth = parse_date(dob)?;
            Value::from(age_on(birth, today))
        }
        Formula::FullName => Value::Text(join_truthy(parents, " ")),
        Formula::Concat => Value::Text(join_truthy(parents, "")),
        Formula::Sum => Value::Number(parents.iter().fold(0.0, |sum, p| {
            let n = p.value.map_or(0.0, Value::to_number);
            sum + if n.is_nan() { 0.0 } else { n }
        })),
        Formula::Multiply => Value::Number(parents.iter().fold(1.0, |product, p| {
            let n = p.value.map_or(f64::NAN, Value::to_number);
            // zero and non-numeric inputs are skipped rather than zeroing the product
            product * if n.is_nan() || n == 0.0 { 1.0 } else { n }
        })),
        Formula::Template(template) => Value::Text(fill_template(template, parents)),
    };

    Ok(Some(value))
}

fn join_truthy(parents: &[ParentValue<'_>], separator: &str) -> String {
    parents
        .iter()
        .filter_map(ParentValue::truthy)
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Replace every `{parentId}` token with the parent's value (empty when falsy)
fn fill_template(template: &str, parents: &[ParentValue<'_>]) -> String {
    parents.iter().fold(template.to_string(), |acc, parent| {
        let token = format!("{{{}}}", parent.id);
        let replacement = parent.truthy().map(ToString::to_string).unwrap_or_default();
        acc.replace(&token, &replacement)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Months;
    use formsmith_types::FieldType;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn input(id: &str) -> FormField {
        FormField::new(id, FieldType::Text, id)
    }

    fn derived(id: &str, formula: &str, parents: &[&str]) -> FormField {
        FormField::new(id, FieldType::Text, id).derived(formula, parents.iter().copied())
    }

    fn data(pairs: &[(&str, Value)]) -> FormData {
        pairs.iter().cloned().collect()
    }

    fn run(field: &FormField, data: &FormData, fields: &[FormField]) -> Option<Value> {
        derive_value_at(field, data, fields, today())
    }

    #[test]
    fn test_plain_field_passes_through() {
        let field = input("name").with_default("anon");
        let fields = vec![field.clone()];

        assert_eq!(run(&field, &FormData::new(), &fields), Some(Value::from("anon")));

        let entered = data(&[("name", Value::from("Ada"))]);
        assert_eq!(run(&field, &entered, &fields), Some(Value::from("Ada")));

        let bare = input("other");
        assert_eq!(run(&bare, &FormData::new(), &fields), None);
    }

    #[test]
    fn test_incomplete_derivation_behaves_like_input() {
        let no_formula = derived("x", "", &["a"]);
        let no_parents = derived("y", "sum", &[]);
        let entered = data(&[("x", Value::from("typed")), ("y", Value::from(3))]);
        let fields = vec![input("a"), no_formula.clone(), no_parents.clone()];

        assert_eq!(run(&no_formula, &entered, &fields), Some(Value::from("typed")));
        assert_eq!(run(&no_parents, &entered, &fields), Some(Value::from(3)));
    }

    #[test]
    fn test_sum() {
        let total = derived("total", "sum", &["a", "b", "c"]);
        let fields = vec![input("a"), input("b"), input("c"), total.clone()];
        let values = data(&[
            ("a", Value::from("3")),
            ("b", Value::from("4")),
            ("c", Value::Null),
        ]);

        assert_eq!(run(&total, &values, &fields), Some(Value::Number(7.0)));

        let messy = data(&[("a", Value::from("abc")), ("b", Value::from(2.5))]);
        assert_eq!(run(&total, &messy, &fields), Some(Value::Number(2.5)));
    }

    #[test]
    fn test_multiply() {
        let product = derived("p", "multiply", &["a", "b"]);
        let fields = vec![input("a"), input("b"), product.clone()];

        let values = data(&[("a", Value::from("2")), ("b", Value::from("5"))]);
        assert_eq!(run(&product, &values, &fields), Some(Value::Number(10.0)));

        let partial = data(&[("a", Value::from("x")), ("b", Value::from(0))]);
        assert_eq!(run(&product, &partial, &fields), Some(Value::Number(1.0)));
    }

    #[test]
    fn test_multiply_with_no_parents_is_one() {
        assert_eq!(evaluate(&Formula::Multiply, &[], today()), Ok(Some(Value::Number(1.0))));
        assert_eq!(evaluate(&Formula::Sum, &[], today()), Ok(Some(Value::Number(0.0))));
    }

    #[test]
    fn test_full_name_and_concat_skip_empty_values() {
        let full = derived("full", "full_name", &["first", "middle", "last"]);
        let joined = derived("code", "concat", &["first", "middle", "last"]);
        let fields = vec![input("first"), input("middle"), input("last")];
        let values = data(&[
            ("first", Value::from("Ada")),
            ("middle", Value::from("")),
            ("last", Value::from("Lovelace")),
        ]);

        assert_eq!(run(&full, &values, &fields), Some(Value::from("Ada Lovelace")));
        assert_eq!(run(&joined, &values, &fields), Some(Value::from("AdaLovelace")));

        let numbers = data(&[("first", Value::from(0)), ("last", Value::from(12))]);
        assert_eq!(run(&joined, &numbers, &fields), Some(Value::from("12")));
    }

    #[test]
    fn test_age_from_dob_boundary() {
        let age = derived("age", "age_from_dob", &["dob"]);
        let fields = vec![input("dob"), age.clone()];

        let exact = data(&[("dob", Value::from("1994-06-15"))]);
        assert_eq!(run(&age, &exact, &fields), Some(Value::Number(30.0)));

        let day_later = data(&[("dob", Value::from("1994-06-16"))]);
        assert_eq!(run(&age, &day_later, &fields), Some(Value::Number(29.0)));
    }

    #[test]
    fn test_age_from_dob_against_local_today() {
        let age = derived("age", "age_from_dob", &["dob"]);
        let fields = vec![input("dob"), age.clone()];
        let now = Local::now().date_naive();
        let thirty_years_ago = now.checked_sub_months(Months::new(360)).unwrap();
        let not_yet = thirty_years_ago.succ_opt().unwrap();

        let values = data(&[("dob", Value::from(thirty_years_ago.format("%Y-%m-%d").to_string()))]);
        assert_eq!(derive_value(&age, &values, &fields), Some(Value::Number(30.0)));

        let values = data(&[("dob", Value::from(not_yet.format("%Y-%m-%d").to_string()))]);
        assert_eq!(derive_value(&age, &values, &fields), Some(Value::Number(29.0)));
    }

    #[test]
    fn test_age_from_dob_absent_vs_invalid() {
        let age = derived("age", "age_from_dob", &["dob"]);
        let fields = vec![input("dob"), age.clone()];

        assert_eq!(try_derive_value(&age, &FormData::new(), &fields, today()), Ok(None));

        let garbage = data(&[("dob", Value::from("not a date"))]);
        assert_eq!(
            try_derive_value(&age, &garbage, &fields, today()),
            Err(DerivationError::InvalidDate {
                value: "not a date".into()
            })
        );
        assert_eq!(run(&age, &garbage, &fields), None);
    }

    #[test]
    fn test_custom_template() {
        let field = derived("label", "{a} - {b}", &["a", "b"]);
        let fields = vec![input("a"), input("b"), field.clone()];

        let both = data(&[("a", Value::from("X")), ("b", Value::from("Y"))]);
        assert_eq!(run(&field, &both, &fields), Some(Value::from("X - Y")));

        let missing_b = data(&[("a", Value::from("X"))]);
        assert_eq!(run(&field, &missing_b, &fields), Some(Value::from("X - ")));
    }

    #[test]
    fn test_template_replaces_every_occurrence_exactly() {
        let field = derived("t", "{a}{a}-{A}-{ab}", &["a"]);
        let fields = vec![input("a"), input("ab")];
        let values = data(&[("a", Value::from(2)), ("ab", Value::from("no"))]);

        assert_eq!(run(&field, &values, &fields), Some(Value::from("22-{A}-{ab}")));
    }

    #[test]
    fn test_custom_keyword_is_its_own_template() {
        let field = derived("t", "custom", &["a"]);
        let fields = vec![input("a")];
        let values = data(&[("a", Value::from("x"))]);

        assert_eq!(run(&field, &values, &fields), Some(Value::from("custom")));
    }

    #[test]
    fn test_dangling_parent_is_null() {
        let field = derived("full", "full_name", &["first", "ghost"]);
        let fields = vec![input("first"), field.clone()];
        let values = data(&[("first", Value::from("Ada")), ("ghost", Value::from("Boo"))]);

        let parents = resolve_parents(&field, &values, &fields);
        assert_eq!(
            parents,
            vec![
                ParentValue {
                    id: "first",
                    value: Some(&Value::from("Ada"))
                },
                ParentValue {
                    id: "ghost",
                    value: None
                },
            ]
        );
        assert_eq!(run(&field, &values, &fields), Some(Value::from("Ada")));
    }

    #[test]
    fn test_parent_default_used_when_not_entered() {
        let field = derived("total", "sum", &["a", "b"]);
        let fields = vec![input("a").with_default(10), input("b")];
        let values = data(&[("b", Value::from("5"))]);

        assert_eq!(run(&field, &values, &fields), Some(Value::Number(15.0)));
    }

    #[test]
    fn test_derivation_is_one_level_deep() {
        let inner = derived("inner", "sum", &["a", "b"]);
        let outer = derived("outer", "concat", &["inner"]);
        let fields = vec![input("a"), input("b"), inner.clone(), outer.clone()];

        let values = data(&[("a", Value::from(1)), ("b", Value::from(2))]);
        assert_eq!(run(&inner, &values, &fields), Some(Value::Number(3.0)));
        // outer reads inner's raw (unset) value, not 3
        assert_eq!(run(&outer, &values, &fields), Some(Value::from("")));

        let stale = data(&[("a", Value::from(1)), ("inner", Value::from("raw"))]);
        assert_eq!(run(&outer, &stale, &fields), Some(Value::from("raw")));
    }

    #[test]
    fn test_derived_field_ignores_own_entered_value() {
        let field = derived("total", "sum", &["a"]);
        let fields = vec![input("a"), field.clone()];
        let values = data(&[("a", Value::from(4)), ("total", Value::from(99))]);

        assert_eq!(run(&field, &values, &fields), Some(Value::Number(4.0)));
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let field = derived("label", "{a}/{b}", &["a", "b"]);
        let fields = vec![input("a"), input("b"), field.clone()];
        let values = data(&[("a", Value::from("x")), ("b", Value::from(1.5))]);

        let first = run(&field, &values, &fields);
        assert_eq!(first, run(&field, &values, &fields));
        assert_eq!(first, Some(Value::from("x/1.5")));
    }
}
