// File: formsmith-formulas/src/formula.rs
// Purpose: The closed set of formulas a derived field can use

use serde::Serialize;

/// How a derived field computes its value from its parents.
///
/// Known names map to dedicated variants; every other non-empty formula
/// string is a template with `{fieldId}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formula {
    AgeFromDob,
    FullName,
    Sum,
    Multiply,
    Concat,
    Template(String),
}

impl Formula {
    /// Parse a stored formula string. Empty means "not derived".
    pub fn parse(formula: &str) -> Option<Self> {
        let parsed = match formula {
            "" => return None,
            "age_from_dob" => Formula::AgeFromDob,
            "full_name" => Formula::FullName,
            "sum" => Formula::Sum,
            "multiply" => Formula::Multiply,
            "concat" => Formula::Concat,
            template => Formula::Template(template.to_string()),
        };
        Some(parsed)
    }

    /// The stored form of the formula
    pub fn as_str(&self) -> &str {
        match self {
            Formula::AgeFromDob => "age_from_dob",
            Formula::FullName => "full_name",
            Formula::Sum => "sum",
            Formula::Multiply => "multiply",
            Formula::Concat => "concat",
            Formula::Template(template) => template,
        }
    }
}

/// One entry of the formula picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormulaInfo {
    pub value: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

const CATALOG: [FormulaInfo; 6] = [
    FormulaInfo {
        value: "age_from_dob",
        label: "Age from Date of Birth",
        description: "Calculates age based on date of birth",
    },
    FormulaInfo {
        value: "full_name",
        label: "Full Name",
        description: "Combines first and last name",
    },
    FormulaInfo {
        value: "sum",
        label: "Sum",
        description: "Adds all parent field values",
    },
    FormulaInfo {
        value: "multiply",
        label: "Multiply",
        description: "Multiplies all parent field values",
    },
    FormulaInfo {
        value: "concat",
        label: "Concatenate",
        description: "Joins parent field values as strings",
    },
    FormulaInfo {
        value: "custom",
        label: "Custom Formula",
        description: "Use {fieldId} to reference parent fields",
    },
];

/// Formulas offered when configuring a derived field
pub fn formula_catalog() -> &'static [FormulaInfo] {
    &CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_names() {
        assert_eq!(Formula::parse("sum"), Some(Formula::Sum));
        assert_eq!(Formula::parse("age_from_dob"), Some(Formula::AgeFromDob));
        assert_eq!(Formula::parse(""), None);
    }

    #[test]
    fn test_unknown_names_are_templates() {
        assert_eq!(
            Formula::parse("{a} - {b}"),
            Some(Formula::Template("{a} - {b}".into()))
        );
        // Exact match only
        assert_eq!(Formula::parse("Sum"), Some(Formula::Template("Sum".into())));
        assert_eq!(Formula::parse("custom"), Some(Formula::Template("custom".into())));
    }

    #[test]
    fn test_as_str_round_trips() {
        for info in formula_catalog() {
            let formula = Formula::parse(info.value).unwrap();
            assert_eq!(formula.as_str(), info.value);
        }
    }
}
