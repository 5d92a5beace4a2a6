use crate::schema::SchemaDocument;
use serde_json::Value;
use std::fmt;

/// A single schema violation: where in the payload, and what went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON pointer into the payload (`/data/id`); empty for the root
    pub path: String,
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Violation {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() {
            "(root)"
        } else {
            &self.path
        };
        write!(f, "{}: {}", path, self.message)
    }
}

/// Outcome of checking a payload against a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    /// Violations in the order the validator reported them
    Invalid(Vec<Violation>),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn violations(&self) -> &[Violation] {
        match self {
            ValidationResult::Valid => &[],
            ValidationResult::Invalid(v) => v,
        }
    }
}

/// Validate a raw JSON payload against a loaded schema.
///
/// A payload that is not JSON at all is reported as a single root violation
/// rather than an error, so schema scenarios fail as assertions.
pub fn validate(payload: &str, schema: &SchemaDocument) -> ValidationResult {
    match serde_json::from_str::<Value>(payload) {
        Ok(instance) => validate_value(&instance, schema),
        Err(e) => ValidationResult::Invalid(vec![Violation::new(
            "",
            format!("payload is not valid JSON: {e}"),
        )]),
    }
}

/// Validate an already parsed payload.
pub fn validate_value(instance: &Value, schema: &SchemaDocument) -> ValidationResult {
    let violations: Vec<Violation> = schema
        .validator()
        .iter_errors(instance)
        .map(|error| Violation::new(error.instance_path().to_string(), error.to_string()))
        .collect();
    if violations.is_empty() {
        ValidationResult::Valid
    } else {
        ValidationResult::Invalid(violations)
    }
}

pub fn print_violations(schema_name: &str, violations: &[Violation]) {
    eprintln!(
        "\n❌ Payload does not conform to '{}'. {} violation(s) found:\n",
        schema_name,
        violations.len()
    );
    for violation in violations {
        eprintln!("  {violation}");
    }
    eprintln!();
}
