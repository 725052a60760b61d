//! Table driven validation of object arrays.
//!
//! Every payload kind is an array of flat records. A [`PayloadSchema`] lists the
//! fields of one record and [`PayloadSchema::sanitize`] checks untyped input
//! against it, element by element.
//!
//! Validation is fail-closed: a single bad element invalidates the whole array and
//! no sanitized data is returned. Each element reports at most one error, for the
//! first field that fails in table order.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Expected type of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Any string.
    String,
    /// A finite number.
    Number,
    /// One of a closed set of strings.
    Enum(&'static [&'static str]),
}

impl FieldKind {
    /// Type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Enum(_) => "string",
        }
    }

    /// Whether `value` satisfies this kind. No coercion is applied.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.as_f64().is_some_and(f64::is_finite),
            Self::Enum(allowed) => value.as_str().is_some_and(|s| allowed.contains(&s)),
        }
    }
}

/// One field of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name.
    pub name: &'static str,
    /// Whether the field must be present.
    pub required: bool,
    /// Expected type.
    pub kind: FieldKind,
}

impl FieldSpec {
    /// A field that must be present.
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            required: true,
            kind,
        }
    }

    /// A field that may be absent but must be well typed when present.
    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            required: false,
            kind,
        }
    }

    fn error_for(&self, item_label: &str, index: usize) -> String {
        match (self.kind, self.required) {
            (FieldKind::Enum(allowed), _) => format!(
                "{item_label} at index {index} '{}' must be one of: {}",
                self.name,
                allowed.join(", ")
            ),
            (kind, true) => format!(
                "{item_label} at index {index} must have {} '{}' property of type {}",
                article(self.name),
                self.name,
                kind.type_name()
            ),
            (kind, false) => format!(
                "{item_label} at index {index} '{}' must be a {} if provided",
                self.name,
                kind.type_name()
            ),
        }
    }
}

fn article(word: &str) -> &'static str {
    match word.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}

/// Shape of one payload kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadSchema {
    /// Label for whole-payload errors, e.g. `Chart` in "Chart data must be an array".
    pub kind_label: &'static str,
    /// Label for per-element errors, e.g. `Item` in "Item at index 0 ...".
    pub item_label: &'static str,
    /// Fields in check order.
    pub fields: &'static [FieldSpec],
}

impl PayloadSchema {
    /// Check `input` and return sanitized records, or every error found.
    ///
    /// Sanitized records hold only the schema's fields, in input order.
    pub fn sanitize(&self, input: &Value) -> Result<Vec<Map<String, Value>>, Vec<String>> {
        let Value::Array(items) = input else {
            return Err(vec![format!("{} data must be an array", self.kind_label)]);
        };

        if items.is_empty() {
            return Err(vec![format!("{} data cannot be empty", self.kind_label)]);
        }

        let mut errors = Vec::new();
        let mut records = Vec::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            match self.sanitize_item(index, item) {
                Ok(record) => records.push(record),
                Err(error) => errors.push(error),
            }
        }

        if errors.is_empty() {
            Ok(records)
        } else {
            Err(errors)
        }
    }

    fn sanitize_item(&self, index: usize, item: &Value) -> Result<Map<String, Value>, String> {
        let Value::Object(fields) = item else {
            return Err(format!(
                "{} at index {index} must be an object",
                self.item_label
            ));
        };

        let mut record = Map::new();
        for spec in self.fields {
            match fields.get(spec.name) {
                Some(value) if spec.kind.accepts(value) => {
                    record.insert(spec.name.to_string(), value.clone());
                }
                None if !spec.required => {}
                _ => return Err(spec.error_for(self.item_label, index)),
            }
        }

        Ok(record)
    }

    /// Validate `input` into typed records.
    pub fn validate<T: DeserializeOwned>(&self, input: &Value) -> ValidationOutcome<Vec<T>> {
        let records = match self.sanitize(input) {
            Ok(records) => records,
            Err(errors) => return ValidationOutcome::invalid(errors),
        };

        let mut data = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            match serde_json::from_value(Value::Object(record)) {
                Ok(item) => data.push(item),
                Err(e) => {
                    return ValidationOutcome::invalid(vec![format!(
                        "{} at index {index} could not be read: {e}",
                        self.item_label
                    )]);
                }
            }
        }

        ValidationOutcome::valid(data)
    }
}

/// Result of validating one payload.
///
/// `data` is only present when `valid` is true.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome<T> {
    /// Whether the payload passed every check.
    pub valid: bool,
    /// Sanitized payload.
    pub data: Option<T>,
    /// Human readable errors in discovery order.
    pub errors: Vec<String>,
}

impl<T> ValidationOutcome<T> {
    /// A successful outcome.
    pub fn valid(data: T) -> Self {
        Self {
            valid: true,
            data: Some(data),
            errors: Vec::new(),
        }
    }

    /// A failed outcome. Carries no data.
    pub fn invalid(errors: Vec<String>) -> Self {
        Self {
            valid: false,
            data: None,
            errors,
        }
    }

    /// The sanitized data, or `fallback` when validation failed.
    pub fn data_or(self, fallback: T) -> T {
        self.data.unwrap_or(fallback)
    }

    /// The sanitized data, or the result of `fallback` when validation failed.
    pub fn data_or_else(self, fallback: impl FnOnce() -> T) -> T {
        self.data.unwrap_or_else(fallback)
    }

    /// Errors joined for display in diagnostic contexts.
    pub fn error_summary(&self) -> String {
        self.errors.join("; ")
    }

    /// Transform the sanitized data, keeping validity and errors.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ValidationOutcome<U> {
        ValidationOutcome {
            valid: self.valid,
            data: self.data.map(f),
            errors: self.errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const LEVELS: &[&str] = &["low", "high"];

    const SCHEMA: PayloadSchema = PayloadSchema {
        kind_label: "Sample",
        item_label: "Entry",
        fields: &[
            FieldSpec::required("id", FieldKind::String),
            FieldSpec::required("amount", FieldKind::Number),
            FieldSpec::optional("level", FieldKind::Enum(LEVELS)),
            FieldSpec::optional("note", FieldKind::String),
        ],
    };

    #[test]
    fn test_non_array_and_empty() {
        assert_eq!(
            SCHEMA.sanitize(&json!({"id": "a"})),
            Err(vec!["Sample data must be an array".to_string()])
        );
        assert_eq!(
            SCHEMA.sanitize(&json!([])),
            Err(vec!["Sample data cannot be empty".to_string()])
        );
    }

    #[test]
    fn test_first_failing_field_wins() {
        let errors = SCHEMA
            .sanitize(&json!([{"amount": "x"}]))
            .expect_err("invalid");
        assert_eq!(
            errors,
            vec!["Entry at index 0 must have an 'id' property of type string"]
        );
    }

    #[test]
    fn test_every_bad_element_reported() {
        let errors = SCHEMA
            .sanitize(&json!([
                null,
                {"id": "ok", "amount": 1},
                {"id": "b", "amount": 2, "level": "mid"},
                {"id": "c", "amount": 3, "note": null},
            ]))
            .expect_err("invalid");
        assert_eq!(
            errors,
            vec![
                "Entry at index 0 must be an object",
                "Entry at index 2 'level' must be one of: low, high",
                "Entry at index 3 'note' must be a string if provided",
            ]
        );
    }

    #[test]
    fn test_sanitize_drops_unknown_keys() {
        let records = SCHEMA
            .sanitize(&json!([{"id": "a", "amount": 1.5, "color": "red"}]))
            .expect("valid");
        assert_eq!(records.len(), 1);
        assert_eq!(Value::Object(records[0].clone()), json!({"id": "a", "amount": 1.5}));
    }

    #[test]
    fn test_number_is_never_coerced() {
        assert!(!FieldKind::Number.accepts(&json!("10")));
        assert!(!FieldKind::Number.accepts(&json!(null)));
        assert!(FieldKind::Number.accepts(&json!(-3)));
        assert!(FieldKind::Number.accepts(&json!(2.5)));
        assert!(!FieldKind::String.accepts(&json!(10)));
    }

    #[test]
    fn test_outcome_helpers() {
        let failed: ValidationOutcome<Vec<i32>> =
            ValidationOutcome::invalid(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(failed.error_summary(), "a; b");
        assert_eq!(failed.clone().data_or(vec![0]), vec![0]);
        assert!(failed.map(|v| v.len()).data.is_none());

        let passed = ValidationOutcome::valid(vec![1, 2]);
        assert!(passed.valid);
        assert_eq!(passed.data_or_else(Vec::new), vec![1, 2]);
    }
}
