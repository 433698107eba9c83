//! Form validation - turns raw form input into typed records.
//!
//! Every form validates all of its fields and either yields the typed record or a
//! [`FieldErrors`] map holding the first failing rule's message for each field.
//! Nothing is partially applied: one bad field rejects the whole form.

pub mod national_id;
pub mod product;
pub mod profile;

pub use national_id::NationalIdError;
pub use product::{ProductDraft, ProductForm};
pub use profile::{ProfileForm, ValidatedProfile};

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// First error message per field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    /// Creates an empty error map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` for `field` unless the field already has an error.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    /// Records the error of a field check, if any.
    pub fn check(&mut self, field: &'static str, outcome: std::result::Result<(), String>) {
        if let Err(message) = outcome {
            self.add(field, message);
        }
    }

    /// The message for `field`, if it failed.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates `(field, message)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// Finishes validation: `Ok(value)` when no field failed.
    ///
    /// # Errors
    /// Returns `self` when at least one field failed.
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> std::result::Result<T, Self> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Fails with `message` when `value` is blank.
pub(crate) fn required(value: &str, message: &str) -> std::result::Result<(), String> {
    if value.trim().is_empty() {
        Err(message.to_string())
    } else {
        Ok(())
    }
}

/// Fails with `message` unless `value` is one or more ASCII digits.
pub(crate) fn digits_only(value: &str, message: &str) -> std::result::Result<(), String> {
    if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(message.to_string())
    }
}

/// Parses a digit string into a strictly positive integer.
///
/// `label` names the field in the messages ("Price", "Quantity").
pub(crate) fn positive_integer(value: &str, label: &str) -> std::result::Result<i64, String> {
    required(value, &format!("{label} is required"))?;
    digits_only(value, "Only digits allowed")?;
    let parsed: i64 = value
        .parse()
        .map_err(|_| format!("{label} is too large"))?;
    if parsed > 0 {
        Ok(parsed)
    } else {
        Err(format!("{label} must be greater than 0"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_error_per_field_wins() {
        let mut errors = FieldErrors::new();
        errors.add("ci", "Must have 11 digits");
        errors.add("ci", "Only digits allowed");
        errors.add("email", "Invalid email");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("ci"), Some("Must have 11 digits"));
        assert_eq!(errors.get("phone"), None);
        assert_eq!(
            errors.to_string(),
            "ci: Must have 11 digits; email: Invalid email"
        );
    }

    #[test]
    fn test_into_result_is_all_or_nothing() {
        assert_eq!(FieldErrors::new().into_result(|| 7), Ok(7));

        let mut errors = FieldErrors::new();
        errors.check("name", required("  ", "Name is required"));
        errors.check("price", Ok(()));
        let result = errors.into_result(|| 7);
        assert_eq!(result.unwrap_err().get("name"), Some("Name is required"));
    }

    #[test]
    fn test_positive_integer_rules() {
        assert_eq!(positive_integer("12", "Price"), Ok(12));
        assert_eq!(
            positive_integer("", "Price"),
            Err("Price is required".to_string())
        );
        assert_eq!(
            positive_integer("-3", "Price"),
            Err("Only digits allowed".to_string())
        );
        assert_eq!(
            positive_integer("1.5", "Price"),
            Err("Only digits allowed".to_string())
        );
        assert_eq!(
            positive_integer("000", "Quantity"),
            Err("Quantity must be greater than 0".to_string())
        );
        assert_eq!(
            positive_integer("99999999999999999999", "Price"),
            Err("Price is too large".to_string())
        );
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let mut errors = FieldErrors::new();
        errors.add("name", "Name is required");
        let json = serde_json::to_value(&errors).unwrap_or_default();
        assert_eq!(json, serde_json::json!({ "name": "Name is required" }));
    }
}
