//! Field-level validation error accumulator

use std::collections::BTreeMap;

/// Collects validation failures keyed by field name.
///
/// Only the first message recorded for a field is kept.
///
/// # Example
///
/// ```rust
/// use todo_service::validator::Validator;
///
/// let mut v = Validator::new();
/// v.check(false, "name", "must be provided");
/// v.check(false, "name", "must not be more than 200 bytes long");
/// assert!(!v.valid());
/// assert_eq!(v.errors()["name"], "must be provided");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validator {
    errors: BTreeMap<String, String>,
}

impl Validator {
    /// Create an empty validator
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no errors have been recorded
    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record an error for `field` unless one is already present
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_insert_with(|| message.into());
    }

    /// Record an error when `ok` is false
    pub fn check(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.add_error(field, message);
        }
    }

    /// Recorded errors
    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// Consume the validator, returning the recorded errors
    pub fn into_errors(self) -> BTreeMap<String, String> {
        self.errors
    }
}

/// Returns true if `value` is one of `permitted`
pub fn permitted_value<T: PartialEq>(value: &T, permitted: &[T]) -> bool {
    permitted.contains(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validator_is_valid() {
        let v = Validator::new();
        assert!(v.valid());
        assert!(v.errors().is_empty());
    }

    #[test]
    fn test_check_records_only_failures() {
        let mut v = Validator::new();
        v.check(true, "name", "must be provided");
        assert!(v.valid());

        v.check(false, "task", "must be provided");
        assert!(!v.valid());
        assert_eq!(v.errors().len(), 1);
        assert_eq!(v.errors()["task"], "must be provided");
    }

    #[test]
    fn test_first_failure_per_field_wins() {
        let mut v = Validator::new();
        v.add_error("page", "must be an integer value");
        v.check(false, "page", "must be greater than zero");
        v.add_error("page", "must be a maximum of 1000");

        assert_eq!(v.errors()["page"], "must be an integer value");
    }

    #[test]
    fn test_errors_are_ordered_by_field() {
        let mut v = Validator::new();
        v.add_error("status", "must be provided");
        v.add_error("name", "must be provided");
        v.add_error("task", "must be provided");

        let fields: Vec<_> = v.into_errors().into_keys().collect();
        assert_eq!(fields, vec!["name", "status", "task"]);
    }

    #[test]
    fn test_permitted_value() {
        let safelist = ["id", "-id", "name"];
        assert!(permitted_value(&"name", &safelist));
        assert!(!permitted_value(&"name; DROP TABLE lists", &safelist));
        assert!(permitted_value(&3, &[1, 2, 3]));
    }
}
