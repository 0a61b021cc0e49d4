//! List records and their request payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::validator::Validator;

/// Maximum length of `name` in bytes
pub const MAX_NAME_BYTES: usize = 200;
/// Maximum length of `task` in bytes
pub const MAX_TASK_BYTES: usize = 800;
/// Maximum length of `status` in bytes
pub const MAX_STATUS_BYTES: usize = 300;

/// A single todo entry
///
/// `id`, `created_at` and `version` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct List {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub task: String,
    pub status: String,
    pub version: i32,
}

impl List {
    /// Build an unsaved record from its user-supplied fields
    pub fn new(name: impl Into<String>, task: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            id: 0,
            created_at: DateTime::<Utc>::default(),
            name: name.into(),
            task: task.into(),
            status: status.into(),
            version: 0,
        }
    }
}

/// Body of create and full-replacement requests
///
/// Missing fields deserialize to empty strings so they are reported by
/// [`validate_list`] rather than as malformed JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListInput {
    pub name: String,
    pub task: String,
    pub status: String,
}

impl ListInput {
    /// Overwrite every user-editable field of `list`
    pub fn replace(self, list: &mut List) {
        list.name = self.name;
        list.task = self.task;
        list.status = self.status;
    }
}

impl From<ListInput> for List {
    fn from(input: ListInput) -> Self {
        List::new(input.name, input.task, input.status)
    }
}

/// Body of partial update requests
///
/// An absent or `null` field leaves the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub task: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl ListPatch {
    /// Merge the present fields into `list`
    pub fn apply(self, list: &mut List) {
        if let Some(name) = self.name {
            list.name = name;
        }
        if let Some(task) = self.task {
            list.task = task;
        }
        if let Some(status) = self.status {
            list.status = status;
        }
    }
}

/// Check the user-editable fields of a list
pub fn validate_list(v: &mut Validator, list: &List) {
    v.check(!list.name.is_empty(), "name", "must be provided");
    v.check(
        list.name.len() <= MAX_NAME_BYTES,
        "name",
        "must not be more than 200 bytes long",
    );

    v.check(!list.task.is_empty(), "task", "must be provided");
    v.check(
        list.task.len() <= MAX_TASK_BYTES,
        "task",
        "must not be more than 800 bytes long",
    );

    v.check(!list.status.is_empty(), "status", "must be provided");
    v.check(
        list.status.len() <= MAX_STATUS_BYTES,
        "status",
        "must not be more than 300 bytes long",
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(list: &List) -> Validator {
        let mut v = Validator::new();
        validate_list(&mut v, list);
        v
    }

    #[test]
    fn test_valid_list() {
        let list = List::new("groceries", "buy milk", "pending");
        assert!(validate(&list).valid());
    }

    #[test]
    fn test_empty_fields_must_be_provided() {
        let v = validate(&List::new("", "", ""));
        assert_eq!(v.errors().len(), 3);
        assert_eq!(v.errors()["name"], "must be provided");
        assert_eq!(v.errors()["task"], "must be provided");
        assert_eq!(v.errors()["status"], "must be provided");
    }

    #[test]
    fn test_length_limits_are_in_bytes() {
        // 'é' is two bytes, so 101 of them exceed the 200 byte limit
        let v = validate(&List::new("é".repeat(101), "t", "s"));
        assert_eq!(v.errors()["name"], "must not be more than 200 bytes long");

        let v = validate(&List::new("n", "x".repeat(801), "s"));
        assert_eq!(v.errors()["task"], "must not be more than 800 bytes long");

        let v = validate(&List::new("n", "t", "x".repeat(301)));
        assert_eq!(v.errors()["status"], "must not be more than 300 bytes long");

        let v = validate(&List::new("x".repeat(200), "x".repeat(800), "x".repeat(300)));
        assert!(v.valid());
    }

    #[test]
    fn test_patch_applies_only_present_fields() {
        let mut list = List::new("groceries", "buy milk", "pending");
        let patch: ListPatch = serde_json::from_str(r#"{"status": "done", "task": null}"#).unwrap();
        patch.apply(&mut list);

        assert_eq!(list.name, "groceries");
        assert_eq!(list.task, "buy milk");
        assert_eq!(list.status, "done");
    }

    #[test]
    fn test_patch_rejects_unknown_fields() {
        let result = serde_json::from_str::<ListPatch>(r#"{"priority": 1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_input_missing_fields_default_to_empty() {
        let input: ListInput = serde_json::from_str(r#"{"name": "chores"}"#).unwrap();
        let list = List::from(input);
        assert_eq!(list.name, "chores");
        assert!(list.task.is_empty());
        assert!(!validate(&list).valid());
    }

    #[test]
    fn test_list_serializes_all_fields() {
        let mut list = List::new("groceries", "buy milk", "pending");
        list.id = 7;
        list.version = 2;
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["version"], 2);
        assert_eq!(json["name"], "groceries");
        assert!(json.get("created_at").is_some());
    }
}
