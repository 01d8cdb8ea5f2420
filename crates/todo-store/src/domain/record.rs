//! Task record -- the persisted shape of a to-do item.
//!
//! [`TaskRecord`] is both the stored document and the wire representation.
//! [`NewTask`] and [`TaskPatch`] are the typed create and partial-update
//! payloads accepted by the store.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TaskError;

/// A single to-do item.
///
/// Serialized as camelCase JSON. The creation time is emitted twice, as
/// `createdAt` and `timestamp`, so display clients that read either field
/// keep working; both always carry the same value.
///
/// # Examples
///
/// ```
/// use todo_store::TaskRecord;
///
/// let record = TaskRecord::new("buy milk".to_string()).unwrap();
/// assert!(!record.completed);
/// assert_eq!(record.text, "buy milk");
///
/// let json = serde_json::to_value(&record).unwrap();
/// assert_eq!(json["createdAt"], json["timestamp"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "WireTask", try_from = "WireTask")]
pub struct TaskRecord {
    /// Store-assigned identifier (`UUIDv4`). Never changes.
    pub id: String,

    /// The task description. Never empty.
    pub text: String,

    /// Whether the task has been done.
    pub completed: bool,

    /// Creation time, millisecond precision.
    pub created_at: DateTime<Utc>,
}

impl TaskRecord {
    /// Creates a new, not-yet-completed record with a fresh ID.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Validation`] if `text` is empty or only whitespace.
    pub fn new(text: String) -> Result<Self, TaskError> {
        validate_text(&text)?;
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            text,
            completed: false,
            created_at: Utc::now().trunc_subsecs(3),
        })
    }

    /// Display timestamp. Same instant as [`created_at`](Self::created_at).
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Rejects empty or whitespace-only task text.
///
/// # Examples
///
/// ```
/// use todo_store::domain::validate_text;
///
/// assert!(validate_text("walk the dog").is_ok());
/// assert!(validate_text("").is_err());
/// assert!(validate_text("   ").is_err());
/// ```
pub fn validate_text(text: &str) -> Result<(), TaskError> {
    if text.trim().is_empty() {
        return Err(TaskError::invalid_field("text", "is required"));
    }
    Ok(())
}

// ---- Wire representation ----

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireTask {
    #[serde(alias = "_id")]
    id: String,
    text: String,
    #[serde(default)]
    completed: bool,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    timestamp: Option<DateTime<Utc>>,
}

impl From<TaskRecord> for WireTask {
    fn from(record: TaskRecord) -> Self {
        Self {
            id: record.id,
            text: record.text,
            completed: record.completed,
            created_at: Some(record.created_at),
            timestamp: Some(record.created_at),
        }
    }
}

impl TryFrom<WireTask> for TaskRecord {
    type Error = String;

    fn try_from(wire: WireTask) -> Result<Self, Self::Error> {
        let created_at = wire
            .created_at
            .or(wire.timestamp)
            .ok_or_else(|| "missing field `createdAt`".to_string())?;
        Ok(Self {
            id: wire.id,
            text: wire.text,
            completed: wire.completed,
            created_at,
        })
    }
}

// ---- Request payloads ----

/// Body of a create request: `{"text": "..."}`.
///
/// `text` is optional at the serde level so that a missing field reaches the
/// store and is reported as a validation error rather than a parse error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    /// The text of the task to create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl NewTask {
    /// Convenience constructor.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

/// A partial update: any subset of `{text, completed}`.
///
/// Unknown fields are rejected during deserialization. An empty patch is
/// valid and leaves the record unchanged. Only set fields are serialized, so
/// the JSON form is exactly the set of members the store overwrites.
///
/// # Examples
///
/// ```
/// use todo_store::TaskPatch;
///
/// let patch = TaskPatch::completed(true);
/// assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"completed":true}"#);
///
/// let rejected: Result<TaskPatch, _> = serde_json::from_str(r#"{"owner":"x"}"#);
/// assert!(rejected.is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskPatch {
    /// Replacement text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Replacement completion flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// A patch that only renames the task.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            completed: None,
        }
    }

    /// A patch that only sets the completion flag.
    pub fn completed(completed: bool) -> Self {
        Self {
            text: None,
            completed: Some(completed),
        }
    }

    /// Returns `true` if no field is set.
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.completed.is_none()
    }

    /// Checks field values without touching any record.
    pub fn validate(&self) -> Result<(), TaskError> {
        if let Some(text) = &self.text {
            validate_text(text)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_record_defaults() {
        let record = TaskRecord::new("write tests".to_string()).unwrap();
        assert!(!record.completed);
        assert_eq!(record.text, "write tests");
        assert_eq!(Uuid::parse_str(&record.id).unwrap().get_version_num(), 4);
        assert_eq!(record.timestamp(), record.created_at);
    }

    #[test]
    fn new_record_rejects_blank_text() {
        assert!(matches!(
            TaskRecord::new(String::new()),
            Err(TaskError::Validation { .. })
        ));
        assert!(matches!(
            TaskRecord::new(" \t\n".to_string()),
            Err(TaskError::Validation { .. })
        ));
    }

    #[test]
    fn ids_are_unique() {
        let a = TaskRecord::new("a".to_string()).unwrap();
        let b = TaskRecord::new("a".to_string()).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn wire_format_is_camel_case_with_timestamp() {
        let record = TaskRecord::new("buy milk".to_string()).unwrap();
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], json!(record.id));
        assert_eq!(value["text"], json!("buy milk"));
        assert_eq!(value["completed"], json!(false));
        assert!(value["createdAt"].is_string());
        assert_eq!(value["createdAt"], value["timestamp"]);
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn deserialize_accepts_document_style_id() {
        let value = json!({
            "_id": "64b7f0c2a1",
            "text": "legacy",
            "completed": true,
            "timestamp": "2024-01-02T03:04:05.678Z"
        });
        let record: TaskRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.id, "64b7f0c2a1");
        assert!(record.completed);
        assert_eq!(record.created_at.to_rfc3339(), "2024-01-02T03:04:05.678+00:00");
    }

    #[test]
    fn deserialize_requires_a_creation_time() {
        let value = json!({ "id": "x", "text": "no time" });
        let err = serde_json::from_value::<TaskRecord>(value).unwrap_err();
        assert!(err.to_string().contains("createdAt"));
    }

    #[test]
    fn new_task_missing_text_parses() {
        let parsed: NewTask = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.text, None);
    }

    #[test]
    fn patch_serializes_only_set_fields() {
        assert_eq!(
            serde_json::to_value(TaskPatch::text("new")).unwrap(),
            json!({ "text": "new" })
        );
        assert_eq!(serde_json::to_value(TaskPatch::default()).unwrap(), json!({}));
    }

    #[test]
    fn patch_validation_checks_text_only_when_set() {
        let patch = TaskPatch {
            text: Some(String::new()),
            completed: Some(true),
        };
        assert!(matches!(patch.validate(), Err(TaskError::Validation { .. })));
        assert!(TaskPatch::completed(false).validate().is_ok());
        assert!(TaskPatch::default().validate().is_ok());
    }

    #[test]
    fn patch_rejects_wrong_types_and_unknown_fields() {
        assert!(serde_json::from_value::<TaskPatch>(json!({ "completed": "yes" })).is_err());
        assert!(serde_json::from_value::<TaskPatch>(json!({ "id": "other" })).is_err());

        let patch: TaskPatch = serde_json::from_value(json!({ "completed": true })).unwrap();
        assert_eq!(patch, TaskPatch::completed(true));
        assert!(!patch.is_empty());
    }
}
