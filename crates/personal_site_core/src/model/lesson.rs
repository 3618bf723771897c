//! Learning lesson model.
//!
//! A lesson owns two child collections persisted in their own tables
//! (`lesson_tags`, `lesson_references`); the remaining string lists are
//! stored inline as JSON arrays.

use crate::clock::EpochMillis;
use crate::model::validation::FieldError;
use crate::model::wire_time;
use serde::{Deserialize, Serialize};

pub type LessonId = i64;

/// Source material attached to a lesson.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Reference {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Lesson {
    #[serde(default)]
    pub id: LessonId,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub references: Vec<Reference>,
    /// What was learned.
    #[serde(default)]
    pub takeaways: Vec<String>,
    /// Open questions worth revisiting.
    #[serde(default)]
    pub questions: Vec<String>,
    /// How to refresh the material later.
    #[serde(default)]
    pub exercises: Vec<String>,
    #[serde(default, with = "wire_time::rfc3339")]
    pub created_at: EpochMillis,
    /// Stored as `dt_modified`. The create handler clears it; nothing in
    /// this crate edits lessons afterwards.
    #[serde(default, with = "wire_time::rfc3339_option")]
    pub last_modified_at: Option<EpochMillis>,
}

impl Lesson {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            ..Self::default()
        }
    }

    /// Topic is the only required field.
    pub fn validate(&self) -> Vec<FieldError> {
        if self.topic.is_empty() {
            vec![FieldError::new("topic", "Topic - required")]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Lesson;

    #[test]
    fn missing_topic_is_a_single_error() {
        let errors = Lesson::default().validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Topic - required");
    }

    #[test]
    fn decode_defaults_missing_collections() {
        let lesson: Lesson = serde_json::from_str(r#"{"topic":"rust lifetimes"}"#).unwrap();
        assert!(lesson.validate().is_empty());
        assert!(lesson.tags.is_empty());
        assert!(lesson.references.is_empty());
        assert_eq!(lesson.last_modified_at, None);
    }

    #[test]
    fn timestamps_decode_from_rfc3339() {
        let lesson: Lesson = serde_json::from_str(
            r#"{"topic":"t","createdAt":"2023-11-14T22:13:20Z","lastModifiedAt":null}"#,
        )
        .unwrap();
        assert_eq!(lesson.created_at, 1_700_000_000_000);
        assert_eq!(lesson.last_modified_at, None);

        let value = serde_json::to_value(&lesson).unwrap();
        assert_eq!(value["createdAt"], "2023-11-14T22:13:20Z");
        assert!(value["lastModifiedAt"].is_null());
    }
}
