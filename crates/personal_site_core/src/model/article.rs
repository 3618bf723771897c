//! Article (blog post) model.
//!
//! # Invariants
//! - `uri` is the public slug and is unique across all articles.
//! - `uri`, `title`, `summary` and `body` must be non-empty to persist.
//! - `date_created` is owned by the repository; client values are ignored.

use crate::clock::EpochMillis;
use crate::model::validation::FieldError;
use crate::model::wire_time;
use serde::{Deserialize, Serialize};

/// Generated row identity.
pub type ArticleId = i64;

/// Blog post as exchanged on the wire and stored in `articles`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Article {
    #[serde(default)]
    pub id: ArticleId,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    /// Markdown source, stored as `body_md`.
    #[serde(default)]
    pub body: String,
    #[serde(default, with = "wire_time::rfc3339")]
    pub date_created: EpochMillis,
    #[serde(default, with = "wire_time::rfc3339_option")]
    pub date_updated: Option<EpochMillis>,
}

impl Article {
    pub fn new(
        uri: impl Into<String>,
        title: impl Into<String>,
        summary: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            title: title.into(),
            summary: summary.into(),
            body: body.into(),
            ..Self::default()
        }
    }

    /// Checks required fields in fixed order: body, summary, title, uri.
    ///
    /// Returns an empty list when the article can be persisted.
    pub fn validate(&self) -> Vec<FieldError> {
        [
            ("body", self.body.as_str()),
            ("summary", self.summary.as_str()),
            ("title", self.title.as_str()),
            ("uri", self.uri.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| FieldError::new(field, format!("missing article {field}")))
        .collect()
    }
}
