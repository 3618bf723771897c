//! Lesson repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist a lesson together with its tag and reference child rows.
//!
//! # Invariants
//! - Parent and child inserts commit together or not at all.
//! - `created_at` and `last_modified_at` are taken from the payload; callers
//!   stamp them.
//! - Tags are stored in payload order, duplicates included.

use crate::model::lesson::{Lesson, LessonId};
use crate::repo::error::{translate_error, RepoError, RepoResult};
use rusqlite::{params, Connection, TransactionBehavior};

/// Repository interface for lesson writes.
pub trait LessonRepository {
    /// Inserts the lesson, its tags and its references; returns the new id.
    fn create(&mut self, lesson: &Lesson) -> RepoResult<LessonId>;
}

/// SQLite-backed lesson repository.
pub struct SqliteLessonRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteLessonRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl LessonRepository for SqliteLessonRepository<'_> {
    fn create(&mut self, lesson: &Lesson) -> RepoResult<LessonId> {
        let takeaways = encode_list(&lesson.takeaways)?;
        let questions = encode_list(&lesson.questions)?;
        let exercises = encode_list(&lesson.exercises)?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(
            "INSERT INTO lessons (topic, takeaways, questions, exercises, dt_created, dt_modified)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                lesson.topic.as_str(),
                takeaways,
                questions,
                exercises,
                lesson.created_at,
                lesson.last_modified_at,
            ],
        )
        .map_err(translate_error)?;
        let lesson_id = tx.last_insert_rowid();

        for tag in &lesson.tags {
            tx.execute(
                "INSERT INTO lesson_tags (lesson_id, tag) VALUES (?1, ?2);",
                params![lesson_id, tag.as_str()],
            )
            .map_err(translate_error)?;
        }

        for reference in &lesson.references {
            tx.execute(
                "INSERT INTO lesson_references (lesson_id, title, author, url)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    lesson_id,
                    reference.title.as_str(),
                    reference.author.as_str(),
                    reference.url.as_str(),
                ],
            )
            .map_err(translate_error)?;
        }

        tx.commit()?;
        Ok(lesson_id)
    }
}

fn encode_list(values: &[String]) -> RepoResult<String> {
    serde_json::to_string(values)
        .map_err(|err| RepoError::InvalidData(format!("cannot encode lesson list: {err}")))
}
