//! Repository error taxonomy and storage error translation.
//!
//! # Responsibility
//! - Classify failures as validation, not-found, conflict or storage errors.
//! - Turn storage uniqueness violations into client-facing request errors.
//!
//! # Invariants
//! - Only uniqueness violations are translated; every other storage error
//!   passes through unchanged.

use crate::db::DbError;
use crate::model::validation::{join_field_errors, FieldError};
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::ffi;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const UNIQUE_CONSTRAINT_MESSAGE: &str = "Unique constraint violated.";

static UNIQUE_VIOLATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)unique constraint failed|violates unique constraint")
        .expect("valid unique violation regex")
});

pub type RepoResult<T> = Result<T, RepoError>;

/// Client-caused failure. Displays with the `Invalid Request Body:` prefix
/// that handlers forward verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestError {
    pub message: String,
}

impl RequestError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn from_field_errors(errors: &[FieldError]) -> Self {
        Self::new(join_field_errors(errors))
    }
}

impl Display for RequestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid Request Body: {}", self.message)
    }
}

impl Error for RequestError {}

#[derive(Debug)]
pub enum RepoError {
    /// Caller data rejected before any write.
    Validation(RequestError),
    /// No row matched a keyed read or update.
    NotFound { entity: &'static str, key: String },
    /// Write rejected by a uniqueness constraint.
    Conflict(RequestError),
    Db(DbError),
    /// Persisted data could not be decoded.
    InvalidData(String),
}

impl RepoError {
    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            key: key.into(),
        }
    }

    /// True for failures the client can fix by changing the request.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Conflict(_))
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) | Self::Conflict(err) => write!(f, "{err}"),
            Self::NotFound { entity, key } => write!(f, "{entity} not found: {key}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) | Self::Conflict(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Maps a storage error onto the repository taxonomy.
///
/// Uniqueness violations become `Conflict`; anything else is wrapped as `Db`.
pub fn translate_error(err: rusqlite::Error) -> RepoError {
    if is_unique_violation(&err) {
        RepoError::Conflict(RequestError::new(UNIQUE_CONSTRAINT_MESSAGE))
    } else {
        RepoError::Db(DbError::Sqlite(err))
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    if let rusqlite::Error::SqliteFailure(failure, _) = err {
        if matches!(
            failure.extended_code,
            ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY
        ) {
            return true;
        }
    }
    UNIQUE_VIOLATION_RE.is_match(&err.to_string())
}

#[cfg(test)]
mod tests {
    use super::{translate_error, RepoError, RequestError};
    use rusqlite::ffi;

    fn sqlite_failure(extended_code: i32, message: &str) -> rusqlite::Error {
        rusqlite::Error::SqliteFailure(
            ffi::Error::new(extended_code),
            Some(message.to_string()),
        )
    }

    #[test]
    fn unique_violation_becomes_conflict_with_fixed_message() {
        let err = translate_error(sqlite_failure(
            ffi::SQLITE_CONSTRAINT_UNIQUE,
            "UNIQUE constraint failed: articles.uri",
        ));
        assert!(matches!(err, RepoError::Conflict(_)));
        assert_eq!(
            err.to_string(),
            "Invalid Request Body: Unique constraint violated."
        );
    }

    #[test]
    fn message_match_is_enough_without_extended_code() {
        let err = translate_error(sqlite_failure(
            ffi::SQLITE_CONSTRAINT,
            "duplicate key value violates unique constraint \"articles_uri_key\"",
        ));
        assert!(err.is_client_error());
    }

    #[test]
    fn other_errors_pass_through() {
        let err = translate_error(rusqlite::Error::QueryReturnedNoRows);
        assert!(matches!(
            err,
            RepoError::Db(crate::db::DbError::Sqlite(
                rusqlite::Error::QueryReturnedNoRows
            ))
        ));

        let err = translate_error(sqlite_failure(
            ffi::SQLITE_CONSTRAINT_NOTNULL,
            "NOT NULL constraint failed: articles.title",
        ));
        assert!(matches!(err, RepoError::Db(_)));
    }

    #[test]
    fn request_error_is_prefixed() {
        assert_eq!(
            RequestError::new("missing article uri").to_string(),
            "Invalid Request Body: missing article uri"
        );
    }
}
