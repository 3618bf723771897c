//! Resource core for the personal site backend.
//!
//! Articles, learning lessons and value-sort boards: wire models, validation,
//! SQLite repositories and transport-agnostic request handlers.

pub mod clock;
pub mod config;
pub mod db;
pub mod handler;
pub mod logging;
pub mod model;
pub mod repo;

pub use clock::{Clock, EpochMillis, FixedClock, SystemClock};
pub use config::{ConfigError, SiteConfig};
pub use handler::{status, ApiResponse};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::article::{Article, ArticleId};
pub use model::lesson::{Lesson, LessonId, Reference};
pub use model::validation::FieldError;
pub use model::value_sort::{ColumnTitle, ValueSortBoard, ValueSortCard, ValueSortColumn};
pub use repo::article_repo::{ArticleRepository, SqliteArticleRepository};
pub use repo::board_repo::{BoardLookup, BoardRepository, SqliteBoardRepository};
pub use repo::error::{translate_error, RepoError, RepoResult, RequestError};
pub use repo::lesson_repo::{LessonRepository, SqliteLessonRepository};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
