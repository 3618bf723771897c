//! Article repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Map `Article` payloads to `articles` rows and back.
//! - Stamp creation/update times from the injected clock.
//!
//! # Invariants
//! - Every operation is a single statement; no transaction spans rows.
//! - `uri` mismatches on update are rejected before touching storage.

use crate::clock::{Clock, SystemClock};
use crate::model::article::Article;
use crate::model::validation::FieldError;
use crate::repo::error::{translate_error, RepoError, RepoResult, RequestError};
use rusqlite::{params, Connection, OptionalExtension, Row};

const ARTICLE_SELECT_SQL: &str = "SELECT
    id,
    uri,
    title,
    summary,
    body_md,
    dt_created,
    dt_updated
FROM articles";

pub const URI_MISMATCH_MESSAGE: &str = "URI in path does not match URI in body.";

/// Repository interface for article CRUD operations.
pub trait ArticleRepository {
    /// All articles, newest first.
    fn all(&self) -> RepoResult<Vec<Article>>;
    fn get(&self, uri: &str) -> RepoResult<Article>;
    /// Inserts a new article; id and creation time come from storage/clock.
    fn save(&self, article: &Article) -> RepoResult<Article>;
    /// Replaces title, summary and body of the article addressed by `uri`.
    fn update(&self, uri: &str, article: &Article) -> RepoResult<Article>;

    fn validate(&self, article: &Article) -> Vec<FieldError> {
        article.validate()
    }
}

/// SQLite-backed article repository.
pub struct SqliteArticleRepository<'conn, C: Clock = SystemClock> {
    conn: &'conn Connection,
    clock: C,
}

impl<'conn> SqliteArticleRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self::with_clock(conn, SystemClock)
    }
}

impl<'conn, C: Clock> SqliteArticleRepository<'conn, C> {
    pub fn with_clock(conn: &'conn Connection, clock: C) -> Self {
        Self { conn, clock }
    }
}

impl<C: Clock> ArticleRepository for SqliteArticleRepository<'_, C> {
    fn all(&self) -> RepoResult<Vec<Article>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ARTICLE_SELECT_SQL} ORDER BY dt_created DESC, id DESC;"
        ))?;
        let articles = stmt
            .query_map([], parse_article_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(articles)
    }

    fn get(&self, uri: &str) -> RepoResult<Article> {
        self.conn
            .query_row(
                &format!("{ARTICLE_SELECT_SQL} WHERE uri = ?1;"),
                [uri],
                parse_article_row,
            )
            .optional()?
            .ok_or_else(|| RepoError::not_found("article", uri))
    }

    fn save(&self, article: &Article) -> RepoResult<Article> {
        let created_at = self.clock.now_ms();
        let (id, date_created) = self
            .conn
            .query_row(
                "INSERT INTO articles (title, uri, summary, body_md, dt_created)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING id, dt_created;",
                params![
                    article.title.as_str(),
                    article.uri.as_str(),
                    article.summary.as_str(),
                    article.body.as_str(),
                    created_at,
                ],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .map_err(translate_error)?;

        Ok(Article {
            id,
            date_created,
            date_updated: None,
            ..article.clone()
        })
    }

    fn update(&self, uri: &str, article: &Article) -> RepoResult<Article> {
        if uri != article.uri {
            return Err(RepoError::Validation(RequestError::new(
                URI_MISMATCH_MESSAGE,
            )));
        }

        let updated_at = self.clock.now_ms();
        self.conn
            .query_row(
                "UPDATE articles
                 SET
                    title = ?1,
                    summary = ?2,
                    body_md = ?3,
                    dt_updated = ?4
                 WHERE uri = ?5
                 RETURNING id, uri, title, summary, body_md, dt_created, dt_updated;",
                params![
                    article.title.as_str(),
                    article.summary.as_str(),
                    article.body.as_str(),
                    updated_at,
                    uri,
                ],
                parse_article_row,
            )
            .optional()
            .map_err(translate_error)?
            .ok_or_else(|| RepoError::not_found("article", uri))
    }
}

fn parse_article_row(row: &Row<'_>) -> rusqlite::Result<Article> {
    Ok(Article {
        id: row.get("id")?,
        uri: row.get("uri")?,
        title: row.get("title")?,
        summary: row.get("summary")?,
        body: row.get("body_md")?,
        date_created: row.get("dt_created")?,
        date_updated: row.get("dt_updated")?,
    })
}
