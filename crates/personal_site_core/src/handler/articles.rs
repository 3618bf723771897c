//! Article endpoints.
//!
//! | Function | Route |
//! |---|---|
//! | `list_articles` | `GET /api/v1/articles` |
//! | `get_article` | `GET /api/v1/articles/{uri}` |
//! | `create_article` | `POST /api/v1/articles` |
//! | `update_article` | `PUT /api/v1/articles/{uri}` |

use super::{decode_body, repo_failure, status, ApiResponse};
use crate::model::article::Article;
use crate::repo::article_repo::ArticleRepository;
use crate::repo::error::RequestError;
use log::info;

const ARTICLE_NOT_FOUND: &str = "article not found";
const MISSING_ARTICLE_ID: &str = "request missing article ID";

pub fn list_articles(repo: &impl ArticleRepository) -> ApiResponse {
    match repo.all() {
        Ok(articles) => ApiResponse::json(status::OK, &articles),
        Err(err) => repo_failure(
            "article_list",
            &err,
            ARTICLE_NOT_FOUND,
            "problem fetching articles",
        ),
    }
}

pub fn get_article(repo: &impl ArticleRepository, uri: &str) -> ApiResponse {
    if uri.is_empty() {
        return ApiResponse::error(status::NOT_FOUND, MISSING_ARTICLE_ID);
    }

    match repo.get(uri) {
        Ok(article) => ApiResponse::json(status::OK, &article),
        Err(err) => repo_failure(
            "article_get",
            &err,
            ARTICLE_NOT_FOUND,
            "problem fetching article",
        ),
    }
}

pub fn create_article(repo: &impl ArticleRepository, body: &str) -> ApiResponse {
    let article = match decode_validated(repo, "article_create", body) {
        Ok(article) => article,
        Err(response) => return response,
    };

    match repo.save(&article) {
        Ok(saved) => {
            info!(
                "event=article_create module=handler status=ok id={} uri={}",
                saved.id, saved.uri
            );
            ApiResponse::json(status::CREATED, &saved)
        }
        Err(err) => repo_failure(
            "article_create",
            &err,
            ARTICLE_NOT_FOUND,
            "unable to create article",
        ),
    }
}

pub fn update_article(repo: &impl ArticleRepository, uri: &str, body: &str) -> ApiResponse {
    if uri.is_empty() {
        return ApiResponse::error(status::NOT_FOUND, MISSING_ARTICLE_ID);
    }

    let article = match decode_validated(repo, "article_update", body) {
        Ok(article) => article,
        Err(response) => return response,
    };

    match repo.update(uri, &article) {
        Ok(updated) => {
            info!("event=article_update module=handler status=ok uri={uri}");
            ApiResponse::json(status::OK, &updated)
        }
        Err(err) => repo_failure(
            "article_update",
            &err,
            ARTICLE_NOT_FOUND,
            "unable to update article",
        ),
    }
}

fn decode_validated(
    repo: &impl ArticleRepository,
    event: &'static str,
    body: &str,
) -> Result<Article, ApiResponse> {
    let article: Article = decode_body(event, body)?;
    let errors = repo.validate(&article);
    if !errors.is_empty() {
        return Err(ApiResponse::error(
            status::UNPROCESSABLE_ENTITY,
            RequestError::from_field_errors(&errors).to_string(),
        ));
    }
    Ok(article)
}
