//! Value-sort board endpoints.
//!
//! | Function | Route |
//! |---|---|
//! | `create_board` | `POST /api/v1/value-sort/boards` |
//! | `get_board` | `GET /api/v1/value-sort/boards/{boardName}` |
//! | `update_board` | `PUT /api/v1/value-sort/boards` |

use super::{decode_with, repo_failure, status, ApiResponse};
use crate::model::validation::FieldError;
use crate::model::value_sort::ValueSortBoard;
use crate::repo::board_repo::BoardRepository;
use crate::repo::error::RequestError;
use serde::de::DeserializeOwned;
use serde::Deserialize;

const BOARD_NOT_FOUND: &str = "board not found";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct CreateBoardRequest {
    board_name: String,
}

pub fn create_board(repo: &mut impl BoardRepository, body: &str) -> ApiResponse {
    let request: CreateBoardRequest = match decode_board_body("board_create", body) {
        Ok(request) => request,
        Err(response) => return response,
    };
    if request.board_name.is_empty() {
        return invalid(&[FieldError::new("boardName", "missing board name")]);
    }

    match repo.create(&request.board_name) {
        Ok(()) => ApiResponse::message(status::OK, "success"),
        Err(err) => repo_failure("board_create", &err, BOARD_NOT_FOUND, "unable to create board"),
    }
}

/// Returns 404 when the board has no cards at all.
pub fn get_board(repo: &impl BoardRepository, board_name: &str) -> ApiResponse {
    match repo.get(board_name) {
        Ok(lookup) if lookup.found => ApiResponse::json(status::OK, &lookup.board),
        Ok(_) => ApiResponse::error(status::NOT_FOUND, BOARD_NOT_FOUND),
        Err(err) => repo_failure(
            "board_get",
            &err,
            BOARD_NOT_FOUND,
            "problem fetching value sort cards",
        ),
    }
}

/// Applies the submitted board as the desired placement of its cards.
pub fn update_board(repo: &mut impl BoardRepository, body: &str) -> ApiResponse {
    let board: ValueSortBoard = match decode_board_body("board_upsert", body) {
        Ok(board) => board,
        Err(response) => return response,
    };
    let errors = board.validate();
    if !errors.is_empty() {
        return invalid(&errors);
    }

    match repo.upsert(&board) {
        Ok(()) => ApiResponse::message(status::OK, "success"),
        Err(err) => repo_failure("board_upsert", &err, BOARD_NOT_FOUND, "unable to update board"),
    }
}

fn decode_board_body<T: DeserializeOwned>(
    event: &'static str,
    body: &str,
) -> Result<T, ApiResponse> {
    decode_with(event, body, |err| {
        format!("Could not process request body - {err}")
    })
}

fn invalid(errors: &[FieldError]) -> ApiResponse {
    ApiResponse::error(
        status::UNPROCESSABLE_ENTITY,
        RequestError::from_field_errors(errors).to_string(),
    )
}
