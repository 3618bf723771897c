//! Lesson endpoints (`POST /api/v1/lessons`).

use super::{decode_body, repo_failure, status, ApiResponse};
use crate::clock::Clock;
use crate::model::lesson::Lesson;
use crate::repo::error::RequestError;
use crate::repo::lesson_repo::LessonRepository;
use log::info;

/// Creates a lesson stamped with the clock's current time.
///
/// Storage failures are reported as 500; constraint conflicts as 422.
pub fn create_lesson(
    repo: &mut impl LessonRepository,
    clock: &impl Clock,
    body: &str,
) -> ApiResponse {
    let mut lesson: Lesson = match decode_body("lesson_create", body) {
        Ok(lesson) => lesson,
        Err(response) => return response,
    };

    let errors = lesson.validate();
    if !errors.is_empty() {
        return ApiResponse::error(
            status::UNPROCESSABLE_ENTITY,
            RequestError::from_field_errors(&errors).to_string(),
        );
    }

    lesson.created_at = clock.now_ms();
    lesson.last_modified_at = None;

    match repo.create(&lesson) {
        Ok(lesson_id) => {
            info!(
                "event=lesson_create module=handler status=ok id={lesson_id} tags={} references={}",
                lesson.tags.len(),
                lesson.references.len()
            );
            ApiResponse::message(status::CREATED, "created")
        }
        Err(err) => repo_failure(
            "lesson_create",
            &err,
            "lesson not found",
            "unable to create lesson",
        ),
    }
}
