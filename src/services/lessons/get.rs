use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LessonService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::responses::{not_found, storage_error};

pub async fn get_lesson(
    service: &LessonService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_lesson(id).await {
        Ok(Some(lesson)) => Ok(HttpResponse::Ok().json(ApiResponse::success(lesson, "Lesson retrieved"))),
        Ok(None) => Ok(not_found(ErrorCode::LessonNotFound, "Lesson not found")),
        Err(e) => Ok(storage_error("Failed to retrieve lesson", e)),
    }
}
