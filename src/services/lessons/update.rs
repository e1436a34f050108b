use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::LessonService;
use crate::models::lessons::requests::UpdateLessonRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::responses::{not_found, storage_error, validation_failed};
use crate::utils::validate::Validate;

pub async fn update_lesson(
    service: &LessonService,
    request: &HttpRequest,
    id: i64,
    update_data: UpdateLessonRequest,
) -> ActixResult<HttpResponse> {
    if let Err(errors) = update_data.validate() {
        return Ok(validation_failed(errors));
    }

    let storage = service.get_storage(request);

    match storage.update_lesson(id, update_data).await {
        Ok(Some(lesson)) => {
            info!("Lesson {} updated", id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(lesson, "Lesson updated successfully")))
        }
        Ok(None) => Ok(not_found(ErrorCode::LessonNotFound, "Lesson not found")),
        Err(e) => Ok(storage_error("Lesson update failed", e)),
    }
}
