use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::LessonService;
use crate::models::ErrorCode;
use crate::services::responses::{not_found, storage_error};

pub async fn delete_lesson(
    service: &LessonService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_lesson(id).await {
        Ok(true) => {
            info!("Lesson {} deleted", id);
            Ok(HttpResponse::NoContent().finish())
        }
        Ok(false) => Ok(not_found(ErrorCode::LessonNotFound, "Lesson not found")),
        Err(e) => Ok(storage_error("Lesson deletion failed", e)),
    }
}
