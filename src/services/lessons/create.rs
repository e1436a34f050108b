use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::LessonService;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::lessons::requests::CreateLessonRequest;
use crate::services::responses::{storage_error, validation_failed};
use crate::utils::validate::Validate;

pub async fn create_lesson(
    service: &LessonService,
    request: &HttpRequest,
    data: CreateLessonRequest,
) -> ActixResult<HttpResponse> {
    // 整棵嵌套树先校验，再写入
    if let Err(errors) = data.validate() {
        return Ok(validation_failed(errors));
    }

    let storage = service.get_storage(request);

    match storage.create_lesson(data).await {
        Ok(lesson) => {
            info!(
                "Lesson {} created by account {:?}",
                lesson.id,
                RequireJWT::extract_user_id(request)
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(lesson, "Lesson created successfully")))
        }
        Err(e) => Ok(storage_error("Lesson creation failed", e)),
    }
}
