use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LessonService;
use crate::models::ApiResponse;
use crate::models::lessons::requests::LessonListQuery;
use crate::services::responses::storage_error;

pub async fn list_lessons(
    service: &LessonService,
    request: &HttpRequest,
    query: LessonListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_lessons(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Lessons retrieved"))),
        Err(e) => Ok(storage_error("Failed to list lessons", e)),
    }
}
