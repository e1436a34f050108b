use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::models::ApiResponse;
use crate::models::teachers::requests::TeacherListQuery;
use crate::services::responses::storage_error;

pub async fn list_teachers(
    service: &TeacherService,
    request: &HttpRequest,
    query: TeacherListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_teachers(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Teachers retrieved"))),
        Err(e) => Ok(storage_error("Failed to list teachers", e)),
    }
}
