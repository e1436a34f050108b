use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FacultyService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::responses::{not_found, storage_error};

pub async fn get_faculty(
    service: &FacultyService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_faculty(id).await {
        Ok(Some(faculty)) => Ok(HttpResponse::Ok().json(ApiResponse::success(faculty, "Faculty retrieved"))),
        Ok(None) => Ok(not_found(ErrorCode::FacultyNotFound, "Faculty not found")),
        Err(e) => Ok(storage_error("Failed to retrieve faculty", e)),
    }
}
