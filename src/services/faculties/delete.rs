use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::FacultyService;
use crate::models::ErrorCode;
use crate::services::responses::{not_found, storage_error};

pub async fn delete_faculty(
    service: &FacultyService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_faculty(id).await {
        Ok(true) => {
            info!("Faculty {} deleted", id);
            Ok(HttpResponse::NoContent().finish())
        }
        Ok(false) => Ok(not_found(ErrorCode::FacultyNotFound, "Faculty not found")),
        Err(e) => Ok(storage_error("Faculty deletion failed", e)),
    }
}
