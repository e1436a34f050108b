use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::FacultyService;
use crate::models::faculties::requests::UpdateFacultyRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::responses::{not_found, storage_error, validation_failed};
use crate::utils::validate::Validate;

pub async fn update_faculty(
    service: &FacultyService,
    request: &HttpRequest,
    id: i64,
    update_data: UpdateFacultyRequest,
) -> ActixResult<HttpResponse> {
    if let Err(errors) = update_data.validate() {
        return Ok(validation_failed(errors));
    }

    let storage = service.get_storage(request);

    match storage.update_faculty(id, update_data).await {
        Ok(Some(faculty)) => {
            info!("Faculty {} updated", id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(faculty, "Faculty updated successfully")))
        }
        Ok(None) => Ok(not_found(ErrorCode::FacultyNotFound, "Faculty not found")),
        Err(e) => Ok(storage_error("Faculty update failed", e)),
    }
}
