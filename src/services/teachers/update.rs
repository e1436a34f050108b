use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TeacherService;
use crate::models::teachers::requests::UpdateTeacherRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::responses::{not_found, storage_error, validation_failed};
use crate::utils::validate::Validate;

pub async fn update_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    id: i64,
    update_data: UpdateTeacherRequest,
) -> ActixResult<HttpResponse> {
    if let Err(errors) = update_data.validate() {
        return Ok(validation_failed(errors));
    }

    let storage = service.get_storage(request);

    match storage.update_teacher(id, update_data).await {
        Ok(Some(teacher)) => {
            info!("Teacher {} updated", id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(teacher, "Teacher updated successfully")))
        }
        Ok(None) => Ok(not_found(ErrorCode::TeacherNotFound, "Teacher not found")),
        Err(e) => Ok(storage_error("Teacher update failed", e)),
    }
}
