use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::FacultyService;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::faculties::requests::CreateFacultyRequest;
use crate::services::responses::{storage_error, validation_failed};
use crate::utils::validate::Validate;

pub async fn create_faculty(
    service: &FacultyService,
    request: &HttpRequest,
    data: CreateFacultyRequest,
) -> ActixResult<HttpResponse> {
    // 整棵嵌套树先校验，再写入
    if let Err(errors) = data.validate() {
        return Ok(validation_failed(errors));
    }

    let storage = service.get_storage(request);

    match storage.create_faculty(data).await {
        Ok(faculty) => {
            info!(
                "Faculty {} created by account {:?}",
                faculty.id,
                RequireJWT::extract_user_id(request)
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(faculty, "Faculty created successfully")))
        }
        Err(e) => Ok(storage_error("Faculty creation failed", e)),
    }
}
