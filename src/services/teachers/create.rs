use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TeacherService;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::teachers::requests::CreateTeacherRequest;
use crate::services::responses::{storage_error, validation_failed};
use crate::utils::validate::Validate;

pub async fn create_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    data: CreateTeacherRequest,
) -> ActixResult<HttpResponse> {
    // 整棵嵌套树先校验，再写入
    if let Err(errors) = data.validate() {
        return Ok(validation_failed(errors));
    }

    let storage = service.get_storage(request);

    match storage.create_teacher(data).await {
        Ok(teacher) => {
            info!(
                "Teacher {} created by account {:?}",
                teacher.id,
                RequireJWT::extract_user_id(request)
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(teacher, "Teacher created successfully")))
        }
        Err(e) => Ok(storage_error("Teacher creation failed", e)),
    }
}
