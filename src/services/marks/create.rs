use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::MarkService;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::marks::requests::CreateMarkRequest;
use crate::services::responses::{storage_error, validation_failed};
use crate::utils::validate::Validate;

pub async fn create_mark(
    service: &MarkService,
    request: &HttpRequest,
    data: CreateMarkRequest,
) -> ActixResult<HttpResponse> {
    // 整棵嵌套树先校验，再写入
    if let Err(errors) = data.validate() {
        return Ok(validation_failed(errors));
    }

    let storage = service.get_storage(request);

    match storage.create_mark(data).await {
        Ok(mark) => {
            info!(
                "Mark {} created by account {:?}",
                mark.id,
                RequireJWT::extract_user_id(request)
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(mark, "Mark created successfully")))
        }
        Err(e) => Ok(storage_error("Mark creation failed", e)),
    }
}
