use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::HometaskService;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::hometasks::requests::CreateHometaskRequest;
use crate::services::responses::{storage_error, validation_failed};
use crate::utils::validate::Validate;

pub async fn create_hometask(
    service: &HometaskService,
    request: &HttpRequest,
    data: CreateHometaskRequest,
) -> ActixResult<HttpResponse> {
    // 整棵嵌套树先校验，再写入
    if let Err(errors) = data.validate() {
        return Ok(validation_failed(errors));
    }

    let storage = service.get_storage(request);

    match storage.create_hometask(data).await {
        Ok(hometask) => {
            info!(
                "Hometask {} created by account {:?}",
                hometask.id,
                RequireJWT::extract_user_id(request)
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(hometask, "Hometask created successfully")))
        }
        Err(e) => Ok(storage_error("Hometask creation failed", e)),
    }
}
