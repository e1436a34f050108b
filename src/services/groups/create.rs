use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::GroupService;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::groups::requests::CreateGroupRequest;
use crate::services::responses::{storage_error, validation_failed};
use crate::utils::validate::Validate;

pub async fn create_group(
    service: &GroupService,
    request: &HttpRequest,
    data: CreateGroupRequest,
) -> ActixResult<HttpResponse> {
    // 整棵嵌套树先校验，再写入
    if let Err(errors) = data.validate() {
        return Ok(validation_failed(errors));
    }

    let storage = service.get_storage(request);

    match storage.create_group(data).await {
        Ok(group) => {
            info!(
                "Group {} created by account {:?}",
                group.id,
                RequireJWT::extract_user_id(request)
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(group, "Group created successfully")))
        }
        Err(e) => Ok(storage_error("Group creation failed", e)),
    }
}
