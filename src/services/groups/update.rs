use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::GroupService;
use crate::models::groups::requests::UpdateGroupRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::responses::{not_found, storage_error, validation_failed};
use crate::utils::validate::Validate;

pub async fn update_group(
    service: &GroupService,
    request: &HttpRequest,
    id: i64,
    update_data: UpdateGroupRequest,
) -> ActixResult<HttpResponse> {
    if let Err(errors) = update_data.validate() {
        return Ok(validation_failed(errors));
    }

    let storage = service.get_storage(request);

    match storage.update_group(id, update_data).await {
        Ok(Some(group)) => {
            info!("Group {} updated", id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(group, "Group updated successfully")))
        }
        Ok(None) => Ok(not_found(ErrorCode::GroupNotFound, "Group not found")),
        Err(e) => Ok(storage_error("Group update failed", e)),
    }
}
