use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GroupService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::responses::{not_found, storage_error};

pub async fn get_group(
    service: &GroupService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_group(id).await {
        Ok(Some(group)) => Ok(HttpResponse::Ok().json(ApiResponse::success(group, "Group retrieved"))),
        Ok(None) => Ok(not_found(ErrorCode::GroupNotFound, "Group not found")),
        Err(e) => Ok(storage_error("Failed to retrieve group", e)),
    }
}
