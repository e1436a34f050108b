use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::MarkService;
use crate::models::marks::requests::UpdateMarkRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::responses::{not_found, storage_error, validation_failed};

pub async fn update_mark(
    service: &MarkService,
    request: &HttpRequest,
    id: i64,
    update_data: UpdateMarkRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let existing = match storage.get_mark(id).await {
        Ok(Some(mark)) => mark,
        Ok(None) => return Ok(not_found(ErrorCode::MarkNotFound, "Mark not found")),
        Err(e) => return Ok(storage_error("Failed to retrieve mark", e)),
    };

    // 成绩与出勤按合并后的结果校验，不能同时为空
    let (mark, presence) = update_data.merged(existing.mark, existing.presence);
    if let Err(errors) = update_data.validate_merged(mark, presence.as_deref()) {
        return Ok(validation_failed(errors));
    }

    match storage.update_mark(id, update_data).await {
        Ok(Some(mark)) => {
            info!("Mark {} updated (mark: {:?}, presence: {:?})", id, mark.mark, mark.presence);
            Ok(HttpResponse::Ok().json(ApiResponse::success(mark, "Mark updated successfully")))
        }
        Ok(None) => Ok(not_found(ErrorCode::MarkNotFound, "Mark not found")),
        Err(e) => Ok(storage_error("Mark update failed", e)),
    }
}
