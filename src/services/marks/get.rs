use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MarkService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::responses::{not_found, storage_error};

pub async fn get_mark(
    service: &MarkService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_mark(id).await {
        Ok(Some(mark)) => Ok(HttpResponse::Ok().json(ApiResponse::success(mark, "Mark retrieved"))),
        Ok(None) => Ok(not_found(ErrorCode::MarkNotFound, "Mark not found")),
        Err(e) => Ok(storage_error("Failed to retrieve mark", e)),
    }
}
