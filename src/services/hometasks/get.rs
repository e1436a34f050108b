use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::HometaskService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::responses::{not_found, storage_error};

pub async fn get_hometask(
    service: &HometaskService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_hometask(id).await {
        Ok(Some(hometask)) => Ok(HttpResponse::Ok().json(ApiResponse::success(hometask, "Hometask retrieved"))),
        Ok(None) => Ok(not_found(ErrorCode::HometaskNotFound, "Hometask not found")),
        Err(e) => Ok(storage_error("Failed to retrieve hometask", e)),
    }
}
