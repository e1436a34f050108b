use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::HometaskService;
use crate::models::hometasks::requests::UpdateHometaskRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::responses::{not_found, storage_error, validation_failed};
use crate::utils::validate::Validate;

pub async fn update_hometask(
    service: &HometaskService,
    request: &HttpRequest,
    id: i64,
    update_data: UpdateHometaskRequest,
) -> ActixResult<HttpResponse> {
    if let Err(errors) = update_data.validate() {
        return Ok(validation_failed(errors));
    }

    let storage = service.get_storage(request);

    match storage.update_hometask(id, update_data).await {
        Ok(Some(hometask)) => {
            info!("Hometask {} updated", id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(hometask, "Hometask updated successfully")))
        }
        Ok(None) => Ok(not_found(ErrorCode::HometaskNotFound, "Hometask not found")),
        Err(e) => Ok(storage_error("Hometask update failed", e)),
    }
}
