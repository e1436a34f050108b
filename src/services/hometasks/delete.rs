use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::HometaskService;
use crate::models::ErrorCode;
use crate::services::responses::{not_found, storage_error};

pub async fn delete_hometask(
    service: &HometaskService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_hometask(id).await {
        Ok(true) => {
            info!("Hometask {} deleted", id);
            Ok(HttpResponse::NoContent().finish())
        }
        Ok(false) => Ok(not_found(ErrorCode::HometaskNotFound, "Hometask not found")),
        Err(e) => Ok(storage_error("Hometask deletion failed", e)),
    }
}
