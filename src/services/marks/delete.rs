use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::MarkService;
use crate::models::ErrorCode;
use crate::services::responses::{not_found, storage_error};

pub async fn delete_mark(
    service: &MarkService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_mark(id).await {
        Ok(true) => {
            info!("Mark {} deleted", id);
            Ok(HttpResponse::NoContent().finish())
        }
        Ok(false) => Ok(not_found(ErrorCode::MarkNotFound, "Mark not found")),
        Err(e) => Ok(storage_error("Mark deletion failed", e)),
    }
}
