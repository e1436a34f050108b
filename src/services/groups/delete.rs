use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::GroupService;
use crate::models::ErrorCode;
use crate::services::responses::{not_found, storage_error};

pub async fn delete_group(
    service: &GroupService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_group(id).await {
        Ok(true) => {
            info!("Group {} deleted", id);
            Ok(HttpResponse::NoContent().finish())
        }
        Ok(false) => Ok(not_found(ErrorCode::GroupNotFound, "Group not found")),
        Err(e) => Ok(storage_error("Group deletion failed", e)),
    }
}
