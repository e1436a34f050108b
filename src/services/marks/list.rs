use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MarkService;
use crate::models::ApiResponse;
use crate::models::marks::requests::MarkListQuery;
use crate::services::responses::storage_error;

pub async fn list_marks(
    service: &MarkService,
    request: &HttpRequest,
    query: MarkListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_marks(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Marks retrieved"))),
        Err(e) => Ok(storage_error("Failed to list marks", e)),
    }
}
