use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::HometaskService;
use crate::models::ApiResponse;
use crate::models::hometasks::requests::HometaskListQuery;
use crate::services::responses::storage_error;

pub async fn list_hometasks(
    service: &HometaskService,
    request: &HttpRequest,
    query: HometaskListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_hometasks(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Hometasks retrieved"))),
        Err(e) => Ok(storage_error("Failed to list hometasks", e)),
    }
}
