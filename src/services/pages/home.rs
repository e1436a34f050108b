use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PageService;
use crate::models::ApiResponse;
use crate::services::responses::storage_error;

pub async fn handle_home(service: &PageService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.count_dashboard().await {
        Ok(context) => Ok(HttpResponse::Ok().json(ApiResponse::success(context, "Home"))),
        Err(e) => Ok(storage_error("Failed to count dashboard", e)),
    }
}
