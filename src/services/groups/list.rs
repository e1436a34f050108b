use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GroupService;
use crate::models::ApiResponse;
use crate::models::groups::requests::GroupListQuery;
use crate::services::responses::storage_error;

pub async fn list_groups(
    service: &GroupService,
    request: &HttpRequest,
    query: GroupListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_groups(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Groups retrieved"))),
        Err(e) => Ok(storage_error("Failed to list groups", e)),
    }
}
