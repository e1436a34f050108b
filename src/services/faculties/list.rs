use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FacultyService;
use crate::models::ApiResponse;
use crate::models::faculties::requests::FacultyListQuery;
use crate::services::responses::storage_error;

pub async fn list_faculties(
    service: &FacultyService,
    request: &HttpRequest,
    query: FacultyListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_faculties(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Faculties retrieved"))),
        Err(e) => Ok(storage_error("Failed to list faculties", e)),
    }
}
