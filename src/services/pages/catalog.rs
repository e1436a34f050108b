use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use super::PageService;
use crate::middlewares::RequireJWT;
use crate::models::pages::requests::CatalogQuery;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::responses::{not_found, storage_error};
use crate::visibility::EntityKind;

pub async fn handle_catalog(
    service: &PageService,
    request: &HttpRequest,
    kind: &str,
    query: CatalogQuery,
) -> ActixResult<HttpResponse> {
    let Some(kind) = EntityKind::from_slug(kind) else {
        return Ok(not_found(ErrorCode::UnknownCatalog, "Unknown catalog"));
    };

    let viewer = RequireJWT::extract_viewer(request);
    let storage = service.get_storage(request);
    let page_size = service.get_config().portal.paginate_threshold;

    debug!("Catalog {} requested by {:?}", kind, viewer);

    match storage
        .list_visible(&viewer, kind, query.page.as_deref(), page_size)
        .await
    {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(page, "Catalog"))),
        Err(e) => Ok(storage_error("Failed to list catalog", e)),
    }
}
