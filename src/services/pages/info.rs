use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use super::PageService;
use crate::middlewares::RequireJWT;
use crate::models::pages::responses::{AboutContext, ContactsContext, ProfileContext};
use crate::models::{ApiResponse, AppStartTime, ErrorCode};

pub async fn handle_profile(request: &HttpRequest) -> ActixResult<HttpResponse> {
    let Some(user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        )));
    };

    let context = ProfileContext {
        username: user.username,
        first_name: user.first_name,
        last_name: user.last_name,
        email: user.email,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(context, "Profile")))
}

pub async fn handle_about(
    service: &PageService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();
    let started_at = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|start| start.start_datetime);

    let context = AboutContext {
        system_name: config.app.system_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        started_at,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(context, "About")))
}

pub async fn handle_contacts(service: &PageService) -> ActixResult<HttpResponse> {
    let portal = &service.get_config().portal;
    let context = ContactsContext {
        email: portal.contact_email.clone(),
        phone: portal.contact_phone.clone(),
        address: portal.contact_address.clone(),
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(context, "Contacts")))
}
