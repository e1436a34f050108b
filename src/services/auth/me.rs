use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, auth::UserInfoResponse};

pub async fn handle_me(request: &HttpRequest) -> ActixResult<HttpResponse> {
    match RequireJWT::extract_user(request) {
        Some(user) => {
            let viewer = RequireJWT::extract_viewer(request);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                UserInfoResponse { user, viewer },
                "Account retrieved",
            )))
        }
        None => Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        ))),
    }
}
