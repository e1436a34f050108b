use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{LoginRequest, LoginResponse},
};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

use super::AuthService;

fn credentials_rejected() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::AuthFailed,
        "Username or password is incorrect",
    ))
}

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 1. 根据用户名或邮箱获取账号
    let user = match storage
        .get_user_by_username_or_email(&login_request.username)
        .await
    {
        Ok(Some(user)) => user,
        Ok(None) => return Ok(credentials_rejected()),
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Login failed: {e}"),
                )),
            );
        }
    };

    // 2. 验证密码
    if !verify_password(&login_request.password, &user.password_hash) {
        tracing::info!("Rejected login attempt for {}", login_request.username);
        return Ok(credentials_rejected());
    }

    // 3. 更新最后登录时间
    let _ = storage.update_last_login(user.id).await;

    // 4. 签发访问令牌
    let role = if user.is_superuser { "superuser" } else { "user" };
    match JwtUtils::generate_access_token(user.id, role) {
        Ok(access_token) => {
            tracing::info!("User {} logged in successfully", user.username);

            let response = LoginResponse {
                access_token,
                token_type: "Bearer",
                expires_in: JwtUtils::access_token_ttl(),
                user,
                created_at: chrono::Utc::now(),
            };

            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Login successful")))
        }
        Err(e) => {
            tracing::error!("Failed to generate JWT token: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::TokenCreationFailed,
                    "Login failed, unable to generate token",
                )),
            )
        }
    }
}
