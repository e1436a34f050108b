/*!
 * JWT 认证中间件
 *
 * 校验 `Authorization: Bearer <JWT_TOKEN>`，加载账号并解析其门户身份。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::web;
 * use crate::middlewares::{OptionalJWT, RequireJWT};
 *
 * // 必须登录
 * web::scope("/rest").wrap(RequireJWT);
 *
 * // 可匿名访问，匿名请求按普通成员处理
 * web::scope("/pages").wrap(OptionalJWT);
 * ```
 *
 * 处理程序中通过 `RequireJWT::extract_user` / `RequireJWT::extract_viewer`
 * 读取请求扩展中的账号与身份。
 *
 * ## 认证流程
 *
 * 1. 从请求头提取并验证令牌
 * 2. 按令牌中的账号 ID 加载账号
 * 3. 解析门户身份（超级用户 → 学生 → 教师 → 普通成员）
 * 4. 账号与身份写入请求扩展后继续处理
 *
 * 令牌缺失或无效时，`RequireJWT` 返回 401；`OptionalJWT` 只在令牌存在但无效时返回 401。
 */

use crate::models::users::entities::{User, Viewer};
use crate::models::ErrorCode;
use crate::storage::Storage;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

/// 必须携带有效令牌
#[derive(Clone)]
pub struct RequireJWT;

/// 令牌可选，匿名请求按普通成员处理
#[derive(Clone)]
pub struct OptionalJWT;

// 辅助函数：提取 Bearer 令牌，None 表示未携带
fn bearer_token(req: &ServiceRequest) -> Option<Result<String, String>> {
    let header = req.headers().get(AUTHORIZATION_HEADER)?;
    Some(
        header
            .to_str()
            .ok()
            .and_then(|s| s.strip_prefix(BEARER_PREFIX))
            .map(|s| s.trim().to_string())
            .ok_or_else(|| "Missing or invalid Authorization header".to_string()),
    )
}

// 辅助函数：验证令牌并加载账号与门户身份
async fn authenticate(req: &ServiceRequest, token: &str) -> Result<(User, Viewer), String> {
    let claims = crate::utils::jwt::JwtUtils::verify_access_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        "Invalid JWT token".to_string()
    })?;

    let user_id = claims
        .user_id()
        .ok_or_else(|| "Invalid user ID in JWT".to_string())?;

    let storage = req
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .ok_or_else(|| "Storage not found in app data".to_string())?
        .get_ref()
        .clone();

    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(|_| "Failed to retrieve user from storage".to_string())?
        .ok_or_else(|| "User not found".to_string())?;

    let viewer = storage
        .resolve_viewer(&user)
        .await
        .map_err(|_| "Failed to resolve portal role".to_string())?;

    Ok((user, viewer))
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
            optional: false,
        }))
    }
}

impl<S, B> Transform<S, ServiceRequest> for OptionalJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
            optional: true,
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
    optional: bool,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let optional = self.optional;

        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            let result = match bearer_token(&req) {
                None if optional => {
                    debug!("Anonymous request to {}", req.path());
                    req.extensions_mut().insert(Viewer::Member);
                    return Ok(srv.call(req).await?.map_into_left_body());
                }
                None => Err("Missing or invalid Authorization header".to_string()),
                Some(Err(err)) => Err(err),
                Some(Ok(token)) => authenticate(&req, &token).await,
            };

            match result {
                Ok((user, viewer)) => {
                    debug!(
                        "JWT authentication successful for ID: {} (role: {})",
                        user.id,
                        viewer.role()
                    );
                    req.extensions_mut().insert(user);
                    req.extensions_mut().insert(viewer);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取用户信息
impl RequireJWT {
    /// 从请求扩展中提取账号
    pub fn extract_user(req: &actix_web::HttpRequest) -> Option<User> {
        req.extensions().get::<User>().cloned()
    }

    /// 从请求扩展中提取账号 ID
    pub fn extract_user_id(req: &actix_web::HttpRequest) -> Option<i64> {
        req.extensions().get::<User>().map(|user| user.id)
    }

    /// 从请求扩展中提取门户身份，未经认证的请求视为普通成员
    pub fn extract_viewer(req: &actix_web::HttpRequest) -> Viewer {
        req.extensions()
            .get::<Viewer>()
            .copied()
            .unwrap_or(Viewer::Member)
    }
}
