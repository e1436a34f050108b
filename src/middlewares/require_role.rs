/*!
 * 门户角色校验中间件
 *
 * 必须位于 `RequireJWT` 之内，读取其写入请求扩展的 `Viewer`。
 *
 * ```rust,ignore
 * use actix_web::web;
 * use crate::middlewares::{RequireJWT, RequireRole};
 * use crate::models::users::entities::ViewerRole;
 *
 * // 读操作对所有登录账号开放，写操作只允许超级用户与教师
 * web::scope("/rest/faculty")
 *     .wrap(RequireRole::writes_by(ViewerRole::staff_roles()))
 *     .wrap(RequireJWT);
 * ```
 *
 * 未认证返回 401，角色不符返回 403。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::{Method, StatusCode},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::models::{
    ErrorCode,
    users::entities::{User, Viewer, ViewerRole},
};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireRole {
    allowed: Rc<[ViewerRole]>,
    // 为 true 时 GET/HEAD/OPTIONS 不做角色校验
    writes_only: bool,
}

impl RequireRole {
    /// 只允许指定角色
    pub fn new(role: ViewerRole) -> Self {
        Self {
            allowed: Rc::from([role]),
            writes_only: false,
        }
    }

    /// 允许任一角色
    pub fn new_any(roles: &[&ViewerRole]) -> Self {
        Self {
            allowed: roles.iter().map(|r| **r).collect(),
            writes_only: false,
        }
    }

    /// 只对写操作校验角色
    pub fn writes_by(roles: &[&ViewerRole]) -> Self {
        Self {
            writes_only: true,
            ..Self::new_any(roles)
        }
    }

    fn permits(&self, method: &Method, viewer: &Viewer) -> bool {
        if self.writes_only && is_safe_method(method) {
            return true;
        }
        self.allowed.iter().any(|role| viewer.holds(*role))
    }
}

fn is_safe_method(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            rule: self.clone(),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    rule: RequireRole,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
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
        let rule = self.rule.clone();

        Box::pin(async move {
            let account = req.extensions().get::<User>().map(|user| user.id);
            let viewer = req.extensions().get::<Viewer>().copied();

            let (Some(account), Some(viewer)) = (account, viewer) else {
                info!(
                    "Role check on {} without an authenticated account; RequireJWT must wrap RequireRole",
                    req.path()
                );
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::UNAUTHORIZED,
                        ErrorCode::Unauthorized,
                        "Authentication required",
                    )
                    .map_into_right_body(),
                ));
            };

            if rule.permits(req.method(), &viewer) {
                return Ok(srv.call(req).await?.map_into_left_body());
            }

            info!(
                "{} {} denied for account {} (role: {}), allowed: {:?}",
                req.method(),
                req.path(),
                account,
                viewer.role(),
                rule.allowed
            );
            Ok(req.into_response(
                create_error_response(
                    StatusCode::FORBIDDEN,
                    ErrorCode::Forbidden,
                    "You do not have permission to perform this action.",
                )
                .map_into_right_body(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_only_lets_reads_through() {
        let rule = RequireRole::writes_by(ViewerRole::staff_roles());

        assert!(rule.permits(&Method::GET, &Viewer::Member));
        assert!(!rule.permits(&Method::POST, &Viewer::Member));
        assert!(!rule.permits(
            &Method::DELETE,
            &Viewer::Student {
                student_id: 1,
                group_id: 1,
                teacher_id: None
            }
        ));
        assert!(rule.permits(&Method::PATCH, &Viewer::Teacher { teacher_id: 4 }));
        assert!(rule.permits(&Method::PUT, &Viewer::Superuser));
        assert!(rule.permits(
            &Method::POST,
            &Viewer::Student {
                student_id: 1,
                group_id: 1,
                teacher_id: Some(2)
            }
        ));
    }

    #[test]
    fn test_single_role_gates_every_method() {
        let rule = RequireRole::new(ViewerRole::Superuser);

        assert!(!rule.permits(&Method::GET, &Viewer::Teacher { teacher_id: 1 }));
        assert!(rule.permits(&Method::GET, &Viewer::Superuser));
    }
}
