use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::lessons::requests::{CreateLessonRequest, LessonListQuery, UpdateLessonRequest};
use crate::models::users::entities::ViewerRole;
use crate::services::LessonService;
use crate::utils::SafeIDI64;

// 懒加载的全局 LessonService 实例
static LESSON_SERVICE: Lazy<LessonService> = Lazy::new(LessonService::new_lazy);

// HTTP处理程序
pub async fn list_lessons(
    req: HttpRequest,
    query: web::Query<LessonListQuery>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.list_lessons(&req, query.into_inner()).await
}

pub async fn create_lesson(
    req: HttpRequest,
    data: web::Json<CreateLessonRequest>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.create_lesson(&req, data.into_inner()).await
}

pub async fn get_lesson(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.get_lesson(&req, path.0).await
}

pub async fn update_lesson(
    req: HttpRequest,
    path: SafeIDI64,
    update_data: web::Json<UpdateLessonRequest>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE
        .update_lesson(&req, path.0, update_data.into_inner())
        .await
}

pub async fn delete_lesson(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.delete_lesson(&req, path.0).await
}

// 配置路由
//
// 读操作对所有登录账号开放，写操作只允许超级用户与教师。
pub fn configure_lessons_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/rest/lesson")
            .wrap(middlewares::RequireRole::writes_by(ViewerRole::staff_roles()))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource(["", "/"])
                    .route(web::get().to(list_lessons))
                    .route(web::post().to(create_lesson)),
            )
            .service(
                web::resource(["/{id}", "/{id}/"])
                    .route(web::get().to(get_lesson))
                    .route(web::put().to(update_lesson))
                    .route(web::patch().to(update_lesson))
                    .route(web::delete().to(delete_lesson)),
            ),
    );
}
