use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::pages::requests::{CatalogQuery, MarkFormRequest};
use crate::services::PageService;
use crate::utils::SafeIDI64;

// 懒加载的全局 PageService 实例
static PAGE_SERVICE: Lazy<PageService> = Lazy::new(PageService::new_lazy);

pub async fn home(req: HttpRequest) -> ActixResult<HttpResponse> {
    PAGE_SERVICE.home(&req).await
}

pub async fn profile(req: HttpRequest) -> ActixResult<HttpResponse> {
    PAGE_SERVICE.profile(&req).await
}

pub async fn about(req: HttpRequest) -> ActixResult<HttpResponse> {
    PAGE_SERVICE.about(&req).await
}

pub async fn contacts() -> ActixResult<HttpResponse> {
    PAGE_SERVICE.contacts().await
}

pub async fn catalog(
    req: HttpRequest,
    kind: web::Path<String>,
    query: web::Query<CatalogQuery>,
) -> ActixResult<HttpResponse> {
    PAGE_SERVICE
        .catalog(&req, &kind.into_inner(), query.into_inner())
        .await
}

pub async fn detail(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    let kind = req.match_info().get("kind").unwrap_or_default().to_string();
    PAGE_SERVICE.detail(&req, &kind, path.0).await
}

pub async fn lesson_detail(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    PAGE_SERVICE.detail(&req, "lessons", path.0).await
}

pub async fn submit_mark(
    req: HttpRequest,
    path: SafeIDI64,
    form: web::Json<MarkFormRequest>,
) -> ActixResult<HttpResponse> {
    PAGE_SERVICE.submit_mark(&req, path.0, form.into_inner()).await
}

// 配置路由
pub fn configure_page_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/pages")
            .service(
                web::resource(["/profile", "/profile/"])
                    .wrap(middlewares::RequireJWT)
                    .route(web::get().to(profile)),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::OptionalJWT)
                    .route("/home", web::get().to(home))
                    .route("/about", web::get().to(about))
                    .route("/contacts", web::get().to(contacts))
                    // 成绩表单只挂在课程详情上
                    .service(
                        web::resource(["/lessons/{id}", "/lessons/{id}/"])
                            .route(web::get().to(lesson_detail))
                            .route(web::post().to(submit_mark)),
                    )
                    .route("/{kind}", web::get().to(catalog))
                    .route("/{kind}/", web::get().to(catalog))
                    .route("/{kind}/{id}", web::get().to(detail))
                    .route("/{kind}/{id}/", web::get().to(detail)),
            ),
    );
}
