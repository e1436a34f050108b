//! 门户页面
//!
//! 每个页面返回模板渲染所需的上下文（JSON）。

pub mod catalog;
pub mod detail;
pub mod home;
pub mod info;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::pages::requests::{CatalogQuery, MarkFormRequest};
use crate::storage::Storage;

pub struct PageService {
    storage: Option<Arc<dyn Storage>>,
}

impl PageService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    pub async fn home(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        home::handle_home(self, request).await
    }

    pub async fn profile(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        info::handle_profile(request).await
    }

    pub async fn about(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        info::handle_about(self, request).await
    }

    pub async fn contacts(&self) -> ActixResult<HttpResponse> {
        info::handle_contacts(self).await
    }

    // 目录页
    pub async fn catalog(
        &self,
        request: &HttpRequest,
        kind: &str,
        query: CatalogQuery,
    ) -> ActixResult<HttpResponse> {
        catalog::handle_catalog(self, request, kind, query).await
    }

    // 详情页
    pub async fn detail(
        &self,
        request: &HttpRequest,
        kind: &str,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::handle_detail(self, request, kind, id).await
    }

    // 课程详情页提交成绩表单
    pub async fn submit_mark(
        &self,
        request: &HttpRequest,
        lesson_id: i64,
        form: MarkFormRequest,
    ) -> ActixResult<HttpResponse> {
        detail::handle_submit_mark(self, request, lesson_id, form).await
    }
}
