pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::lessons::requests::{CreateLessonRequest, LessonListQuery, UpdateLessonRequest};
use crate::storage::Storage;

pub struct LessonService {
    storage: Option<Arc<dyn Storage>>,
}

impl LessonService {
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

    // 获取课程列表
    pub async fn list_lessons(
        &self,
        request: &HttpRequest,
        query: LessonListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_lessons(self, request, query).await
    }

    // 创建课程（支持嵌套创建上级对象）
    pub async fn create_lesson(
        &self,
        request: &HttpRequest,
        data: CreateLessonRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_lesson(self, request, data).await
    }

    pub async fn get_lesson(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        get::get_lesson(self, request, id).await
    }

    // 更新课程（PUT 与 PATCH 均为部分更新）
    pub async fn update_lesson(
        &self,
        request: &HttpRequest,
        id: i64,
        update_data: UpdateLessonRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_lesson(self, request, id, update_data).await
    }

    pub async fn delete_lesson(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        delete::delete_lesson(self, request, id).await
    }
}
