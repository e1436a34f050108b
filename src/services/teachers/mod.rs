pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::teachers::requests::{CreateTeacherRequest, TeacherListQuery, UpdateTeacherRequest};
use crate::storage::Storage;

pub struct TeacherService {
    storage: Option<Arc<dyn Storage>>,
}

impl TeacherService {
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

    // 获取教师列表
    pub async fn list_teachers(
        &self,
        request: &HttpRequest,
        query: TeacherListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_teachers(self, request, query).await
    }

    // 创建教师（支持嵌套创建上级对象）
    pub async fn create_teacher(
        &self,
        request: &HttpRequest,
        data: CreateTeacherRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_teacher(self, request, data).await
    }

    pub async fn get_teacher(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        get::get_teacher(self, request, id).await
    }

    // 更新教师（PUT 与 PATCH 均为部分更新）
    pub async fn update_teacher(
        &self,
        request: &HttpRequest,
        id: i64,
        update_data: UpdateTeacherRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_teacher(self, request, id, update_data).await
    }

    pub async fn delete_teacher(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        delete::delete_teacher(self, request, id).await
    }
}
