pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::faculties::requests::{CreateFacultyRequest, FacultyListQuery, UpdateFacultyRequest};
use crate::storage::Storage;

pub struct FacultyService {
    storage: Option<Arc<dyn Storage>>,
}

impl FacultyService {
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

    // 获取院系列表
    pub async fn list_faculties(
        &self,
        request: &HttpRequest,
        query: FacultyListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_faculties(self, request, query).await
    }

    // 创建院系
    pub async fn create_faculty(
        &self,
        request: &HttpRequest,
        data: CreateFacultyRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_faculty(self, request, data).await
    }

    pub async fn get_faculty(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        get::get_faculty(self, request, id).await
    }

    // 更新院系（PUT 与 PATCH 均为部分更新）
    pub async fn update_faculty(
        &self,
        request: &HttpRequest,
        id: i64,
        update_data: UpdateFacultyRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_faculty(self, request, id, update_data).await
    }

    pub async fn delete_faculty(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        delete::delete_faculty(self, request, id).await
    }
}
