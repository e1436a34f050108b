pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::hometasks::requests::{CreateHometaskRequest, HometaskListQuery, UpdateHometaskRequest};
use crate::storage::Storage;

pub struct HometaskService {
    storage: Option<Arc<dyn Storage>>,
}

impl HometaskService {
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

    // 获取作业列表
    pub async fn list_hometasks(
        &self,
        request: &HttpRequest,
        query: HometaskListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_hometasks(self, request, query).await
    }

    // 创建作业（支持嵌套创建上级对象）
    pub async fn create_hometask(
        &self,
        request: &HttpRequest,
        data: CreateHometaskRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_hometask(self, request, data).await
    }

    pub async fn get_hometask(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        get::get_hometask(self, request, id).await
    }

    // 更新作业（PUT 与 PATCH 均为部分更新）
    pub async fn update_hometask(
        &self,
        request: &HttpRequest,
        id: i64,
        update_data: UpdateHometaskRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_hometask(self, request, id, update_data).await
    }

    pub async fn delete_hometask(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        delete::delete_hometask(self, request, id).await
    }
}
