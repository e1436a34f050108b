//! 作业存储操作

use super::SeaOrmStorage;
use super::nested::{child_path, ensure_exists, resolve_lesson};
use super::views::{hometask_view, query_failed};
use crate::entity::hometasks::{ActiveModel, Column, Entity as Hometasks, Model};
use crate::entity::lessons::Entity as Lessons;
use crate::errors::{PortalError, Result};
use crate::models::{
    PaginationInfo,
    common::pagination::{normalize_page_params, page_count},
    hometasks::{
        entities::Hometask,
        requests::{CreateHometaskRequest, HometaskListQuery, UpdateHometaskRequest},
        responses::HometaskListResponse,
    },
};
use crate::utils::validate::Validate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;

/// 插入作业，课程按需一并创建
pub(super) async fn insert_hometask<C: ConnectionTrait>(
    db: &C,
    req: CreateHometaskRequest,
    path: &str,
) -> Result<Model> {
    let lesson_id = resolve_lesson(db, req.lesson, &child_path(path, "lesson")).await?;

    let model = ActiveModel {
        task: Set(req.task),
        lesson_id: Set(lesson_id),
        created: Set(chrono::Utc::now().timestamp()),
        ..Default::default()
    };

    model
        .insert(db)
        .await
        .map_err(|e| PortalError::from_write_error(&format!("创建作业失败 [{path}]"), e))
}

impl SeaOrmStorage {
    /// 创建作业
    pub async fn create_hometask_impl(&self, req: CreateHometaskRequest) -> Result<Hometask> {
        req.validate()?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(query_failed("开启事务失败"))?;
        let model = insert_hometask(&txn, req, "").await?;
        txn.commit().await.map_err(query_failed("提交事务失败"))?;

        info!("作业已创建: 课程 {} ({})", model.lesson_id, model.id);
        hometask_view(&self.db, model).await
    }

    /// 通过 ID 获取作业
    pub async fn get_hometask_impl(&self, id: i64) -> Result<Option<Hometask>> {
        let result = Hometasks::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_failed("查询作业失败"))?;

        match result {
            Some(model) => Ok(Some(hometask_view(&self.db, model).await?)),
            None => Ok(None),
        }
    }

    /// 分页列出作业
    pub async fn list_hometasks_impl(
        &self,
        query: HometaskListQuery,
    ) -> Result<HometaskListResponse> {
        let (page, size) = normalize_page_params(query.page, query.size);

        let mut select = Hometasks::find();

        if let Some(id) = query.id {
            select = select.filter(Column::Id.eq(id));
        }
        if let Some(task) = query.task {
            select = select.filter(Column::Task.eq(task));
        }
        if let Some(created) = query.created {
            select = select.filter(Column::Created.eq(created.timestamp()));
        }
        if let Some(lesson) = query.lesson {
            select = select.filter(Column::LessonId.eq(lesson));
        }

        select = select.order_by_asc(Column::Task).order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(query_failed("查询作业总数失败"))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(query_failed("查询作业列表失败"))?;

        let mut items = Vec::with_capacity(models.len());
        for model in models {
            items.push(hometask_view(&self.db, model).await?);
        }

        Ok(HometaskListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: page_count(total, size) as i64,
            },
        })
    }

    /// 更新作业
    pub async fn update_hometask_impl(
        &self,
        id: i64,
        update: UpdateHometaskRequest,
    ) -> Result<Option<Hometask>> {
        update.validate()?;

        let Some(existing) = Hometasks::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_failed("查询作业失败"))?
        else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        if let Some(task) = update.task {
            model.task = Set(task);
        }
        if let Some(lesson) = update.lesson {
            ensure_exists::<Lessons, _>(&self.db, lesson, "lesson").await?;
            model.lesson_id = Set(lesson);
        }

        if model.is_changed() {
            model
                .update(&self.db)
                .await
                .map_err(|e| PortalError::from_write_error("更新作业失败", e))?;
        }

        self.get_hometask_impl(id).await
    }

    /// 删除作业
    pub async fn delete_hometask_impl(&self, id: i64) -> Result<bool> {
        let result = Hometasks::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_failed("删除作业失败"))?;

        Ok(result.rows_affected > 0)
    }
}
