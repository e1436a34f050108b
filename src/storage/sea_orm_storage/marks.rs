//! 成绩存储操作

use super::SeaOrmStorage;
use super::nested::{child_path, resolve_lesson, resolve_student};
use super::views::{mark_view, query_failed};
use crate::entity::marks::{ActiveModel, Column, Entity as Marks, Model};
use crate::errors::{PortalError, Result};
use crate::models::{
    PaginationInfo,
    common::pagination::{normalize_page_params, page_count},
    marks::{
        entities::Mark,
        requests::{CreateMarkRequest, MarkListQuery, UpdateMarkRequest},
        responses::MarkListResponse,
    },
};
use crate::utils::validate::{Validate, normalize_presence};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;

/// 插入成绩，学生与课程按需一并创建
pub(super) async fn insert_mark<C: ConnectionTrait>(
    db: &C,
    req: CreateMarkRequest,
    path: &str,
) -> Result<Model> {
    let student_id = resolve_student(db, req.student, &child_path(path, "student")).await?;
    let lesson_id = resolve_lesson(db, req.lesson, &child_path(path, "lesson")).await?;
    let now = chrono::Utc::now().timestamp();

    let model = ActiveModel {
        mark: Set(req.mark),
        presence: Set(normalize_presence(req.presence)),
        student_id: Set(student_id),
        lesson_id: Set(lesson_id),
        created: Set(now),
        modified: Set(now),
        ..Default::default()
    };

    model
        .insert(db)
        .await
        .map_err(|e| PortalError::from_write_error(&format!("创建成绩失败 [{path}]"), e))
}

impl SeaOrmStorage {
    /// 创建成绩
    pub async fn create_mark_impl(&self, req: CreateMarkRequest) -> Result<Mark> {
        req.validate()?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(query_failed("开启事务失败"))?;
        let model = insert_mark(&txn, req, "").await?;
        txn.commit().await.map_err(query_failed("提交事务失败"))?;

        info!(
            "成绩已创建: 学生 {} 课程 {} ({})",
            model.student_id, model.lesson_id, model.id
        );
        mark_view(&self.db, model).await
    }

    /// 通过 ID 获取成绩
    pub async fn get_mark_impl(&self, id: i64) -> Result<Option<Mark>> {
        let result = Marks::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_failed("查询成绩失败"))?;

        match result {
            Some(model) => Ok(Some(mark_view(&self.db, model).await?)),
            None => Ok(None),
        }
    }

    /// 分页列出成绩
    pub async fn list_marks_impl(&self, query: MarkListQuery) -> Result<MarkListResponse> {
        let (page, size) = normalize_page_params(query.page, query.size);

        let mut select = Marks::find();

        if let Some(id) = query.id {
            select = select.filter(Column::Id.eq(id));
        }
        if let Some(mark) = query.mark {
            select = select.filter(Column::Mark.eq(mark));
        }
        if let Some(presence) = query.presence {
            select = select.filter(Column::Presence.eq(presence));
        }
        if let Some(created) = query.created {
            select = select.filter(Column::Created.eq(created.timestamp()));
        }
        if let Some(modified) = query.modified {
            select = select.filter(Column::Modified.eq(modified.timestamp()));
        }
        if let Some(student) = query.student {
            select = select.filter(Column::StudentId.eq(student));
        }
        if let Some(lesson) = query.lesson {
            select = select.filter(Column::LessonId.eq(lesson));
        }

        select = select
            .order_by_asc(Column::LessonId)
            .order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(query_failed("查询成绩总数失败"))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(query_failed("查询成绩列表失败"))?;

        let mut items = Vec::with_capacity(models.len());
        for model in models {
            items.push(mark_view(&self.db, model).await?);
        }

        Ok(MarkListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: page_count(total, size) as i64,
            },
        })
    }

    /// 更新成绩，按合并后的状态重新校验并刷新修改时间
    pub async fn update_mark_impl(
        &self,
        id: i64,
        update: UpdateMarkRequest,
    ) -> Result<Option<Mark>> {
        let Some(existing) = Marks::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_failed("查询成绩失败"))?
        else {
            return Ok(None);
        };

        let (mark, presence) = update.merged(existing.mark, existing.presence.clone());
        update.validate_merged(mark, presence.as_deref())?;

        let mut model = existing.into_active_model();
        model.mark = Set(mark);
        model.presence = Set(presence);
        model.modified = Set(chrono::Utc::now().timestamp());

        model
            .update(&self.db)
            .await
            .map_err(|e| PortalError::from_write_error("更新成绩失败", e))?;

        self.get_mark_impl(id).await
    }

    /// 删除成绩
    pub async fn delete_mark_impl(&self, id: i64) -> Result<bool> {
        let result = Marks::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_failed("删除成绩失败"))?;

        Ok(result.rows_affected > 0)
    }
}
