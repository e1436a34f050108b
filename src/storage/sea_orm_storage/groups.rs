//! 学生组存储操作

use super::SeaOrmStorage;
use super::nested::{child_path, ensure_exists, resolve_faculty};
use super::views::{group_ids_of_lesson, group_ids_of_subject, group_view, query_failed};
use crate::entity::faculties::Entity as Faculties;
use crate::entity::groups::{ActiveModel, Column, Entity as Groups, Model};
use crate::errors::{PortalError, Result};
use crate::models::{
    PaginationInfo,
    common::pagination::{normalize_page_params, page_count},
    groups::{
        entities::Group,
        requests::{CreateGroupRequest, GroupListQuery, UpdateGroupRequest},
        responses::GroupListResponse,
    },
};
use crate::utils::validate::Validate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, QueryTrait, Set, TransactionTrait,
};
use tracing::info;

/// 插入学生组，院系按需一并创建
pub(super) async fn insert_group<C: ConnectionTrait>(
    db: &C,
    req: CreateGroupRequest,
    path: &str,
) -> Result<Model> {
    let faculty_id = resolve_faculty(db, req.faculty, &child_path(path, "faculty")).await?;

    let model = ActiveModel {
        title: Set(req.title),
        faculty_id: Set(faculty_id),
        ..Default::default()
    };

    model
        .insert(db)
        .await
        .map_err(|e| PortalError::from_write_error(&format!("创建学生组失败 [{path}]"), e))
}

impl SeaOrmStorage {
    /// 创建学生组
    pub async fn create_group_impl(&self, req: CreateGroupRequest) -> Result<Group> {
        req.validate()?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(query_failed("开启事务失败"))?;
        let model = insert_group(&txn, req, "").await?;
        txn.commit().await.map_err(query_failed("提交事务失败"))?;

        info!("学生组已创建: {} ({})", model.title, model.id);
        group_view(&self.db, model).await
    }

    /// 通过 ID 获取学生组
    pub async fn get_group_impl(&self, id: i64) -> Result<Option<Group>> {
        let result = Groups::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_failed("查询学生组失败"))?;

        match result {
            Some(model) => Ok(Some(group_view(&self.db, model).await?)),
            None => Ok(None),
        }
    }

    /// 分页列出学生组
    pub async fn list_groups_impl(&self, query: GroupListQuery) -> Result<GroupListResponse> {
        let (page, size) = normalize_page_params(query.page, query.size);

        let mut select = Groups::find();

        if let Some(id) = query.id {
            select = select.filter(Column::Id.eq(id));
        }
        if let Some(title) = query.title {
            select = select.filter(Column::Title.eq(title));
        }
        if let Some(faculty) = query.faculty {
            select = select.filter(Column::FacultyId.eq(faculty));
        }
        if let Some(lesson) = query.lessons {
            select = select.filter(Column::Id.in_subquery(group_ids_of_lesson(lesson).into_query()));
        }
        if let Some(subject) = query.subjects {
            select =
                select.filter(Column::Id.in_subquery(group_ids_of_subject(subject).into_query()));
        }

        select = select.order_by_asc(Column::Title).order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(query_failed("查询学生组总数失败"))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(query_failed("查询学生组列表失败"))?;

        let mut items = Vec::with_capacity(models.len());
        for model in models {
            items.push(group_view(&self.db, model).await?);
        }

        Ok(GroupListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: page_count(total, size) as i64,
            },
        })
    }

    /// 更新学生组信息
    pub async fn update_group_impl(
        &self,
        id: i64,
        update: UpdateGroupRequest,
    ) -> Result<Option<Group>> {
        update.validate()?;

        let Some(existing) = Groups::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_failed("查询学生组失败"))?
        else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(faculty) = update.faculty {
            ensure_exists::<Faculties, _>(&self.db, faculty, "faculty").await?;
            model.faculty_id = Set(faculty);
        }

        if model.is_changed() {
            model
                .update(&self.db)
                .await
                .map_err(|e| PortalError::from_write_error("更新学生组失败", e))?;
        }

        self.get_group_impl(id).await
    }

    /// 删除学生组，学生与课程关联随之删除
    pub async fn delete_group_impl(&self, id: i64) -> Result<bool> {
        let result = Groups::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_failed("删除学生组失败"))?;

        Ok(result.rows_affected > 0)
    }
}
