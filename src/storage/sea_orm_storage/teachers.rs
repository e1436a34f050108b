//! 教师存储操作

use super::SeaOrmStorage;
use super::nested::{child_path, ensure_exists, resolve_faculty, resolve_user};
use super::views::{query_failed, teacher_ids_of_subject, teacher_view};
use crate::entity::faculties::Entity as Faculties;
use crate::entity::teachers::{ActiveModel, Column, Entity as Teachers, Model};
use crate::errors::{PortalError, Result};
use crate::models::{
    PaginationInfo,
    common::pagination::{normalize_page_params, page_count},
    teachers::{
        entities::Teacher,
        requests::{CreateTeacherRequest, TeacherListQuery, UpdateTeacherRequest},
        responses::TeacherListResponse,
    },
};
use crate::utils::validate::Validate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, QueryTrait, Set, TransactionTrait,
};
use tracing::info;

/// 插入教师，院系按需一并创建
pub(super) async fn insert_teacher<C: ConnectionTrait>(
    db: &C,
    req: CreateTeacherRequest,
    path: &str,
) -> Result<Model> {
    let faculty_id = resolve_faculty(db, req.faculty, &child_path(path, "faculty")).await?;
    let user_id = resolve_user(db, req.user, &child_path(path, "user")).await?;

    let model = ActiveModel {
        full_name: Set(req.full_name),
        faculty_id: Set(faculty_id),
        user_id: Set(user_id),
        ..Default::default()
    };

    model
        .insert(db)
        .await
        .map_err(|e| PortalError::from_write_error(&format!("创建教师失败 [{path}]"), e))
}

impl SeaOrmStorage {
    /// 创建教师
    pub async fn create_teacher_impl(&self, req: CreateTeacherRequest) -> Result<Teacher> {
        req.validate()?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(query_failed("开启事务失败"))?;
        let model = insert_teacher(&txn, req, "").await?;
        txn.commit().await.map_err(query_failed("提交事务失败"))?;

        info!("教师已创建: {} ({})", model.full_name, model.id);
        teacher_view(&self.db, model).await
    }

    /// 通过 ID 获取教师
    pub async fn get_teacher_impl(&self, id: i64) -> Result<Option<Teacher>> {
        let result = Teachers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_failed("查询教师失败"))?;

        match result {
            Some(model) => Ok(Some(teacher_view(&self.db, model).await?)),
            None => Ok(None),
        }
    }

    /// 分页列出教师
    pub async fn list_teachers_impl(&self, query: TeacherListQuery) -> Result<TeacherListResponse> {
        let (page, size) = normalize_page_params(query.page, query.size);

        let mut select = Teachers::find();

        if let Some(id) = query.id {
            select = select.filter(Column::Id.eq(id));
        }
        if let Some(full_name) = query.full_name {
            select = select.filter(Column::FullName.eq(full_name));
        }
        if let Some(faculty) = query.faculty {
            select = select.filter(Column::FacultyId.eq(faculty));
        }
        if let Some(user) = query.user {
            select = select.filter(Column::UserId.eq(user));
        }
        if let Some(subject) = query.subjects {
            select =
                select.filter(Column::Id.in_subquery(teacher_ids_of_subject(subject).into_query()));
        }

        select = select
            .order_by_asc(Column::FullName)
            .order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(query_failed("查询教师总数失败"))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(query_failed("查询教师列表失败"))?;

        let mut items = Vec::with_capacity(models.len());
        for model in models {
            items.push(teacher_view(&self.db, model).await?);
        }

        Ok(TeacherListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: page_count(total, size) as i64,
            },
        })
    }

    /// 更新教师信息
    pub async fn update_teacher_impl(
        &self,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>> {
        update.validate()?;

        let Some(existing) = Teachers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_failed("查询教师失败"))?
        else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        if let Some(full_name) = update.full_name {
            model.full_name = Set(full_name);
        }
        if let Some(faculty) = update.faculty {
            ensure_exists::<Faculties, _>(&self.db, faculty, "faculty").await?;
            model.faculty_id = Set(faculty);
        }
        if let Some(user) = update.user {
            model.user_id = Set(resolve_user(&self.db, user, "user").await?);
        }

        if model.is_changed() {
            model
                .update(&self.db)
                .await
                .map_err(|e| PortalError::from_write_error("更新教师失败", e))?;
        }

        self.get_teacher_impl(id).await
    }

    /// 删除教师，其课程随之删除
    pub async fn delete_teacher_impl(&self, id: i64) -> Result<bool> {
        let result = Teachers::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_failed("删除教师失败"))?;

        Ok(result.rows_affected > 0)
    }
}
