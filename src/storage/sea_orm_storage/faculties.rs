//! 院系存储操作

use super::SeaOrmStorage;
use super::views::query_failed;
use crate::entity::faculties::{ActiveModel, Column, Entity as Faculties, Model};
use crate::errors::{PortalError, Result};
use crate::models::{
    PaginationInfo,
    common::pagination::{normalize_page_params, page_count},
    faculties::{
        entities::Faculty,
        requests::{CreateFacultyRequest, FacultyListQuery, UpdateFacultyRequest},
        responses::FacultyListResponse,
    },
};
use crate::utils::validate::Validate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;

/// 插入院系记录
pub(super) async fn insert_faculty<C: ConnectionTrait>(
    db: &C,
    req: CreateFacultyRequest,
    path: &str,
) -> Result<Model> {
    let model = ActiveModel {
        title: Set(req.title),
        description: Set(req.description),
        ..Default::default()
    };

    model
        .insert(db)
        .await
        .map_err(|e| PortalError::from_write_error(&format!("创建院系失败 [{path}]"), e))
}

impl SeaOrmStorage {
    /// 创建院系
    pub async fn create_faculty_impl(&self, req: CreateFacultyRequest) -> Result<Faculty> {
        req.validate()?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(query_failed("开启事务失败"))?;
        let model = insert_faculty(&txn, req, "").await?;
        txn.commit().await.map_err(query_failed("提交事务失败"))?;

        info!("院系已创建: {} ({})", model.title, model.id);
        Ok(model.into_faculty())
    }

    /// 通过 ID 获取院系
    pub async fn get_faculty_impl(&self, id: i64) -> Result<Option<Faculty>> {
        let result = Faculties::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_failed("查询院系失败"))?;

        Ok(result.map(|m| m.into_faculty()))
    }

    /// 分页列出院系
    pub async fn list_faculties_impl(&self, query: FacultyListQuery) -> Result<FacultyListResponse> {
        let (page, size) = normalize_page_params(query.page, query.size);

        let mut select = Faculties::find();

        if let Some(id) = query.id {
            select = select.filter(Column::Id.eq(id));
        }
        if let Some(title) = query.title {
            select = select.filter(Column::Title.eq(title));
        }
        if let Some(description) = query.description {
            select = select.filter(Column::Description.eq(description));
        }

        select = select.order_by_asc(Column::Title).order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(query_failed("查询院系总数失败"))?;
        let faculties = paginator
            .fetch_page(page - 1)
            .await
            .map_err(query_failed("查询院系列表失败"))?;

        Ok(FacultyListResponse {
            items: faculties.into_iter().map(|m| m.into_faculty()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: page_count(total, size) as i64,
            },
        })
    }

    /// 更新院系信息
    pub async fn update_faculty_impl(
        &self,
        id: i64,
        update: UpdateFacultyRequest,
    ) -> Result<Option<Faculty>> {
        update.validate()?;

        let Some(existing) = Faculties::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_failed("查询院系失败"))?
        else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(description) = update.description {
            model.description = Set(description);
        }

        if model.is_changed() {
            model
                .update(&self.db)
                .await
                .map_err(|e| PortalError::from_write_error("更新院系失败", e))?;
        }

        self.get_faculty_impl(id).await
    }

    /// 删除院系，学生组与教师随之删除
    pub async fn delete_faculty_impl(&self, id: i64) -> Result<bool> {
        let result = Faculties::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_failed("删除院系失败"))?;

        Ok(result.rows_affected > 0)
    }
}
