//! 学生存储操作

use super::SeaOrmStorage;
use super::nested::{child_path, resolve_group, resolve_user};
use super::views::{query_failed, student_view};
use crate::entity::students::{ActiveModel, Entity as Students, Model};
use crate::errors::{PortalError, Result};
use crate::models::students::{entities::Student, requests::CreateStudentRequest};
use crate::utils::validate::Validate;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set, TransactionTrait};
use tracing::info;

/// 插入学生，学生组按需一并创建
pub(super) async fn insert_student<C: ConnectionTrait>(
    db: &C,
    req: CreateStudentRequest,
    path: &str,
) -> Result<Model> {
    let group_id = resolve_group(db, req.group, &child_path(path, "group")).await?;
    let user_id = resolve_user(db, req.user, &child_path(path, "user")).await?;

    let model = ActiveModel {
        full_name: Set(req.full_name),
        group_id: Set(group_id),
        user_id: Set(user_id),
        ..Default::default()
    };

    model
        .insert(db)
        .await
        .map_err(|e| PortalError::from_write_error(&format!("创建学生失败 [{path}]"), e))
}

impl SeaOrmStorage {
    /// 创建学生
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        req.validate()?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(query_failed("开启事务失败"))?;
        let model = insert_student(&txn, req, "").await?;
        txn.commit().await.map_err(query_failed("提交事务失败"))?;

        info!("学生已创建: {} ({})", model.full_name, model.id);
        student_view(&self.db, model).await
    }

    /// 通过 ID 获取学生
    pub async fn get_student_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_failed("查询学生失败"))?;

        match result {
            Some(model) => Ok(Some(student_view(&self.db, model).await?)),
            None => Ok(None),
        }
    }
}
