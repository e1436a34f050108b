//! 科目存储操作

use super::SeaOrmStorage;
use super::views::{query_failed, subject_view};
use crate::entity::subjects::{ActiveModel, Entity as Subjects, Model};
use crate::errors::{PortalError, Result};
use crate::models::subjects::{entities::Subject, requests::CreateSubjectRequest};
use crate::utils::validate::Validate;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set, TransactionTrait};

pub(super) async fn insert_subject<C: ConnectionTrait>(
    db: &C,
    req: CreateSubjectRequest,
    path: &str,
) -> Result<Model> {
    let model = ActiveModel {
        title: Set(req.title),
        ..Default::default()
    };

    model
        .insert(db)
        .await
        .map_err(|e| PortalError::from_write_error(&format!("创建科目失败 [{path}]"), e))
}

impl SeaOrmStorage {
    /// 创建科目
    pub async fn create_subject_impl(&self, req: CreateSubjectRequest) -> Result<Subject> {
        req.validate()?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(query_failed("开启事务失败"))?;
        let model = insert_subject(&txn, req, "").await?;
        txn.commit().await.map_err(query_failed("提交事务失败"))?;

        subject_view(&self.db, model).await
    }

    /// 通过 ID 获取科目
    pub async fn get_subject_impl(&self, id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_failed("查询科目失败"))?;

        match result {
            Some(model) => Ok(Some(subject_view(&self.db, model).await?)),
            None => Ok(None),
        }
    }
}
