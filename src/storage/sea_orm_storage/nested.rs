//! 嵌套上级对象的解析
//!
//! 所有函数都在调用方的事务连接上执行，任一步失败整棵树回滚。

use sea_orm::{ConnectionTrait, EntityTrait, PrimaryKeyTrait};

use super::views::query_failed;
use super::{faculties, groups, lessons, students, subjects, teachers};
use crate::entity;
use crate::errors::{PortalError, Result};
use crate::models::{
    Nested, faculties::requests::CreateFacultyRequest, groups::requests::CreateGroupRequest,
    lessons::requests::CreateLessonRequest, students::requests::CreateStudentRequest,
    subjects::requests::CreateSubjectRequest, teachers::requests::CreateTeacherRequest,
};

/// 拼接带点号的字段路径
pub(super) fn child_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{prefix}.{field}")
    }
}

/// 引用的记录不存在，消息以字段路径开头
pub(super) fn relation_missing(path: &str, id: i64) -> PortalError {
    PortalError::relation_missing(format!(
        "{path}: Invalid pk \"{id}\" - object does not exist."
    ))
}

/// 确认被引用的记录存在
pub(super) async fn ensure_exists<E, C>(db: &C, id: i64, path: &str) -> Result<()>
where
    E: EntityTrait,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = i64>,
    C: ConnectionTrait,
{
    let found = E::find_by_id(id)
        .one(db)
        .await
        .map_err(query_failed("查询关联记录失败"))?;

    match found {
        Some(_) => Ok(()),
        None => Err(relation_missing(path, id)),
    }
}

pub(super) async fn resolve_faculty<C: ConnectionTrait>(
    db: &C,
    nested: Nested<CreateFacultyRequest>,
    path: &str,
) -> Result<i64> {
    match nested {
        Nested::Existing { id } => {
            ensure_exists::<entity::faculties::Entity, _>(db, id, path).await?;
            Ok(id)
        }
        Nested::New(req) => Ok(faculties::insert_faculty(db, req, path).await?.id),
    }
}

pub(super) async fn resolve_group<C: ConnectionTrait>(
    db: &C,
    nested: Nested<CreateGroupRequest>,
    path: &str,
) -> Result<i64> {
    match nested {
        Nested::Existing { id } => {
            ensure_exists::<entity::groups::Entity, _>(db, id, path).await?;
            Ok(id)
        }
        Nested::New(req) => Ok(groups::insert_group(db, req, path).await?.id),
    }
}

pub(super) async fn resolve_subject<C: ConnectionTrait>(
    db: &C,
    nested: Nested<CreateSubjectRequest>,
    path: &str,
) -> Result<i64> {
    match nested {
        Nested::Existing { id } => {
            ensure_exists::<entity::subjects::Entity, _>(db, id, path).await?;
            Ok(id)
        }
        Nested::New(req) => Ok(subjects::insert_subject(db, req, path).await?.id),
    }
}

pub(super) async fn resolve_teacher<C: ConnectionTrait>(
    db: &C,
    nested: Nested<CreateTeacherRequest>,
    path: &str,
) -> Result<i64> {
    match nested {
        Nested::Existing { id } => {
            ensure_exists::<entity::teachers::Entity, _>(db, id, path).await?;
            Ok(id)
        }
        Nested::New(req) => Ok(teachers::insert_teacher(db, req, path).await?.id),
    }
}

pub(super) async fn resolve_student<C: ConnectionTrait>(
    db: &C,
    nested: Nested<CreateStudentRequest>,
    path: &str,
) -> Result<i64> {
    match nested {
        Nested::Existing { id } => {
            ensure_exists::<entity::students::Entity, _>(db, id, path).await?;
            Ok(id)
        }
        Nested::New(req) => Ok(students::insert_student(db, req, path).await?.id),
    }
}

pub(super) async fn resolve_lesson<C: ConnectionTrait>(
    db: &C,
    nested: Nested<CreateLessonRequest>,
    path: &str,
) -> Result<i64> {
    match nested {
        Nested::Existing { id } => {
            ensure_exists::<entity::lessons::Entity, _>(db, id, path).await?;
            Ok(id)
        }
        Nested::New(req) => Ok(lessons::insert_lesson(db, req, path).await?.id),
    }
}

/// 可选的账号关联
pub(super) async fn resolve_user<C: ConnectionTrait>(
    db: &C,
    user: Option<i64>,
    path: &str,
) -> Result<Option<i64>> {
    if let Some(id) = user {
        ensure_exists::<entity::users::Entity, _>(db, id, path).await?;
    }
    Ok(user)
}
