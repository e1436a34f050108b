//! 实体展示形式的组装
//!
//! 数据库模型只保存外键，这里按需加载上级对象和派生的多对多 ID 列表。

use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    QueryTrait, Select,
};

use crate::entity::{
    faculties, groups, hometasks, lesson_groups, lessons, marks, students, subjects, teachers,
};
use crate::errors::{PortalError, Result};
use crate::models::{
    groups::entities::Group, hometasks::entities::Hometask, lessons::entities::Lesson,
    marks::entities::Mark, students::entities::Student, subjects::entities::Subject,
    teachers::entities::Teacher,
};

pub(super) fn query_failed(context: &'static str) -> impl Fn(DbErr) -> PortalError {
    move |e| PortalError::database_operation(format!("{context}: {e}"))
}

fn dangling(kind: &str, id: i64) -> PortalError {
    PortalError::database_operation(format!("{kind} {id} 不存在"))
}

pub(super) fn timestamp(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}

// ---- 派生关联的子查询 ----

/// 学生组参加的课程 ID
pub(super) fn lesson_ids_of_group(group_id: i64) -> Select<lesson_groups::Entity> {
    lesson_groups::Entity::find()
        .select_only()
        .column(lesson_groups::Column::LessonId)
        .filter(lesson_groups::Column::GroupId.eq(group_id))
}

/// 课程包含的学生组 ID
pub(super) fn group_ids_of_lesson(lesson_id: i64) -> Select<lesson_groups::Entity> {
    lesson_groups::Entity::find()
        .select_only()
        .column(lesson_groups::Column::GroupId)
        .filter(lesson_groups::Column::LessonId.eq(lesson_id))
}

/// 学生组通过课程学习的科目 ID
pub(super) fn subject_ids_of_group(group_id: i64) -> Select<lessons::Entity> {
    lessons::Entity::find()
        .select_only()
        .column(lessons::Column::SubjectId)
        .filter(lessons::Column::Id.in_subquery(lesson_ids_of_group(group_id).into_query()))
}

/// 学习某科目的学生组 ID
pub(super) fn group_ids_of_subject(subject_id: i64) -> Select<lesson_groups::Entity> {
    let lesson_ids = lessons::Entity::find()
        .select_only()
        .column(lessons::Column::Id)
        .filter(lessons::Column::SubjectId.eq(subject_id));

    lesson_groups::Entity::find()
        .select_only()
        .column(lesson_groups::Column::GroupId)
        .filter(lesson_groups::Column::LessonId.in_subquery(lesson_ids.into_query()))
}

/// 讲授某科目的教师 ID
pub(super) fn teacher_ids_of_subject(subject_id: i64) -> Select<lessons::Entity> {
    lessons::Entity::find()
        .select_only()
        .column(lessons::Column::TeacherId)
        .filter(lessons::Column::SubjectId.eq(subject_id))
}

/// 教师讲授的科目 ID
pub(super) fn subject_ids_of_teacher(teacher_id: i64) -> Select<lessons::Entity> {
    lessons::Entity::find()
        .select_only()
        .column(lessons::Column::SubjectId)
        .filter(lessons::Column::TeacherId.eq(teacher_id))
}

/// 教师讲授的课程 ID
pub(super) fn lesson_ids_of_teacher(teacher_id: i64) -> Select<lessons::Entity> {
    lessons::Entity::find()
        .select_only()
        .column(lessons::Column::Id)
        .filter(lessons::Column::TeacherId.eq(teacher_id))
}

/// 学习的科目与该教师所授科目有交集的学生组 ID
pub(super) fn group_ids_sharing_subjects(teacher_id: i64) -> Select<lesson_groups::Entity> {
    let lesson_ids = lessons::Entity::find()
        .select_only()
        .column(lessons::Column::Id)
        .filter(
            lessons::Column::SubjectId.in_subquery(subject_ids_of_teacher(teacher_id).into_query()),
        );

    lesson_groups::Entity::find()
        .select_only()
        .column(lesson_groups::Column::GroupId)
        .filter(lesson_groups::Column::LessonId.in_subquery(lesson_ids.into_query()))
}

async fn fetch_ids<C, E>(db: &C, select: Select<E>, column: E::Column) -> Result<Vec<i64>>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    select
        .distinct()
        .order_by_asc(column)
        .into_tuple::<i64>()
        .all(db)
        .await
        .map_err(query_failed("查询关联 ID 失败"))
}

// ---- 展示形式 ----

pub(super) async fn subject_view<C: ConnectionTrait>(
    db: &C,
    model: subjects::Model,
) -> Result<Subject> {
    let groups = fetch_ids(
        db,
        group_ids_of_subject(model.id),
        lesson_groups::Column::GroupId,
    )
    .await?;
    let teachers = fetch_ids(
        db,
        teacher_ids_of_subject(model.id),
        lessons::Column::TeacherId,
    )
    .await?;

    Ok(Subject {
        id: model.id,
        title: model.title,
        groups,
        teachers,
    })
}

pub(super) async fn teacher_view<C: ConnectionTrait>(
    db: &C,
    model: teachers::Model,
) -> Result<Teacher> {
    let faculty = faculties::Entity::find_by_id(model.faculty_id)
        .one(db)
        .await
        .map_err(query_failed("查询院系失败"))?
        .ok_or_else(|| dangling("faculty", model.faculty_id))?;
    let subjects = fetch_ids(
        db,
        subject_ids_of_teacher(model.id),
        lessons::Column::SubjectId,
    )
    .await?;

    Ok(Teacher {
        id: model.id,
        full_name: model.full_name,
        faculty: faculty.into_faculty(),
        subjects,
        user: model.user_id,
    })
}

pub(super) async fn group_view<C: ConnectionTrait>(db: &C, model: groups::Model) -> Result<Group> {
    let faculty = faculties::Entity::find_by_id(model.faculty_id)
        .one(db)
        .await
        .map_err(query_failed("查询院系失败"))?
        .ok_or_else(|| dangling("faculty", model.faculty_id))?;
    let lessons = fetch_ids(
        db,
        lesson_ids_of_group(model.id),
        lesson_groups::Column::LessonId,
    )
    .await?;
    let subjects = fetch_ids(
        db,
        subject_ids_of_group(model.id),
        lessons::Column::SubjectId,
    )
    .await?;

    Ok(Group {
        id: model.id,
        title: model.title,
        faculty: faculty.into_faculty(),
        lessons,
        subjects,
    })
}

pub(super) async fn student_view<C: ConnectionTrait>(
    db: &C,
    model: students::Model,
) -> Result<Student> {
    let group = groups::Entity::find_by_id(model.group_id)
        .one(db)
        .await
        .map_err(query_failed("查询学生组失败"))?
        .ok_or_else(|| dangling("group", model.group_id))?;

    Ok(Student {
        id: model.id,
        full_name: model.full_name,
        group: group_view(db, group).await?,
        user: model.user_id,
    })
}

pub(super) async fn lesson_view<C: ConnectionTrait>(
    db: &C,
    model: lessons::Model,
) -> Result<Lesson> {
    let subject = subjects::Entity::find_by_id(model.subject_id)
        .one(db)
        .await
        .map_err(query_failed("查询科目失败"))?
        .ok_or_else(|| dangling("subject", model.subject_id))?;
    let teacher = teachers::Entity::find_by_id(model.teacher_id)
        .one(db)
        .await
        .map_err(query_failed("查询教师失败"))?
        .ok_or_else(|| dangling("teacher", model.teacher_id))?;
    let groups = fetch_ids(
        db,
        group_ids_of_lesson(model.id),
        lesson_groups::Column::GroupId,
    )
    .await?;

    Ok(Lesson {
        id: model.id,
        day: model.day,
        precise_time: model.precise_time,
        subject: subject_view(db, subject).await?,
        teacher: teacher_view(db, teacher).await?,
        groups,
    })
}

pub(super) async fn mark_view<C: ConnectionTrait>(db: &C, model: marks::Model) -> Result<Mark> {
    let student = students::Entity::find_by_id(model.student_id)
        .one(db)
        .await
        .map_err(query_failed("查询学生失败"))?
        .ok_or_else(|| dangling("student", model.student_id))?;
    let lesson = lessons::Entity::find_by_id(model.lesson_id)
        .one(db)
        .await
        .map_err(query_failed("查询课程失败"))?
        .ok_or_else(|| dangling("lesson", model.lesson_id))?;

    Ok(Mark {
        id: model.id,
        mark: model.mark,
        presence: model.presence,
        created: timestamp(model.created),
        modified: timestamp(model.modified),
        student: student_view(db, student).await?,
        lesson: lesson_view(db, lesson).await?,
    })
}

pub(super) async fn hometask_view<C: ConnectionTrait>(
    db: &C,
    model: hometasks::Model,
) -> Result<Hometask> {
    let lesson = lessons::Entity::find_by_id(model.lesson_id)
        .one(db)
        .await
        .map_err(query_failed("查询课程失败"))?
        .ok_or_else(|| dangling("lesson", model.lesson_id))?;

    Ok(Hometask {
        id: model.id,
        task: model.task,
        created: timestamp(model.created),
        lesson: lesson_view(db, lesson).await?,
    })
}
