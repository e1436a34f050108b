//! 课程存储操作

use std::collections::BTreeSet;

use super::SeaOrmStorage;
use super::nested::{child_path, ensure_exists, resolve_subject, resolve_teacher};
use super::views::{group_ids_of_lesson, lesson_ids_of_group, lesson_view, mark_view, query_failed};
use crate::entity::groups::Entity as Groups;
use crate::entity::lesson_groups::{
    ActiveModel as LessonGroupActiveModel, Column as LessonGroupColumn, Entity as LessonGroups,
};
use crate::entity::lessons::{ActiveModel, Column, Entity as Lessons, Model};
use crate::entity::marks::{Column as MarkColumn, Entity as Marks};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::entity::subjects::Entity as Subjects;
use crate::entity::teachers::Entity as Teachers;
use crate::errors::{PortalError, Result};
use crate::models::{
    PaginationInfo,
    common::pagination::{normalize_page_params, page_count},
    lessons::{
        entities::Lesson,
        requests::{CreateLessonRequest, LessonListQuery, UpdateLessonRequest},
        responses::LessonListResponse,
    },
    marks::entities::Mark,
    students::entities::StudentChoice,
};
use crate::utils::validate::{Validate, parse_day, parse_time};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, QueryTrait, Set, TransactionTrait,
};
use tracing::info;

fn field_invalid(path: &str, field: &str, msg: &str) -> PortalError {
    PortalError::validation(format!("{}: {msg}", child_path(path, field)))
}

/// 写入课程的学生组关联，重复 ID 只记一次
async fn insert_memberships<C: ConnectionTrait>(
    db: &C,
    lesson_id: i64,
    groups: Vec<i64>,
    path: &str,
) -> Result<()> {
    let groups: BTreeSet<i64> = groups.into_iter().collect();
    if groups.is_empty() {
        return Ok(());
    }

    let groups_path = child_path(path, "groups");
    for group_id in &groups {
        ensure_exists::<Groups, _>(db, *group_id, &groups_path).await?;
    }

    let rows = groups.into_iter().map(|group_id| LessonGroupActiveModel {
        lesson_id: Set(lesson_id),
        group_id: Set(group_id),
    });

    LessonGroups::insert_many(rows)
        .exec_without_returning(db)
        .await
        .map_err(|e| PortalError::from_write_error("写入课程学生组失败", e))?;

    Ok(())
}

/// 插入课程，科目与教师按需一并创建
pub(super) async fn insert_lesson<C: ConnectionTrait>(
    db: &C,
    req: CreateLessonRequest,
    path: &str,
) -> Result<Model> {
    let day = parse_day(&req.day).map_err(|msg| field_invalid(path, "day", msg))?;
    let precise_time =
        parse_time(&req.precise_time).map_err(|msg| field_invalid(path, "precise_time", msg))?;

    let subject_id = resolve_subject(db, req.subject, &child_path(path, "subject")).await?;
    let teacher_id = resolve_teacher(db, req.teacher, &child_path(path, "teacher")).await?;

    let model = ActiveModel {
        day: Set(day),
        precise_time: Set(precise_time),
        subject_id: Set(subject_id),
        teacher_id: Set(teacher_id),
        ..Default::default()
    };

    let lesson = model
        .insert(db)
        .await
        .map_err(|e| PortalError::from_write_error(&format!("创建课程失败 [{path}]"), e))?;

    insert_memberships(db, lesson.id, req.groups, path).await?;

    Ok(lesson)
}

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_lesson_impl(&self, req: CreateLessonRequest) -> Result<Lesson> {
        req.validate()?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(query_failed("开启事务失败"))?;
        let model = insert_lesson(&txn, req, "").await?;
        txn.commit().await.map_err(query_failed("提交事务失败"))?;

        info!("课程已创建: {} {} ({})", model.day, model.precise_time, model.id);
        lesson_view(&self.db, model).await
    }

    /// 通过 ID 获取课程
    pub async fn get_lesson_impl(&self, id: i64) -> Result<Option<Lesson>> {
        let result = Lessons::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_failed("查询课程失败"))?;

        match result {
            Some(model) => Ok(Some(lesson_view(&self.db, model).await?)),
            None => Ok(None),
        }
    }

    /// 分页列出课程
    pub async fn list_lessons_impl(&self, query: LessonListQuery) -> Result<LessonListResponse> {
        let (page, size) = normalize_page_params(query.page, query.size);

        let mut select = Lessons::find();

        if let Some(id) = query.id {
            select = select.filter(Column::Id.eq(id));
        }
        if let Some(day) = query.day {
            select = select.filter(Column::Day.eq(day));
        }
        if let Some(precise_time) = query.precise_time {
            select = select.filter(Column::PreciseTime.eq(precise_time));
        }
        if let Some(subject) = query.subject {
            select = select.filter(Column::SubjectId.eq(subject));
        }
        if let Some(teacher) = query.teacher {
            select = select.filter(Column::TeacherId.eq(teacher));
        }
        if let Some(group) = query.groups {
            select = select.filter(Column::Id.in_subquery(lesson_ids_of_group(group).into_query()));
        }

        select = select.order_by_asc(Column::Day).order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(query_failed("查询课程总数失败"))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(query_failed("查询课程列表失败"))?;

        let mut items = Vec::with_capacity(models.len());
        for model in models {
            items.push(lesson_view(&self.db, model).await?);
        }

        Ok(LessonListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: page_count(total, size) as i64,
            },
        })
    }

    /// 更新课程，groups 给出时整体替换
    pub async fn update_lesson_impl(
        &self,
        id: i64,
        update: UpdateLessonRequest,
    ) -> Result<Option<Lesson>> {
        update.validate()?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(query_failed("开启事务失败"))?;

        let Some(existing) = Lessons::find_by_id(id)
            .one(&txn)
            .await
            .map_err(query_failed("查询课程失败"))?
        else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        if let Some(day) = update.day {
            model.day = Set(parse_day(&day).map_err(|msg| field_invalid("", "day", msg))?);
        }
        if let Some(precise_time) = update.precise_time {
            model.precise_time = Set(parse_time(&precise_time)
                .map_err(|msg| field_invalid("", "precise_time", msg))?);
        }
        if let Some(subject) = update.subject {
            ensure_exists::<Subjects, _>(&txn, subject, "subject").await?;
            model.subject_id = Set(subject);
        }
        if let Some(teacher) = update.teacher {
            ensure_exists::<Teachers, _>(&txn, teacher, "teacher").await?;
            model.teacher_id = Set(teacher);
        }

        if model.is_changed() {
            model
                .update(&txn)
                .await
                .map_err(|e| PortalError::from_write_error("更新课程失败", e))?;
        }

        if let Some(groups) = update.groups {
            LessonGroups::delete_many()
                .filter(LessonGroupColumn::LessonId.eq(id))
                .exec(&txn)
                .await
                .map_err(query_failed("清除课程学生组失败"))?;
            insert_memberships(&txn, id, groups, "").await?;
        }

        txn.commit().await.map_err(query_failed("提交事务失败"))?;

        self.get_lesson_impl(id).await
    }

    /// 删除课程，成绩、作业与学生组关联随之删除
    pub async fn delete_lesson_impl(&self, id: i64) -> Result<bool> {
        let result = Lessons::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_failed("删除课程失败"))?;

        Ok(result.rows_affected > 0)
    }

    /// 课程的全部成绩
    pub async fn list_lesson_marks_impl(&self, lesson_id: i64) -> Result<Vec<Mark>> {
        let models = Marks::find()
            .filter(MarkColumn::LessonId.eq(lesson_id))
            .order_by_asc(MarkColumn::Id)
            .all(&self.db)
            .await
            .map_err(query_failed("查询课程成绩失败"))?;

        let mut marks = Vec::with_capacity(models.len());
        for model in models {
            marks.push(mark_view(&self.db, model).await?);
        }
        Ok(marks)
    }

    /// 课程所在学生组的全部学生
    pub async fn list_lesson_students_impl(&self, lesson_id: i64) -> Result<Vec<StudentChoice>> {
        let students = Students::find()
            .filter(StudentColumn::GroupId.in_subquery(group_ids_of_lesson(lesson_id).into_query()))
            .order_by_asc(StudentColumn::FullName)
            .order_by_asc(StudentColumn::Id)
            .all(&self.db)
            .await
            .map_err(query_failed("查询课程学生失败"))?;

        Ok(students
            .into_iter()
            .map(|s| StudentChoice {
                id: s.id,
                full_name: s.full_name,
            })
            .collect())
    }
}
