//! 门户目录页与详情页的查询
//!
//! 可见范围由 `visibility::resolve` 给出，这里把范围翻译成查询条件。

use super::SeaOrmStorage;
use super::views::{
    group_ids_sharing_subjects, group_view, hometask_view, lesson_ids_of_group,
    lesson_ids_of_teacher, lesson_view, mark_view, query_failed, student_view, subject_view,
    teacher_view,
};
use crate::entity::prelude::*;
use crate::entity::{faculties, groups, hometasks, lessons, marks, students, subjects, teachers};
use crate::errors::Result;
use crate::models::{
    PaginationInfo,
    common::pagination::{page_count, resolve_page_number},
    pages::{
        entities::EntityView,
        responses::{CatalogPage, HomeContext},
    },
    users::entities::Viewer,
};
use crate::visibility::{EntityKind, Scope, resolve};
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QueryTrait,
    Select,
};
use tracing::debug;

/// 可见范围对应的查询条件，`Nothing` 返回 None
fn scope_condition(scope: Scope) -> Option<Condition> {
    let condition = match scope {
        Scope::All => Condition::all(),
        Scope::Nothing => return None,
        Scope::Group(group_id) => Condition::all().add(groups::Column::Id.eq(group_id)),
        Scope::LessonsOfGroup(group_id) => Condition::all()
            .add(lessons::Column::Id.in_subquery(lesson_ids_of_group(group_id).into_query())),
        Scope::MarksOfStudent(student_id) => {
            Condition::all().add(marks::Column::StudentId.eq(student_id))
        }
        Scope::HometasksOfGroup(group_id) => Condition::all().add(
            hometasks::Column::LessonId.in_subquery(lesson_ids_of_group(group_id).into_query()),
        ),
        Scope::GroupsSharingSubjects(teacher_id) => Condition::all().add(
            groups::Column::Id.in_subquery(group_ids_sharing_subjects(teacher_id).into_query()),
        ),
        Scope::LessonsOfTeacher(teacher_id) => {
            Condition::all().add(lessons::Column::TeacherId.eq(teacher_id))
        }
        Scope::MarksOfTeacher(teacher_id) => Condition::all().add(
            marks::Column::LessonId.in_subquery(lesson_ids_of_teacher(teacher_id).into_query()),
        ),
        Scope::HometasksOfTeacher(teacher_id) => Condition::all().add(
            hometasks::Column::LessonId
                .in_subquery(lesson_ids_of_teacher(teacher_id).into_query()),
        ),
    };
    Some(condition)
}

fn empty_page(kind: EntityKind, page_size: u64) -> CatalogPage {
    CatalogPage {
        kind,
        items: Vec::new(),
        pagination: PaginationInfo {
            page: 1,
            page_size: page_size as i64,
            total: 0,
            total_pages: 1,
        },
    }
}

impl SeaOrmStorage {
    /// 首页统计
    pub async fn count_dashboard_impl(&self) -> Result<HomeContext> {
        let faculties = Faculties::find()
            .count(&self.db)
            .await
            .map_err(query_failed("统计院系数量失败"))?;
        let groups = Groups::find()
            .count(&self.db)
            .await
            .map_err(query_failed("统计学生组数量失败"))?;
        let teachers = Teachers::find()
            .count(&self.db)
            .await
            .map_err(query_failed("统计教师数量失败"))?;
        let students = Students::find()
            .count(&self.db)
            .await
            .map_err(query_failed("统计学生数量失败"))?;

        Ok(HomeContext {
            faculties,
            groups,
            teachers,
            students,
        })
    }

    /// 按页码取一页，页码按目录页规则修正
    async fn fetch_catalog_page<E>(
        &self,
        select: Select<E>,
        page: Option<&str>,
        page_size: u64,
    ) -> Result<(Vec<E::Model>, PaginationInfo)>
    where
        E: EntityTrait,
        E::Model: Sync,
    {
        let page_size = page_size.max(1);
        let paginator = select.paginate(&self.db, page_size);
        let total = paginator
            .num_items()
            .await
            .map_err(query_failed("查询目录总数失败"))?;
        let num_pages = page_count(total, page_size);
        let number = resolve_page_number(page, num_pages);

        let models = paginator
            .fetch_page(number - 1)
            .await
            .map_err(query_failed("查询目录失败"))?;

        Ok((
            models,
            PaginationInfo {
                page: number as i64,
                page_size: page_size as i64,
                total: total as i64,
                total_pages: num_pages as i64,
            },
        ))
    }

    /// 按可见范围分页列出某类实体
    pub async fn list_visible_impl(
        &self,
        viewer: &Viewer,
        kind: EntityKind,
        page: Option<&str>,
        page_size: u64,
    ) -> Result<CatalogPage> {
        let scope = resolve(viewer, kind);
        debug!("目录 {} 的可见范围: {:?}", kind, scope);

        let Some(condition) = scope_condition(scope) else {
            return Ok(empty_page(kind, page_size));
        };

        let mut items = Vec::new();
        let pagination = match kind {
            EntityKind::Faculty => {
                let select = Faculties::find()
                    .filter(condition)
                    .order_by_asc(faculties::Column::Title)
                    .order_by_asc(faculties::Column::Id);
                let (models, pagination) = self.fetch_catalog_page(select, page, page_size).await?;
                items.extend(
                    models
                        .into_iter()
                        .map(|m| EntityView::Faculty(m.into_faculty())),
                );
                pagination
            }
            EntityKind::Group => {
                let select = Groups::find()
                    .filter(condition)
                    .order_by_asc(groups::Column::FacultyId)
                    .order_by_asc(groups::Column::Id);
                let (models, pagination) = self.fetch_catalog_page(select, page, page_size).await?;
                for model in models {
                    items.push(EntityView::Group(group_view(&self.db, model).await?));
                }
                pagination
            }
            EntityKind::Subject => {
                let select = Subjects::find()
                    .filter(condition)
                    .order_by_asc(subjects::Column::Title)
                    .order_by_asc(subjects::Column::Id);
                let (models, pagination) = self.fetch_catalog_page(select, page, page_size).await?;
                for model in models {
                    items.push(EntityView::Subject(subject_view(&self.db, model).await?));
                }
                pagination
            }
            EntityKind::Teacher => {
                let select = Teachers::find()
                    .filter(condition)
                    .order_by_asc(teachers::Column::FullName)
                    .order_by_asc(teachers::Column::Id);
                let (models, pagination) = self.fetch_catalog_page(select, page, page_size).await?;
                for model in models {
                    items.push(EntityView::Teacher(teacher_view(&self.db, model).await?));
                }
                pagination
            }
            EntityKind::Student => {
                let select = Students::find()
                    .filter(condition)
                    .order_by_asc(students::Column::FullName)
                    .order_by_asc(students::Column::Id);
                let (models, pagination) = self.fetch_catalog_page(select, page, page_size).await?;
                for model in models {
                    items.push(EntityView::Student(student_view(&self.db, model).await?));
                }
                pagination
            }
            EntityKind::Lesson => {
                let select = Lessons::find()
                    .filter(condition)
                    .order_by_asc(lessons::Column::Day)
                    .order_by_asc(lessons::Column::Id);
                let (models, pagination) = self.fetch_catalog_page(select, page, page_size).await?;
                for model in models {
                    items.push(EntityView::Lesson(lesson_view(&self.db, model).await?));
                }
                pagination
            }
            EntityKind::Mark => {
                let select = Marks::find()
                    .filter(condition)
                    .order_by_asc(marks::Column::LessonId)
                    .order_by_asc(marks::Column::Id);
                let (models, pagination) = self.fetch_catalog_page(select, page, page_size).await?;
                for model in models {
                    items.push(EntityView::Mark(mark_view(&self.db, model).await?));
                }
                pagination
            }
            EntityKind::Hometask => {
                let select = Hometasks::find()
                    .filter(condition)
                    .order_by_asc(hometasks::Column::LessonId)
                    .order_by_asc(hometasks::Column::Id);
                let (models, pagination) = self.fetch_catalog_page(select, page, page_size).await?;
                for model in models {
                    items.push(EntityView::Hometask(hometask_view(&self.db, model).await?));
                }
                pagination
            }
        };

        Ok(CatalogPage {
            kind,
            items,
            pagination,
        })
    }

    /// 按类别获取单个实体
    pub async fn get_entity_impl(&self, kind: EntityKind, id: i64) -> Result<Option<EntityView>> {
        let view = match kind {
            EntityKind::Faculty => self.get_faculty_impl(id).await?.map(EntityView::Faculty),
            EntityKind::Group => self.get_group_impl(id).await?.map(EntityView::Group),
            EntityKind::Subject => self.get_subject_impl(id).await?.map(EntityView::Subject),
            EntityKind::Teacher => self.get_teacher_impl(id).await?.map(EntityView::Teacher),
            EntityKind::Student => self.get_student_impl(id).await?.map(EntityView::Student),
            EntityKind::Lesson => self.get_lesson_impl(id).await?.map(EntityView::Lesson),
            EntityKind::Mark => self.get_mark_impl(id).await?.map(EntityView::Mark),
            EntityKind::Hometask => self.get_hometask_impl(id).await?.map(EntityView::Hometask),
        };
        Ok(view)
    }

    /// 实体是否落在请求者的可见范围内
    pub async fn is_visible_impl(&self, viewer: &Viewer, kind: EntityKind, id: i64) -> Result<bool> {
        let Some(condition) = scope_condition(resolve(viewer, kind)) else {
            return Ok(false);
        };

        let count = match kind {
            EntityKind::Faculty => {
                Faculties::find()
                    .filter(faculties::Column::Id.eq(id))
                    .filter(condition)
                    .count(&self.db)
                    .await
            }
            EntityKind::Group => {
                Groups::find()
                    .filter(groups::Column::Id.eq(id))
                    .filter(condition)
                    .count(&self.db)
                    .await
            }
            EntityKind::Subject => {
                Subjects::find()
                    .filter(subjects::Column::Id.eq(id))
                    .filter(condition)
                    .count(&self.db)
                    .await
            }
            EntityKind::Teacher => {
                Teachers::find()
                    .filter(teachers::Column::Id.eq(id))
                    .filter(condition)
                    .count(&self.db)
                    .await
            }
            EntityKind::Student => {
                Students::find()
                    .filter(students::Column::Id.eq(id))
                    .filter(condition)
                    .count(&self.db)
                    .await
            }
            EntityKind::Lesson => {
                Lessons::find()
                    .filter(lessons::Column::Id.eq(id))
                    .filter(condition)
                    .count(&self.db)
                    .await
            }
            EntityKind::Mark => {
                Marks::find()
                    .filter(marks::Column::Id.eq(id))
                    .filter(condition)
                    .count(&self.db)
                    .await
            }
            EntityKind::Hometask => {
                Hometasks::find()
                    .filter(hometasks::Column::Id.eq(id))
                    .filter(condition)
                    .count(&self.db)
                    .await
            }
        }
        .map_err(query_failed("查询可见范围失败"))?;

        Ok(count > 0)
    }
}
