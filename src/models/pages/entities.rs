use serde::Serialize;

use crate::models::{
    faculties::entities::Faculty, groups::entities::Group, hometasks::entities::Hometask,
    lessons::entities::Lesson, marks::entities::Mark, students::entities::Student,
    subjects::entities::Subject, teachers::entities::Teacher,
};

/// 任意门户实体的展示形式
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EntityView {
    Faculty(Faculty),
    Group(Group),
    Subject(Subject),
    Teacher(Teacher),
    Student(Student),
    Lesson(Lesson),
    Mark(Mark),
    Hometask(Hometask),
}

impl EntityView {
    pub fn id(&self) -> i64 {
        match self {
            EntityView::Faculty(v) => v.id,
            EntityView::Group(v) => v.id,
            EntityView::Subject(v) => v.id,
            EntityView::Teacher(v) => v.id,
            EntityView::Student(v) => v.id,
            EntityView::Lesson(v) => v.id,
            EntityView::Mark(v) => v.id,
            EntityView::Hometask(v) => v.id,
        }
    }
}
