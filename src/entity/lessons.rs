//! 课程实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "lessons")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub day: chrono::NaiveDate,
    pub precise_time: chrono::NaiveTime,
    pub subject_id: i64,
    pub teacher_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subject,
    #[sea_orm(
        belongs_to = "super::teachers::Entity",
        from = "Column::TeacherId",
        to = "super::teachers::Column::Id"
    )]
    Teacher,
    #[sea_orm(has_many = "super::marks::Entity")]
    Marks,
    #[sea_orm(has_many = "super::hometasks::Entity")]
    Hometasks,
    #[sea_orm(has_many = "super::lesson_groups::Entity")]
    LessonGroups,
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl Related<super::teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::marks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Marks.def()
    }
}

impl Related<super::hometasks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hometasks.def()
    }
}

// 通过 lesson_groups 关联学生组
impl Related<super::groups::Entity> for Entity {
    fn to() -> RelationDef {
        super::lesson_groups::Relation::Group.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::lesson_groups::Relation::Lesson.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
