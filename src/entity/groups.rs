//! 学生组实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "groups")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub faculty_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::faculties::Entity",
        from = "Column::FacultyId",
        to = "super::faculties::Column::Id"
    )]
    Faculty,
    #[sea_orm(has_many = "super::students::Entity")]
    Students,
    #[sea_orm(has_many = "super::lesson_groups::Entity")]
    LessonGroups,
}

impl Related<super::faculties::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Faculty.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Students.def()
    }
}

// 通过 lesson_groups 关联课程
impl Related<super::lessons::Entity> for Entity {
    fn to() -> RelationDef {
        super::lesson_groups::Relation::Lesson.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::lesson_groups::Relation::Group.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
