//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后组装为 models 中的表示。

pub mod prelude;

pub mod faculties;
pub mod groups;
pub mod hometasks;
pub mod lesson_groups;
pub mod lessons;
pub mod marks;
pub mod students;
pub mod subjects;
pub mod teachers;
pub mod users;
