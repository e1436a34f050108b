//! 预导入模块，方便使用

pub use super::faculties::{
    ActiveModel as FacultyActiveModel, Entity as Faculties, Model as FacultyModel,
};
pub use super::groups::{ActiveModel as GroupActiveModel, Entity as Groups, Model as GroupModel};
pub use super::hometasks::{
    ActiveModel as HometaskActiveModel, Entity as Hometasks, Model as HometaskModel,
};
pub use super::lesson_groups::{
    ActiveModel as LessonGroupActiveModel, Entity as LessonGroups, Model as LessonGroupModel,
};
pub use super::lessons::{
    ActiveModel as LessonActiveModel, Entity as Lessons, Model as LessonModel,
};
pub use super::marks::{ActiveModel as MarkActiveModel, Entity as Marks, Model as MarkModel};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::subjects::{
    ActiveModel as SubjectActiveModel, Entity as Subjects, Model as SubjectModel,
};
pub use super::teachers::{
    ActiveModel as TeacherActiveModel, Entity as Teachers, Model as TeacherModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
