use std::sync::Arc;

use crate::models::{
    faculties::{
        entities::Faculty,
        requests::{CreateFacultyRequest, FacultyListQuery, UpdateFacultyRequest},
        responses::FacultyListResponse,
    },
    groups::{
        entities::Group,
        requests::{CreateGroupRequest, GroupListQuery, UpdateGroupRequest},
        responses::GroupListResponse,
    },
    hometasks::{
        entities::Hometask,
        requests::{CreateHometaskRequest, HometaskListQuery, UpdateHometaskRequest},
        responses::HometaskListResponse,
    },
    lessons::{
        entities::Lesson,
        requests::{CreateLessonRequest, LessonListQuery, UpdateLessonRequest},
        responses::LessonListResponse,
    },
    marks::{
        entities::Mark,
        requests::{CreateMarkRequest, MarkListQuery, UpdateMarkRequest},
        responses::MarkListResponse,
    },
    pages::{
        entities::EntityView,
        responses::{CatalogPage, HomeContext},
    },
    students::{
        entities::{Student, StudentChoice},
        requests::CreateStudentRequest,
    },
    subjects::{entities::Subject, requests::CreateSubjectRequest},
    teachers::{
        entities::Teacher,
        requests::{CreateTeacherRequest, TeacherListQuery, UpdateTeacherRequest},
        responses::TeacherListResponse,
    },
    users::{
        entities::{User, Viewer},
        requests::CreateUserRequest,
    },
};
use crate::visibility::EntityKind;

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 账号管理方法
    // 创建账号
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取账号
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名或邮箱获取账号
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 统计账号数量
    async fn count_users(&self) -> Result<u64>;
    // 更新最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 解析账号在门户中的身份（学生优先于教师）
    async fn resolve_viewer(&self, user: &User) -> Result<Viewer>;

    /// 院系
    async fn create_faculty(&self, req: CreateFacultyRequest) -> Result<Faculty>;
    async fn get_faculty(&self, id: i64) -> Result<Option<Faculty>>;
    async fn list_faculties(&self, query: FacultyListQuery) -> Result<FacultyListResponse>;
    async fn update_faculty(&self, id: i64, update: UpdateFacultyRequest)
    -> Result<Option<Faculty>>;
    async fn delete_faculty(&self, id: i64) -> Result<bool>;

    /// 学生组
    async fn create_group(&self, req: CreateGroupRequest) -> Result<Group>;
    async fn get_group(&self, id: i64) -> Result<Option<Group>>;
    async fn list_groups(&self, query: GroupListQuery) -> Result<GroupListResponse>;
    async fn update_group(&self, id: i64, update: UpdateGroupRequest) -> Result<Option<Group>>;
    async fn delete_group(&self, id: i64) -> Result<bool>;

    /// 科目
    async fn create_subject(&self, req: CreateSubjectRequest) -> Result<Subject>;
    async fn get_subject(&self, id: i64) -> Result<Option<Subject>>;

    /// 教师
    async fn create_teacher(&self, req: CreateTeacherRequest) -> Result<Teacher>;
    async fn get_teacher(&self, id: i64) -> Result<Option<Teacher>>;
    async fn list_teachers(&self, query: TeacherListQuery) -> Result<TeacherListResponse>;
    async fn update_teacher(&self, id: i64, update: UpdateTeacherRequest)
    -> Result<Option<Teacher>>;
    async fn delete_teacher(&self, id: i64) -> Result<bool>;

    /// 学生
    async fn create_student(&self, req: CreateStudentRequest) -> Result<Student>;
    async fn get_student(&self, id: i64) -> Result<Option<Student>>;

    /// 课程
    async fn create_lesson(&self, req: CreateLessonRequest) -> Result<Lesson>;
    async fn get_lesson(&self, id: i64) -> Result<Option<Lesson>>;
    async fn list_lessons(&self, query: LessonListQuery) -> Result<LessonListResponse>;
    async fn update_lesson(&self, id: i64, update: UpdateLessonRequest) -> Result<Option<Lesson>>;
    async fn delete_lesson(&self, id: i64) -> Result<bool>;
    // 课程的全部成绩
    async fn list_lesson_marks(&self, lesson_id: i64) -> Result<Vec<Mark>>;
    // 课程所在学生组的全部学生
    async fn list_lesson_students(&self, lesson_id: i64) -> Result<Vec<StudentChoice>>;

    /// 成绩
    async fn create_mark(&self, req: CreateMarkRequest) -> Result<Mark>;
    async fn get_mark(&self, id: i64) -> Result<Option<Mark>>;
    async fn list_marks(&self, query: MarkListQuery) -> Result<MarkListResponse>;
    async fn update_mark(&self, id: i64, update: UpdateMarkRequest) -> Result<Option<Mark>>;
    async fn delete_mark(&self, id: i64) -> Result<bool>;

    /// 作业
    async fn create_hometask(&self, req: CreateHometaskRequest) -> Result<Hometask>;
    async fn get_hometask(&self, id: i64) -> Result<Option<Hometask>>;
    async fn list_hometasks(&self, query: HometaskListQuery) -> Result<HometaskListResponse>;
    async fn update_hometask(
        &self,
        id: i64,
        update: UpdateHometaskRequest,
    ) -> Result<Option<Hometask>>;
    async fn delete_hometask(&self, id: i64) -> Result<bool>;

    /// 门户页面
    // 首页统计
    async fn count_dashboard(&self) -> Result<HomeContext>;
    // 按可见范围分页列出某类实体
    async fn list_visible(
        &self,
        viewer: &Viewer,
        kind: EntityKind,
        page: Option<&str>,
        page_size: u64,
    ) -> Result<CatalogPage>;
    // 按类别获取单个实体
    async fn get_entity(&self, kind: EntityKind, id: i64) -> Result<Option<EntityView>>;
    // 实体是否在请求者的可见范围内
    async fn is_visible(&self, viewer: &Viewer, kind: EntityKind, id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
