//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod catalog;
mod faculties;
mod groups;
mod hometasks;
mod lessons;
mod marks;
mod nested;
mod students;
mod subjects;
mod teachers;
mod users;
mod views;

use crate::config::AppConfig;
use crate::errors::{PortalError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(&config.database.url).await
    }

    /// 连接指定数据库并运行迁移
    pub async fn connect(url: &str) -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| PortalError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    ///
    /// 内存数据库只保留一个连接，连接关闭即丢失数据。
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:");

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| PortalError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .max_connections(config.database.pool_size)
                .min_connections(1)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool_options
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .connect_with(opt)
            .await
            .map_err(|e| PortalError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| PortalError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(PortalError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, :memory: 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use crate::visibility::EntityKind;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 账号模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn resolve_viewer(&self, user: &User) -> Result<Viewer> {
        self.resolve_viewer_impl(user).await
    }

    // 院系模块
    async fn create_faculty(&self, req: CreateFacultyRequest) -> Result<Faculty> {
        self.create_faculty_impl(req).await
    }

    async fn get_faculty(&self, id: i64) -> Result<Option<Faculty>> {
        self.get_faculty_impl(id).await
    }

    async fn list_faculties(&self, query: FacultyListQuery) -> Result<FacultyListResponse> {
        self.list_faculties_impl(query).await
    }

    async fn update_faculty(
        &self,
        id: i64,
        update: UpdateFacultyRequest,
    ) -> Result<Option<Faculty>> {
        self.update_faculty_impl(id, update).await
    }

    async fn delete_faculty(&self, id: i64) -> Result<bool> {
        self.delete_faculty_impl(id).await
    }

    // 学生组模块
    async fn create_group(&self, req: CreateGroupRequest) -> Result<Group> {
        self.create_group_impl(req).await
    }

    async fn get_group(&self, id: i64) -> Result<Option<Group>> {
        self.get_group_impl(id).await
    }

    async fn list_groups(&self, query: GroupListQuery) -> Result<GroupListResponse> {
        self.list_groups_impl(query).await
    }

    async fn update_group(&self, id: i64, update: UpdateGroupRequest) -> Result<Option<Group>> {
        self.update_group_impl(id, update).await
    }

    async fn delete_group(&self, id: i64) -> Result<bool> {
        self.delete_group_impl(id).await
    }

    // 科目模块
    async fn create_subject(&self, req: CreateSubjectRequest) -> Result<Subject> {
        self.create_subject_impl(req).await
    }

    async fn get_subject(&self, id: i64) -> Result<Option<Subject>> {
        self.get_subject_impl(id).await
    }

    // 教师模块
    async fn create_teacher(&self, req: CreateTeacherRequest) -> Result<Teacher> {
        self.create_teacher_impl(req).await
    }

    async fn get_teacher(&self, id: i64) -> Result<Option<Teacher>> {
        self.get_teacher_impl(id).await
    }

    async fn list_teachers(&self, query: TeacherListQuery) -> Result<TeacherListResponse> {
        self.list_teachers_impl(query).await
    }

    async fn update_teacher(
        &self,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>> {
        self.update_teacher_impl(id, update).await
    }

    async fn delete_teacher(&self, id: i64) -> Result<bool> {
        self.delete_teacher_impl(id).await
    }

    // 学生模块
    async fn create_student(&self, req: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(req).await
    }

    async fn get_student(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_impl(id).await
    }

    // 课程模块
    async fn create_lesson(&self, req: CreateLessonRequest) -> Result<Lesson> {
        self.create_lesson_impl(req).await
    }

    async fn get_lesson(&self, id: i64) -> Result<Option<Lesson>> {
        self.get_lesson_impl(id).await
    }

    async fn list_lessons(&self, query: LessonListQuery) -> Result<LessonListResponse> {
        self.list_lessons_impl(query).await
    }

    async fn update_lesson(&self, id: i64, update: UpdateLessonRequest) -> Result<Option<Lesson>> {
        self.update_lesson_impl(id, update).await
    }

    async fn delete_lesson(&self, id: i64) -> Result<bool> {
        self.delete_lesson_impl(id).await
    }

    async fn list_lesson_marks(&self, lesson_id: i64) -> Result<Vec<Mark>> {
        self.list_lesson_marks_impl(lesson_id).await
    }

    async fn list_lesson_students(&self, lesson_id: i64) -> Result<Vec<StudentChoice>> {
        self.list_lesson_students_impl(lesson_id).await
    }

    // 成绩模块
    async fn create_mark(&self, req: CreateMarkRequest) -> Result<Mark> {
        self.create_mark_impl(req).await
    }

    async fn get_mark(&self, id: i64) -> Result<Option<Mark>> {
        self.get_mark_impl(id).await
    }

    async fn list_marks(&self, query: MarkListQuery) -> Result<MarkListResponse> {
        self.list_marks_impl(query).await
    }

    async fn update_mark(&self, id: i64, update: UpdateMarkRequest) -> Result<Option<Mark>> {
        self.update_mark_impl(id, update).await
    }

    async fn delete_mark(&self, id: i64) -> Result<bool> {
        self.delete_mark_impl(id).await
    }

    // 作业模块
    async fn create_hometask(&self, req: CreateHometaskRequest) -> Result<Hometask> {
        self.create_hometask_impl(req).await
    }

    async fn get_hometask(&self, id: i64) -> Result<Option<Hometask>> {
        self.get_hometask_impl(id).await
    }

    async fn list_hometasks(&self, query: HometaskListQuery) -> Result<HometaskListResponse> {
        self.list_hometasks_impl(query).await
    }

    async fn update_hometask(
        &self,
        id: i64,
        update: UpdateHometaskRequest,
    ) -> Result<Option<Hometask>> {
        self.update_hometask_impl(id, update).await
    }

    async fn delete_hometask(&self, id: i64) -> Result<bool> {
        self.delete_hometask_impl(id).await
    }

    // 门户页面
    async fn count_dashboard(&self) -> Result<HomeContext> {
        self.count_dashboard_impl().await
    }

    async fn list_visible(
        &self,
        viewer: &Viewer,
        kind: EntityKind,
        page: Option<&str>,
        page_size: u64,
    ) -> Result<CatalogPage> {
        self.list_visible_impl(viewer, kind, page, page_size).await
    }

    async fn get_entity(&self, kind: EntityKind, id: i64) -> Result<Option<EntityView>> {
        self.get_entity_impl(kind, id).await
    }

    async fn is_visible(&self, viewer: &Viewer, kind: EntityKind, id: i64) -> Result<bool> {
        self.is_visible_impl(viewer, kind, id).await
    }
}
