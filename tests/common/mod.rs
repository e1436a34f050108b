#![allow(dead_code)]

use std::sync::Arc;

use actix_web::body::BoxBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, Error, web};
use serde_json::{Value, json};

use university_portal::models::faculties::requests::CreateFacultyRequest;
use university_portal::models::groups::requests::CreateGroupRequest;
use university_portal::models::lessons::requests::CreateLessonRequest;
use university_portal::models::students::requests::CreateStudentRequest;
use university_portal::models::subjects::requests::CreateSubjectRequest;
use university_portal::models::teachers::requests::CreateTeacherRequest;
use university_portal::models::users::entities::User;
use university_portal::models::users::requests::CreateUserRequest;
use university_portal::models::Nested;
use university_portal::routes;
use university_portal::storage::Storage;
use university_portal::storage::sea_orm_storage::SeaOrmStorage;
use university_portal::utils::jwt::JwtUtils;
use university_portal::utils::password::hash_password;
use university_portal::utils::{json_error_handler, query_error_handler};

pub const PASSWORD: &str = "correct-horse-battery";

/// 全新的内存数据库，已执行迁移
pub async fn storage() -> Arc<dyn Storage> {
    let storage = SeaOrmStorage::connect(":memory:")
        .await
        .expect("in-memory storage");
    Arc::new(storage)
}

/// 与 main 中相同的路由与参数错误处理
pub fn build_app(
    storage: Arc<dyn Storage>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<BoxBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::Data::new(storage))
        .configure(routes::configure_portal)
}

pub async fn create_user(storage: &Arc<dyn Storage>, username: &str, is_superuser: bool) -> User {
    storage
        .create_user(CreateUserRequest {
            username: username.to_string(),
            email: format!("{username}@example.org"),
            password: hash_password(PASSWORD).expect("hash"),
            first_name: "First".to_string(),
            last_name: "Last".to_string(),
            is_superuser,
        })
        .await
        .expect("create user")
}

pub fn bearer(user: &User) -> (&'static str, String) {
    let role = if user.is_superuser { "superuser" } else { "user" };
    let token = JwtUtils::generate_access_token(user.id, role).expect("token");
    ("Authorization", format!("Bearer {token}"))
}

/// 一组互相关联的基础数据
pub struct Campus {
    pub faculty: i64,
    pub group: i64,
    pub other_group: i64,
    pub subject: i64,
    pub teacher: i64,
    pub other_teacher: i64,
    pub student: i64,
    pub classmate: i64,
    pub outsider: i64,
    pub lesson: i64,
    pub other_lesson: i64,
}

fn existing<T>(id: i64) -> Nested<T> {
    Nested::Existing { id }
}

/// 两个学生组、两名教师、两节课；`lesson` 属于 `group` 且由 `teacher` 讲授
pub async fn seed_campus(
    storage: &Arc<dyn Storage>,
    teacher_user: Option<i64>,
    student_user: Option<i64>,
) -> Campus {
    let faculty = storage
        .create_faculty(CreateFacultyRequest {
            title: "Physics".to_string(),
            description: None,
        })
        .await
        .expect("faculty")
        .id;

    let group = storage
        .create_group(CreateGroupRequest {
            title: "PH-101".to_string(),
            faculty: existing(faculty),
        })
        .await
        .expect("group")
        .id;
    let other_group = storage
        .create_group(CreateGroupRequest {
            title: "PH-102".to_string(),
            faculty: existing(faculty),
        })
        .await
        .expect("group")
        .id;

    let subject = storage
        .create_subject(CreateSubjectRequest {
            title: "Optics".to_string(),
        })
        .await
        .expect("subject")
        .id;

    let teacher = storage
        .create_teacher(CreateTeacherRequest {
            full_name: "Ada Lovelace".to_string(),
            faculty: existing(faculty),
            user: teacher_user,
        })
        .await
        .expect("teacher")
        .id;
    let other_teacher = storage
        .create_teacher(CreateTeacherRequest {
            full_name: "Carl Gauss".to_string(),
            faculty: existing(faculty),
            user: None,
        })
        .await
        .expect("teacher")
        .id;

    let student = storage
        .create_student(CreateStudentRequest {
            full_name: "Boris Ivanov".to_string(),
            group: existing(group),
            user: student_user,
        })
        .await
        .expect("student")
        .id;
    let classmate = storage
        .create_student(CreateStudentRequest {
            full_name: "Anna Petrova".to_string(),
            group: existing(group),
            user: None,
        })
        .await
        .expect("student")
        .id;
    let outsider = storage
        .create_student(CreateStudentRequest {
            full_name: "Oleg Sidorov".to_string(),
            group: existing(other_group),
            user: None,
        })
        .await
        .expect("student")
        .id;

    let lesson = storage
        .create_lesson(CreateLessonRequest {
            day: "2024-09-02".to_string(),
            precise_time: "09:00".to_string(),
            subject: existing(subject),
            teacher: existing(teacher),
            groups: vec![group],
        })
        .await
        .expect("lesson")
        .id;
    let other_lesson = storage
        .create_lesson(CreateLessonRequest {
            day: "2024-09-03".to_string(),
            precise_time: "11:30".to_string(),
            subject: existing(subject),
            teacher: existing(other_teacher),
            groups: vec![other_group],
        })
        .await
        .expect("lesson")
        .id;

    Campus {
        faculty,
        group,
        other_group,
        subject,
        teacher,
        other_teacher,
        student,
        classmate,
        outsider,
        lesson,
        other_lesson,
    }
}

/// 嵌套创建一节课所需的完整负载
pub fn nested_lesson_payload(faculty_title: &str) -> Value {
    json!({
        "day": "2024-10-01",
        "precise_time": "10:15",
        "subject": { "title": "Mechanics" },
        "teacher": {
            "full_name": "Isaac Newton",
            "faculty": { "title": faculty_title }
        }
    })
}
