mod common;

use university_portal::errors::PortalError;
use university_portal::models::Nested;
use university_portal::models::faculties::requests::{CreateFacultyRequest, UpdateFacultyRequest};
use university_portal::models::groups::requests::CreateGroupRequest;
use university_portal::models::hometasks::requests::CreateHometaskRequest;
use university_portal::models::lessons::requests::{CreateLessonRequest, UpdateLessonRequest};
use university_portal::models::marks::requests::{CreateMarkRequest, UpdateMarkRequest};
use university_portal::models::students::requests::CreateStudentRequest;
use university_portal::models::subjects::requests::CreateSubjectRequest;
use university_portal::models::teachers::requests::CreateTeacherRequest;
use university_portal::visibility::EntityKind;

fn lesson_request(value: serde_json::Value) -> CreateLessonRequest {
    serde_json::from_value(value).expect("lesson payload")
}

#[actix_web::test]
async fn test_nested_lesson_creates_whole_tree() {
    let storage = common::storage().await;

    let lesson = storage
        .create_lesson(lesson_request(common::nested_lesson_payload("Mathematics")))
        .await
        .expect("nested lesson");

    assert_eq!(lesson.subject.title, "Mechanics");
    assert_eq!(lesson.teacher.full_name, "Isaac Newton");
    assert_eq!(lesson.teacher.faculty.title, "Mathematics");
    assert_eq!(lesson.teacher.subjects, vec![lesson.subject.id]);
    assert!(lesson.groups.is_empty());

    let home = storage.count_dashboard().await.unwrap();
    assert_eq!(home.faculties, 1);
    assert_eq!(home.teachers, 1);
}

#[actix_web::test]
async fn test_missing_reference_rolls_back_the_tree() {
    let storage = common::storage().await;

    let payload = serde_json::json!({
        "day": "2024-10-01",
        "precise_time": "10:15",
        "subject": { "title": "Mechanics" },
        "teacher": { "full_name": "Isaac Newton", "faculty": { "id": 999 } }
    });

    let err = storage
        .create_lesson(lesson_request(payload))
        .await
        .expect_err("faculty 999 does not exist");

    match err {
        PortalError::RelationMissing(msg) => {
            assert!(msg.starts_with("teacher.faculty: "), "{msg}");
            assert!(msg.contains("\"999\""));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // 已经写入的科目随事务一起回滚
    let subjects = storage
        .list_visible(
            &university_portal::models::users::entities::Viewer::Superuser,
            EntityKind::Subject,
            None,
            10,
        )
        .await
        .unwrap();
    assert!(subjects.items.is_empty());
}

#[actix_web::test]
async fn test_duplicate_faculty_title_is_a_conflict() {
    let storage = common::storage().await;
    let request = CreateFacultyRequest {
        title: "History".to_string(),
        description: Some("Old things".to_string()),
    };

    storage.create_faculty(request.clone()).await.unwrap();
    let err = storage.create_faculty(request).await.unwrap_err();
    assert!(matches!(err, PortalError::Conflict(_)), "{err:?}");
}

#[actix_web::test]
async fn test_title_length_boundary() {
    let storage = common::storage().await;

    // 按字符计数，西里尔字母也算一个字符
    let at_limit = storage
        .create_faculty(CreateFacultyRequest {
            title: "Ф".repeat(40),
            description: None,
        })
        .await
        .unwrap();
    assert_eq!(at_limit.title.chars().count(), 40);

    let err = storage
        .create_faculty(CreateFacultyRequest {
            title: "x".repeat(41),
            description: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, PortalError::Validation(_)), "{err:?}");
}

fn validation_message(err: PortalError) -> String {
    match err {
        PortalError::Validation(msg) => msg,
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[actix_web::test]
async fn test_every_text_field_stops_at_forty_characters() {
    let storage = common::storage().await;
    let campus = common::seed_campus(&storage, None, None).await;
    let at_limit = |c: &str| c.repeat(40);
    let over_limit = |c: &str| c.repeat(41);

    storage
        .create_faculty(CreateFacultyRequest {
            title: "Chemistry".to_string(),
            description: Some(at_limit("д")),
        })
        .await
        .unwrap();
    let err = storage
        .create_faculty(CreateFacultyRequest {
            title: "Biology".to_string(),
            description: Some(over_limit("д")),
        })
        .await
        .unwrap_err();
    assert!(validation_message(err).starts_with("description:"));

    storage
        .create_group(CreateGroupRequest {
            title: at_limit("Г"),
            faculty: Nested::Existing { id: campus.faculty },
        })
        .await
        .unwrap();
    let err = storage
        .create_group(CreateGroupRequest {
            title: over_limit("Г"),
            faculty: Nested::Existing { id: campus.faculty },
        })
        .await
        .unwrap_err();
    assert!(validation_message(err).starts_with("title:"));

    storage
        .create_subject(CreateSubjectRequest {
            title: at_limit("П"),
        })
        .await
        .unwrap();
    let err = storage
        .create_subject(CreateSubjectRequest {
            title: over_limit("П"),
        })
        .await
        .unwrap_err();
    assert!(validation_message(err).starts_with("title:"));

    storage
        .create_teacher(CreateTeacherRequest {
            full_name: at_limit("Т"),
            faculty: Nested::Existing { id: campus.faculty },
            user: None,
        })
        .await
        .unwrap();
    let err = storage
        .create_teacher(CreateTeacherRequest {
            full_name: over_limit("Т"),
            faculty: Nested::Existing { id: campus.faculty },
            user: None,
        })
        .await
        .unwrap_err();
    assert!(validation_message(err).starts_with("full_name:"));

    storage
        .create_student(CreateStudentRequest {
            full_name: at_limit("С"),
            group: Nested::Existing { id: campus.group },
            user: None,
        })
        .await
        .unwrap();
    let err = storage
        .create_student(CreateStudentRequest {
            full_name: over_limit("С"),
            group: Nested::Existing { id: campus.group },
            user: None,
        })
        .await
        .unwrap_err();
    assert!(validation_message(err).starts_with("full_name:"));

    storage
        .create_hometask(CreateHometaskRequest {
            task: at_limit("З"),
            lesson: Nested::Existing { id: campus.lesson },
        })
        .await
        .unwrap();
    let err = storage
        .create_hometask(CreateHometaskRequest {
            task: over_limit("З"),
            lesson: Nested::Existing { id: campus.lesson },
        })
        .await
        .unwrap_err();
    assert!(validation_message(err).starts_with("task:"));

    // 嵌套创建中的字段带完整路径
    let err = storage
        .create_lesson(lesson_request(serde_json::json!({
            "day": "2024-09-04",
            "precise_time": "10:00",
            "subject": { "id": campus.subject },
            "teacher": {
                "full_name": over_limit("Т"),
                "faculty": { "id": campus.faculty }
            }
        })))
        .await
        .unwrap_err();
    assert!(validation_message(err).starts_with("teacher.full_name:"));
    let teachers = storage
        .list_visible(
            &university_portal::models::users::entities::Viewer::Superuser,
            EntityKind::Teacher,
            None,
            10,
        )
        .await
        .unwrap();
    assert_eq!(teachers.items.len(), 3);
}

#[actix_web::test]
async fn test_partial_update_keeps_other_fields() {
    let storage = common::storage().await;
    let faculty = storage
        .create_faculty(CreateFacultyRequest {
            title: "Biology".to_string(),
            description: Some("Cells".to_string()),
        })
        .await
        .unwrap();

    let updated = storage
        .update_faculty(
            faculty.id,
            UpdateFacultyRequest {
                title: Some("Life Sciences".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .expect("faculty exists");

    assert_eq!(updated.title, "Life Sciences");
    assert_eq!(updated.description.as_deref(), Some("Cells"));

    assert!(
        storage
            .update_faculty(faculty.id + 100, UpdateFacultyRequest::default())
            .await
            .unwrap()
            .is_none()
    );
}

#[actix_web::test]
async fn test_lesson_groups_are_deduplicated_and_replaced() {
    let storage = common::storage().await;
    let campus = common::seed_campus(&storage, None, None).await;

    let lesson = storage
        .create_lesson(CreateLessonRequest {
            day: "2024-11-11".to_string(),
            precise_time: "08:00:00".to_string(),
            subject: Nested::Existing { id: campus.subject },
            teacher: Nested::Existing { id: campus.teacher },
            groups: vec![campus.group, campus.group, campus.other_group],
        })
        .await
        .unwrap();
    assert_eq!(lesson.groups, vec![campus.group, campus.other_group]);

    let updated = storage
        .update_lesson(
            lesson.id,
            UpdateLessonRequest {
                groups: Some(vec![campus.other_group]),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .expect("lesson exists");
    assert_eq!(updated.groups, vec![campus.other_group]);
    assert_eq!(updated.day.to_string(), "2024-11-11");

    let err = storage
        .update_lesson(
            lesson.id,
            UpdateLessonRequest {
                groups: Some(vec![4242]),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, PortalError::RelationMissing(_)), "{err:?}");

    // 失败的替换不影响原有关联
    let unchanged = storage.get_lesson(lesson.id).await.unwrap().unwrap();
    assert_eq!(unchanged.groups, vec![campus.other_group]);
}

#[actix_web::test]
async fn test_mark_requires_mark_or_presence() {
    let storage = common::storage().await;
    let campus = common::seed_campus(&storage, None, None).await;

    let err = storage
        .create_mark(CreateMarkRequest {
            mark: None,
            presence: None,
            student: Nested::Existing { id: campus.student },
            lesson: Nested::Existing { id: campus.lesson },
        })
        .await
        .unwrap_err();
    assert!(matches!(err, PortalError::Validation(_)), "{err:?}");

    let absent = storage
        .create_mark(CreateMarkRequest {
            mark: None,
            presence: Some("Н".to_string()),
            student: Nested::Existing { id: campus.student },
            lesson: Nested::Existing { id: campus.lesson },
        })
        .await
        .unwrap();
    assert_eq!(absent.presence.as_deref(), Some("Н"));
    assert_eq!(absent.mark, None);

    let err = storage
        .create_mark(CreateMarkRequest {
            mark: Some(6),
            presence: None,
            student: Nested::Existing { id: campus.student },
            lesson: Nested::Existing { id: campus.lesson },
        })
        .await
        .unwrap_err();
    assert!(matches!(err, PortalError::Validation(_)), "{err:?}");
}

#[actix_web::test]
async fn test_mark_update_refreshes_modified() {
    let storage = common::storage().await;
    let campus = common::seed_campus(&storage, None, None).await;

    let mark = storage
        .create_mark(CreateMarkRequest {
            mark: Some(3),
            presence: None,
            student: Nested::Existing { id: campus.student },
            lesson: Nested::Existing { id: campus.lesson },
        })
        .await
        .unwrap();

    let updated = storage
        .update_mark(
            mark.id,
            UpdateMarkRequest {
                mark: Some(Some(5)),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .expect("mark exists");

    assert_eq!(updated.mark, Some(5));
    assert_eq!(updated.created, mark.created);
    assert!(updated.modified >= mark.modified);
    assert_eq!(updated.student.id, campus.student);
}

#[actix_web::test]
async fn test_deleting_lesson_cascades_to_marks_and_hometasks() {
    let storage = common::storage().await;
    let campus = common::seed_campus(&storage, None, None).await;

    let mark = storage
        .create_mark(CreateMarkRequest {
            mark: Some(4),
            presence: None,
            student: Nested::Existing { id: campus.student },
            lesson: Nested::Existing { id: campus.lesson },
        })
        .await
        .unwrap();
    let hometask = storage
        .create_hometask(CreateHometaskRequest {
            task: "Read chapter 3".to_string(),
            lesson: Nested::Existing { id: campus.lesson },
        })
        .await
        .unwrap();

    assert!(storage.delete_lesson(campus.lesson).await.unwrap());
    assert!(!storage.delete_lesson(campus.lesson).await.unwrap());

    assert!(storage.get_mark(mark.id).await.unwrap().is_none());
    assert!(storage.get_hometask(hometask.id).await.unwrap().is_none());
    assert!(storage.get_lesson(campus.other_lesson).await.unwrap().is_some());
}

#[actix_web::test]
async fn test_one_account_per_teacher_record() {
    let storage = common::storage().await;
    let user = common::create_user(&storage, "ada", false).await;
    let campus = common::seed_campus(&storage, Some(user.id), None).await;

    let err = storage
        .create_teacher(CreateTeacherRequest {
            full_name: "Second Record".to_string(),
            faculty: Nested::Existing { id: campus.faculty },
            user: Some(user.id),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, PortalError::Conflict(_)), "{err:?}");

    let err = storage
        .create_teacher(CreateTeacherRequest {
            full_name: "Ghost".to_string(),
            faculty: Nested::Existing { id: campus.faculty },
            user: Some(9999),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, PortalError::RelationMissing(_)), "{err:?}");
}

#[actix_web::test]
async fn test_lesson_students_come_from_lesson_groups() {
    let storage = common::storage().await;
    let campus = common::seed_campus(&storage, None, None).await;

    let students = storage.list_lesson_students(campus.lesson).await.unwrap();
    let ids: Vec<i64> = students.iter().map(|s| s.id).collect();

    // 按姓名排序
    assert_eq!(ids, vec![campus.classmate, campus.student]);
    assert!(!ids.contains(&campus.outsider));
}

#[actix_web::test]
async fn test_superuser_is_seeded_once() {
    use university_portal::models::users::entities::Viewer;
    use university_portal::runtime::lifetime::startup::{ADMIN_USERNAME, seed_admin};

    let storage = common::storage().await;

    let admin = seed_admin(&storage).await.unwrap().expect("first start seeds");
    assert_eq!(admin.username, ADMIN_USERNAME);
    assert!(admin.is_superuser);
    assert_eq!(storage.resolve_viewer(&admin).await.unwrap(), Viewer::Superuser);

    assert!(seed_admin(&storage).await.unwrap().is_none());
    assert_eq!(storage.count_users().await.unwrap(), 1);
}
