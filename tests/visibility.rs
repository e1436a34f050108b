mod common;

use std::sync::Arc;

use university_portal::models::Nested;
use university_portal::models::hometasks::requests::CreateHometaskRequest;
use university_portal::models::marks::requests::CreateMarkRequest;
use university_portal::models::pages::entities::EntityView;
use university_portal::models::users::entities::Viewer;
use university_portal::storage::Storage;
use university_portal::visibility::EntityKind;

fn ids(items: &[EntityView]) -> Vec<i64> {
    items.iter().map(EntityView::id).collect()
}

async fn visible(storage: &Arc<dyn Storage>, viewer: &Viewer, kind: EntityKind) -> Vec<i64> {
    let page = storage
        .list_visible(viewer, kind, None, 100)
        .await
        .expect("catalog page");
    ids(&page.items)
}

async fn mark(storage: &Arc<dyn Storage>, student: i64, lesson: i64, value: i32) -> i64 {
    storage
        .create_mark(CreateMarkRequest {
            mark: Some(value),
            presence: None,
            student: Nested::Existing { id: student },
            lesson: Nested::Existing { id: lesson },
        })
        .await
        .expect("mark")
        .id
}

async fn hometask(storage: &Arc<dyn Storage>, lesson: i64, task: &str) -> i64 {
    storage
        .create_hometask(CreateHometaskRequest {
            task: task.to_string(),
            lesson: Nested::Existing { id: lesson },
        })
        .await
        .expect("hometask")
        .id
}

#[actix_web::test]
async fn test_viewer_resolution_prefers_student() {
    let storage = common::storage().await;
    let admin = common::create_user(&storage, "root", true).await;
    let both = common::create_user(&storage, "both", false).await;
    let nobody = common::create_user(&storage, "nobody", false).await;
    let campus = common::seed_campus(&storage, Some(both.id), Some(both.id)).await;

    assert_eq!(storage.resolve_viewer(&admin).await.unwrap(), Viewer::Superuser);

    // 可见范围按学生计算，教师记录仍保留
    let viewer = storage.resolve_viewer(&both).await.unwrap();
    assert_eq!(
        viewer,
        Viewer::Student {
            student_id: campus.student,
            group_id: campus.group,
            teacher_id: Some(campus.teacher)
        }
    );
    assert!(viewer.is_staff());
    assert_eq!(visible(&storage, &viewer, EntityKind::Lesson).await, vec![campus.lesson]);

    assert_eq!(storage.resolve_viewer(&nobody).await.unwrap(), Viewer::Member);
}

#[actix_web::test]
async fn test_student_sees_own_group_lessons_and_marks() {
    let storage = common::storage().await;
    let campus = common::seed_campus(&storage, None, None).await;
    let own = mark(&storage, campus.student, campus.lesson, 5).await;
    let _classmate = mark(&storage, campus.classmate, campus.lesson, 2).await;
    let _outsider = mark(&storage, campus.outsider, campus.other_lesson, 4).await;
    let task = hometask(&storage, campus.lesson, "Lenses").await;
    let _other_task = hometask(&storage, campus.other_lesson, "Prisms").await;

    let viewer = Viewer::Student {
        student_id: campus.student,
        group_id: campus.group,
        teacher_id: None,
    };

    assert_eq!(visible(&storage, &viewer, EntityKind::Group).await, vec![campus.group]);
    assert_eq!(visible(&storage, &viewer, EntityKind::Lesson).await, vec![campus.lesson]);
    assert_eq!(visible(&storage, &viewer, EntityKind::Mark).await, vec![own]);
    assert_eq!(visible(&storage, &viewer, EntityKind::Hometask).await, vec![task]);
    // 不受限的类别
    assert_eq!(visible(&storage, &viewer, EntityKind::Student).await.len(), 3);
    assert_eq!(visible(&storage, &viewer, EntityKind::Faculty).await, vec![campus.faculty]);

    assert!(
        storage
            .is_visible(&viewer, EntityKind::Lesson, campus.lesson)
            .await
            .unwrap()
    );
    assert!(
        !storage
            .is_visible(&viewer, EntityKind::Lesson, campus.other_lesson)
            .await
            .unwrap()
    );
}

#[actix_web::test]
async fn test_teacher_sees_taught_lessons_and_subject_groups() {
    let storage = common::storage().await;
    let campus = common::seed_campus(&storage, None, None).await;
    let taught = mark(&storage, campus.student, campus.lesson, 5).await;
    let _foreign = mark(&storage, campus.outsider, campus.other_lesson, 3).await;
    let task = hometask(&storage, campus.lesson, "Lenses").await;

    let viewer = Viewer::Teacher {
        teacher_id: campus.teacher,
    };

    assert_eq!(visible(&storage, &viewer, EntityKind::Lesson).await, vec![campus.lesson]);
    assert_eq!(visible(&storage, &viewer, EntityKind::Mark).await, vec![taught]);
    assert_eq!(visible(&storage, &viewer, EntityKind::Hometask).await, vec![task]);

    // 两个学生组都在学习该教师讲授的科目，每个组只出现一次
    let mut groups = visible(&storage, &viewer, EntityKind::Group).await;
    groups.sort_unstable();
    assert_eq!(groups, vec![campus.group, campus.other_group]);
}

#[actix_web::test]
async fn test_superuser_sees_everything_in_sort_order() {
    let storage = common::storage().await;
    let campus = common::seed_campus(&storage, None, None).await;
    let later = mark(&storage, campus.outsider, campus.other_lesson, 4).await;
    let earlier = mark(&storage, campus.student, campus.lesson, 5).await;

    let viewer = Viewer::Superuser;

    assert_eq!(
        visible(&storage, &viewer, EntityKind::Teacher).await,
        vec![campus.teacher, campus.other_teacher]
    );
    assert_eq!(
        visible(&storage, &viewer, EntityKind::Student).await,
        vec![campus.classmate, campus.student, campus.outsider]
    );
    assert_eq!(
        visible(&storage, &viewer, EntityKind::Lesson).await,
        vec![campus.lesson, campus.other_lesson]
    );
    // 成绩按课程排序，而不是按创建顺序
    assert_eq!(visible(&storage, &viewer, EntityKind::Mark).await, vec![earlier, later]);
}

#[actix_web::test]
async fn test_member_sees_only_public_catalogs() {
    let storage = common::storage().await;
    let campus = common::seed_campus(&storage, None, None).await;
    mark(&storage, campus.student, campus.lesson, 5).await;

    let viewer = Viewer::Member;
    assert_eq!(visible(&storage, &viewer, EntityKind::Faculty).await, vec![campus.faculty]);
    assert_eq!(visible(&storage, &viewer, EntityKind::Teacher).await.len(), 2);
    for kind in [
        EntityKind::Group,
        EntityKind::Subject,
        EntityKind::Student,
        EntityKind::Lesson,
        EntityKind::Mark,
        EntityKind::Hometask,
    ] {
        assert!(visible(&storage, &viewer, kind).await.is_empty(), "{kind}");
    }

    assert!(
        !storage
            .is_visible(&viewer, EntityKind::Group, campus.group)
            .await
            .unwrap()
    );
}

#[actix_web::test]
async fn test_catalog_page_numbers_are_clamped() {
    let storage = common::storage().await;
    common::seed_campus(&storage, None, None).await;

    // 三名学生，每页两条
    let last = storage
        .list_visible(&Viewer::Superuser, EntityKind::Student, Some("99"), 2)
        .await
        .unwrap();
    assert_eq!(last.pagination.page, 2);
    assert_eq!(last.pagination.total_pages, 2);
    assert_eq!(last.items.len(), 1);

    let first = storage
        .list_visible(&Viewer::Superuser, EntityKind::Student, Some("abc"), 2)
        .await
        .unwrap();
    assert_eq!(first.pagination.page, 1);
    assert_eq!(first.items.len(), 2);
}
