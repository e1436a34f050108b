mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{Value, json};

use university_portal::models::ErrorCode;

#[actix_web::test]
async fn test_login_and_me() {
    let storage = common::storage().await;
    common::create_user(&storage, "root", true).await;
    let app = test::init_service(common::build_app(storage.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": "root", "password": common::PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let token = body["data"]["access_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["user"]["username"], "root");
    assert_eq!(body["data"]["viewer"]["role"], "superuser");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": "root", "password": "wrong" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_rest_requires_authentication_and_staff_for_writes() {
    let storage = common::storage().await;
    let member = common::create_user(&storage, "guest", false).await;
    let app = test::init_service(common::build_app(storage.clone())).await;

    let req = test::TestRequest::get().uri("/rest/faculty/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/rest/faculty/")
        .insert_header(common::bearer(&member))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/rest/faculty/")
        .insert_header(common::bearer(&member))
        .set_json(json!({ "title": "Law" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_writes_follow_portal_role() {
    let storage = common::storage().await;
    let teacher = common::create_user(&storage, "ada", false).await;
    let student = common::create_user(&storage, "boris", false).await;
    common::seed_campus(&storage, Some(teacher.id), Some(student.id)).await;
    let app = test::init_service(common::build_app(storage.clone())).await;

    let req = test::TestRequest::post()
        .uri("/rest/faculty/")
        .insert_header(common::bearer(&teacher))
        .set_json(json!({ "title": "Law" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/rest/faculty/")
        .insert_header(common::bearer(&student))
        .set_json(json!({ "title": "History" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    // 学生可以读取
    let req = test::TestRequest::get()
        .uri("/rest/faculty/")
        .insert_header(common::bearer(&student))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_account_linked_to_student_and_teacher_can_write() {
    let storage = common::storage().await;
    let both = common::create_user(&storage, "both", false).await;
    let campus = common::seed_campus(&storage, Some(both.id), Some(both.id)).await;
    let app = test::init_service(common::build_app(storage.clone())).await;

    let req = test::TestRequest::post()
        .uri("/rest/faculty/")
        .insert_header(common::bearer(&both))
        .set_json(json!({ "title": "Law" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri(&format!("/pages/lessons/{}", campus.lesson))
        .insert_header(common::bearer(&both))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"]["mark_form"].is_object());
}

#[actix_web::test]
async fn test_faculty_lifecycle() {
    let storage = common::storage().await;
    let admin = common::create_user(&storage, "root", true).await;
    let app = test::init_service(common::build_app(storage.clone())).await;

    let req = test::TestRequest::post()
        .uri("/rest/faculty")
        .insert_header(common::bearer(&admin))
        .set_json(json!({ "title": "Chemistry", "description": "Reactions" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let id = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::patch()
        .uri(&format!("/rest/faculty/{id}/"))
        .insert_header(common::bearer(&admin))
        .set_json(json!({ "description": "Molecules" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["title"], "Chemistry");
    assert_eq!(body["data"]["description"], "Molecules");

    let req = test::TestRequest::get()
        .uri("/rest/faculty/?title=Chemistry")
        .insert_header(common::bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["pagination"]["total"], 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/rest/faculty/{id}/"))
        .insert_header(common::bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/rest/faculty/{id}"))
        .insert_header(common::bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_invalid_payload_reports_dotted_paths() {
    let storage = common::storage().await;
    let admin = common::create_user(&storage, "root", true).await;
    let app = test::init_service(common::build_app(storage.clone())).await;

    let mut payload = common::nested_lesson_payload("Astronomy");
    payload["teacher"]["faculty"]["title"] = json!("");
    payload["day"] = json!("2024-02-30");

    let req = test::TestRequest::post()
        .uri("/rest/lesson/")
        .insert_header(common::bearer(&admin))
        .set_json(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], ErrorCode::ValidationFailed as i32);
    assert!(body["data"]["fields"]["teacher.faculty.title"].is_array());
    assert!(body["data"]["fields"]["day"].is_array());
}

#[actix_web::test]
async fn test_reference_with_embedded_fields_is_rejected() {
    let storage = common::storage().await;
    let admin = common::create_user(&storage, "root", true).await;
    let campus = common::seed_campus(&storage, None, None).await;
    let app = test::init_service(common::build_app(storage.clone())).await;

    let req = test::TestRequest::post()
        .uri("/rest/group/")
        .insert_header(common::bearer(&admin))
        .set_json(json!({
            "title": "PH-103",
            "faculty": { "id": campus.faculty, "title": "Renamed" }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], ErrorCode::BadRequest as i32);
    assert!(body["message"].as_str().unwrap().contains("only \"id\""));
}

#[actix_web::test]
async fn test_missing_reference_is_relation_error() {
    let storage = common::storage().await;
    let admin = common::create_user(&storage, "root", true).await;
    let app = test::init_service(common::build_app(storage.clone())).await;

    let req = test::TestRequest::post()
        .uri("/rest/hometask/")
        .insert_header(common::bearer(&admin))
        .set_json(json!({
            "task": "Solve problems 1-10",
            "lesson": {
                "day": "2024-10-01",
                "precise_time": "10:15",
                "subject": { "id": 77 },
                "teacher": { "full_name": "Nobody", "faculty": { "title": "Ghosts" } }
            }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], ErrorCode::RelationMissing as i32);
    assert_eq!(
        body["data"]["fields"]["lesson.subject"][0],
        "Invalid pk \"77\" - object does not exist."
    );

    let req = test::TestRequest::get()
        .uri("/rest/teacher/")
        .insert_header(common::bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["pagination"]["total"], 0);
}

#[actix_web::test]
async fn test_lesson_filters_and_ordering() {
    let storage = common::storage().await;
    let teacher_user = common::create_user(&storage, "ada", false).await;
    let campus = common::seed_campus(&storage, Some(teacher_user.id), None).await;
    let app = test::init_service(common::build_app(storage.clone())).await;

    let req = test::TestRequest::get()
        .uri("/rest/lesson/")
        .insert_header(common::bearer(&teacher_user))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    let days: Vec<&str> = body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["day"].as_str().unwrap())
        .collect();
    assert_eq!(days, vec!["2024-09-02", "2024-09-03"]);

    let req = test::TestRequest::get()
        .uri(&format!("/rest/lesson/?groups={}", campus.other_group))
        .insert_header(common::bearer(&teacher_user))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["pagination"]["total"], 1);
    assert_eq!(body["data"]["items"][0]["id"], campus.other_lesson);

    let req = test::TestRequest::get()
        .uri("/rest/lesson/?day=yesterday")
        .insert_header(common::bearer(&teacher_user))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_mark_update_rules() {
    let storage = common::storage().await;
    let admin = common::create_user(&storage, "root", true).await;
    let campus = common::seed_campus(&storage, None, None).await;
    let app = test::init_service(common::build_app(storage.clone())).await;

    let req = test::TestRequest::post()
        .uri("/rest/mark/")
        .insert_header(common::bearer(&admin))
        .set_json(json!({
            "mark": 4,
            "student": { "id": campus.student },
            "lesson": { "id": campus.lesson }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let id = body["data"]["id"].as_i64().unwrap();

    // 清空成绩后成绩与出勤都为空
    let req = test::TestRequest::patch()
        .uri(&format!("/rest/mark/{id}/"))
        .insert_header(common::bearer(&admin))
        .set_json(json!({ "mark": null }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri(&format!("/rest/mark/{id}/"))
        .insert_header(common::bearer(&admin))
        .set_json(json!({ "student": { "id": campus.outsider } }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri(&format!("/rest/mark/{id}/"))
        .insert_header(common::bearer(&admin))
        .set_json(json!({ "mark": null, "presence": "Н" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["presence"], "Н");
    assert!(body["data"]["mark"].is_null());
}

#[actix_web::test]
async fn test_invalid_path_id_is_rejected() {
    let storage = common::storage().await;
    let admin = common::create_user(&storage, "root", true).await;
    let app = test::init_service(common::build_app(storage.clone())).await;

    let req = test::TestRequest::get()
        .uri("/rest/group/abc/")
        .insert_header(common::bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
