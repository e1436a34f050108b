mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{Value, json};

use university_portal::models::ErrorCode;

#[actix_web::test]
async fn test_anonymous_visitor_is_a_member() {
    let storage = common::storage().await;
    let campus = common::seed_campus(&storage, None, None).await;
    let app = test::init_service(common::build_app(storage.clone())).await;

    let req = test::TestRequest::get().uri("/pages/home").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["faculties"], 1);
    assert_eq!(body["data"]["students"], 3);

    let req = test::TestRequest::get().uri("/pages/teachers/").to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    // 按姓名排序
    assert_eq!(body["data"]["items"][0]["full_name"], "Ada Lovelace");
    assert_eq!(body["data"]["items"][1]["full_name"], "Carl Gauss");

    let req = test::TestRequest::get().uri("/pages/groups").to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 0);

    let req = test::TestRequest::get()
        .uri(&format!("/pages/groups/{}/", campus.group))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["visible"], false);
    assert_eq!(body["data"]["object"]["title"], "PH-101");
}

#[actix_web::test]
async fn test_profile_requires_login() {
    let storage = common::storage().await;
    let user = common::create_user(&storage, "boris", false).await;
    let app = test::init_service(common::build_app(storage.clone())).await;

    let req = test::TestRequest::get().uri("/pages/profile").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/pages/profile/")
        .insert_header(common::bearer(&user))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["username"], "boris");
    assert_eq!(body["data"]["email"], "boris@example.org");
}

#[actix_web::test]
async fn test_unknown_catalog_and_missing_object() {
    let storage = common::storage().await;
    let app = test::init_service(common::build_app(storage.clone())).await;

    let req = test::TestRequest::get().uri("/pages/dragons").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], ErrorCode::UnknownCatalog as i32);

    let req = test::TestRequest::get().uri("/pages/faculties/5").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_lesson_detail_has_mark_form_for_teacher() {
    let storage = common::storage().await;
    let teacher_user = common::create_user(&storage, "ada", false).await;
    let student_user = common::create_user(&storage, "boris", false).await;
    let campus = common::seed_campus(&storage, Some(teacher_user.id), Some(student_user.id)).await;
    let app = test::init_service(common::build_app(storage.clone())).await;

    let req = test::TestRequest::get()
        .uri(&format!("/pages/lessons/{}/", campus.lesson))
        .insert_header(common::bearer(&teacher_user))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["visible"], true);
    let form = &body["data"]["mark_form"];
    assert_eq!(form["lesson"], campus.lesson);
    assert_eq!(form["students"].as_array().unwrap().len(), 2);
    assert_eq!(form["mark_choices"], json!([1, 2, 3, 4, 5]));
    assert_eq!(form["presence_choices"], json!(["Н"]));

    // 学生看不到成绩表单
    let req = test::TestRequest::get()
        .uri(&format!("/pages/lessons/{}", campus.lesson))
        .insert_header(common::bearer(&student_user))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"].get("mark_form").is_none());
    assert_eq!(body["data"]["marks"], json!([]));
}

#[actix_web::test]
async fn test_submit_mark_form() {
    let storage = common::storage().await;
    let teacher_user = common::create_user(&storage, "ada", false).await;
    let student_user = common::create_user(&storage, "boris", false).await;
    let campus = common::seed_campus(&storage, Some(teacher_user.id), Some(student_user.id)).await;
    let app = test::init_service(common::build_app(storage.clone())).await;
    let uri = format!("/pages/lessons/{}/", campus.lesson);

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(common::bearer(&student_user))
        .set_json(json!({ "student": campus.student, "lesson": campus.lesson, "mark": 5 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // 其他学生组的学生不在可选范围内
    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(common::bearer(&teacher_user))
        .set_json(json!({ "student": campus.outsider, "lesson": campus.lesson, "mark": 5 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"]["form_errors"]["fields"]["student"].is_array());
    assert!(body["data"]["mark_form"].is_object());

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(common::bearer(&teacher_user))
        .set_json(json!({ "student": campus.student, "lesson": campus.lesson }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"]["form_errors"]["non_field_errors"].is_array());

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(common::bearer(&teacher_user))
        .set_json(json!({ "student": campus.student, "lesson": campus.lesson, "mark": 4 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let marks = body["data"]["marks"].as_array().unwrap();
    assert_eq!(marks.len(), 1);
    assert_eq!(marks[0]["mark"], 4);
    assert_eq!(marks[0]["student"]["id"], campus.student);
}

#[actix_web::test]
async fn test_about_and_contacts() {
    let storage = common::storage().await;
    let app = test::init_service(common::build_app(storage.clone())).await;

    let req = test::TestRequest::get().uri("/pages/about").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["version"], env!("CARGO_PKG_VERSION"));

    let req = test::TestRequest::get().uri("/pages/contacts").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"]["email"].is_string());
}
