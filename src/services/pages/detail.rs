use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::PageService;
use crate::errors::{PortalError, Result};
use crate::middlewares::RequireJWT;
use crate::models::marks::requests::CreateMarkRequest;
use crate::models::pages::requests::MarkFormRequest;
use crate::models::pages::responses::{DetailContext, MarkFormContext};
use crate::models::users::entities::Viewer;
use crate::models::{ApiResponse, ErrorCode, Nested};
use crate::services::responses::{not_found, storage_error};
use crate::storage::Storage;
use crate::utils::validate::{FieldErrors, MARK_MAX, MARK_MIN, PRESENCE_CODES};
use crate::visibility::EntityKind;

fn not_found_code(kind: EntityKind) -> ErrorCode {
    match kind {
        EntityKind::Faculty => ErrorCode::FacultyNotFound,
        EntityKind::Group => ErrorCode::GroupNotFound,
        EntityKind::Subject => ErrorCode::SubjectNotFound,
        EntityKind::Teacher => ErrorCode::TeacherNotFound,
        EntityKind::Student => ErrorCode::StudentNotFound,
        EntityKind::Lesson => ErrorCode::LessonNotFound,
        EntityKind::Mark => ErrorCode::MarkNotFound,
        EntityKind::Hometask => ErrorCode::HometaskNotFound,
    }
}

/// 组装详情页上下文，实体不存在时返回 None
///
/// 课程详情附带成绩列表；超级用户与教师额外得到成绩表单。
async fn build_detail(
    storage: &Arc<dyn Storage>,
    viewer: &Viewer,
    kind: EntityKind,
    id: i64,
) -> Result<Option<DetailContext>> {
    let Some(object) = storage.get_entity(kind, id).await? else {
        return Ok(None);
    };
    let visible = storage.is_visible(viewer, kind, id).await?;

    let mut context = DetailContext {
        kind,
        object,
        visible,
        marks: None,
        mark_form: None,
        form_errors: None,
    };

    if kind == EntityKind::Lesson {
        context.marks = Some(storage.list_lesson_marks(id).await?);
        if viewer.is_staff() {
            context.mark_form = Some(MarkFormContext {
                lesson: id,
                students: storage.list_lesson_students(id).await?,
                mark_choices: (MARK_MIN..=MARK_MAX).collect(),
                presence_choices: PRESENCE_CODES.iter().map(|c| c.to_string()).collect(),
            });
        }
    }

    Ok(Some(context))
}

pub async fn handle_detail(
    service: &PageService,
    request: &HttpRequest,
    kind: &str,
    id: i64,
) -> ActixResult<HttpResponse> {
    let Some(kind) = EntityKind::from_slug(kind) else {
        return Ok(not_found(ErrorCode::UnknownCatalog, "Unknown catalog"));
    };

    let viewer = RequireJWT::extract_viewer(request);
    let storage = service.get_storage(request);

    match build_detail(&storage, &viewer, kind, id).await {
        Ok(Some(context)) => Ok(HttpResponse::Ok().json(ApiResponse::success(context, "Detail"))),
        Ok(None) => Ok(not_found(not_found_code(kind), "Object not found")),
        Err(e) => Ok(storage_error("Failed to load detail", e)),
    }
}

pub async fn handle_submit_mark(
    service: &PageService,
    request: &HttpRequest,
    lesson_id: i64,
    form: MarkFormRequest,
) -> ActixResult<HttpResponse> {
    let viewer = RequireJWT::extract_viewer(request);
    if !viewer.is_staff() {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Only superusers and teachers can enter marks",
        )));
    }

    let storage = service.get_storage(request);

    let mut context = match build_detail(&storage, &viewer, EntityKind::Lesson, lesson_id).await {
        Ok(Some(context)) => context,
        Ok(None) => return Ok(not_found(ErrorCode::LessonNotFound, "Object not found")),
        Err(e) => return Ok(storage_error("Failed to load detail", e)),
    };

    let eligible = context
        .mark_form
        .as_ref()
        .map(|form| form.students.as_slice())
        .unwrap_or_default();

    if let Err(errors) = form.check(lesson_id, eligible) {
        context.form_errors = Some(errors);
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error(
            ErrorCode::ValidationFailed,
            context,
            "Mark form is invalid",
        )));
    }

    let Some(student_id) = form.student else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Student is required",
        )));
    };

    let create = CreateMarkRequest {
        mark: form.mark,
        presence: form.presence,
        student: Nested::Existing { id: student_id },
        lesson: Nested::Existing { id: lesson_id },
    };

    match storage.create_mark(create).await {
        Ok(mark) => {
            info!(
                "Mark {} entered on lesson {} by {:?}",
                mark.id,
                lesson_id,
                RequireJWT::extract_user_id(request)
            );
            match build_detail(&storage, &viewer, EntityKind::Lesson, lesson_id).await {
                Ok(Some(refreshed)) => Ok(HttpResponse::Created()
                    .json(ApiResponse::success(refreshed, "Mark created successfully"))),
                Ok(None) => Ok(not_found(ErrorCode::LessonNotFound, "Object not found")),
                Err(e) => Ok(storage_error("Failed to load detail", e)),
            }
        }
        Err(PortalError::Validation(msg)) => {
            let mut errors = FieldErrors::default();
            errors.add_non_field(msg);
            context.form_errors = Some(errors);
            Ok(HttpResponse::BadRequest().json(ApiResponse::error(
                ErrorCode::ValidationFailed,
                context,
                "Mark form is invalid",
            )))
        }
        Err(e) => Ok(storage_error("Mark creation failed", e)),
    }
}
