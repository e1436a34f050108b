//! 请求边界上的错误响应
//!
//! 存储层错误在这里统一翻译为 HTTP 状态码与 `ApiResponse` 信封。

use actix_web::HttpResponse;
use tracing::error;

use crate::errors::PortalError;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::FieldErrors;

/// 字段校验失败，data 为 `{fields, non_field_errors}`
pub(crate) fn validation_failed(errors: FieldErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error(
        ErrorCode::ValidationFailed,
        errors,
        "Validation failed",
    ))
}

/// 关联记录不存在，消息形如 `lesson.subject: Invalid pk "9" - object does not exist.`
fn relation_missing(message: &str) -> HttpResponse {
    let mut errors = FieldErrors::default();
    match message.split_once(": ") {
        Some((path, detail)) if !path.is_empty() && !path.contains(' ') => {
            errors.add(path, detail)
        }
        _ => errors.add_non_field(message),
    }

    HttpResponse::BadRequest().json(ApiResponse::error(
        ErrorCode::RelationMissing,
        errors,
        "Related object does not exist",
    ))
}

/// 存储层错误到响应的映射
pub(crate) fn storage_error(context: &str, err: PortalError) -> HttpResponse {
    match err {
        PortalError::Validation(msg) => HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)),
        PortalError::RelationMissing(msg) => relation_missing(&msg),
        PortalError::Conflict(msg) => {
            HttpResponse::Conflict().json(ApiResponse::error_empty(ErrorCode::Conflict, msg))
        }
        PortalError::NotFound(msg) => {
            HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::NotFound, msg))
        }
        other => {
            error!("{}: {}", context, other);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("{context}: {other}"),
            ))
        }
    }
}

pub(crate) fn not_found(code: ErrorCode, message: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (PortalError::validation("x"), StatusCode::BAD_REQUEST),
            (
                PortalError::relation_missing("faculty: Invalid pk \"3\" - object does not exist."),
                StatusCode::BAD_REQUEST,
            ),
            (PortalError::conflict("dup"), StatusCode::CONFLICT),
            (PortalError::not_found("gone"), StatusCode::NOT_FOUND),
            (
                PortalError::database_operation("boom"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(storage_error("test", err).status(), status);
        }
    }
}
