use serde::{Deserialize, Serialize};

// 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1xxx
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    InternalServerError = 1005,
    ValidationFailed = 1006,
    RelationMissing = 1007,
    Conflict = 1009,

    // 认证错误 2xxx
    AuthFailed = 2000,
    UserNotFound = 2001,
    TokenCreationFailed = 2002,

    // 门户资源错误 3xxx
    FacultyNotFound = 3000,
    GroupNotFound = 3001,
    SubjectNotFound = 3002,
    TeacherNotFound = 3003,
    StudentNotFound = 3004,
    LessonNotFound = 3005,
    MarkNotFound = 3006,
    HometaskNotFound = 3007,
    UnknownCatalog = 3100,
}

impl From<ErrorCode> for i32 {
    fn from(code: ErrorCode) -> Self {
        code as i32
    }
}
