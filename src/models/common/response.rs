use serde::{Deserialize, Serialize};

use crate::models::ErrorCode;

/// 所有接口共用的响应信封 `{code, message, data?, timestamp}`
///
/// 失败响应的 data 可以携带结构化内容，例如字段错误或详情页上下文。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T> ApiResponse<T> {
    fn build(code: ErrorCode, data: Option<T>, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self::build(ErrorCode::Success, Some(data), message)
    }

    pub fn error(code: ErrorCode, data: T, message: impl Into<String>) -> Self {
        Self::build(code, Some(data), message)
    }
}

impl ApiResponse<()> {
    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::build(code, None, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_error_omits_data() {
        let body = serde_json::to_value(ApiResponse::error_empty(ErrorCode::NotFound, "gone"))
            .unwrap();
        assert_eq!(body["code"], ErrorCode::NotFound as i32);
        assert_eq!(body["message"], "gone");
        assert!(body.get("data").is_none());
        assert!(body["timestamp"].is_string());
    }
}
