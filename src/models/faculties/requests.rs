use serde::Deserialize;

use crate::models::common::{deserialize_optional_param, deserialize_some};
use crate::utils::validate::{FieldErrors, Validate, check_required_text, check_text_length};

// 创建院系请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFacultyRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Validate for CreateFacultyRequest {
    fn collect_errors(&self, errors: &mut FieldErrors) {
        check_required_text(errors, "title", &self.title);
        if let Some(description) = &self.description {
            check_text_length(errors, "description", description);
        }
    }
}

// 更新院系请求
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFacultyRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub description: Option<Option<String>>,
}

impl Validate for UpdateFacultyRequest {
    fn collect_errors(&self, errors: &mut FieldErrors) {
        if let Some(title) = &self.title {
            check_required_text(errors, "title", title);
        }
        if let Some(Some(description)) = &self.description {
            check_text_length(errors, "description", description);
        }
    }
}

// 院系列表查询参数（HTTP 与存储层共用）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FacultyListQuery {
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub size: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validate::CHARS_DEFAULT;

    #[test]
    fn test_title_boundary() {
        let ok = CreateFacultyRequest {
            title: "x".repeat(CHARS_DEFAULT),
            description: None,
        };
        assert!(ok.validate().is_ok());

        let too_long = CreateFacultyRequest {
            title: "x".repeat(CHARS_DEFAULT + 1),
            description: Some(String::new()),
        };
        let errors = too_long.validate().unwrap_err();
        assert!(errors.field("title").is_some());
    }

    #[test]
    fn test_update_ignores_missing_fields() {
        assert!(UpdateFacultyRequest::default().validate().is_ok());

        let blank = UpdateFacultyRequest {
            title: Some(String::new()),
            description: None,
        };
        assert!(blank.validate().is_err());
    }
}
