use serde::Deserialize;

use crate::models::common::{Nested, deserialize_optional_param};
use crate::models::faculties::requests::CreateFacultyRequest;
use crate::utils::validate::{FieldErrors, Validate, check_required_text};

// 创建学生组请求，faculty 可嵌套创建
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGroupRequest {
    pub title: String,
    pub faculty: Nested<CreateFacultyRequest>,
}

impl Validate for CreateGroupRequest {
    fn collect_errors(&self, errors: &mut FieldErrors) {
        check_required_text(errors, "title", &self.title);
        self.faculty.collect_nested_errors("faculty", errors);
    }
}

// 更新学生组请求
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateGroupRequest {
    pub title: Option<String>,
    pub faculty: Option<i64>,
}

impl Validate for UpdateGroupRequest {
    fn collect_errors(&self, errors: &mut FieldErrors) {
        if let Some(title) = &self.title {
            check_required_text(errors, "title", title);
        }
    }
}

// 学生组列表查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroupListQuery {
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub size: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub faculty: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub lessons: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub subjects: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validate::CHARS_DEFAULT;

    #[test]
    fn test_nested_faculty_errors_use_dotted_path() {
        let req: CreateGroupRequest = serde_json::from_value(serde_json::json!({
            "title": "G-1",
            "faculty": { "title": "f".repeat(CHARS_DEFAULT + 1) }
        }))
        .unwrap();

        let errors = req.validate().unwrap_err();
        assert!(errors.field("faculty.title").is_some());
        assert!(errors.field("title").is_none());
    }

    #[test]
    fn test_faculty_reference_skips_nested_validation() {
        let req: CreateGroupRequest = serde_json::from_value(serde_json::json!({
            "title": "G-1",
            "faculty": { "id": 1 }
        }))
        .unwrap();
        assert!(req.validate().is_ok());
    }
}
