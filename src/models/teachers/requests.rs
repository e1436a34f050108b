use serde::Deserialize;

use crate::models::common::{Nested, deserialize_optional_param, deserialize_some};
use crate::models::faculties::requests::CreateFacultyRequest;
use crate::utils::validate::{FieldErrors, Validate, check_required_text};

// 创建教师请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeacherRequest {
    pub full_name: String,
    pub faculty: Nested<CreateFacultyRequest>,
    #[serde(default)]
    pub user: Option<i64>,
}

impl Validate for CreateTeacherRequest {
    fn collect_errors(&self, errors: &mut FieldErrors) {
        check_required_text(errors, "full_name", &self.full_name);
        self.faculty.collect_nested_errors("faculty", errors);
    }
}

// 更新教师请求
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTeacherRequest {
    pub full_name: Option<String>,
    pub faculty: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub user: Option<Option<i64>>,
}

impl Validate for UpdateTeacherRequest {
    fn collect_errors(&self, errors: &mut FieldErrors) {
        if let Some(full_name) = &self.full_name {
            check_required_text(errors, "full_name", full_name);
        }
    }
}

// 教师列表查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeacherListQuery {
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub size: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub faculty: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub user: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub subjects: Option<i64>,
}
