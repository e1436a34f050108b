use serde::Deserialize;

use crate::models::common::Nested;
use crate::models::groups::requests::CreateGroupRequest;
use crate::utils::validate::{FieldErrors, Validate, check_required_text};

// 创建学生请求，group 可嵌套创建
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudentRequest {
    pub full_name: String,
    pub group: Nested<CreateGroupRequest>,
    #[serde(default)]
    pub user: Option<i64>,
}

impl Validate for CreateStudentRequest {
    fn collect_errors(&self, errors: &mut FieldErrors) {
        check_required_text(errors, "full_name", &self.full_name);
        self.group.collect_nested_errors("group", errors);
    }
}
