use serde::Deserialize;

use crate::utils::validate::{FieldErrors, Validate, check_required_text};

// 创建科目请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubjectRequest {
    pub title: String,
}

impl Validate for CreateSubjectRequest {
    fn collect_errors(&self, errors: &mut FieldErrors) {
        check_required_text(errors, "title", &self.title);
    }
}
