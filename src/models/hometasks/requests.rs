use serde::Deserialize;

use crate::models::common::{Nested, deserialize_optional_param};
use crate::models::lessons::requests::CreateLessonRequest;
use crate::utils::validate::{FieldErrors, Validate, check_required_text};

// 创建作业请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateHometaskRequest {
    pub task: String,
    pub lesson: Nested<CreateLessonRequest>,
}

impl Validate for CreateHometaskRequest {
    fn collect_errors(&self, errors: &mut FieldErrors) {
        check_required_text(errors, "task", &self.task);
        self.lesson.collect_nested_errors("lesson", errors);
    }
}

// 更新作业请求
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateHometaskRequest {
    pub task: Option<String>,
    pub lesson: Option<i64>,
}

impl Validate for UpdateHometaskRequest {
    fn collect_errors(&self, errors: &mut FieldErrors) {
        if let Some(task) = &self.task {
            check_required_text(errors, "task", task);
        }
    }
}

// 作业列表查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HometaskListQuery {
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub size: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub task: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub created: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub lesson: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_required() {
        let req: CreateHometaskRequest =
            serde_json::from_value(serde_json::json!({ "task": "", "lesson": { "id": 1 } }))
                .unwrap();
        assert!(req.validate().unwrap_err().field("task").is_some());
    }
}
