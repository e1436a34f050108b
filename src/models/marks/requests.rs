use serde::Deserialize;
use serde::de::IgnoredAny;

use crate::models::common::{Nested, deserialize_optional_param, deserialize_some};
use crate::models::lessons::requests::CreateLessonRequest;
use crate::models::students::requests::CreateStudentRequest;
use crate::utils::validate::{
    FieldErrors, Validate, check_mark_or_presence, check_mark_value, check_presence,
};

pub const MSG_IMMUTABLE: &str = "This field cannot be changed.";

// 创建成绩请求，student 与 lesson 均可嵌套创建
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMarkRequest {
    #[serde(default)]
    pub mark: Option<i32>,
    #[serde(default)]
    pub presence: Option<String>,
    pub student: Nested<CreateStudentRequest>,
    pub lesson: Nested<CreateLessonRequest>,
}

impl Validate for CreateMarkRequest {
    fn collect_errors(&self, errors: &mut FieldErrors) {
        check_mark_value(errors, "mark", self.mark);
        check_presence(errors, "presence", self.presence.as_deref());
        check_mark_or_presence(errors, self.mark, self.presence.as_deref());
        self.student.collect_nested_errors("student", errors);
        self.lesson.collect_nested_errors("lesson", errors);
    }
}

// 更新成绩请求
//
// student 与 lesson 在创建后不可修改，出现即报错。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMarkRequest {
    #[serde(default, deserialize_with = "deserialize_some")]
    pub mark: Option<Option<i32>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub presence: Option<Option<String>>,
    #[serde(default)]
    pub student: Option<IgnoredAny>,
    #[serde(default)]
    pub lesson: Option<IgnoredAny>,
}

impl UpdateMarkRequest {
    /// 与现有记录合并后的 (mark, presence)
    pub fn merged(
        &self,
        mark: Option<i32>,
        presence: Option<String>,
    ) -> (Option<i32>, Option<String>) {
        let mark = self.mark.unwrap_or(mark);
        let presence = match &self.presence {
            Some(value) => value.clone(),
            None => presence,
        };
        (mark, crate::utils::validate::normalize_presence(presence))
    }

    /// 校验合并后的状态
    pub fn validate_merged(
        &self,
        mark: Option<i32>,
        presence: Option<&str>,
    ) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        self.collect_errors(&mut errors);
        check_mark_or_presence(&mut errors, mark, presence);
        errors.into_result()
    }
}

impl Validate for UpdateMarkRequest {
    fn collect_errors(&self, errors: &mut FieldErrors) {
        if let Some(mark) = self.mark {
            check_mark_value(errors, "mark", mark);
        }
        if let Some(presence) = &self.presence {
            check_presence(errors, "presence", presence.as_deref());
        }
        if self.student.is_some() {
            errors.add("student", MSG_IMMUTABLE);
        }
        if self.lesson.is_some() {
            errors.add("lesson", MSG_IMMUTABLE);
        }
    }
}

// 成绩列表查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarkListQuery {
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub size: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub mark: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub presence: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub created: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub modified: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub student: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub lesson: Option<i64>,
}
