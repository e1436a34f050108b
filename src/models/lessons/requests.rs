use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

use crate::models::common::{Nested, deserialize_optional_param};
use crate::models::subjects::requests::CreateSubjectRequest;
use crate::models::teachers::requests::CreateTeacherRequest;
use crate::utils::validate::{FieldErrors, Validate, check_day, check_time};

// 创建课程请求
//
// day 为 `YYYY-MM-DD`，precise_time 为 `HH:MM[:SS]`，
// 以字符串接收以便给出字段级错误。
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLessonRequest {
    pub day: String,
    pub precise_time: String,
    pub subject: Nested<CreateSubjectRequest>,
    pub teacher: Nested<CreateTeacherRequest>,
    #[serde(default)]
    pub groups: Vec<i64>,
}

impl Validate for CreateLessonRequest {
    fn collect_errors(&self, errors: &mut FieldErrors) {
        check_day(errors, "day", &self.day);
        check_time(errors, "precise_time", &self.precise_time);
        self.subject.collect_nested_errors("subject", errors);
        self.teacher.collect_nested_errors("teacher", errors);
    }
}

// 更新课程请求，groups 给出时整体替换
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLessonRequest {
    pub day: Option<String>,
    pub precise_time: Option<String>,
    pub subject: Option<i64>,
    pub teacher: Option<i64>,
    pub groups: Option<Vec<i64>>,
}

impl Validate for UpdateLessonRequest {
    fn collect_errors(&self, errors: &mut FieldErrors) {
        if let Some(day) = &self.day {
            check_day(errors, "day", day);
        }
        if let Some(precise_time) = &self.precise_time {
            check_time(errors, "precise_time", precise_time);
        }
    }
}

// 课程列表查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LessonListQuery {
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub size: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub day: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub precise_time: Option<NaiveTime>,
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub subject: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub teacher: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_param")]
    pub groups: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson(day: &str, time: &str) -> CreateLessonRequest {
        serde_json::from_value(serde_json::json!({
            "day": day,
            "precise_time": time,
            "subject": { "id": 1 },
            "teacher": { "id": 1 }
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_boundary_values() {
        assert!(lesson("2024-02-29", "23:59:59").validate().is_ok());
        assert!(lesson("2023-01-01", "00:00").validate().is_ok());
    }

    #[test]
    fn test_invalid_calendar_values() {
        let errors = lesson("2023-02-30", "25:00").validate().unwrap_err();
        assert!(errors.field("day").is_some());
        assert!(errors.field("precise_time").is_some());
    }

    #[test]
    fn test_nested_teacher_path() {
        let req: CreateLessonRequest = serde_json::from_value(serde_json::json!({
            "day": "2023-09-01",
            "precise_time": "09:00",
            "subject": { "title": "" },
            "teacher": { "full_name": "Ivanov", "faculty": { "title": "" } }
        }))
        .unwrap();

        let errors = req.validate().unwrap_err();
        assert!(errors.field("subject.title").is_some());
        assert!(errors.field("teacher.faculty.title").is_some());
    }
}
