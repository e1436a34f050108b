use serde::Deserialize;

use crate::models::students::entities::StudentChoice;
use crate::utils::validate::{
    FieldErrors, MSG_INVALID_CHOICE, MSG_REQUIRED, check_mark_or_presence, check_mark_value,
    check_presence,
};

// 目录页查询参数，page 原样保留以便按“取页”规则解析
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogQuery {
    pub page: Option<String>,
}

// 课程详情页的成绩表单
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarkFormRequest {
    pub student: Option<i64>,
    pub lesson: Option<i64>,
    #[serde(default)]
    pub mark: Option<i32>,
    #[serde(default)]
    pub presence: Option<String>,
}

impl MarkFormRequest {
    /// 学生必须属于课程所在的学生组，课程只能是当前课程
    pub fn check(&self, lesson_id: i64, eligible: &[StudentChoice]) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();

        match self.student {
            None => errors.add("student", MSG_REQUIRED),
            Some(id) if !eligible.iter().any(|s| s.id == id) => {
                errors.add("student", MSG_INVALID_CHOICE)
            }
            Some(_) => {}
        }

        if let Some(id) = self.lesson
            && id != lesson_id
        {
            errors.add("lesson", MSG_INVALID_CHOICE);
        }

        check_mark_value(&mut errors, "mark", self.mark);
        check_presence(&mut errors, "presence", self.presence.as_deref());
        check_mark_or_presence(&mut errors, self.mark, self.presence.as_deref());

        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eligible() -> Vec<StudentChoice> {
        vec![StudentChoice {
            id: 10,
            full_name: "Petrov".to_string(),
        }]
    }

    #[test]
    fn test_eligible_student_passes() {
        let form = MarkFormRequest {
            student: Some(10),
            lesson: Some(3),
            mark: Some(5),
            presence: None,
        };
        assert!(form.check(3, &eligible()).is_ok());
    }

    #[test]
    fn test_foreign_student_and_lesson_rejected() {
        let form = MarkFormRequest {
            student: Some(11),
            lesson: Some(4),
            mark: None,
            presence: Some("Н".to_string()),
        };
        let errors = form.check(3, &eligible()).unwrap_err();
        assert!(errors.field("student").is_some());
        assert!(errors.field("lesson").is_some());
    }

    #[test]
    fn test_missing_student_and_empty_values() {
        let errors = MarkFormRequest::default().check(3, &eligible()).unwrap_err();
        assert_eq!(errors.field("student"), Some(&[MSG_REQUIRED.to_string()][..]));
        assert_eq!(errors.non_field_errors.len(), 1);
    }
}
