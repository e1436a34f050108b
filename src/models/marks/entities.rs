use serde::{Deserialize, Serialize};

use crate::models::lessons::entities::Lesson;
use crate::models::students::entities::Student;

// 成绩与出勤记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    pub id: i64,
    pub mark: Option<i32>,
    pub presence: Option<String>,
    pub created: chrono::DateTime<chrono::Utc>,
    pub modified: chrono::DateTime<chrono::Utc>,
    pub student: Student,
    pub lesson: Lesson,
}
