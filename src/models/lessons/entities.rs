use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::subjects::entities::Subject;
use crate::models::teachers::entities::Teacher;

// 课程
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: i64,
    pub day: NaiveDate,
    pub precise_time: NaiveTime,
    pub subject: Subject,
    pub teacher: Teacher,
    pub groups: Vec<i64>,
}
