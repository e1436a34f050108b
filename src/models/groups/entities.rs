use serde::{Deserialize, Serialize};

use crate::models::faculties::entities::Faculty;

// 学生组，lessons/subjects 为派生关联的 ID
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub title: String,
    pub faculty: Faculty,
    pub lessons: Vec<i64>,
    pub subjects: Vec<i64>,
}
