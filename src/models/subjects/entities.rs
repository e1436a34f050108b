use serde::{Deserialize, Serialize};

// 科目，groups/teachers 由课程派生
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: i64,
    pub title: String,
    pub groups: Vec<i64>,
    pub teachers: Vec<i64>,
}
