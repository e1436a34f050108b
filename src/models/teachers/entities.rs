use serde::{Deserialize, Serialize};

use crate::models::faculties::entities::Faculty;

// 教师，subjects 由所授课程派生
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: i64,
    pub full_name: String,
    pub faculty: Faculty,
    pub subjects: Vec<i64>,
    pub user: Option<i64>,
}
