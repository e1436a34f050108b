use serde::{Deserialize, Serialize};

use crate::models::lessons::entities::Lesson;

// 课后作业
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hometask {
    pub id: i64,
    pub task: String,
    pub created: chrono::DateTime<chrono::Utc>,
    pub lesson: Lesson,
}
