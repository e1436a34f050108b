use serde::{Deserialize, Serialize};

// 院系
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faculty {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
}
