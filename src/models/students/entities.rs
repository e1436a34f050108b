use serde::{Deserialize, Serialize};

use crate::models::groups::entities::Group;

// 学生
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub full_name: String,
    pub group: Group,
    pub user: Option<i64>,
}

// 成绩表单中的学生选项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentChoice {
    pub id: i64,
    pub full_name: String,
}
