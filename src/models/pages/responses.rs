use serde::Serialize;

use super::entities::EntityView;
use crate::models::PaginationInfo;
use crate::models::marks::entities::Mark;
use crate::models::students::entities::StudentChoice;
use crate::utils::validate::FieldErrors;
use crate::visibility::EntityKind;

// 首页统计
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeContext {
    pub faculties: u64,
    pub groups: u64,
    pub teachers: u64,
    pub students: u64,
}

// 个人资料页
#[derive(Debug, Clone, Serialize)]
pub struct ProfileContext {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AboutContext {
    pub system_name: String,
    pub version: String,
    // 服务启动时间，测试环境中可能缺失
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactsContext {
    pub email: String,
    pub phone: String,
    pub address: String,
}

// 目录页
#[derive(Debug, Clone, Serialize)]
pub struct CatalogPage {
    pub kind: EntityKind,
    pub items: Vec<EntityView>,
    pub pagination: PaginationInfo,
}

// 成绩表单上下文
#[derive(Debug, Clone, Serialize)]
pub struct MarkFormContext {
    pub lesson: i64,
    pub students: Vec<StudentChoice>,
    pub mark_choices: Vec<i32>,
    pub presence_choices: Vec<String>,
}

// 详情页
#[derive(Debug, Clone, Serialize)]
pub struct DetailContext {
    pub kind: EntityKind,
    pub object: EntityView,
    pub visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marks: Option<Vec<Mark>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark_form: Option<MarkFormContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_errors: Option<FieldErrors>,
}
