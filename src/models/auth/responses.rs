use crate::models::users::entities::{User, Viewer};
use serde::Serialize;

// 登录响应
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub user: User,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 当前账号信息
#[derive(Debug, Serialize)]
pub struct UserInfoResponse {
    pub user: User,
    pub viewer: Viewer,
}
