use crate::errors::Result;
use crate::models::users::entities::User;
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const ADMIN_USERNAME: &str = "admin";
const GENERATED_PASSWORD_LEN: usize = 16;

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

fn generate_random_password(length: usize) -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

/// 超级用户的初始密码，未设置 ADMIN_PASSWORD 时随机生成并打印一次
fn admin_password() -> String {
    match std::env::var("ADMIN_PASSWORD") {
        Ok(password) if !password.is_empty() => password,
        _ => {
            let password = generate_random_password(GENERATED_PASSWORD_LEN);
            warn!("==========================================================");
            warn!("  ADMIN_PASSWORD NOT SET - USING GENERATED PASSWORD");
            warn!("  Generated password for '{}': {}", ADMIN_USERNAME, password);
            warn!("  Save it now or set ADMIN_PASSWORD before first start");
            warn!("==========================================================");
            password
        }
    }
}

/// 数据库中没有任何账号时创建超级用户 admin
///
/// 已有账号时返回 `Ok(None)`。
pub async fn seed_admin(storage: &Arc<dyn Storage>) -> Result<Option<User>> {
    let count = storage.count_users().await?;
    if count > 0 {
        debug!("{} account(s) present, skipping superuser seed", count);
        return Ok(None);
    }

    let admin = storage
        .create_user(CreateUserRequest {
            username: ADMIN_USERNAME.to_string(),
            email: "admin@localhost".to_string(),
            password: hash_password(&admin_password())?,
            first_name: String::new(),
            last_name: String::new(),
            is_superuser: true,
        })
        .await?;

    Ok(Some(admin))
}

/// 准备服务器启动的上下文
pub async fn prepare_server_startup() -> StartupContext {
    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    match seed_admin(&storage).await {
        Ok(Some(admin)) => info!(
            "Superuser account created (ID: {}, username: {})",
            admin.id, admin.username
        ),
        Ok(None) => {}
        Err(e) => warn!("Failed to seed superuser account: {}", e),
    }

    StartupContext { storage }
}
