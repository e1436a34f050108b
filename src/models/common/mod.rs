pub mod error_code;
pub mod nested;
pub mod pagination;
pub mod params;
pub mod response;

pub use error_code::ErrorCode;
pub use nested::Nested;
pub use pagination::{PaginatedResponse, PaginationInfo};
pub use params::{deserialize_optional_param, deserialize_some};
pub use response::ApiResponse;

// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
