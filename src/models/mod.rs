pub mod auth;
pub mod common;
pub mod faculties;
pub mod groups;
pub mod hometasks;
pub mod lessons;
pub mod marks;
pub mod pages;
pub mod students;
pub mod subjects;
pub mod teachers;
pub mod users;

pub use common::{ApiResponse, AppStartTime, ErrorCode, Nested, PaginatedResponse, PaginationInfo};
