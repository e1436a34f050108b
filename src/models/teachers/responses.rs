use super::entities::Teacher;
use crate::models::PaginatedResponse;

pub type TeacherListResponse = PaginatedResponse<Teacher>;
