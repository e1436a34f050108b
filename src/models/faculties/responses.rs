use super::entities::Faculty;
use crate::models::PaginatedResponse;

pub type FacultyListResponse = PaginatedResponse<Faculty>;
