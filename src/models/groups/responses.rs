use super::entities::Group;
use crate::models::PaginatedResponse;

pub type GroupListResponse = PaginatedResponse<Group>;
