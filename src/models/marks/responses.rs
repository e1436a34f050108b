use super::entities::Mark;
use crate::models::PaginatedResponse;

pub type MarkListResponse = PaginatedResponse<Mark>;
