use super::entities::Hometask;
use crate::models::PaginatedResponse;

pub type HometaskListResponse = PaginatedResponse<Hometask>;
