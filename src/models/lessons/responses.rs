use super::entities::Lesson;
use crate::models::PaginatedResponse;

pub type LessonListResponse = PaginatedResponse<Lesson>;
