pub mod auth;
pub mod faculties;
pub mod groups;
pub mod hometasks;
pub mod lessons;
pub mod marks;
pub mod pages;
pub(crate) mod responses;
pub mod teachers;

pub use auth::AuthService;
pub use faculties::FacultyService;
pub use groups::GroupService;
pub use hometasks::HometaskService;
pub use lessons::LessonService;
pub use marks::MarkService;
pub use pages::PageService;
pub use teachers::TeacherService;
