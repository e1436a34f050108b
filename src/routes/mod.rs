pub mod auth;

pub mod faculties;

pub mod groups;

pub mod teachers;

pub mod lessons;

pub mod marks;

pub mod hometasks;

pub mod pages;

pub use auth::configure_auth_routes;
pub use faculties::configure_faculties_routes;
pub use groups::configure_groups_routes;
pub use hometasks::configure_hometasks_routes;
pub use lessons::configure_lessons_routes;
pub use marks::configure_marks_routes;
pub use pages::configure_page_routes;
pub use teachers::configure_teachers_routes;

use actix_web::web;

/// 注册门户的全部路由：认证、REST 接口与页面
pub fn configure_portal(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_auth_routes)
        .configure(configure_faculties_routes)
        .configure(configure_groups_routes)
        .configure(configure_teachers_routes)
        .configure(configure_lessons_routes)
        .configure(configure_marks_routes)
        .configure(configure_hometasks_routes)
        // 页面路由包含 /pages/{kind}，放在最后
        .configure(configure_page_routes);
}
