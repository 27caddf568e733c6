pub mod admin;

pub mod attendance;

pub mod auth;

pub mod classes;

pub mod students;

pub use admin::configure_admin_routes;
pub use attendance::configure_attendance_routes;
pub use auth::configure_auth_routes;
pub use classes::configure_classes_routes;
pub use students::configure_students_routes;
