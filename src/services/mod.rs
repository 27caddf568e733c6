pub(crate) mod access;
pub mod admin;
pub mod attendance;
pub mod auth;
pub mod classes;
pub mod students;

pub use admin::AdminService;
pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use classes::ClassService;
pub use students::StudentService;
