pub use super::attendance_records::Entity as AttendanceRecords;
pub use super::attendances::Entity as Attendances;
pub use super::classes::Entity as Classes;
pub use super::students::Entity as Students;
pub use super::users::Entity as Users;
