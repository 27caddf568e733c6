//! 业务数据模型
//!
//! 与 entity 模块的数据库实体分离，直接用于 API 的请求/响应序列化。

pub mod admin;
pub mod attendance;
pub mod auth;
pub mod classes;
pub mod common;
pub mod students;
pub mod users;

pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 业务错误代码
///
/// 与 HTTP 状态码配合使用，前端根据 code 字段做精确的错误分支。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[repr(i32)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    InvalidParams = 1001,
    Unauthorized = 1002,
    Forbidden = 1003,
    NotFound = 1004,
    InternalServerError = 1005,
    RateLimitExceeded = 1006,

    // 认证/用户
    AuthFailed = 2001,
    RegisterFailed = 2002,
    UserNameAlreadyExists = 2003,
    UserEmailAlreadyExists = 2004,
    UserNameInvalid = 2005,
    UserEmailInvalid = 2006,
    PasswordInvalid = 2007,
    UserNotFound = 2008,
    ProfileUpdateFailed = 2009,

    // 班级
    ClassNotFound = 3001,
    ClassPermissionDenied = 3002,
    ClassCreationFailed = 3003,
    ClassUpdateFailed = 3004,
    ClassDeletionFailed = 3005,

    // 学生名单
    StudentNotFound = 4001,
    StudentAlreadyExists = 4002,
    StudentCreationFailed = 4003,
    ImportFileMissingColumn = 4004,
    ImportFileParseFailed = 4005,
    ImportFileDataInvalid = 4006,
    FileUploadFailed = 4007,

    // 考勤
    AttendanceNotFound = 5001,
    AttendanceAlreadyMarked = 5002,
    AttendanceDateInvalid = 5003,
    AttendanceMarkFailed = 5004,
    AttendanceUpdateFailed = 5005,
}

/// 应用启动时间（用于运行时长统计）
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
