use serde::Deserialize;
use ts_rs::TS;

use super::entities::UserRole;

// 用户创建数据（用于存储层，password 字段存放已哈希的密码）
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub display_name: Option<String>,
    pub phone: Option<String>,
}

// 用户更新数据（用于存储层，密码已哈希）
#[derive(Debug, Clone, Default)]
pub struct UpdateUserData {
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub display_name: Option<String>,
    pub phone: Option<String>,
}

// 更新个人资料请求
// 修改密码时必须同时提供 current_password
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UpdateProfileRequest {
    pub email: Option<String>,
    pub current_password: Option<String>,
    pub password: Option<String>,
    pub display_name: Option<String>,
    pub phone: Option<String>,
}
