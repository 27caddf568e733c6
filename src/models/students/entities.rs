use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学生名册条目（不是登录账号）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct Student {
    pub id: i64,
    pub class_id: i64,
    pub name: String,
    pub enrollment_number: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
