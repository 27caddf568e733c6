use super::entities::AttendanceStatus;
use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

// 点名提交请求
//
// records 中缺席的学生按 present 处理，与点名页面
// 默认勾选"出勤"的交互保持一致。
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct MarkAttendanceRequest {
    /// 点名日期，格式 YYYY-MM-DD
    pub date: String,
    #[serde(default)]
    pub records: Vec<MarkRecordItem>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct MarkRecordItem {
    pub student_id: i64,
    pub status: AttendanceStatus,
}

// 点名修改请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct UpdateAttendanceRequest {
    pub records: Vec<MarkRecordItem>,
}

// 点名历史查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceHistoryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    /// 起始日期（含），格式 YYYY-MM-DD
    pub from: Option<String>,
    /// 结束日期（含），格式 YYYY-MM-DD
    pub to: Option<String>,
}

// 点名历史查询参数（用于存储层）
#[derive(Debug, Clone)]
pub struct AttendanceHistoryQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub from: Option<chrono::NaiveDate>,
    pub to: Option<chrono::NaiveDate>,
}
