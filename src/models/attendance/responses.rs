use super::entities::{Attendance, AttendanceCounts, AttendanceRecordDetail};
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

// 点名历史条目（带各状态人数）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceHistoryItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub attendance: Attendance,
    pub counts: AttendanceCounts,
}

// 点名历史响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceHistoryResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<AttendanceHistoryItem>,
}

// 点名详情响应（逐学生）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceDetailResponse {
    pub attendance: Attendance,
    pub counts: AttendanceCounts,
    pub records: Vec<AttendanceRecordDetail>,
}

// 点名提交响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct MarkAttendanceResponse {
    pub attendance: Attendance,
    pub counts: AttendanceCounts,
}
