use crate::models::attendance::entities::AttendanceCounts;
use serde::Serialize;
use ts_rs::TS;

// 教师概览条目
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/admin.ts")]
pub struct TeacherOverviewItem {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub class_count: i64,
}

// 班级概览条目
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/admin.ts")]
pub struct ClassOverviewItem {
    pub id: i64,
    pub subject: String,
    pub branch: String,
    pub year: String,
    pub teacher_id: i64,
    pub teacher_name: String,
    pub student_count: i64,
    pub attendance_count: i64,
}

// 最近的点名表
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/admin.ts")]
pub struct RecentAttendanceItem {
    pub id: i64,
    pub class_id: i64,
    pub subject: String,
    pub branch: String,
    #[ts(type = "string")]
    pub date: chrono::NaiveDate,
    pub counts: AttendanceCounts,
}

// 汇总统计（按过滤条件聚合）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/admin.ts")]
pub struct AttendanceSummary {
    pub counts: AttendanceCounts,
    pub total_records: i64,
    // 取整的百分比（0-100）
    pub present_rate: i64,
    pub absent_rate: i64,
    pub leave_rate: i64,
}

impl AttendanceSummary {
    pub fn from_counts(counts: AttendanceCounts) -> Self {
        let total = counts.total();
        let rate = |n: i64| {
            if total == 0 {
                0
            } else {
                // 四舍五入到整数百分比
                ((n as f64 / total as f64) * 100.0).round() as i64
            }
        };
        Self {
            total_records: total,
            present_rate: rate(counts.present),
            absent_rate: rate(counts.absent),
            leave_rate: rate(counts.leave),
            counts,
        }
    }
}

// 全局概览响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/admin.ts")]
pub struct AdminOverviewResponse {
    pub teachers: Vec<TeacherOverviewItem>,
    pub classes: Vec<ClassOverviewItem>,
    pub recent_attendances: Vec<RecentAttendanceItem>,
    pub summary: AttendanceSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_rates_rounded() {
        let summary = AttendanceSummary::from_counts(AttendanceCounts {
            present: 2,
            absent: 1,
            leave: 0,
        });
        assert_eq!(summary.total_records, 3);
        assert_eq!(summary.present_rate, 67);
        assert_eq!(summary.absent_rate, 33);
        assert_eq!(summary.leave_rate, 0);
    }

    #[test]
    fn test_summary_empty() {
        let summary = AttendanceSummary::from_counts(AttendanceCounts::default());
        assert_eq!(summary.total_records, 0);
        assert_eq!(summary.present_rate, 0);
    }
}
