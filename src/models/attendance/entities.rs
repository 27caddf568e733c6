use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 出勤状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub enum AttendanceStatus {
    Present, // 出勤
    Absent,  // 缺勤
    Leave,   // 请假
}

impl AttendanceStatus {
    pub const PRESENT: &'static str = "present";
    pub const ABSENT: &'static str = "absent";
    pub const LEAVE: &'static str = "leave";
}

impl<'de> Deserialize<'de> for AttendanceStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            AttendanceStatus::PRESENT => Ok(AttendanceStatus::Present),
            AttendanceStatus::ABSENT => Ok(AttendanceStatus::Absent),
            AttendanceStatus::LEAVE => Ok(AttendanceStatus::Leave),
            _ => Err(serde::de::Error::custom(format!(
                "无效的出勤状态: '{s}'. 支持的状态: present, absent, leave"
            ))),
        }
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttendanceStatus::Present => write!(f, "{}", AttendanceStatus::PRESENT),
            AttendanceStatus::Absent => write!(f, "{}", AttendanceStatus::ABSENT),
            AttendanceStatus::Leave => write!(f, "{}", AttendanceStatus::LEAVE),
        }
    }
}

impl std::str::FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(AttendanceStatus::Present),
            "absent" => Ok(AttendanceStatus::Absent),
            "leave" => Ok(AttendanceStatus::Leave),
            _ => Err(format!("Invalid attendance status: {s}")),
        }
    }
}

// 点名表（每班每天一张）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct Attendance {
    pub id: i64,
    pub class_id: i64,
    #[ts(type = "string")]
    pub date: chrono::NaiveDate,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 点名记录（每个学生一条）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceRecord {
    pub id: i64,
    pub attendance_id: i64,
    pub student_id: i64,
    pub status: AttendanceStatus,
}

// 带学生信息的点名记录
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceRecordDetail {
    pub record_id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub enrollment_number: String,
    pub status: AttendanceStatus,
}

// 各状态人数统计
#[derive(Debug, Clone, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceCounts {
    pub present: i64,
    pub absent: i64,
    pub leave: i64,
}

impl AttendanceCounts {
    pub fn total(&self) -> i64 {
        self.present + self.absent + self.leave
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for s in ["present", "absent", "leave"] {
            assert_eq!(s.parse::<AttendanceStatus>().unwrap().to_string(), s);
        }
        assert!("late".parse::<AttendanceStatus>().is_err());
    }

    #[test]
    fn test_status_deserialize_rejects_unknown() {
        assert!(serde_json::from_str::<AttendanceStatus>("\"present\"").is_ok());
        assert!(serde_json::from_str::<AttendanceStatus>("\"sick\"").is_err());
    }

    #[test]
    fn test_counts_total() {
        let counts = AttendanceCounts {
            present: 20,
            absent: 3,
            leave: 2,
        };
        assert_eq!(counts.total(), 25);
    }
}
