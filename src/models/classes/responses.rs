use super::entities::{Class, ClassWithCount};
use crate::models::common::PaginationInfo;
use crate::models::students::entities::Student;
use serde::Serialize;
use ts_rs::TS;

// 班级列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<ClassWithCount>,
}

// 单个班级响应（详情包含完整名册）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassResponse {
    pub class: Class,
    pub student_count: i64,
    pub students: Vec<Student>,
}
