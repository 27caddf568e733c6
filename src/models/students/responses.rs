use super::entities::Student;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

// 学生名册列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<Student>,
}

// 单个学生响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentResponse {
    pub student: Student,
}

// 名册导入结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct ImportStudentsResponse {
    // 文件中的数据行总数
    pub total: usize,
    // 成功导入的行数
    pub success: usize,
    // 因名册中已存在而跳过的行数
    pub skipped: usize,
    // 校验或写入失败的行数
    pub failed: usize,
    // 每行的错误信息（行号从2开始，1为表头）
    pub errors: Vec<ImportRowError>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct ImportRowError {
    pub row: usize,
    pub field: String,
    pub message: String,
}
