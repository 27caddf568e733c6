use serde::Deserialize;
use ts_rs::TS;

// 全局概览查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/admin.ts")]
pub struct OverviewParams {
    /// 只统计指定班级
    pub class_id: Option<i64>,
    /// 只统计指定日期，格式 YYYY-MM-DD
    pub date: Option<String>,
}
