use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AdminService;
use crate::{
    models::{
        ApiResponse, ErrorCode,
        admin::{
            requests::OverviewParams,
            responses::{AdminOverviewResponse, AttendanceSummary},
        },
    },
    utils::validate::validate_date,
};

/// 最近点名表展示条数
const RECENT_ATTENDANCE_LIMIT: u64 = 10;

/// 管理员概览：教师列表、班级列表、最近点名和出勤汇总。
/// 汇总部分支持按班级和日期过滤。
pub async fn handle_overview(
    service: &AdminService,
    params: OverviewParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let date = match params.date.as_deref().map(validate_date).transpose() {
        Ok(date) => date,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::AttendanceDateInvalid,
                msg,
            )));
        }
    };

    let teachers = match storage.list_teacher_overview().await {
        Ok(teachers) => teachers,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list teachers: {e}"),
                )),
            );
        }
    };

    let classes = match storage.list_class_overview().await {
        Ok(classes) => classes,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list classes: {e}"),
                )),
            );
        }
    };

    let recent_attendances = match storage
        .list_recent_attendances(RECENT_ATTENDANCE_LIMIT)
        .await
    {
        Ok(items) => items,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list recent attendances: {e}"),
                )),
            );
        }
    };

    let counts = match storage.get_attendance_summary(params.class_id, date).await {
        Ok(counts) => counts,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to compute attendance summary: {e}"),
                )),
            );
        }
    };

    let response = AdminOverviewResponse {
        teachers,
        classes,
        recent_attendances,
        summary: AttendanceSummary::from_counts(counts),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Overview retrieved successfully",
    )))
}
