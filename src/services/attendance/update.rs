use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::AttendanceService;
use crate::{
    models::{
        ApiResponse, ErrorCode,
        attendance::{
            entities::AttendanceStatus, requests::UpdateAttendanceRequest,
            responses::AttendanceDetailResponse,
        },
    },
    services::access::load_class_owned,
};

/// 修正已有点名表的记录状态。
/// 只更新请求中给出的学生，不在点名表里的 student_id 忽略。
pub async fn handle_update_attendance(
    service: &AttendanceService,
    attendance_id: i64,
    update_request: UpdateAttendanceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let attendance = match storage.get_attendance_by_id(attendance_id).await {
        Ok(Some(attendance)) => attendance,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AttendanceNotFound,
                "Attendance sheet not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get attendance sheet: {e}"),
                )),
            );
        }
    };

    if let Err(resp) = load_class_owned(&storage, attendance.class_id, request).await {
        return Ok(resp);
    }

    if update_request.records.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidParams,
            "At least one record is required",
        )));
    }

    let records: Vec<(i64, AttendanceStatus)> = update_request
        .records
        .iter()
        .map(|r| (r.student_id, r.status))
        .collect();

    match storage
        .update_attendance_records(attendance_id, records)
        .await
    {
        Ok(true) => {}
        Ok(false) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AttendanceNotFound,
                "Attendance sheet has no records",
            )));
        }
        Err(e) => {
            let msg = format!("Failed to update attendance: {e}");
            error!("{}", msg);
            return Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::AttendanceUpdateFailed,
                msg,
            )));
        }
    }

    // 返回更新后的完整点名表
    let records = match storage.get_attendance_records(attendance_id).await {
        Ok(records) => records,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get attendance records: {e}"),
                )),
            );
        }
    };

    let counts = match storage.get_attendance_counts(attendance_id).await {
        Ok(counts) => counts,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get attendance counts: {e}"),
                )),
            );
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AttendanceDetailResponse {
            attendance,
            counts,
            records,
        },
        "Attendance updated successfully",
    )))
}
