use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::{
    models::{ApiResponse, ErrorCode, attendance::responses::AttendanceDetailResponse},
    services::access::load_class_checked,
};

pub async fn handle_attendance_detail(
    service: &AttendanceService,
    attendance_id: i64,
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

    // 点名表的访问权限跟随其所属班级
    if let Err(resp) = load_class_checked(&storage, attendance.class_id, request).await {
        return Ok(resp);
    }

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
        "Attendance detail retrieved successfully",
    )))
}
