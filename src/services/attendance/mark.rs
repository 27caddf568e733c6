use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::AttendanceService;
use crate::{
    models::{
        ApiResponse, ErrorCode,
        attendance::{
            entities::{AttendanceCounts, AttendanceStatus},
            requests::MarkAttendanceRequest,
            responses::MarkAttendanceResponse,
        },
    },
    services::access::load_class_owned,
    utils::validate::validate_date,
};

/// 为班级在指定日期创建点名表。
/// 名册里未出现在请求中的学生默认记为出勤。
pub async fn handle_mark_attendance(
    service: &AttendanceService,
    class_id: i64,
    mark_request: MarkAttendanceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(resp) = load_class_owned(&storage, class_id, request).await {
        return Ok(resp);
    }

    let date = match validate_date(&mark_request.date) {
        Ok(date) => date,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::AttendanceDateInvalid,
                msg,
            )));
        }
    };

    // 同一班级同一天只允许一张点名表
    match storage.get_attendance_by_class_and_date(class_id, date).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::AttendanceAlreadyMarked,
                "Attendance already marked for this date",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to check existing attendance: {e}"),
                )),
            );
        }
    }

    let roster = match storage.list_all_students(class_id).await {
        Ok(students) => students,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to load class roster: {e}"),
                )),
            );
        }
    };

    if roster.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::AttendanceMarkFailed,
            "Cannot mark attendance for a class with no students",
        )));
    }

    // 请求中的状态覆盖默认值，名册之外的 student_id 忽略
    let overrides: HashMap<i64, AttendanceStatus> = mark_request
        .records
        .iter()
        .map(|r| (r.student_id, r.status))
        .collect();

    let mut counts = AttendanceCounts::default();
    let records: Vec<(i64, AttendanceStatus)> = roster
        .iter()
        .map(|student| {
            let status = overrides
                .get(&student.id)
                .copied()
                .unwrap_or(AttendanceStatus::Present);
            match status {
                AttendanceStatus::Present => counts.present += 1,
                AttendanceStatus::Absent => counts.absent += 1,
                AttendanceStatus::Leave => counts.leave += 1,
            }
            (student.id, status)
        })
        .collect();

    match storage
        .create_attendance_with_records(class_id, date, records)
        .await
    {
        Ok(attendance) => Ok(HttpResponse::Created().json(ApiResponse::success(
            MarkAttendanceResponse { attendance, counts },
            "Attendance marked successfully",
        ))),
        Err(e) => {
            let msg = format!("Failed to mark attendance: {e}");
            error!("{}", msg);
            if msg.contains("UNIQUE constraint failed") {
                Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::AttendanceAlreadyMarked,
                    "Attendance already marked for this date",
                )))
            } else {
                Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::AttendanceMarkFailed,
                    msg,
                )))
            }
        }
    }
}
