use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::{
    models::{
        ApiResponse, ErrorCode,
        attendance::requests::{AttendanceHistoryParams, AttendanceHistoryQuery},
    },
    services::access::load_class_checked,
    utils::validate::validate_date,
};

pub async fn handle_attendance_history(
    service: &AttendanceService,
    class_id: i64,
    params: AttendanceHistoryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(resp) = load_class_checked(&storage, class_id, request).await {
        return Ok(resp);
    }

    // 日期范围过滤参数（可选）
    let from = match params.from.as_deref().map(validate_date).transpose() {
        Ok(from) => from,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::AttendanceDateInvalid,
                msg,
            )));
        }
    };
    let to = match params.to.as_deref().map(validate_date).transpose() {
        Ok(to) => to,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::AttendanceDateInvalid,
                msg,
            )));
        }
    };

    if let (Some(from), Some(to)) = (from, to)
        && from > to
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::AttendanceDateInvalid,
            "Start date must not be after end date",
        )));
    }

    let query = AttendanceHistoryQuery {
        page: Some(params.pagination.page),
        size: Some(params.pagination.size),
        from,
        to,
    };

    match storage
        .list_attendances_with_pagination(class_id, query)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Attendance history retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve attendance history: {e}"),
            )),
        ),
    }
}
