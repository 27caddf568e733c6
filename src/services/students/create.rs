use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::StudentService;
use crate::{
    models::{ApiResponse, ErrorCode, students::requests::CreateStudentRequest},
    services::access::load_class_checked,
    utils::validate::{validate_enrollment_number, validate_student_name},
};

pub async fn handle_create_student(
    service: &StudentService,
    class_id: i64,
    create_request: CreateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(resp) = load_class_checked(&storage, class_id, request).await {
        return Ok(resp);
    }

    if let Err(msg) = validate_student_name(&create_request.name) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::InvalidParams, msg)));
    }
    if let Err(msg) = validate_enrollment_number(&create_request.enrollment_number) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::InvalidParams, msg)));
    }

    // 学号在班级内唯一
    match storage
        .get_student_by_enrollment(class_id, &create_request.enrollment_number)
        .await
    {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::StudentAlreadyExists,
                "Enrollment number already exists in this class",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to check enrollment number: {e}"),
                )),
            );
        }
    }

    match storage.create_student(class_id, create_request).await {
        Ok(student) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(student, "Student added successfully"))),
        Err(e) => {
            let msg = format!("Failed to add student: {e}");
            error!("{}", msg);
            if msg.contains("UNIQUE constraint failed") {
                Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::StudentAlreadyExists,
                    "Enrollment number already exists in this class",
                )))
            } else {
                Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::StudentCreationFailed,
                    msg,
                )))
            }
        }
    }
}
