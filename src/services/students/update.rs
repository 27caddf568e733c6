use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::{
    models::{ApiResponse, ErrorCode, students::requests::UpdateStudentRequest},
    services::access::load_class_checked,
    utils::validate::{validate_enrollment_number, validate_student_name},
};

pub async fn handle_update_student(
    service: &StudentService,
    student_id: i64,
    update_request: UpdateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match storage.get_student_by_id(student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "Student not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get student: {e}"),
                )),
            );
        }
    };

    // 权限跟随学生所属的班级
    if let Err(resp) = load_class_checked(&storage, student.class_id, request).await {
        return Ok(resp);
    }

    if let Some(ref name) = update_request.name
        && let Err(msg) = validate_student_name(name)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::InvalidParams, msg)));
    }

    // 修改学号时重新检查班内唯一性
    if let Some(ref enrollment) = update_request.enrollment_number {
        if let Err(msg) = validate_enrollment_number(enrollment) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::InvalidParams, msg)));
        }
        if *enrollment != student.enrollment_number
            && let Ok(Some(_)) = storage
                .get_student_by_enrollment(student.class_id, enrollment)
                .await
        {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::StudentAlreadyExists,
                "Enrollment number already exists in this class",
            )));
        }
    }

    match storage.update_student(student_id, update_request).await {
        Ok(Some(student)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            student,
            "Student updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "Student not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to update student: {e}"),
            )),
        ),
    }
}
