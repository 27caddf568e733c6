use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::ClassService;
use crate::{
    middlewares::RequireJWT,
    models::{
        ApiResponse, ErrorCode, classes::requests::CreateClassRequest, users::entities::UserRole,
    },
};

const VALID_DAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

pub async fn handle_create_class(
    service: &ClassService,
    create_request: CreateClassRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let uid = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user id",
            )));
        }
    };

    // 班级归属于创建它的教师；管理员可通过 teacher_id 代教师建班
    let teacher_id = match RequireJWT::extract_user_role(request) {
        Some(UserRole::Admin) => match create_request.teacher_id {
            Some(id) => id,
            None => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::InvalidParams,
                    "teacher_id is required when an admin creates a class",
                )));
            }
        },
        _ => uid,
    };

    if let Err(msg) = validate_class_fields(&create_request) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::InvalidParams, msg)));
    }

    match storage.create_class(teacher_id, create_request).await {
        Ok(class) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(class, "Class created successfully"))),
        Err(e) => Ok(handle_class_create_error(&e.to_string())),
    }
}

/// 字段校验辅助函数
fn validate_class_fields(request: &CreateClassRequest) -> Result<(), &'static str> {
    if request.subject.trim().is_empty() {
        return Err("Subject must not be empty");
    }
    if request.branch.trim().is_empty() {
        return Err("Branch must not be empty");
    }
    if request.year.trim().is_empty() {
        return Err("Year must not be empty");
    }
    if request.teaching_days.is_empty() {
        return Err("At least one teaching day is required");
    }
    for day in &request.teaching_days {
        if !VALID_DAYS.contains(&day.to_lowercase().as_str()) {
            return Err("Teaching days must be valid weekday names");
        }
    }
    Ok(())
}

/// 错误响应辅助函数
fn handle_class_create_error(e: &str) -> HttpResponse {
    let msg = format!("Class creation failed: {e}");
    error!("{}", msg);
    if msg.contains("FOREIGN KEY constraint failed") {
        HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ClassCreationFailed,
            "Teacher does not exist",
        ))
    } else {
        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::ClassCreationFailed,
            msg,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> CreateClassRequest {
        CreateClassRequest {
            subject: "Mathematics".to_string(),
            branch: "Science".to_string(),
            year: "2026".to_string(),
            teaching_days: vec!["monday".to_string(), "wednesday".to_string()],
            teacher_id: None,
        }
    }

    #[test]
    fn test_validate_class_fields_ok() {
        assert!(validate_class_fields(&base_request()).is_ok());
    }

    #[test]
    fn test_validate_class_fields_rejects_bad_day() {
        let mut request = base_request();
        request.teaching_days = vec!["funday".to_string()];
        assert!(validate_class_fields(&request).is_err());
    }

    #[test]
    fn test_validate_class_fields_rejects_empty_days() {
        let mut request = base_request();
        request.teaching_days.clear();
        assert!(validate_class_fields(&request).is_err());
    }
}
