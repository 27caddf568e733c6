use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse};

use crate::{
    middlewares::RequireJWT,
    models::{ApiResponse, ErrorCode, classes::entities::Class, users::entities::UserRole},
    storage::Storage,
};

/// 加载班级并校验当前用户对该班级的操作权限。
/// 管理员可以操作任意班级，教师只能操作自己的班级。
pub(crate) async fn load_class_checked(
    storage: &Arc<dyn Storage>,
    class_id: i64,
    request: &HttpRequest,
) -> Result<Class, HttpResponse> {
    let uid = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Err(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user id",
            )));
        }
    };

    let class = match storage.get_class_by_id(class_id).await {
        Ok(Some(class)) => class,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassNotFound,
                "Class not found",
            )));
        }
        Err(e) => {
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get class information: {e}"),
                )),
            );
        }
    };

    match RequireJWT::extract_user_role(request) {
        Some(UserRole::Admin) => Ok(class),
        Some(UserRole::Teacher) => {
            if class.teacher_id != uid {
                Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::ClassPermissionDenied,
                    "You do not have permission to access another teacher's class",
                )))
            } else {
                Ok(class)
            }
        }
        _ => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::ClassPermissionDenied,
            "You do not have permission to access this class",
        ))),
    }
}

/// 加载班级并要求当前用户是该班级的任课教师。
/// 点名及其修正只允许任课教师本人操作，管理员也不例外。
pub(crate) async fn load_class_owned(
    storage: &Arc<dyn Storage>,
    class_id: i64,
    request: &HttpRequest,
) -> Result<Class, HttpResponse> {
    let uid = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Err(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user id",
            )));
        }
    };

    let class = match storage.get_class_by_id(class_id).await {
        Ok(Some(class)) => class,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassNotFound,
                "Class not found",
            )));
        }
        Err(e) => {
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get class information: {e}"),
                )),
            );
        }
    };

    match RequireJWT::extract_user_role(request) {
        Some(UserRole::Teacher) if class.teacher_id == uid => Ok(class),
        _ => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::ClassPermissionDenied,
            "Only the class teacher can mark or edit attendance",
        ))),
    }
}
