//! 路径参数安全提取器
//!
//! 直接用 `web::Path<i64>` 时，非法参数会返回 actix 默认的 404 页面。
//! 这里的提取器把解析失败统一转换成带业务错误码的 JSON 响应。

use actix_web::{FromRequest, HttpRequest, dev::Payload, error::ErrorBadRequest};
use std::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

macro_rules! declare_safe_id_extractor {
    ($name:ident, $param:literal, $label:literal) => {
        /// 从路径参数中提取并校验 i64 ID
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                let result = req
                    .match_info()
                    .get($param)
                    .and_then(|raw| raw.parse::<i64>().ok())
                    .filter(|id| *id > 0)
                    .map($name)
                    .ok_or_else(|| {
                        let body = ApiResponse::<()>::error_empty(
                            ErrorCode::InvalidParams,
                            concat!("Invalid ", $label, " in path"),
                        );
                        ErrorBadRequest(
                            serde_json::to_string(&body).unwrap_or_else(|_| "{}".to_string()),
                        )
                    });
                ready(result)
            }
        }
    };
}

declare_safe_id_extractor!(SafeClassIdI64, "class_id", "class id");
declare_safe_id_extractor!(SafeStudentIdI64, "student_id", "student id");
declare_safe_id_extractor!(SafeAttendanceIdI64, "attendance_id", "attendance id");
