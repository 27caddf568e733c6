use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::attendance::requests::{
    AttendanceHistoryParams, MarkAttendanceRequest, UpdateAttendanceRequest,
};
use crate::services::AttendanceService;
use crate::utils::{SafeAttendanceIdI64, SafeClassIdI64};

// 懒加载的全局 AttendanceService 实例
static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);

// HTTP处理程序
pub async fn mark_attendance(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    mark_data: web::Json<MarkAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .mark_attendance(class_id.0, mark_data.into_inner(), &req)
        .await
}

pub async fn attendance_history(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    query: web::Query<AttendanceHistoryParams>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .attendance_history(class_id.0, query.into_inner(), &req)
        .await
}

pub async fn attendance_detail(
    req: HttpRequest,
    attendance_id: SafeAttendanceIdI64,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .attendance_detail(attendance_id.0, &req)
        .await
}

pub async fn update_attendance(
    req: HttpRequest,
    attendance_id: SafeAttendanceIdI64,
    update_data: web::Json<UpdateAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .update_attendance(attendance_id.0, update_data.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_attendance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes/{class_id}/attendance")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::post().to(mark_attendance))
                    .route(web::get().to(attendance_history)),
            ),
    );
    cfg.service(
        web::scope("/api/v1/attendance")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/{attendance_id}")
                    .route(web::get().to(attendance_detail))
                    .route(web::put().to(update_attendance)),
            ),
    );
}
