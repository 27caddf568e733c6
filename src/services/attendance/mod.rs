use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::models::attendance::requests::{
    AttendanceHistoryParams, MarkAttendanceRequest, UpdateAttendanceRequest,
};
use crate::storage::Storage;

mod detail;
mod history;
mod mark;
mod update;

/// 点名服务，处理每日点名、历史查询与修正
pub struct AttendanceService {
    #[allow(dead_code)]
    storage: Option<Arc<dyn Storage>>,
}

impl AttendanceService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        request
            .app_data::<web::Data<Arc<dyn Storage>>>()
            .expect("Storage not found in app data")
            .get_ref()
            .clone()
    }

    pub async fn mark_attendance(
        &self,
        class_id: i64,
        mark_request: MarkAttendanceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        mark::handle_mark_attendance(self, class_id, mark_request, request).await
    }

    pub async fn attendance_history(
        &self,
        class_id: i64,
        params: AttendanceHistoryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        history::handle_attendance_history(self, class_id, params, request).await
    }

    pub async fn attendance_detail(
        &self,
        attendance_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        detail::handle_attendance_detail(self, attendance_id, request).await
    }

    pub async fn update_attendance(
        &self,
        attendance_id: i64,
        update_request: UpdateAttendanceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::handle_update_attendance(self, attendance_id, update_request, request).await
    }
}
