use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::models::admin::requests::OverviewParams;
use crate::storage::Storage;

mod overview;

/// 管理员统计服务
pub struct AdminService {
    #[allow(dead_code)]
    storage: Option<Arc<dyn Storage>>,
}

impl AdminService {
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

    pub async fn overview(
        &self,
        params: OverviewParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        overview::handle_overview(self, params, request).await
    }
}
