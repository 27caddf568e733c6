use std::sync::Arc;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::config::AppConfig;
use crate::models::students::requests::{
    CreateStudentRequest, StudentQueryParams, UpdateStudentRequest,
};
use crate::storage::Storage;

mod create;
mod delete;
mod export;
mod import;
mod list;
mod update;

/// 学生名册服务，挂在班级之下
pub struct StudentService {
    #[allow(dead_code)]
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
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

    fn get_config(&self) -> &'static AppConfig {
        AppConfig::get()
    }

    pub async fn list_students(
        &self,
        class_id: i64,
        query: StudentQueryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::handle_list_students(self, class_id, query, request).await
    }

    pub async fn create_student(
        &self,
        class_id: i64,
        create_request: CreateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::handle_create_student(self, class_id, create_request, request).await
    }

    pub async fn update_student(
        &self,
        student_id: i64,
        update_request: UpdateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::handle_update_student(self, student_id, update_request, request).await
    }

    pub async fn delete_student(
        &self,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::handle_delete_student(self, student_id, request).await
    }

    pub async fn import_students(
        &self,
        class_id: i64,
        payload: Multipart,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        import::handle_import_students(self, class_id, payload, request).await
    }

    pub async fn export_students(
        &self,
        class_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        export::handle_export_students(self, class_id, request).await
    }
}
