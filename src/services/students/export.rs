//! 学生名册导出服务

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use tracing::error;

use super::StudentService;
use crate::models::{ApiResponse, ErrorCode, students::entities::Student};
use crate::services::access::load_class_checked;

/// 将班级名册导出为 CSV 文件
pub async fn handle_export_students(
    service: &StudentService,
    class_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(resp) = load_class_checked(&storage, class_id, request).await {
        return Ok(resp);
    }

    let students = match storage.list_all_students(class_id).await {
        Ok(students) => students,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询班级名册失败: {e}"),
                )),
            );
        }
    };

    match generate_csv(&students) {
        Ok(buffer) => {
            let timestamp = Utc::now().format("%Y%m%d_%H%M%S").to_string();
            let filename = format!("class_{class_id}_students_{timestamp}.csv");

            Ok(HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .insert_header((
                    "Content-Disposition",
                    format!("attachment; filename=\"{filename}\""),
                ))
                .body(buffer))
        }
        Err(e) => {
            error!("生成 CSV 失败: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("生成名册失败: {e}"),
                )),
            )
        }
    }
}

fn generate_csv(students: &[Student]) -> Result<Vec<u8>, String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["name", "enrollment_number"])
        .map_err(|e| e.to_string())?;

    for student in students {
        wtr.write_record([&student.name, &student.enrollment_number])
            .map_err(|e| e.to_string())?;
    }

    wtr.into_inner().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn student(name: &str, enrollment: &str) -> Student {
        Student {
            id: 1,
            class_id: 1,
            name: name.to_string(),
            enrollment_number: enrollment.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_generate_csv_with_header() {
        let students = vec![student("Alice", "2026/001"), student("Bob", "2026/002")];
        let buffer = generate_csv(&students).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "name,enrollment_number");
        assert_eq!(lines[1], "Alice,2026/001");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_generate_csv_empty_roster() {
        let buffer = generate_csv(&[]).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.trim(), "name,enrollment_number");
    }
}
