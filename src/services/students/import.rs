//! 学生名册导入服务

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use calamine::{Reader, Xlsx};
use futures_util::StreamExt;
use std::collections::HashSet;
use std::io::Cursor;
use tracing::error;

use super::StudentService;
use crate::models::students::requests::CreateStudentRequest;
use crate::models::students::responses::{ImportRowError, ImportStudentsResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::load_class_checked;
use crate::utils::validate::{validate_enrollment_number, validate_student_name};

/// 导入解析错误
enum ImportParseError {
    MissingColumn(String),
    ParseFailed(String),
    EmptyFile,
}

impl ImportParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::MissingColumn(_) => ErrorCode::ImportFileMissingColumn,
            Self::ParseFailed(_) => ErrorCode::ImportFileParseFailed,
            Self::EmptyFile => ErrorCode::ImportFileDataInvalid,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::MissingColumn(col) => format!("缺少必需列: {col}"),
            Self::ParseFailed(msg) => msg.clone(),
            Self::EmptyFile => "文件中没有数据".to_string(),
        }
    }
}

/// 导入行数据
#[derive(Debug, Clone)]
struct ImportRow {
    row_num: usize,
    name: String,
    enrollment_number: String,
}

/// 从 CSV 或 XLSX 文件批量导入学生
pub async fn handle_import_students(
    service: &StudentService,
    class_id: i64,
    mut payload: Multipart,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();

    if let Err(resp) = load_class_checked(&storage, class_id, request).await {
        return Ok(resp);
    }

    // 读取文件内容
    let (file_bytes, file_name) = match read_file_from_multipart(&mut payload).await {
        Ok(result) => result,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::FileUploadFailed,
                format!("文件读取失败: {e}"),
            )));
        }
    };

    if file_bytes.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileUploadFailed,
            "文件内容为空",
        )));
    }

    if file_bytes.len() > config.import.max_file_size {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileUploadFailed,
            "文件超出大小限制",
        )));
    }

    // 根据文件扩展名解析
    let rows = if file_name.ends_with(".xlsx") {
        match parse_xlsx(&file_bytes) {
            Ok(rows) => rows,
            Err(e) => {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(e.error_code(), e.message())));
            }
        }
    } else {
        match parse_csv(&file_bytes) {
            Ok(rows) => rows,
            Err(e) => {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(e.error_code(), e.message())));
            }
        }
    };

    if rows.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ImportFileDataInvalid,
            "文件中没有数据行",
        )));
    }

    if rows.len() > config.import.max_rows {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ImportFileDataInvalid,
            format!("单次导入最多支持 {} 行", config.import.max_rows),
        )));
    }

    // 验证并过滤数据
    let mut errors: Vec<ImportRowError> = Vec::new();
    let mut valid_rows: Vec<ImportRow> = Vec::new();

    for row in &rows {
        let mut row_errors = validate_row(row);
        if row_errors.is_empty() {
            valid_rows.push(row.clone());
        } else {
            errors.append(&mut row_errors);
        }
    }

    // 已有学号集合，用于跳过重复行
    let existing_enrollments: HashSet<String> = match storage.list_all_students(class_id).await {
        Ok(students) => students
            .into_iter()
            .map(|s| s.enrollment_number)
            .collect(),
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询班级名册失败: {e}"),
                )),
            );
        }
    };

    // 过滤冲突行（包括文件内部的重复学号）
    let mut skipped = 0;
    let mut seen_in_file: HashSet<String> = HashSet::new();
    let mut to_create: Vec<ImportRow> = Vec::new();

    for row in valid_rows {
        if existing_enrollments.contains(&row.enrollment_number) {
            skipped += 1;
            errors.push(ImportRowError {
                row: row.row_num,
                field: "enrollment_number".to_string(),
                message: "学号已存在".to_string(),
            });
        } else if !seen_in_file.insert(row.enrollment_number.clone()) {
            skipped += 1;
            errors.push(ImportRowError {
                row: row.row_num,
                field: "enrollment_number".to_string(),
                message: "学号在文件中重复".to_string(),
            });
        } else {
            to_create.push(row);
        }
    }

    // 批量创建学生
    let mut success = 0;
    let mut failed = 0;

    for row in to_create {
        let create_req = CreateStudentRequest {
            name: row.name,
            enrollment_number: row.enrollment_number,
        };

        match storage.create_student(class_id, create_req).await {
            Ok(_) => success += 1,
            Err(e) => {
                failed += 1;
                error!("创建学生失败: {}", e);
                errors.push(ImportRowError {
                    row: row.row_num,
                    field: "".to_string(),
                    message: format!("创建失败: {e}"),
                });
            }
        }
    }

    let response = ImportStudentsResponse {
        total: rows.len(),
        success,
        skipped,
        failed,
        errors,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "导入完成")))
}

async fn read_file_from_multipart(payload: &mut Multipart) -> Result<(Vec<u8>, String), String> {
    let mut file_bytes = Vec::new();
    let mut file_name = String::new();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| format!("读取字段失败: {e}"))?;

        if field.name().map(|n| n == "file").unwrap_or(false) {
            // 获取文件名
            if let Some(content_disposition) = field.content_disposition() {
                file_name = content_disposition
                    .get_filename()
                    .unwrap_or("upload.csv")
                    .to_string();
            }

            // 读取内容
            while let Some(chunk) = field.next().await {
                let data = chunk.map_err(|e| format!("读取数据失败: {e}"))?;
                file_bytes.extend_from_slice(&data);
            }
        }
    }

    if file_bytes.is_empty() {
        return Err("未找到文件字段".to_string());
    }

    Ok((file_bytes, file_name))
}

fn parse_csv(data: &[u8]) -> Result<Vec<ImportRow>, ImportParseError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(Cursor::new(data));

    // 检查表头
    let headers = rdr
        .headers()
        .map_err(|e| ImportParseError::ParseFailed(format!("读取表头失败: {e}")))?;
    let header_map: std::collections::HashMap<_, _> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().to_lowercase(), i))
        .collect();

    // 必需列
    let name_idx = *header_map
        .get("name")
        .ok_or_else(|| ImportParseError::MissingColumn("name".to_string()))?;
    let enrollment_idx = *header_map
        .get("enrollment_number")
        .ok_or_else(|| ImportParseError::MissingColumn("enrollment_number".to_string()))?;

    let mut rows = Vec::new();

    for (row_num, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| {
            ImportParseError::ParseFailed(format!("第 {} 行解析失败: {e}", row_num + 2))
        })?;

        let name = record.get(name_idx).unwrap_or("").trim().to_string();
        let enrollment_number = record.get(enrollment_idx).unwrap_or("").trim().to_string();

        rows.push(ImportRow {
            row_num: row_num + 2, // 1-based, skip header
            name,
            enrollment_number,
        });
    }

    Ok(rows)
}

fn parse_xlsx(data: &[u8]) -> Result<Vec<ImportRow>, ImportParseError> {
    let cursor = Cursor::new(data);
    let mut workbook: Xlsx<_> = Xlsx::new(cursor)
        .map_err(|e| ImportParseError::ParseFailed(format!("打开 XLSX 失败: {e}")))?;

    // 获取第一个工作表
    let sheet_names = workbook.sheet_names().to_vec();
    let sheet_name = sheet_names
        .first()
        .ok_or_else(|| ImportParseError::ParseFailed("工作簿中没有工作表".to_string()))?;

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| ImportParseError::ParseFailed(format!("读取工作表失败: {e}")))?;

    let mut rows_iter = range.rows();

    // 读取表头
    let header_row = rows_iter.next().ok_or(ImportParseError::EmptyFile)?;
    let header_map: std::collections::HashMap<_, _> = header_row
        .iter()
        .enumerate()
        .map(|(i, cell)| (cell.to_string().trim().to_lowercase(), i))
        .collect();

    // 必需列
    let name_idx = *header_map
        .get("name")
        .ok_or_else(|| ImportParseError::MissingColumn("name".to_string()))?;
    let enrollment_idx = *header_map
        .get("enrollment_number")
        .ok_or_else(|| ImportParseError::MissingColumn("enrollment_number".to_string()))?;

    let mut rows = Vec::new();

    for (row_num, row) in rows_iter.enumerate() {
        let get_cell = |idx: usize| -> String {
            row.get(idx)
                .map(|c| c.to_string().trim().to_string())
                .unwrap_or_default()
        };

        rows.push(ImportRow {
            row_num: row_num + 2, // 1-based, skip header
            name: get_cell(name_idx),
            enrollment_number: get_cell(enrollment_idx),
        });
    }

    Ok(rows)
}

fn validate_row(row: &ImportRow) -> Vec<ImportRowError> {
    let mut errors = Vec::new();

    if let Err(msg) = validate_student_name(&row.name) {
        errors.push(ImportRowError {
            row: row.row_num,
            field: "name".to_string(),
            message: msg.to_string(),
        });
    }

    if let Err(msg) = validate_enrollment_number(&row.enrollment_number) {
        errors.push(ImportRowError {
            row: row.row_num,
            field: "enrollment_number".to_string(),
            message: msg.to_string(),
        });
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_basic() {
        let data = b"name,enrollment_number\nAlice,2026/001\nBob,2026/002\n";
        let rows = parse_csv(data).ok().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].row_num, 2);
        assert_eq!(rows[0].name, "Alice");
        assert_eq!(rows[1].enrollment_number, "2026/002");
    }

    #[test]
    fn test_parse_csv_missing_column() {
        let data = b"name,roll\nAlice,1\n";
        let err = parse_csv(data).err().unwrap();
        assert!(matches!(err, ImportParseError::MissingColumn(col) if col == "enrollment_number"));
    }

    #[test]
    fn test_parse_csv_header_case_insensitive() {
        let data = b"Name,Enrollment_Number\nAlice,001\n";
        let rows = parse_csv(data).ok().unwrap();
        assert_eq!(rows[0].name, "Alice");
    }

    #[test]
    fn test_validate_row_flags_empty_name() {
        let row = ImportRow {
            row_num: 3,
            name: "  ".to_string(),
            enrollment_number: "001".to_string(),
        };
        let errors = validate_row(&row);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "name");
        assert_eq!(errors[0].row, 3);
    }
}
