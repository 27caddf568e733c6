//! 点名存储操作
//!
//! 点名表与逐学生记录在同一事务中写入，保证一次点名要么完整落库
//! 要么完全不落库。

use super::SeaOrmStorage;
use crate::entity::attendance_records::{
    ActiveModel as RecordActiveModel, Column as RecordColumn, Entity as Records,
};
use crate::entity::attendances::{ActiveModel, Column, Entity as Attendances};
use crate::entity::students::Entity as Students;
use crate::errors::{AttendError, Result};
use crate::models::{
    PaginationInfo,
    attendance::{
        entities::{Attendance, AttendanceCounts, AttendanceRecordDetail, AttendanceStatus},
        requests::AttendanceHistoryQuery,
        responses::{AttendanceHistoryItem, AttendanceHistoryResponse},
    },
};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

impl SeaOrmStorage {
    /// 获取班级指定日期的点名表
    pub async fn get_attendance_by_class_and_date_impl(
        &self,
        class_id: i64,
        date: NaiveDate,
    ) -> Result<Option<Attendance>> {
        let result = Attendances::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::Date.eq(date.format(DATE_FORMAT).to_string()))
            .one(&self.db)
            .await
            .map_err(|e| AttendError::database_operation(format!("查询点名表失败: {e}")))?;

        Ok(result.map(|m| m.into_attendance()))
    }

    /// 创建点名表及全部学生记录（单事务）
    pub async fn create_attendance_with_records_impl(
        &self,
        class_id: i64,
        date: NaiveDate,
        records: Vec<(i64, AttendanceStatus)>,
    ) -> Result<Attendance> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AttendError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            class_id: Set(class_id),
            date: Set(date.format(DATE_FORMAT).to_string()),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let attendance = model
            .insert(&txn)
            .await
            .map_err(|e| AttendError::database_operation(format!("创建点名表失败: {e}")))?;

        for (student_id, status) in records {
            let record = RecordActiveModel {
                attendance_id: Set(attendance.id),
                student_id: Set(student_id),
                status: Set(status.to_string()),
                ..Default::default()
            };
            record
                .insert(&txn)
                .await
                .map_err(|e| AttendError::database_operation(format!("写入点名记录失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| AttendError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(attendance.into_attendance())
    }

    /// 通过 ID 获取点名表
    pub async fn get_attendance_by_id_impl(&self, attendance_id: i64) -> Result<Option<Attendance>> {
        let result = Attendances::find_by_id(attendance_id)
            .one(&self.db)
            .await
            .map_err(|e| AttendError::database_operation(format!("查询点名表失败: {e}")))?;

        Ok(result.map(|m| m.into_attendance()))
    }

    /// 分页列出班级点名历史（附各状态人数）
    pub async fn list_attendances_with_pagination_impl(
        &self,
        class_id: i64,
        query: AttendanceHistoryQuery,
    ) -> Result<AttendanceHistoryResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Attendances::find().filter(Column::ClassId.eq(class_id));

        // 日期范围筛选（date 列为 YYYY-MM-DD，字符串比较即日期比较）
        if let Some(from) = query.from {
            select = select.filter(Column::Date.gte(from.format(DATE_FORMAT).to_string()));
        }
        if let Some(to) = query.to {
            select = select.filter(Column::Date.lte(to.format(DATE_FORMAT).to_string()));
        }

        // 最近的点名在前
        select = select.order_by_desc(Column::Date);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AttendError::database_operation(format!("查询点名总数失败: {e}")))?;

        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AttendError::database_operation(format!("查询点名历史失败: {e}")))?;

        let mut items = Vec::with_capacity(models.len());
        for model in models {
            let counts = self.get_attendance_counts_impl(model.id).await?;
            items.push(AttendanceHistoryItem {
                attendance: model.into_attendance(),
                counts,
            });
        }

        let total_pages = total.div_ceil(size);

        Ok(AttendanceHistoryResponse {
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: total_pages as i64,
            },
            items,
        })
    }

    /// 点名表逐学生明细（含姓名和学号）
    pub async fn get_attendance_records_impl(
        &self,
        attendance_id: i64,
    ) -> Result<Vec<AttendanceRecordDetail>> {
        let rows = Records::find()
            .filter(RecordColumn::AttendanceId.eq(attendance_id))
            .find_also_related(Students)
            .all(&self.db)
            .await
            .map_err(|e| AttendError::database_operation(format!("查询点名记录失败: {e}")))?;

        let mut details = Vec::with_capacity(rows.len());
        for (record, student) in rows {
            // 学生被删除时记录已级联清理，这里的 None 只在并发窗口出现
            let Some(student) = student else {
                continue;
            };
            details.push(AttendanceRecordDetail {
                record_id: record.id,
                student_id: student.id,
                student_name: student.name,
                enrollment_number: student.enrollment_number,
                status: record
                    .status
                    .parse::<AttendanceStatus>()
                    .unwrap_or(AttendanceStatus::Present),
            });
        }

        // 与名册一致，按学号排序
        details.sort_by(|a, b| a.enrollment_number.cmp(&b.enrollment_number));

        Ok(details)
    }

    /// 覆盖更新点名记录的状态（单事务）
    pub async fn update_attendance_records_impl(
        &self,
        attendance_id: i64,
        records: Vec<(i64, AttendanceStatus)>,
    ) -> Result<bool> {
        let existing = Records::find()
            .filter(RecordColumn::AttendanceId.eq(attendance_id))
            .all(&self.db)
            .await
            .map_err(|e| AttendError::database_operation(format!("查询点名记录失败: {e}")))?;

        if existing.is_empty() {
            return Ok(false);
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AttendError::database_operation(format!("开启事务失败: {e}")))?;

        for (student_id, status) in records {
            // 只更新该点名表已有的学生记录，忽略名册外的 student_id
            if let Some(record) = existing.iter().find(|r| r.student_id == student_id) {
                let mut model: RecordActiveModel = record.clone().into();
                model.status = Set(status.to_string());
                model
                    .update(&txn)
                    .await
                    .map_err(|e| {
                        AttendError::database_operation(format!("更新点名记录失败: {e}"))
                    })?;
            }
        }

        txn.commit()
            .await
            .map_err(|e| AttendError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(true)
    }

    /// 点名表各状态人数
    pub async fn get_attendance_counts_impl(&self, attendance_id: i64) -> Result<AttendanceCounts> {
        let mut counts = AttendanceCounts::default();

        for status in [
            AttendanceStatus::Present,
            AttendanceStatus::Absent,
            AttendanceStatus::Leave,
        ] {
            let count = Records::find()
                .filter(RecordColumn::AttendanceId.eq(attendance_id))
                .filter(RecordColumn::Status.eq(status.to_string()))
                .count(&self.db)
                .await
                .map_err(|e| {
                    AttendError::database_operation(format!("统计点名记录失败: {e}"))
                })? as i64;

            match status {
                AttendanceStatus::Present => counts.present = count,
                AttendanceStatus::Absent => counts.absent = count,
                AttendanceStatus::Leave => counts.leave = count,
            }
        }

        Ok(counts)
    }
}
