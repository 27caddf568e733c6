//! 全局统计存储操作（管理员概览）

use super::SeaOrmStorage;
use crate::entity::attendance_records::{Column as RecordColumn, Entity as Records};
use crate::entity::attendances::{Column as AttendanceColumn, Entity as Attendances};
use crate::entity::classes::{Column as ClassColumn, Entity as Classes};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{AttendError, Result};
use crate::models::admin::responses::{
    ClassOverviewItem, RecentAttendanceItem, TeacherOverviewItem,
};
use crate::models::attendance::entities::{AttendanceCounts, AttendanceStatus};
use crate::models::users::entities::UserRole;
use chrono::NaiveDate;
use sea_orm::{
    ColumnTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

impl SeaOrmStorage {
    /// 教师列表及各自班级数
    pub async fn list_teacher_overview_impl(&self) -> Result<Vec<TeacherOverviewItem>> {
        let teachers = Users::find()
            .filter(UserColumn::Role.eq(UserRole::Teacher.to_string()))
            .order_by_asc(UserColumn::Username)
            .all(&self.db)
            .await
            .map_err(|e| AttendError::database_operation(format!("查询教师列表失败: {e}")))?;

        let mut items = Vec::with_capacity(teachers.len());
        for teacher in teachers {
            let class_count = Classes::find()
                .filter(ClassColumn::TeacherId.eq(teacher.id))
                .count(&self.db)
                .await
                .map_err(|e| {
                    AttendError::database_operation(format!("统计教师班级数失败: {e}"))
                })?;

            items.push(TeacherOverviewItem {
                id: teacher.id,
                username: teacher.username,
                email: teacher.email,
                display_name: teacher.display_name,
                class_count: class_count as i64,
            });
        }

        Ok(items)
    }

    /// 班级列表及学生数/点名次数
    pub async fn list_class_overview_impl(&self) -> Result<Vec<ClassOverviewItem>> {
        let classes = Classes::find()
            .find_also_related(Users)
            .order_by_desc(ClassColumn::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| AttendError::database_operation(format!("查询班级列表失败: {e}")))?;

        let mut items = Vec::with_capacity(classes.len());
        for (class, teacher) in classes {
            let student_count = self.count_students_in_class_impl(class.id).await?;
            let attendance_count = Attendances::find()
                .filter(AttendanceColumn::ClassId.eq(class.id))
                .count(&self.db)
                .await
                .map_err(|e| {
                    AttendError::database_operation(format!("统计点名次数失败: {e}"))
                })?;

            let teacher_name = teacher
                .map(|t| t.display_name.unwrap_or(t.username))
                .unwrap_or_default();

            items.push(ClassOverviewItem {
                id: class.id,
                subject: class.subject,
                branch: class.branch,
                year: class.year,
                teacher_id: class.teacher_id,
                teacher_name,
                student_count,
                attendance_count: attendance_count as i64,
            });
        }

        Ok(items)
    }

    /// 最近的点名表（按日期倒序）
    pub async fn list_recent_attendances_impl(
        &self,
        limit: u64,
    ) -> Result<Vec<RecentAttendanceItem>> {
        let rows = Attendances::find()
            .find_also_related(Classes)
            .order_by_desc(AttendanceColumn::Date)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| AttendError::database_operation(format!("查询最近点名失败: {e}")))?;

        let mut items = Vec::with_capacity(rows.len());
        for (attendance, class) in rows {
            let counts = self.get_attendance_counts_impl(attendance.id).await?;
            let (subject, branch) = class
                .map(|c| (c.subject, c.branch))
                .unwrap_or_default();

            items.push(RecentAttendanceItem {
                id: attendance.id,
                class_id: attendance.class_id,
                subject,
                branch,
                date: NaiveDate::parse_from_str(&attendance.date, DATE_FORMAT)
                    .unwrap_or_default(),
                counts,
            });
        }

        Ok(items)
    }

    /// 按过滤条件汇总各状态人数
    pub async fn get_attendance_summary_impl(
        &self,
        class_id: Option<i64>,
        date: Option<NaiveDate>,
    ) -> Result<AttendanceCounts> {
        let mut counts = AttendanceCounts::default();

        for status in [
            AttendanceStatus::Present,
            AttendanceStatus::Absent,
            AttendanceStatus::Leave,
        ] {
            let mut select = Records::find()
                .join(
                    JoinType::InnerJoin,
                    crate::entity::attendance_records::Relation::Attendance.def(),
                )
                .filter(RecordColumn::Status.eq(status.to_string()));

            if let Some(class_id) = class_id {
                select = select.filter(AttendanceColumn::ClassId.eq(class_id));
            }
            if let Some(date) = date {
                select =
                    select.filter(AttendanceColumn::Date.eq(date.format(DATE_FORMAT).to_string()));
            }

            let count = select
                .count(&self.db)
                .await
                .map_err(|e| {
                    AttendError::database_operation(format!("汇总点名统计失败: {e}"))
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
