//! 学生名册存储操作

use super::SeaOrmStorage;
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::{AttendError, Result};
use crate::models::{
    PaginationInfo,
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
        responses::StudentListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 添加学生到名册
    pub async fn create_student_impl(
        &self,
        class_id: i64,
        req: CreateStudentRequest,
    ) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            class_id: Set(class_id),
            name: Set(req.name),
            enrollment_number: Set(req.enrollment_number),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AttendError::database_operation(format!("添加学生失败: {e}")))?;

        Ok(result.into_student())
    }

    /// 通过 ID 获取学生
    pub async fn get_student_by_id_impl(&self, student_id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(student_id)
            .one(&self.db)
            .await
            .map_err(|e| AttendError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 通过学号获取学生（限定班级）
    pub async fn get_student_by_enrollment_impl(
        &self,
        class_id: i64,
        enrollment_number: &str,
    ) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::EnrollmentNumber.eq(enrollment_number))
            .one(&self.db)
            .await
            .map_err(|e| AttendError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 分页列出班级名册
    pub async fn list_students_with_pagination_impl(
        &self,
        class_id: i64,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Students::find().filter(Column::ClassId.eq(class_id));

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Name.contains(&escaped))
                    .add(Column::EnrollmentNumber.contains(&escaped)),
            );
        }

        // 名册按学号排序
        select = select.order_by_asc(Column::EnrollmentNumber);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AttendError::database_operation(format!("查询名册总数失败: {e}")))?;

        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AttendError::database_operation(format!("查询名册失败: {e}")))?;

        let total_pages = total.div_ceil(size);

        Ok(StudentListResponse {
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: total_pages as i64,
            },
            items: models.into_iter().map(|m| m.into_student()).collect(),
        })
    }

    /// 列出班级全部学生（按学号排序）
    pub async fn list_all_students_impl(&self, class_id: i64) -> Result<Vec<Student>> {
        let models = Students::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_asc(Column::EnrollmentNumber)
            .all(&self.db)
            .await
            .map_err(|e| AttendError::database_operation(format!("查询名册失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_student()).collect())
    }

    /// 更新学生信息
    pub async fn update_student_impl(
        &self,
        student_id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        let Some(existing) = Students::find_by_id(student_id)
            .one(&self.db)
            .await
            .map_err(|e| AttendError::database_operation(format!("查询学生失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();

        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(enrollment) = update.enrollment_number {
            model.enrollment_number = Set(enrollment);
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| AttendError::database_operation(format!("更新学生失败: {e}")))?;

        Ok(Some(result.into_student()))
    }

    /// 删除学生（外键级联清理点名记录）
    pub async fn delete_student_impl(&self, student_id: i64) -> Result<bool> {
        let result = Students::delete_by_id(student_id)
            .exec(&self.db)
            .await
            .map_err(|e| AttendError::database_operation(format!("删除学生失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
