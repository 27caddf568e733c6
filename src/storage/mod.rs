use std::sync::Arc;

use chrono::NaiveDate;

use crate::models::{
    admin::responses::{ClassOverviewItem, RecentAttendanceItem, TeacherOverviewItem},
    attendance::{
        entities::{Attendance, AttendanceCounts, AttendanceRecordDetail, AttendanceStatus},
        requests::AttendanceHistoryQuery,
        responses::AttendanceHistoryResponse,
    },
    classes::{
        entities::Class,
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
        responses::ClassListResponse,
    },
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
        responses::StudentListResponse,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserData},
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserData) -> Result<Option<User>>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;

    /// 班级管理方法
    // 创建班级
    async fn create_class(&self, teacher_id: i64, class: CreateClassRequest) -> Result<Class>;
    // 通过ID获取班级信息
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;
    // 列出班级（附学生人数）
    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse>;
    // 更新班级信息
    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>>;
    // 删除班级（级联删除名册和点名记录）
    async fn delete_class(&self, class_id: i64) -> Result<bool>;
    // 班级学生人数
    async fn count_students_in_class(&self, class_id: i64) -> Result<i64>;

    /// 学生名册管理方法
    // 添加学生
    async fn create_student(&self, class_id: i64, student: CreateStudentRequest)
    -> Result<Student>;
    // 通过ID获取学生
    async fn get_student_by_id(&self, student_id: i64) -> Result<Option<Student>>;
    // 通过学号获取学生（限定班级）
    async fn get_student_by_enrollment(
        &self,
        class_id: i64,
        enrollment_number: &str,
    ) -> Result<Option<Student>>;
    // 分页列出班级名册
    async fn list_students_with_pagination(
        &self,
        class_id: i64,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;
    // 列出班级全部学生（点名和导出用）
    async fn list_all_students(&self, class_id: i64) -> Result<Vec<Student>>;
    // 更新学生信息
    async fn update_student(
        &self,
        student_id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>>;
    // 删除学生
    async fn delete_student(&self, student_id: i64) -> Result<bool>;

    /// 点名管理方法
    // 获取班级指定日期的点名表
    async fn get_attendance_by_class_and_date(
        &self,
        class_id: i64,
        date: NaiveDate,
    ) -> Result<Option<Attendance>>;
    // 创建点名表及全部学生记录（单事务）
    async fn create_attendance_with_records(
        &self,
        class_id: i64,
        date: NaiveDate,
        records: Vec<(i64, AttendanceStatus)>,
    ) -> Result<Attendance>;
    // 通过ID获取点名表
    async fn get_attendance_by_id(&self, attendance_id: i64) -> Result<Option<Attendance>>;
    // 分页列出班级点名历史（附各状态人数）
    async fn list_attendances_with_pagination(
        &self,
        class_id: i64,
        query: AttendanceHistoryQuery,
    ) -> Result<AttendanceHistoryResponse>;
    // 点名表逐学生明细
    async fn get_attendance_records(
        &self,
        attendance_id: i64,
    ) -> Result<Vec<AttendanceRecordDetail>>;
    // 覆盖更新点名记录的状态
    async fn update_attendance_records(
        &self,
        attendance_id: i64,
        records: Vec<(i64, AttendanceStatus)>,
    ) -> Result<bool>;
    // 点名表各状态人数
    async fn get_attendance_counts(&self, attendance_id: i64) -> Result<AttendanceCounts>;

    /// 统计方法（管理员概览）
    // 教师列表及各自班级数
    async fn list_teacher_overview(&self) -> Result<Vec<TeacherOverviewItem>>;
    // 班级列表及学生数/点名次数
    async fn list_class_overview(&self) -> Result<Vec<ClassOverviewItem>>;
    // 最近的点名表
    async fn list_recent_attendances(&self, limit: u64) -> Result<Vec<RecentAttendanceItem>>;
    // 按过滤条件汇总各状态人数
    async fn get_attendance_summary(
        &self,
        class_id: Option<i64>,
        date: Option<NaiveDate>,
    ) -> Result<AttendanceCounts>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
