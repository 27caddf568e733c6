//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod attendance;
mod classes;
mod stats;
mod students;
mod users;

use crate::config::AppConfig;
use crate::errors::{AttendError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| AttendError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| AttendError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| AttendError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| AttendError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(AttendError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserData) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    // 班级模块
    async fn create_class(&self, teacher_id: i64, class: CreateClassRequest) -> Result<Class> {
        self.create_class_impl(teacher_id, class).await
    }

    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>> {
        self.get_class_by_id_impl(class_id).await
    }

    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse> {
        self.list_classes_with_pagination_impl(query).await
    }

    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        self.update_class_impl(class_id, update).await
    }

    async fn delete_class(&self, class_id: i64) -> Result<bool> {
        self.delete_class_impl(class_id).await
    }

    async fn count_students_in_class(&self, class_id: i64) -> Result<i64> {
        self.count_students_in_class_impl(class_id).await
    }

    // 学生名册模块
    async fn create_student(
        &self,
        class_id: i64,
        student: CreateStudentRequest,
    ) -> Result<Student> {
        self.create_student_impl(class_id, student).await
    }

    async fn get_student_by_id(&self, student_id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(student_id).await
    }

    async fn get_student_by_enrollment(
        &self,
        class_id: i64,
        enrollment_number: &str,
    ) -> Result<Option<Student>> {
        self.get_student_by_enrollment_impl(class_id, enrollment_number)
            .await
    }

    async fn list_students_with_pagination(
        &self,
        class_id: i64,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        self.list_students_with_pagination_impl(class_id, query)
            .await
    }

    async fn list_all_students(&self, class_id: i64) -> Result<Vec<Student>> {
        self.list_all_students_impl(class_id).await
    }

    async fn update_student(
        &self,
        student_id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        self.update_student_impl(student_id, update).await
    }

    async fn delete_student(&self, student_id: i64) -> Result<bool> {
        self.delete_student_impl(student_id).await
    }

    // 点名模块
    async fn get_attendance_by_class_and_date(
        &self,
        class_id: i64,
        date: NaiveDate,
    ) -> Result<Option<Attendance>> {
        self.get_attendance_by_class_and_date_impl(class_id, date)
            .await
    }

    async fn create_attendance_with_records(
        &self,
        class_id: i64,
        date: NaiveDate,
        records: Vec<(i64, AttendanceStatus)>,
    ) -> Result<Attendance> {
        self.create_attendance_with_records_impl(class_id, date, records)
            .await
    }

    async fn get_attendance_by_id(&self, attendance_id: i64) -> Result<Option<Attendance>> {
        self.get_attendance_by_id_impl(attendance_id).await
    }

    async fn list_attendances_with_pagination(
        &self,
        class_id: i64,
        query: AttendanceHistoryQuery,
    ) -> Result<AttendanceHistoryResponse> {
        self.list_attendances_with_pagination_impl(class_id, query)
            .await
    }

    async fn get_attendance_records(
        &self,
        attendance_id: i64,
    ) -> Result<Vec<AttendanceRecordDetail>> {
        self.get_attendance_records_impl(attendance_id).await
    }

    async fn update_attendance_records(
        &self,
        attendance_id: i64,
        records: Vec<(i64, AttendanceStatus)>,
    ) -> Result<bool> {
        self.update_attendance_records_impl(attendance_id, records)
            .await
    }

    async fn get_attendance_counts(&self, attendance_id: i64) -> Result<AttendanceCounts> {
        self.get_attendance_counts_impl(attendance_id).await
    }

    // 统计模块
    async fn list_teacher_overview(&self) -> Result<Vec<TeacherOverviewItem>> {
        self.list_teacher_overview_impl().await
    }

    async fn list_class_overview(&self) -> Result<Vec<ClassOverviewItem>> {
        self.list_class_overview_impl().await
    }

    async fn list_recent_attendances(&self, limit: u64) -> Result<Vec<RecentAttendanceItem>> {
        self.list_recent_attendances_impl(limit).await
    }

    async fn get_attendance_summary(
        &self,
        class_id: Option<i64>,
        date: Option<NaiveDate>,
    ) -> Result<AttendanceCounts> {
        self.get_attendance_summary_impl(class_id, date).await
    }
}
