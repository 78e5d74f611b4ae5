//! Database repository for catalog CRUD operations.
//!
//! Reads of child tables join the parent's display name in; writes only ever
//! touch one row of one table.

use chrono::{SecondsFormat, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{
    semester_label, Degree, DegreeDraft, DegreeView, Department, DepartmentDraft, SemesterDraft,
    SemesterMapping, SemesterView, Subject, SubjectDraft, SubjectView,
};

const DEPARTMENT_SELECT: &str = "SELECT id, name, created_at FROM departments";

const DEGREE_SELECT: &str = r#"SELECT d.id, d.code, d.full_name, d.stream_name, d.level,
           d.semester_count, d.department_id, d.created_at,
           dep.name AS department_name
    FROM degrees d
    LEFT JOIN departments dep ON dep.id = d.department_id"#;

const SEMESTER_SELECT: &str = r#"SELECT s.id, s.semester_number, s.degree_id, s.created_at,
           deg.full_name AS degree_name
    FROM semester_mappings s
    LEFT JOIN degrees deg ON deg.id = s.degree_id"#;

const SUBJECT_SELECT: &str = r#"SELECT sub.id, sub.degree_id, sub.semester_id, sub.code, sub.name,
           sub.category, sub.subject_type, sub.created_at,
           deg.full_name AS degree_name,
           sm.semester_number AS semester_number
    FROM subjects sub
    LEFT JOIN degrees deg ON deg.id = sub.degree_id
    LEFT JOIN semester_mappings sm ON sm.id = sub.semester_id"#;

/// Database repository for all catalog operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== DEPARTMENT OPERATIONS ====================

    /// List all departments, oldest first.
    pub async fn list_departments(&self) -> Result<Vec<Department>, AppError> {
        let rows = sqlx::query(&format!(
            "{} ORDER BY created_at ASC, rowid ASC",
            DEPARTMENT_SELECT
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(department_from_row).collect())
    }

    /// Get a department by ID.
    pub async fn get_department(&self, id: &str) -> Result<Option<Department>, AppError> {
        let row = sqlx::query(&format!("{} WHERE id = ?", DEPARTMENT_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(department_from_row))
    }

    /// Create a new department.
    pub async fn create_department(&self, draft: &DepartmentDraft) -> Result<Department, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = timestamp();

        sqlx::query("INSERT INTO departments (id, name, created_at) VALUES (?, ?, ?)")
            .bind(&id)
            .bind(&draft.name)
            .bind(&now)
            .execute(&self.pool)
            .await?;

        tracing::debug!(%id, "department created");

        Ok(Department {
            id,
            name: draft.name.clone(),
            created_at: now,
        })
    }

    /// Replace the editable fields of a department.
    pub async fn update_department(
        &self,
        id: &str,
        draft: &DepartmentDraft,
    ) -> Result<Department, AppError> {
        let result = sqlx::query("UPDATE departments SET name = ? WHERE id = ?")
            .bind(&draft.name)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found("Department", id));
        }

        self.get_department(id)
            .await?
            .ok_or_else(|| vanished("Department", id))
    }

    /// Delete a department. Its degrees go with it.
    pub async fn delete_department(&self, id: &str) -> Result<(), AppError> {
        self.delete_row("departments", "Department", id).await
    }

    // ==================== DEGREE OPERATIONS ====================

    /// List all degrees, oldest first.
    pub async fn list_degrees(&self) -> Result<Vec<DegreeView>, AppError> {
        let rows = sqlx::query(&format!(
            "{} ORDER BY d.created_at ASC, d.rowid ASC",
            DEGREE_SELECT
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(degree_from_row).collect())
    }

    /// Get a degree by ID.
    pub async fn get_degree(&self, id: &str) -> Result<Option<DegreeView>, AppError> {
        let row = sqlx::query(&format!("{} WHERE d.id = ?", DEGREE_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(degree_from_row))
    }

    /// Create a new degree under an existing department.
    pub async fn create_degree(&self, draft: &DegreeDraft) -> Result<DegreeView, AppError> {
        self.require_parent("departments", "Department", &draft.department_id)
            .await?;

        let id = uuid::Uuid::new_v4().to_string();
        let now = timestamp();

        sqlx::query(
            "INSERT INTO degrees (id, code, full_name, stream_name, level, semester_count, department_id, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&id)
        .bind(&draft.code)
        .bind(&draft.full_name)
        .bind(&draft.stream_name)
        .bind(&draft.level)
        .bind(draft.semester_count)
        .bind(&draft.department_id)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        tracing::debug!(%id, department_id = %draft.department_id, "degree created");

        self.get_degree(&id)
            .await?
            .ok_or_else(|| vanished("Degree", &id))
    }

    /// Replace the editable fields of a degree.
    pub async fn update_degree(&self, id: &str, draft: &DegreeDraft) -> Result<DegreeView, AppError> {
        self.require_parent("departments", "Department", &draft.department_id)
            .await?;

        let result = sqlx::query(
            "UPDATE degrees SET code = ?, full_name = ?, stream_name = ?, level = ?, semester_count = ?, department_id = ? WHERE id = ?"
        )
        .bind(&draft.code)
        .bind(&draft.full_name)
        .bind(&draft.stream_name)
        .bind(&draft.level)
        .bind(draft.semester_count)
        .bind(&draft.department_id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(not_found("Degree", id));
        }

        self.get_degree(id)
            .await?
            .ok_or_else(|| vanished("Degree", id))
    }

    /// Delete a degree. Its semester mappings and subjects go with it.
    pub async fn delete_degree(&self, id: &str) -> Result<(), AppError> {
        self.delete_row("degrees", "Degree", id).await
    }

    // ==================== SEMESTER MAPPING OPERATIONS ====================

    /// List all semester mappings ordered by owning degree id.
    ///
    /// Mappings of the same degree keep insertion order; the semester number
    /// plays no part in the ordering.
    pub async fn list_semesters(&self) -> Result<Vec<SemesterView>, AppError> {
        let rows = sqlx::query(&format!(
            "{} ORDER BY s.degree_id ASC, s.rowid ASC",
            SEMESTER_SELECT
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(semester_from_row).collect())
    }

    /// List the semester mappings of one degree.
    pub async fn list_semesters_by_degree(
        &self,
        degree_id: &str,
    ) -> Result<Vec<SemesterView>, AppError> {
        let rows = sqlx::query(&format!(
            "{} WHERE s.degree_id = ? ORDER BY s.rowid ASC",
            SEMESTER_SELECT
        ))
        .bind(degree_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(semester_from_row).collect())
    }

    /// Get a semester mapping by ID.
    pub async fn get_semester(&self, id: &str) -> Result<Option<SemesterView>, AppError> {
        let row = sqlx::query(&format!("{} WHERE s.id = ?", SEMESTER_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(semester_from_row))
    }

    /// Create a new semester mapping under an existing degree.
    pub async fn create_semester(&self, draft: &SemesterDraft) -> Result<SemesterView, AppError> {
        self.require_parent("degrees", "Degree", &draft.degree_id)
            .await?;

        let id = uuid::Uuid::new_v4().to_string();
        let now = timestamp();

        sqlx::query(
            "INSERT INTO semester_mappings (id, semester_number, degree_id, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(draft.semester_number)
        .bind(&draft.degree_id)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.get_semester(&id)
            .await?
            .ok_or_else(|| vanished("Semester mapping", &id))
    }

    /// Replace the editable fields of a semester mapping.
    pub async fn update_semester(
        &self,
        id: &str,
        draft: &SemesterDraft,
    ) -> Result<SemesterView, AppError> {
        self.require_parent("degrees", "Degree", &draft.degree_id)
            .await?;

        let result =
            sqlx::query("UPDATE semester_mappings SET semester_number = ?, degree_id = ? WHERE id = ?")
                .bind(draft.semester_number)
                .bind(&draft.degree_id)
                .bind(id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(not_found("Semester mapping", id));
        }

        self.get_semester(id)
            .await?
            .ok_or_else(|| vanished("Semester mapping", id))
    }

    /// Delete a semester mapping. Its subjects go with it.
    pub async fn delete_semester(&self, id: &str) -> Result<(), AppError> {
        self.delete_row("semester_mappings", "Semester mapping", id)
            .await
    }

    // ==================== SUBJECT OPERATIONS ====================

    /// List all subjects ordered by subject code.
    pub async fn list_subjects(&self) -> Result<Vec<SubjectView>, AppError> {
        let rows = sqlx::query(&format!(
            "{} ORDER BY sub.code ASC, sub.rowid ASC",
            SUBJECT_SELECT
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(subject_from_row).collect())
    }

    /// List the subjects of one degree, oldest first.
    pub async fn list_subjects_by_degree(
        &self,
        degree_id: &str,
    ) -> Result<Vec<SubjectView>, AppError> {
        let rows = sqlx::query(&format!(
            "{} WHERE sub.degree_id = ? ORDER BY sub.created_at ASC, sub.rowid ASC",
            SUBJECT_SELECT
        ))
        .bind(degree_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(subject_from_row).collect())
    }

    /// Get a subject by ID.
    pub async fn get_subject(&self, id: &str) -> Result<Option<SubjectView>, AppError> {
        let row = sqlx::query(&format!("{} WHERE sub.id = ?", SUBJECT_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(subject_from_row))
    }

    /// Create a new subject under an existing degree and semester mapping.
    pub async fn create_subject(&self, draft: &SubjectDraft) -> Result<SubjectView, AppError> {
        self.require_parent("degrees", "Degree", &draft.degree_id)
            .await?;
        self.require_parent("semester_mappings", "Semester mapping", &draft.semester_id)
            .await?;

        let id = uuid::Uuid::new_v4().to_string();
        let now = timestamp();

        sqlx::query(
            "INSERT INTO subjects (id, degree_id, semester_id, code, name, category, subject_type, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&id)
        .bind(&draft.degree_id)
        .bind(&draft.semester_id)
        .bind(&draft.code)
        .bind(&draft.name)
        .bind(&draft.category)
        .bind(&draft.subject_type)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.get_subject(&id)
            .await?
            .ok_or_else(|| vanished("Subject", &id))
    }

    /// Replace the editable fields of a subject.
    pub async fn update_subject(
        &self,
        id: &str,
        draft: &SubjectDraft,
    ) -> Result<SubjectView, AppError> {
        self.require_parent("degrees", "Degree", &draft.degree_id)
            .await?;
        self.require_parent("semester_mappings", "Semester mapping", &draft.semester_id)
            .await?;

        let result = sqlx::query(
            "UPDATE subjects SET degree_id = ?, semester_id = ?, code = ?, name = ?, category = ?, subject_type = ? WHERE id = ?"
        )
        .bind(&draft.degree_id)
        .bind(&draft.semester_id)
        .bind(&draft.code)
        .bind(&draft.name)
        .bind(&draft.category)
        .bind(&draft.subject_type)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(not_found("Subject", id));
        }

        self.get_subject(id)
            .await?
            .ok_or_else(|| vanished("Subject", id))
    }

    /// Delete a subject.
    pub async fn delete_subject(&self, id: &str) -> Result<(), AppError> {
        self.delete_row("subjects", "Subject", id).await
    }

    // ==================== SHARED HELPERS ====================

    /// Fail with a validation error unless `id` names a row of `table`.
    async fn require_parent(&self, table: &str, label: &str, id: &str) -> Result<(), AppError> {
        let row = sqlx::query(&format!("SELECT 1 FROM {} WHERE id = ?", table))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(_) => Ok(()),
            None => Err(AppError::Validation(format!(
                "{} {} does not exist",
                label, id
            ))),
        }
    }

    async fn delete_row(&self, table: &str, label: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = ?", table))
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(label, id));
        }

        tracing::debug!(table, %id, "row deleted");
        Ok(())
    }
}

// Helper functions for row conversion

fn department_from_row(row: &SqliteRow) -> Department {
    Department {
        id: row.get("id"),
        name: row.get("name"),
        created_at: row.get("created_at"),
    }
}

fn degree_from_row(row: &SqliteRow) -> DegreeView {
    let department_name: Option<String> = row.get("department_name");
    DegreeView {
        degree: Degree {
            id: row.get("id"),
            code: row.get("code"),
            full_name: row.get("full_name"),
            stream_name: row.get("stream_name"),
            level: row.get("level"),
            semester_count: row.get("semester_count"),
            department_id: row.get("department_id"),
            created_at: row.get("created_at"),
        },
        department_name: department_name.unwrap_or_default(),
    }
}

fn semester_from_row(row: &SqliteRow) -> SemesterView {
    let degree_name: Option<String> = row.get("degree_name");
    SemesterView {
        mapping: SemesterMapping {
            id: row.get("id"),
            semester_number: row.get("semester_number"),
            degree_id: row.get("degree_id"),
            created_at: row.get("created_at"),
        },
        degree_name: degree_name.unwrap_or_default(),
    }
}

fn subject_from_row(row: &SqliteRow) -> SubjectView {
    let degree_name: Option<String> = row.get("degree_name");
    let semester_number: Option<i64> = row.get("semester_number");
    SubjectView {
        subject: Subject {
            id: row.get("id"),
            degree_id: row.get("degree_id"),
            semester_id: row.get("semester_id"),
            code: row.get("code"),
            name: row.get("name"),
            category: row.get("category"),
            subject_type: row.get("subject_type"),
            created_at: row.get("created_at"),
        },
        degree_name: degree_name.unwrap_or_default(),
        semester_name: semester_label(semester_number),
    }
}

/// Fixed-width UTC timestamp so string order matches time order.
fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn not_found(label: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} {} not found", label, id))
}

fn vanished(label: &str, id: &str) -> AppError {
    AppError::Internal(format!("{} {} missing after write", label, id))
}
