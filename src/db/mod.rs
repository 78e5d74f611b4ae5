//! Database module for SQLite persistence.
//!
//! SQLite is the source of truth for the catalog.

mod repository;

pub use repository::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

/// Initialize the database connection pool and run migrations.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    // Ensure the parent directory exists
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await.ok();
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;

    Ok(pool)
}

/// Run database migrations.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS departments (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS degrees (
            id TEXT PRIMARY KEY,
            code TEXT NOT NULL,
            full_name TEXT NOT NULL,
            stream_name TEXT NOT NULL,
            level TEXT NOT NULL,
            semester_count INTEGER NOT NULL,
            department_id TEXT NOT NULL REFERENCES departments(id) ON DELETE CASCADE,
            created_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS semester_mappings (
            id TEXT PRIMARY KEY,
            semester_number INTEGER NOT NULL,
            degree_id TEXT NOT NULL REFERENCES degrees(id) ON DELETE CASCADE,
            created_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS subjects (
            id TEXT PRIMARY KEY,
            degree_id TEXT NOT NULL REFERENCES degrees(id) ON DELETE CASCADE,
            semester_id TEXT NOT NULL REFERENCES semester_mappings(id) ON DELETE CASCADE,
            code TEXT NOT NULL,
            name TEXT NOT NULL,
            category TEXT NOT NULL,
            subject_type TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Indexes for the list orderings and joins
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_departments_created_at ON departments(created_at);
        CREATE INDEX IF NOT EXISTS idx_degrees_created_at ON degrees(created_at);
        CREATE INDEX IF NOT EXISTS idx_degrees_department_id ON degrees(department_id);
        CREATE INDEX IF NOT EXISTS idx_semester_mappings_degree_id ON semester_mappings(degree_id);
        CREATE INDEX IF NOT EXISTS idx_subjects_code ON subjects(code);
        CREATE INDEX IF NOT EXISTS idx_subjects_semester_id ON subjects(semester_id);
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
