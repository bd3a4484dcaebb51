use chrono::{Duration, Utc};
use skylab_config::DatabaseConfig;
use skylab_database::{initialize_database, time};
use sqlx::SqlitePool;
use tempfile::TempDir;

pub async fn migrated_pool() -> (SqlitePool, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let config = DatabaseConfig {
        url: format!("sqlite://{}", temp_dir.path().join("services.db").display()),
        max_connections: 2,
    };
    let pool = initialize_database(&config).await.unwrap();
    (pool, temp_dir)
}

/// Insert a cohort whose range contains now and return its year.
pub async fn seed_cohort(pool: &SqlitePool) -> i64 {
    let now = Utc::now();
    let year = 3000;
    sqlx::query("INSERT INTO cohorts (academic_year, start_date, end_date) VALUES (?, ?, ?)")
        .bind(year)
        .bind(time::format(now - Duration::days(30)))
        .bind(time::format(now + Duration::days(30)))
        .execute(pool)
        .await
        .unwrap();
    year
}
