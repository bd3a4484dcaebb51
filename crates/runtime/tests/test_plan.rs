use std::path::Path;

use anyhow::{Context, Result};
use skylab_config::AppConfig;
use skylab_runtime::BackendServices;
use tempfile::TempDir;

const SKYLAB_TABLES: &[&str] = &[
    "administrators",
    "advisers",
    "cohorts",
    "deadlines",
    "mentors",
    "questions",
    "students",
    "users",
];

fn config_for(path: &Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.database.url = format!("sqlite://{}", path.to_string_lossy());
    config.database.max_connections = 2;
    config
}

async fn start(config: &AppConfig) -> Result<BackendServices> {
    BackendServices::initialise(config)
        .await
        .context("failed to initialise backend services")
}

#[tokio::test(flavor = "multi_thread")]
async fn migrations_create_every_skylab_table() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let services = start(&config_for(&temp_dir.path().join("skylab.db"))).await?;

    let tables: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' \
         AND name NOT IN ('_sqlx_migrations', 'sqlite_sequence') ORDER BY name",
    )
    .fetch_all(&services.db_pool)
    .await?;

    assert_eq!(tables, SKYLAB_TABLES);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn starts_with_the_development_secret() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = config_for(&temp_dir.path().join("dev.db"));

    let services = start(&config).await?;

    assert!(services.auth.uses_default_secret());
    assert!(!services.auth.cookie_secure);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn carries_configured_auth_settings() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut config = config_for(&temp_dir.path().join("prod.db"));
    config.auth.jwt_secret = "a-real-secret".to_string();
    config.auth.cookie_secure = true;

    let services = start(&config).await?;

    assert!(!services.auth.uses_default_secret());
    assert_eq!(services.auth.jwt_secret, "a-real-secret");
    assert!(services.auth.cookie_secure);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn mentor_rows_need_an_existing_cohort() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let services = start(&config_for(&temp_dir.path().join("fk.db"))).await?;

    let orphan = sqlx::query("INSERT INTO mentors (user_id, cohort_year) VALUES (1, 1999)")
        .execute(&services.db_pool)
        .await;

    assert!(orphan.is_err(), "foreign keys must be enforced");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn creates_missing_database_directory() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("data/skylab.db");

    let _services = start(&config_for(&db_path)).await?;

    assert!(db_path.exists());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn refuses_non_sqlite_urls() {
    let mut config = AppConfig::default();
    config.database.url = "postgres://localhost/skylab".to_string();

    let error = BackendServices::initialise(&config)
        .await
        .err()
        .map(|error| format!("{error:?}"))
        .unwrap_or_default();

    assert!(error.contains("failed to initialise database"), "got {error}");
}
