//! Skylab Database Crate
//!
//! Connection management, migrations, entities and the repositories that
//! wrap every query issued by the admin backend. Repositories translate
//! driver errors into [`DatabaseError`] so callers never see `sqlx` types.

use skylab_config::DatabaseConfig;
use sqlx::SqlitePool;

pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repos;
pub mod time;
pub mod types;

pub use connection::{ping, prepare_database};
pub use migrations::{run_migrations, MIGRATOR};

pub use repos::{
    AdministratorRepository, CohortRepository, DeadlineRepository, MentorRepository,
    UserRepository,
};

pub use entities::{
    Administrator, Adviser, Cohort, CreateAdministratorRequest, CreateCohortRequest,
    CreateDeadlineRequest, CreateUserRequest, Deadline, DeadlineFilter, DeadlineType,
    DeadlineWithQuestions, Mentor, MentorWithUser, NewQuestion, Question, QuestionType, Student,
    UpdateCohortRequest, UpdateDeadlineRequest, UpdateUserRequest, User, UserProfile,
    UserWithRoles,
};

pub use types::{DatabaseError, DatabaseResult};

/// Connect to the configured database and apply pending migrations.
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| DatabaseError::Connection(format!("{e:#}")))?;

    run_migrations(&pool)
        .await
        .map_err(|e| DatabaseError::Migration(format!("{e:#}")))?;

    Ok(pool)
}
