//! Mentor repository for database operations.

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqliteConnection, SqlitePool};
use tracing::debug;

use super::user_repository::{insert_user, user_columns};
use crate::entities::{CreateUserRequest, Mentor, MentorWithUser, User};
use crate::types::{DatabaseError, DatabaseResult};

fn mentor_from_row(row: &SqliteRow) -> DatabaseResult<MentorWithUser> {
    let user = User::from_row(row)?;
    let mentor = Mentor {
        id: row.try_get("mentor_id")?,
        user_id: user.id,
        cohort_year: row.try_get("cohort_year")?,
    };
    Ok(MentorWithUser::new(mentor, user))
}

async fn insert_mentor(
    conn: &mut SqliteConnection,
    user_id: i64,
    cohort_year: i64,
) -> Result<Mentor, sqlx::Error> {
    sqlx::query_as::<_, Mentor>(
        "INSERT INTO mentors (user_id, cohort_year) VALUES (?, ?) RETURNING id, user_id, cohort_year",
    )
    .bind(user_id)
    .bind(cohort_year)
    .fetch_all(conn)
    .await?
    .into_iter()
    .next()
    .ok_or(sqlx::Error::RowNotFound)
}

#[derive(Clone)]
pub struct MentorRepository {
    pool: SqlitePool,
}

impl MentorRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Mentors of `cohort_year` joined with their users.
    pub async fn list_in_cohort(&self, cohort_year: i64) -> DatabaseResult<Vec<MentorWithUser>> {
        let rows = sqlx::query(&format!(
            "SELECT {}, m.id AS mentor_id, m.cohort_year AS cohort_year \
             FROM mentors m JOIN users u ON u.id = m.user_id \
             WHERE m.cohort_year = ? ORDER BY m.id",
            user_columns("u")
        ))
        .bind(cohort_year)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(mentor_from_row).collect()
    }

    pub async fn find_by_email(
        &self,
        email: &str,
        cohort_year: i64,
    ) -> DatabaseResult<MentorWithUser> {
        let row = sqlx::query(&format!(
            "SELECT {}, m.id AS mentor_id, m.cohort_year AS cohort_year \
             FROM mentors m JOIN users u ON u.id = m.user_id \
             WHERE u.email = ? AND m.cohort_year = ?",
            user_columns("u")
        ))
        .bind(email)
        .bind(cohort_year)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Mentor was not found"))?;

        mentor_from_row(&row)
    }

    /// Create a user and its mentor record for `cohort_year` atomically.
    pub async fn create_mentor_user(
        &self,
        request: &CreateUserRequest,
        cohort_year: i64,
    ) -> DatabaseResult<MentorWithUser> {
        let mut tx = self.pool.begin().await?;

        let user = insert_user(&mut *tx, request)
            .await
            .map_err(|e| DatabaseError::from_sqlx(e, "User is not unique"))?;
        let mentor = insert_mentor(&mut *tx, user.id, cohort_year)
            .await
            .map_err(|e| DatabaseError::from_sqlx(e, "Mentor is not unique"))?;

        tx.commit().await?;
        debug!(user_id = user.id, cohort_year, "mentor created");
        Ok(MentorWithUser::new(mentor, user))
    }

    /// Create a batch of mentor users in one transaction. Any failure rolls
    /// back the whole batch.
    pub async fn create_many_mentor_users(
        &self,
        requests: &[CreateUserRequest],
        cohort_year: i64,
    ) -> DatabaseResult<Vec<MentorWithUser>> {
        let mut tx = self.pool.begin().await?;
        let mut mentors = Vec::with_capacity(requests.len());

        for request in requests {
            let user = insert_user(&mut *tx, request)
                .await
                .map_err(|e| DatabaseError::from_sqlx(e, "Some users are not unique"))?;
            let mentor = insert_mentor(&mut *tx, user.id, cohort_year)
                .await
                .map_err(|e| DatabaseError::from_sqlx(e, "Some mentors are not unique"))?;
            mentors.push(MentorWithUser::new(mentor, user));
        }

        tx.commit().await?;
        debug!(count = mentors.len(), cohort_year, "mentors created");
        Ok(mentors)
    }
}
