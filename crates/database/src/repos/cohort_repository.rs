//! Cohort repository for database operations.

use sqlx::SqlitePool;
use tracing::debug;

use crate::entities::{Cohort, CreateCohortRequest, UpdateCohortRequest};
use crate::types::{DatabaseError, DatabaseResult};

const COHORT_NOT_FOUND: &str = "Cohort was not found";

#[derive(Clone)]
pub struct CohortRepository {
    pool: SqlitePool,
}

impl CohortRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All cohorts, newest academic year first.
    pub async fn list(&self) -> DatabaseResult<Vec<Cohort>> {
        let cohorts = sqlx::query_as::<_, Cohort>(
            "SELECT academic_year, start_date, end_date FROM cohorts ORDER BY academic_year DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(cohorts)
    }

    pub async fn find_by_year(&self, academic_year: i64) -> DatabaseResult<Cohort> {
        sqlx::query_as::<_, Cohort>(
            "SELECT academic_year, start_date, end_date FROM cohorts WHERE academic_year = ?",
        )
        .bind(academic_year)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found(COHORT_NOT_FOUND))
    }

    /// The cohort whose date range contains `now`. Overlapping ranges resolve
    /// to the greatest academic year.
    pub async fn find_current(&self, now: &str) -> DatabaseResult<Option<Cohort>> {
        let cohort = sqlx::query_as::<_, Cohort>(
            "SELECT academic_year, start_date, end_date FROM cohorts \
             WHERE start_date <= ? AND end_date >= ? ORDER BY academic_year DESC LIMIT 1",
        )
        .bind(now)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;
        Ok(cohort)
    }

    pub async fn find_latest(&self) -> DatabaseResult<Option<Cohort>> {
        let cohort = sqlx::query_as::<_, Cohort>(
            "SELECT academic_year, start_date, end_date FROM cohorts ORDER BY academic_year DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(cohort)
    }

    pub async fn create(&self, request: &CreateCohortRequest) -> DatabaseResult<Cohort> {
        let cohort = sqlx::query_as::<_, Cohort>(
            "INSERT INTO cohorts (academic_year, start_date, end_date) VALUES (?, ?, ?) \
             RETURNING academic_year, start_date, end_date",
        )
        .bind(request.academic_year)
        .bind(&request.start_date)
        .bind(&request.end_date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_sqlx(e, "Cohort is not unique"))?
        .into_iter()
        .next()
        .ok_or(sqlx::Error::RowNotFound)?;

        debug!(academic_year = cohort.academic_year, "cohort created");
        Ok(cohort)
    }

    pub async fn update_by_year(
        &self,
        academic_year: i64,
        request: &UpdateCohortRequest,
    ) -> DatabaseResult<Cohort> {
        let cohort = sqlx::query_as::<_, Cohort>(
            "UPDATE cohorts SET start_date = COALESCE(?, start_date), end_date = COALESCE(?, end_date) \
             WHERE academic_year = ? RETURNING academic_year, start_date, end_date",
        )
        .bind(&request.start_date)
        .bind(&request.end_date)
        .bind(academic_year)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| DatabaseError::not_found(COHORT_NOT_FOUND))?;

        debug!(academic_year, "cohort updated");
        Ok(cohort)
    }

    /// Delete a cohort; role records and deadlines cascade with it.
    pub async fn delete_by_year(&self, academic_year: i64) -> DatabaseResult<Cohort> {
        let cohort = sqlx::query_as::<_, Cohort>(
            "DELETE FROM cohorts WHERE academic_year = ? RETURNING academic_year, start_date, end_date",
        )
        .bind(academic_year)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| DatabaseError::not_found(COHORT_NOT_FOUND))?;

        debug!(academic_year, "cohort deleted");
        Ok(cohort)
    }
}
