use skylab_database::{time, Cohort, CohortRepository, CreateCohortRequest, UpdateCohortRequest};
use sqlx::SqlitePool;

use super::error::ServiceError;
use crate::routes::models::CohortInput;

fn ensure_ordered(start_date: &str, end_date: &str) -> Result<(), ServiceError> {
    if start_date < end_date {
        Ok(())
    } else {
        Err(ServiceError::bad_request(
            "Cohort start date must be before its end date",
        ))
    }
}

/// Academic year of the cohort running right now, if any.
pub async fn current_cohort_year(pool: &SqlitePool) -> Result<Option<i64>, ServiceError> {
    let cohort = CohortRepository::new(pool.clone())
        .find_current(&time::now())
        .await?;
    Ok(cohort.map(|c| c.academic_year))
}

pub async fn get_current_cohort(pool: &SqlitePool) -> Result<Cohort, ServiceError> {
    CohortRepository::new(pool.clone())
        .find_current(&time::now())
        .await?
        .ok_or_else(|| ServiceError::not_found("No current cohort"))
}

pub async fn list_cohorts(pool: &SqlitePool) -> Result<Vec<Cohort>, ServiceError> {
    Ok(CohortRepository::new(pool.clone()).list().await?)
}

pub async fn create_cohort(pool: &SqlitePool, input: CohortInput) -> Result<Cohort, ServiceError> {
    let (Some(academic_year), Some(start_date), Some(end_date)) =
        (input.academic_year, input.start_date, input.end_date)
    else {
        return Err(ServiceError::bad_request("Parameters missing from request"));
    };

    let start_date = time::normalize("startDate", &start_date)?;
    let end_date = time::normalize("endDate", &end_date)?;
    ensure_ordered(&start_date, &end_date)?;

    let cohort = CohortRepository::new(pool.clone())
        .create(&CreateCohortRequest {
            academic_year,
            start_date,
            end_date,
        })
        .await?;
    Ok(cohort)
}

pub async fn get_latest_cohort(pool: &SqlitePool) -> Result<Cohort, ServiceError> {
    CohortRepository::new(pool.clone())
        .find_latest()
        .await?
        .ok_or_else(|| ServiceError::not_found("No cohort found"))
}

/// Change the dates of a cohort. The academic year itself is immutable.
pub async fn edit_cohort_by_year(
    pool: &SqlitePool,
    academic_year: i64,
    input: CohortInput,
) -> Result<Cohort, ServiceError> {
    let repo = CohortRepository::new(pool.clone());
    let existing = repo.find_by_year(academic_year).await?;

    let changes = UpdateCohortRequest {
        start_date: input
            .start_date
            .map(|value| time::normalize("startDate", &value))
            .transpose()?,
        end_date: input
            .end_date
            .map(|value| time::normalize("endDate", &value))
            .transpose()?,
    };

    ensure_ordered(
        changes.start_date.as_deref().unwrap_or(&existing.start_date),
        changes.end_date.as_deref().unwrap_or(&existing.end_date),
    )?;

    Ok(repo.update_by_year(academic_year, &changes).await?)
}

pub async fn delete_cohort_by_year(
    pool: &SqlitePool,
    academic_year: i64,
) -> Result<Cohort, ServiceError> {
    Ok(CohortRepository::new(pool.clone())
        .delete_by_year(academic_year)
        .await?)
}
