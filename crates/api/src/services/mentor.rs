use skylab_database::{MentorRepository, MentorWithUser};
use sqlx::SqlitePool;

use super::cohort::get_current_cohort;
use super::error::ServiceError;
use super::user::to_create_request;
use crate::routes::models::NewUser;

pub async fn get_all_mentors(pool: &SqlitePool) -> Result<Vec<MentorWithUser>, ServiceError> {
    let cohort = get_current_cohort(pool).await?;
    Ok(MentorRepository::new(pool.clone())
        .list_in_cohort(cohort.academic_year)
        .await?)
}

pub async fn get_mentor_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<MentorWithUser, ServiceError> {
    let cohort = get_current_cohort(pool).await?;
    Ok(MentorRepository::new(pool.clone())
        .find_by_email(email, cohort.academic_year)
        .await?)
}

/// Create a user and make it a mentor of the current cohort.
pub async fn create_mentor_user(
    pool: &SqlitePool,
    new_user: NewUser,
) -> Result<MentorWithUser, ServiceError> {
    let request = to_create_request(new_user)?;
    let cohort = get_current_cohort(pool).await?;
    Ok(MentorRepository::new(pool.clone())
        .create_mentor_user(&request, cohort.academic_year)
        .await?)
}

/// Create a batch of mentors for the current cohort. Nothing is written
/// unless every entry succeeds.
pub async fn create_many_mentor_users(
    pool: &SqlitePool,
    new_users: Vec<NewUser>,
) -> Result<Vec<MentorWithUser>, ServiceError> {
    let requests = new_users
        .into_iter()
        .map(to_create_request)
        .collect::<Result<Vec<_>, _>>()?;
    let cohort = get_current_cohort(pool).await?;
    Ok(MentorRepository::new(pool.clone())
        .create_many_mentor_users(&requests, cohort.academic_year)
        .await?)
}
