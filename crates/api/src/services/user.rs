use chrono::{Duration, Utc};
use skylab_auth::{hash_password, verify_password, TokenManager};
use skylab_database::{
    time, Administrator, AdministratorRepository, CreateAdministratorRequest, CreateUserRequest,
    DatabaseError, UpdateUserRequest, User, UserProfile, UserRepository, UserWithRoles,
};
use sqlx::SqlitePool;
use tracing::info;

use super::cohort::current_cohort_year;
use super::error::ServiceError;
use crate::routes::models::{NewUser, UserChanges};

/// Validate a new user payload and hash its password.
pub(crate) fn to_create_request(new_user: NewUser) -> Result<CreateUserRequest, ServiceError> {
    let email = new_user
        .email
        .map(|email| email.trim().to_string())
        .filter(|email| !email.is_empty())
        .ok_or_else(|| ServiceError::bad_request("Arguments missing from request"))?;

    let password_hash = new_user
        .password
        .as_deref()
        .map(hash_password)
        .transpose()?;

    Ok(CreateUserRequest {
        email,
        password_hash,
        profile: new_user.profile,
    })
}

/// Every user with role data for the current cohort year.
pub async fn get_all_users(pool: &SqlitePool) -> Result<Vec<UserWithRoles>, ServiceError> {
    let cohort_year = current_cohort_year(pool).await?;
    Ok(UserRepository::new(pool.clone())
        .list_with_roles_in_cohort(cohort_year)
        .await?)
}

pub async fn get_user_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<UserWithRoles, ServiceError> {
    let cohort_year = current_cohort_year(pool).await?;
    Ok(UserRepository::new(pool.clone())
        .find_with_role_data(email, cohort_year)
        .await?)
}

/// Apply a partial update; a new password is hashed before it is stored.
pub async fn update_user_by_email(
    pool: &SqlitePool,
    email: &str,
    changes: UserChanges,
) -> Result<User, ServiceError> {
    let new_email = match changes.email {
        Some(value) if value.trim().is_empty() => {
            return Err(ServiceError::bad_request("Email cannot be empty"));
        }
        other => other.map(|value| value.trim().to_string()),
    };

    let request = UpdateUserRequest {
        email: new_email,
        password_hash: changes.password.as_deref().map(hash_password).transpose()?,
        profile: changes.profile,
    };
    if request.is_empty() {
        return Err(ServiceError::bad_request("Parameters missing from request body"));
    }

    Ok(UserRepository::new(pool.clone())
        .update_by_email(email, &request)
        .await?)
}

pub async fn delete_user_by_email(pool: &SqlitePool, email: &str) -> Result<User, ServiceError> {
    Ok(UserRepository::new(pool.clone()).delete_by_email(email).await?)
}

/// Check a password and issue a token. `Ok(None)` means the password is
/// wrong or the account has no password set.
pub async fn user_login(
    pool: &SqlitePool,
    tokens: &TokenManager,
    email: &str,
    password: &str,
) -> Result<Option<(User, String)>, ServiceError> {
    let user = UserRepository::new(pool.clone()).find_by_email(email).await?;

    let Some(stored_hash) = user.password_hash.as_deref() else {
        return Ok(None);
    };
    if !verify_password(password, stored_hash)? {
        return Ok(None);
    }

    let token = tokens.issue(user.id, &user.email)?;
    info!(user_id = user.id, "user logged in");
    Ok(Some((user, token)))
}

/// Create (or reuse) a user with `email`, set its password and grant it an
/// administrator record valid for `days` days from now.
pub async fn create_admin_user(
    pool: &SqlitePool,
    email: &str,
    password: &str,
    days: i64,
) -> Result<(User, Administrator), ServiceError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ServiceError::bad_request("Email cannot be empty"));
    }
    if days <= 0 {
        return Err(ServiceError::bad_request("Administrator term must be at least one day"));
    }

    let users = UserRepository::new(pool.clone());
    let password_hash = hash_password(password)?;

    let user = match users.find_by_email(email).await {
        Ok(_) => {
            users
                .update_by_email(
                    email,
                    &UpdateUserRequest {
                        password_hash: Some(password_hash),
                        ..UpdateUserRequest::default()
                    },
                )
                .await?
        }
        Err(DatabaseError::NotFound(_)) => {
            users
                .create(&CreateUserRequest {
                    email: email.to_string(),
                    password_hash: Some(password_hash),
                    profile: UserProfile::default(),
                })
                .await?
        }
        Err(other) => return Err(other.into()),
    };

    let now = Utc::now();
    let administrator = AdministratorRepository::new(pool.clone())
        .create(&CreateAdministratorRequest {
            user_id: user.id,
            start_date: time::format(now),
            end_date: time::format(now + Duration::days(days)),
        })
        .await?;

    info!(user_id = user.id, days, "administrator granted");
    Ok((user, administrator))
}
