//! User repository for database operations.

use std::collections::HashMap;

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::entities::{
    Administrator, Adviser, CreateUserRequest, Mentor, Student, UpdateUserRequest, User,
    UserWithRoles,
};
use crate::time;
use crate::types::{DatabaseError, DatabaseResult};

pub(crate) const USER_COLUMNS: &str = "id, email, password_hash, name, profile_pic_url, github_url, linkedin_url, personal_site_url, self_intro, created_at, updated_at";

/// `USER_COLUMNS` qualified with a table alias, for joins.
pub(crate) fn user_columns(alias: &str) -> String {
    USER_COLUMNS
        .split(", ")
        .map(|column| format!("{alias}.{column}"))
        .collect::<Vec<_>>()
        .join(", ")
}

const USER_NOT_FOUND: &str = "User was not found";
const USER_NOT_UNIQUE: &str = "User is not unique";

/// Insert a user on an existing connection so callers can wrap it in a
/// transaction together with role records.
pub(crate) async fn insert_user(
    conn: &mut SqliteConnection,
    request: &CreateUserRequest,
) -> Result<User, sqlx::Error> {
    let now = time::now();
    let profile = &request.profile;

    sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (email, password_hash, name, profile_pic_url, github_url, linkedin_url, personal_site_url, self_intro, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING {USER_COLUMNS}"
    ))
    .bind(&request.email)
    .bind(&request.password_hash)
    .bind(&profile.name)
    .bind(&profile.profile_pic_url)
    .bind(&profile.github_url)
    .bind(&profile.linkedin_url)
    .bind(&profile.personal_site_url)
    .bind(&profile.self_intro)
    .bind(&now)
    .bind(&now)
    // RETURNING writes are drained so SQLite completes the statement.
    .fetch_all(conn)
    .await?
    .into_iter()
    .next()
    .ok_or(sqlx::Error::RowNotFound)
}

/// Repository for user database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> DatabaseResult<User> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found(USER_NOT_FOUND))
    }

    /// Find a user along with the role records that belong to `cohort_year`
    /// and the administrator record that is still active. A `None` year binds
    /// NULL, which matches no role rows.
    pub async fn find_with_role_data(
        &self,
        email: &str,
        cohort_year: Option<i64>,
    ) -> DatabaseResult<UserWithRoles> {
        let user = self.find_by_email(email).await?;

        let student = sqlx::query_as::<_, Student>(
            "SELECT id, user_id, cohort_year, matric_no, nusnet_id FROM students WHERE user_id = ? AND cohort_year = ?",
        )
        .bind(user.id)
        .bind(cohort_year)
        .fetch_optional(&self.pool)
        .await?;

        let mentor = sqlx::query_as::<_, Mentor>(
            "SELECT id, user_id, cohort_year FROM mentors WHERE user_id = ? AND cohort_year = ?",
        )
        .bind(user.id)
        .bind(cohort_year)
        .fetch_optional(&self.pool)
        .await?;

        let adviser = sqlx::query_as::<_, Adviser>(
            "SELECT id, user_id, cohort_year, nusnet_id FROM advisers WHERE user_id = ? AND cohort_year = ?",
        )
        .bind(user.id)
        .bind(cohort_year)
        .fetch_optional(&self.pool)
        .await?;

        let administrator = sqlx::query_as::<_, Administrator>(
            "SELECT id, user_id, start_date, end_date FROM administrators WHERE user_id = ? AND end_date >= ? ORDER BY end_date DESC LIMIT 1",
        )
        .bind(user.id)
        .bind(time::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(UserWithRoles {
            user,
            student,
            mentor,
            adviser,
            administrator,
        })
    }

    pub async fn list(&self) -> DatabaseResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    /// Every user with the role records of `cohort_year` attached.
    pub async fn list_with_roles_in_cohort(
        &self,
        cohort_year: Option<i64>,
    ) -> DatabaseResult<Vec<UserWithRoles>> {
        let users = self.list().await?;

        let mut students: HashMap<i64, Student> = sqlx::query_as::<_, Student>(
            "SELECT id, user_id, cohort_year, matric_no, nusnet_id FROM students WHERE cohort_year = ?",
        )
        .bind(cohort_year)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|student| (student.user_id, student))
        .collect();

        let mut mentors: HashMap<i64, Mentor> = sqlx::query_as::<_, Mentor>(
            "SELECT id, user_id, cohort_year FROM mentors WHERE cohort_year = ?",
        )
        .bind(cohort_year)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|mentor| (mentor.user_id, mentor))
        .collect();

        let mut advisers: HashMap<i64, Adviser> = sqlx::query_as::<_, Adviser>(
            "SELECT id, user_id, cohort_year, nusnet_id FROM advisers WHERE cohort_year = ?",
        )
        .bind(cohort_year)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|adviser| (adviser.user_id, adviser))
        .collect();

        // Ascending order so the furthest end date wins when collected.
        let mut administrators: HashMap<i64, Administrator> = sqlx::query_as::<_, Administrator>(
            "SELECT id, user_id, start_date, end_date FROM administrators WHERE end_date >= ? ORDER BY end_date ASC",
        )
        .bind(time::now())
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|administrator| (administrator.user_id, administrator))
        .collect();

        Ok(users
            .into_iter()
            .map(|user| {
                let id = user.id;
                UserWithRoles {
                    user,
                    student: students.remove(&id),
                    mentor: mentors.remove(&id),
                    adviser: advisers.remove(&id),
                    administrator: administrators.remove(&id),
                }
            })
            .collect())
    }

    pub async fn create(&self, request: &CreateUserRequest) -> DatabaseResult<User> {
        let mut conn = self.pool.acquire().await?;
        let user = insert_user(&mut *conn, request)
            .await
            .map_err(|e| DatabaseError::from_sqlx(e, USER_NOT_UNIQUE))?;

        debug!(user_id = user.id, email = %user.email, "user created");
        Ok(user)
    }

    /// Create every user or none of them.
    pub async fn create_many(&self, requests: &[CreateUserRequest]) -> DatabaseResult<Vec<User>> {
        let mut tx = self.pool.begin().await?;
        let mut users = Vec::with_capacity(requests.len());

        for request in requests {
            let user = insert_user(&mut *tx, request)
                .await
                .map_err(|e| DatabaseError::from_sqlx(e, "Some users are not unique"))?;
            users.push(user);
        }

        tx.commit().await?;
        debug!(count = users.len(), "users created");
        Ok(users)
    }

    /// Apply the non-empty fields of `request` to the user with `email`.
    pub async fn update_by_email(
        &self,
        email: &str,
        request: &UpdateUserRequest,
    ) -> DatabaseResult<User> {
        let profile = &request.profile;

        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET \
                email = COALESCE(?, email), \
                password_hash = COALESCE(?, password_hash), \
                name = COALESCE(?, name), \
                profile_pic_url = COALESCE(?, profile_pic_url), \
                github_url = COALESCE(?, github_url), \
                linkedin_url = COALESCE(?, linkedin_url), \
                personal_site_url = COALESCE(?, personal_site_url), \
                self_intro = COALESCE(?, self_intro), \
                updated_at = ? \
             WHERE email = ? RETURNING {USER_COLUMNS}"
        ))
        .bind(&request.email)
        .bind(&request.password_hash)
        .bind(&profile.name)
        .bind(&profile.profile_pic_url)
        .bind(&profile.github_url)
        .bind(&profile.linkedin_url)
        .bind(&profile.personal_site_url)
        .bind(&profile.self_intro)
        .bind(time::now())
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_sqlx(e, USER_NOT_UNIQUE))?
        .into_iter()
        .next()
        .ok_or_else(|| DatabaseError::not_found(USER_NOT_FOUND))?;

        debug!(user_id = user.id, "user updated");
        Ok(user)
    }

    /// Delete the user with `email`, returning the removed row.
    pub async fn delete_by_email(&self, email: &str) -> DatabaseResult<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            "DELETE FROM users WHERE email = ? RETURNING {USER_COLUMNS}"
        ))
        .bind(email)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| DatabaseError::not_found(USER_NOT_FOUND))?;

        debug!(user_id = user.id, "user deleted");
        Ok(user)
    }
}
