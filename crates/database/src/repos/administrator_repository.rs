use sqlx::SqlitePool;
use tracing::debug;

use crate::entities::{Administrator, CreateAdministratorRequest};
use crate::types::{DatabaseError, DatabaseResult};

#[derive(Clone)]
pub struct AdministratorRepository {
    pool: SqlitePool,
}

impl AdministratorRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: &CreateAdministratorRequest) -> DatabaseResult<Administrator> {
        let administrator = sqlx::query_as::<_, Administrator>(
            "INSERT INTO administrators (user_id, start_date, end_date) VALUES (?, ?, ?) \
             RETURNING id, user_id, start_date, end_date",
        )
        .bind(request.user_id)
        .bind(&request.start_date)
        .bind(&request.end_date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_sqlx(e, "Administrator is not unique"))?
        .into_iter()
        .next()
        .ok_or(sqlx::Error::RowNotFound)?;

        debug!(user_id = administrator.user_id, "administrator created");
        Ok(administrator)
    }
}
