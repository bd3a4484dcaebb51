//! Deadline and question repository for database operations.

use sqlx::SqlitePool;
use tracing::debug;

use crate::entities::{
    CreateDeadlineRequest, Deadline, DeadlineFilter, DeadlineWithQuestions, NewQuestion, Question,
    UpdateDeadlineRequest,
};
use crate::types::{DatabaseError, DatabaseResult};

const DEADLINE_COLUMNS: &str = "id, cohort_year, name, description, due_by, deadline_type";
const QUESTION_COLUMNS: &str =
    "id, deadline_id, question_number, question, description, question_type, options, is_anonymous";

const DEADLINE_NOT_FOUND: &str = "Deadline was not found";
const DEADLINE_NOT_UNIQUE: &str = "Deadline is not unique";

/// Foreign key failures on deadlines can only come from the cohort year.
fn deadline_write_error(error: sqlx::Error) -> DatabaseError {
    match DatabaseError::from_sqlx(error, DEADLINE_NOT_UNIQUE) {
        DatabaseError::Constraint(_) => {
            DatabaseError::Constraint("Cohort year does not exist".to_string())
        }
        other => other,
    }
}

#[derive(Clone)]
pub struct DeadlineRepository {
    pool: SqlitePool,
}

impl DeadlineRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Deadlines matching `filter`, earliest due date first.
    pub async fn list(&self, filter: &DeadlineFilter) -> DatabaseResult<Vec<Deadline>> {
        let mut conditions = Vec::new();
        if filter.cohort_year.is_some() {
            conditions.push("cohort_year = ?");
        }
        if filter.name.is_some() {
            conditions.push("name = ?");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };
        let query_str =
            format!("SELECT {DEADLINE_COLUMNS} FROM deadlines{where_clause} ORDER BY due_by, id");

        let mut query = sqlx::query(&query_str);
        if let Some(cohort_year) = filter.cohort_year {
            query = query.bind(cohort_year);
        }
        if let Some(name) = &filter.name {
            query = query.bind(name);
        }

        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(Deadline::from_row).collect()
    }

    pub async fn create(&self, request: &CreateDeadlineRequest) -> DatabaseResult<Deadline> {
        let row = sqlx::query(&format!(
            "INSERT INTO deadlines (cohort_year, name, description, due_by, deadline_type) \
             VALUES (?, ?, ?, ?, ?) RETURNING {DEADLINE_COLUMNS}"
        ))
        .bind(request.cohort_year)
        .bind(&request.name)
        .bind(&request.desc)
        .bind(&request.due_by)
        .bind(request.deadline_type.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(deadline_write_error)?
        .into_iter()
        .next()
        .ok_or(sqlx::Error::RowNotFound)?;

        let deadline = Deadline::from_row(&row)?;
        debug!(deadline_id = deadline.id, cohort_year = deadline.cohort_year, "deadline created");
        Ok(deadline)
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Deadline> {
        let row = sqlx::query(&format!("SELECT {DEADLINE_COLUMNS} FROM deadlines WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found(DEADLINE_NOT_FOUND))?;

        Deadline::from_row(&row)
    }

    pub async fn find_questions(&self, deadline_id: i64) -> DatabaseResult<Vec<Question>> {
        let rows = sqlx::query(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE deadline_id = ? ORDER BY question_number"
        ))
        .bind(deadline_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Question::from_row).collect()
    }

    pub async fn find_with_questions(&self, id: i64) -> DatabaseResult<DeadlineWithQuestions> {
        let deadline = self.find_by_id(id).await?;
        let questions = self.find_questions(id).await?;
        Ok(DeadlineWithQuestions {
            deadline,
            questions,
        })
    }

    pub async fn update_by_id(
        &self,
        id: i64,
        request: &UpdateDeadlineRequest,
    ) -> DatabaseResult<Deadline> {
        let row = sqlx::query(&format!(
            "UPDATE deadlines SET \
                cohort_year = COALESCE(?, cohort_year), \
                name = COALESCE(?, name), \
                description = COALESCE(?, description), \
                due_by = COALESCE(?, due_by), \
                deadline_type = COALESCE(?, deadline_type) \
             WHERE id = ? RETURNING {DEADLINE_COLUMNS}"
        ))
        .bind(request.cohort_year)
        .bind(&request.name)
        .bind(&request.desc)
        .bind(&request.due_by)
        .bind(request.deadline_type.map(|t| t.as_str()))
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(deadline_write_error)?
        .into_iter()
        .next()
        .ok_or_else(|| DatabaseError::not_found(DEADLINE_NOT_FOUND))?;

        debug!(deadline_id = id, "deadline updated");
        Deadline::from_row(&row)
    }

    /// Delete a deadline and its questions, returning the removed deadline.
    pub async fn delete_by_id(&self, id: i64) -> DatabaseResult<Deadline> {
        let row = sqlx::query(&format!(
            "DELETE FROM deadlines WHERE id = ? RETURNING {DEADLINE_COLUMNS}"
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| DatabaseError::not_found(DEADLINE_NOT_FOUND))?;

        debug!(deadline_id = id, "deadline deleted");
        Deadline::from_row(&row)
    }

    /// Swap the full question set of a deadline inside one transaction.
    pub async fn replace_questions(
        &self,
        deadline_id: i64,
        questions: &[NewQuestion],
    ) -> DatabaseResult<DeadlineWithQuestions> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(&format!("SELECT {DEADLINE_COLUMNS} FROM deadlines WHERE id = ?"))
            .bind(deadline_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DatabaseError::not_found(DEADLINE_NOT_FOUND))?;
        let deadline = Deadline::from_row(&row)?;

        sqlx::query("DELETE FROM questions WHERE deadline_id = ?")
            .bind(deadline_id)
            .execute(&mut *tx)
            .await?;

        let mut inserted = Vec::with_capacity(questions.len());
        for question in questions {
            let options = serde_json::to_string(&question.options)?;
            let row = sqlx::query(&format!(
                "INSERT INTO questions (deadline_id, question_number, question, description, question_type, options, is_anonymous) \
                 VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING {QUESTION_COLUMNS}"
            ))
            .bind(deadline_id)
            .bind(question.question_number)
            .bind(&question.question)
            .bind(&question.desc)
            .bind(question.question_type.as_str())
            .bind(options)
            .bind(question.is_anonymous)
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| DatabaseError::from_sqlx(e, "Question numbers must be unique"))?
            .into_iter()
            .next()
            .ok_or(sqlx::Error::RowNotFound)?;
            inserted.push(Question::from_row(&row)?);
        }

        tx.commit().await?;
        debug!(deadline_id, count = inserted.len(), "questions replaced");

        inserted.sort_by_key(|q| q.question_number);
        Ok(DeadlineWithQuestions {
            deadline,
            questions: inserted,
        })
    }
}
