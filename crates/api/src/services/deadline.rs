use std::collections::HashSet;

use skylab_database::{
    time, CreateDeadlineRequest, Deadline, DeadlineFilter, DeadlineRepository, DeadlineType,
    DeadlineWithQuestions, NewQuestion, QuestionType, UpdateDeadlineRequest,
};
use sqlx::SqlitePool;

use super::error::ServiceError;
use crate::routes::models::{DeadlineInput, QuestionInput};

const MISSING_PARAMETERS: &str = "Parameters missing from request";

fn non_empty(field: &str, value: String) -> Result<String, ServiceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ServiceError::bad_request(format!("{field} cannot be empty")))
    } else {
        Ok(trimmed.to_string())
    }
}

fn validate_question(input: QuestionInput) -> Result<NewQuestion, ServiceError> {
    let question_number = input
        .question_number
        .ok_or_else(|| ServiceError::bad_request("Every question needs a questionNumber"))?;
    if question_number < 1 {
        return Err(ServiceError::bad_request(
            "Question numbers must be positive",
        ));
    }

    let question = non_empty(
        "question",
        input
            .question
            .ok_or_else(|| ServiceError::bad_request("Every question needs question text"))?,
    )?;

    let question_type: QuestionType = input
        .question_type
        .ok_or_else(|| ServiceError::bad_request("Every question needs a type"))?
        .parse()?;

    let options = if question_type.requires_options() {
        let options: Vec<String> = input
            .options
            .unwrap_or_default()
            .into_iter()
            .map(|option| option.trim().to_string())
            .filter(|option| !option.is_empty())
            .collect();
        if options.is_empty() {
            return Err(ServiceError::bad_request(format!(
                "{question_type} questions need at least one option"
            )));
        }
        options
    } else {
        Vec::new()
    };

    Ok(NewQuestion {
        question_number,
        question,
        desc: input.desc.unwrap_or_default(),
        question_type,
        options,
        is_anonymous: input.is_anonymous.unwrap_or(false),
    })
}

pub async fn list_deadlines(
    pool: &SqlitePool,
    filter: DeadlineFilter,
) -> Result<Vec<Deadline>, ServiceError> {
    Ok(DeadlineRepository::new(pool.clone()).list(&filter).await?)
}

/// `type` defaults to `Other` when omitted.
pub async fn create_deadline(
    pool: &SqlitePool,
    input: DeadlineInput,
) -> Result<Deadline, ServiceError> {
    let (Some(cohort_year), Some(name), Some(due_by)) = (input.cohort_year, input.name, input.due_by)
    else {
        return Err(ServiceError::bad_request(MISSING_PARAMETERS));
    };

    let deadline_type = match input.deadline_type {
        Some(value) => value.parse::<DeadlineType>()?,
        None => DeadlineType::Other,
    };

    let request = CreateDeadlineRequest {
        cohort_year,
        name: non_empty("name", name)?,
        desc: input.desc,
        due_by: time::normalize("dueBy", &due_by)?,
        deadline_type,
    };

    Ok(DeadlineRepository::new(pool.clone()).create(&request).await?)
}

pub async fn get_deadline(pool: &SqlitePool, deadline_id: i64) -> Result<Deadline, ServiceError> {
    Ok(DeadlineRepository::new(pool.clone())
        .find_by_id(deadline_id)
        .await?)
}

pub async fn get_deadline_with_questions(
    pool: &SqlitePool,
    deadline_id: i64,
) -> Result<DeadlineWithQuestions, ServiceError> {
    Ok(DeadlineRepository::new(pool.clone())
        .find_with_questions(deadline_id)
        .await?)
}

pub async fn update_deadline(
    pool: &SqlitePool,
    deadline_id: i64,
    input: DeadlineInput,
) -> Result<Deadline, ServiceError> {
    let request = UpdateDeadlineRequest {
        cohort_year: input.cohort_year,
        name: input.name.map(|name| non_empty("name", name)).transpose()?,
        desc: input.desc,
        due_by: input
            .due_by
            .map(|due_by| time::normalize("dueBy", &due_by))
            .transpose()?,
        deadline_type: input
            .deadline_type
            .map(|value| value.parse::<DeadlineType>())
            .transpose()?,
    };

    let repo = DeadlineRepository::new(pool.clone());
    let unchanged = request.cohort_year.is_none()
        && request.name.is_none()
        && request.desc.is_none()
        && request.due_by.is_none()
        && request.deadline_type.is_none();
    if unchanged {
        return Ok(repo.find_by_id(deadline_id).await?);
    }

    Ok(repo.update_by_id(deadline_id, &request).await?)
}

pub async fn delete_deadline(pool: &SqlitePool, deadline_id: i64) -> Result<Deadline, ServiceError> {
    Ok(DeadlineRepository::new(pool.clone())
        .delete_by_id(deadline_id)
        .await?)
}

/// Validate a question set and make it the deadline's only questions.
pub async fn replace_questions(
    pool: &SqlitePool,
    deadline_id: i64,
    inputs: Vec<QuestionInput>,
) -> Result<DeadlineWithQuestions, ServiceError> {
    let questions = inputs
        .into_iter()
        .map(validate_question)
        .collect::<Result<Vec<_>, _>>()?;

    let mut seen = HashSet::new();
    if !questions.iter().all(|q| seen.insert(q.question_number)) {
        return Err(ServiceError::bad_request("Question numbers must be unique"));
    }

    Ok(DeadlineRepository::new(pool.clone())
        .replace_questions(deadline_id, &questions)
        .await?)
}
