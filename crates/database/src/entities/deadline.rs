//! Deadline and question entity definitions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, Row};
use utoipa::ToSchema;

use crate::types::{DatabaseError, DatabaseResult};

/// Kind of submission a deadline collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum DeadlineType {
    Milestone,
    Evaluation,
    Feedback,
    Application,
    Other,
}

impl DeadlineType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeadlineType::Milestone => "Milestone",
            DeadlineType::Evaluation => "Evaluation",
            DeadlineType::Feedback => "Feedback",
            DeadlineType::Application => "Application",
            DeadlineType::Other => "Other",
        }
    }
}

impl FromStr for DeadlineType {
    type Err = DatabaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Milestone" => Ok(DeadlineType::Milestone),
            "Evaluation" => Ok(DeadlineType::Evaluation),
            "Feedback" => Ok(DeadlineType::Feedback),
            "Application" => Ok(DeadlineType::Application),
            "Other" => Ok(DeadlineType::Other),
            other => Err(DatabaseError::validation(format!("unknown deadline type '{other}'"))),
        }
    }
}

impl fmt::Display for DeadlineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input widget used to answer a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum QuestionType {
    ShortAnswer,
    Paragraph,
    MultipleChoice,
    Checkboxes,
    Dropdown,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::ShortAnswer => "ShortAnswer",
            QuestionType::Paragraph => "Paragraph",
            QuestionType::MultipleChoice => "MultipleChoice",
            QuestionType::Checkboxes => "Checkboxes",
            QuestionType::Dropdown => "Dropdown",
        }
    }

    /// Choice-based questions must list at least one option.
    pub fn requires_options(&self) -> bool {
        matches!(
            self,
            QuestionType::MultipleChoice | QuestionType::Checkboxes | QuestionType::Dropdown
        )
    }
}

impl FromStr for QuestionType {
    type Err = DatabaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ShortAnswer" => Ok(QuestionType::ShortAnswer),
            "Paragraph" => Ok(QuestionType::Paragraph),
            "MultipleChoice" => Ok(QuestionType::MultipleChoice),
            "Checkboxes" => Ok(QuestionType::Checkboxes),
            "Dropdown" => Ok(QuestionType::Dropdown),
            other => Err(DatabaseError::validation(format!("unknown question type '{other}'"))),
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Deadline {
    pub id: i64,
    pub cohort_year: i64,
    pub name: String,
    pub desc: Option<String>,
    pub due_by: String,
    #[serde(rename = "type")]
    pub deadline_type: DeadlineType,
}

impl Deadline {
    pub(crate) fn from_row(row: &SqliteRow) -> DatabaseResult<Self> {
        let deadline_type: String = row.try_get("deadline_type")?;
        Ok(Self {
            id: row.try_get("id")?,
            cohort_year: row.try_get("cohort_year")?,
            name: row.try_get("name")?,
            desc: row.try_get("description")?,
            due_by: row.try_get("due_by")?,
            deadline_type: deadline_type.parse()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,
    pub deadline_id: i64,
    pub question_number: i64,
    pub question: String,
    pub desc: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub options: Vec<String>,
    pub is_anonymous: bool,
}

impl Question {
    pub(crate) fn from_row(row: &SqliteRow) -> DatabaseResult<Self> {
        let question_type: String = row.try_get("question_type")?;
        let options: String = row.try_get("options")?;
        Ok(Self {
            id: row.try_get("id")?,
            deadline_id: row.try_get("deadline_id")?,
            question_number: row.try_get("question_number")?,
            question: row.try_get("question")?,
            desc: row.try_get("description")?,
            question_type: question_type.parse()?,
            options: serde_json::from_str(&options)?,
            is_anonymous: row.try_get("is_anonymous")?,
        })
    }
}

/// Deadline fields plus its questions ordered by `question_number`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeadlineWithQuestions {
    #[serde(flatten)]
    pub deadline: Deadline,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone)]
pub struct CreateDeadlineRequest {
    pub cohort_year: i64,
    pub name: String,
    pub desc: Option<String>,
    pub due_by: String,
    pub deadline_type: DeadlineType,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateDeadlineRequest {
    pub cohort_year: Option<i64>,
    pub name: Option<String>,
    pub desc: Option<String>,
    pub due_by: Option<String>,
    pub deadline_type: Option<DeadlineType>,
}

#[derive(Debug, Clone, Default)]
pub struct DeadlineFilter {
    pub cohort_year: Option<i64>,
    pub name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub question_number: i64,
    pub question: String,
    pub desc: String,
    pub question_type: QuestionType,
    pub options: Vec<String>,
    pub is_anonymous: bool,
}
