use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::error::AppError;

const DEADLINE_FORMAT: &str = "%Y-%m-%d";

/// Store-assigned identifier of a todo. Never reused once a record is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(Uuid);

impl TodoId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for TodoId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl FromStr for TodoId {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(raw.trim())
            .map(Self)
            .map_err(|_| AppError::validation(format!("Invalid todo id: {raw}")))
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(format!(
                "priority must be one of high, medium, low (got '{other}')"
            )),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calendar day a todo is due, `YYYY-MM-DD` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Deadline(NaiveDate);

impl FromStr for Deadline {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(raw.trim(), DEADLINE_FORMAT)
            .map(Self)
            .map_err(|_| format!("deadline must be a date formatted as YYYY-MM-DD (got '{raw}')"))
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DEADLINE_FORMAT))
    }
}

impl Serialize for Deadline {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Deadline {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    #[serde(rename = "_id")]
    pub id: TodoId,
    pub text: String,
    pub priority: Priority,
    pub deadline: Deadline,
    pub complete: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTodoRequest {
    pub text: Option<String>,
    pub priority: Option<String>,
    pub deadline: Option<String>,
    /// Accepted for compatibility; new todos always start incomplete.
    pub complete: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodoRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complete: Option<bool>,
}

/// A validated create request, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub text: String,
    pub priority: Priority,
    pub deadline: Deadline,
}

impl NewTodo {
    pub fn from_request(request: CreateTodoRequest) -> Result<Self, AppError> {
        let text = required("text", request.text)?;
        let priority = required("priority", request.priority)?;
        let deadline = required("deadline", request.deadline)?;

        Ok(Self {
            text: parse_text(text)?,
            priority: parse_priority(&priority)?,
            deadline: parse_deadline(&deadline)?,
        })
    }
}

/// A validated partial update. `None` leaves the stored field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub text: Option<String>,
    pub priority: Option<Priority>,
    pub deadline: Option<Deadline>,
    pub complete: Option<bool>,
}

impl TodoPatch {
    pub fn from_request(request: UpdateTodoRequest) -> Result<Self, AppError> {
        Ok(Self {
            text: request.text.map(parse_text).transpose()?,
            priority: request.priority.as_deref().map(parse_priority).transpose()?,
            deadline: request.deadline.as_deref().map(parse_deadline).transpose()?,
            complete: request.complete,
        })
    }

    pub fn apply(self, todo: &mut Todo) {
        if let Some(text) = self.text {
            todo.text = text;
        }
        if let Some(priority) = self.priority {
            todo.priority = priority;
        }
        if let Some(deadline) = self.deadline {
            todo.deadline = deadline;
        }
        if let Some(complete) = self.complete {
            todo.complete = complete;
        }
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, AppError> {
    value.ok_or_else(|| AppError::validation(format!("{field} is required")))
}

fn parse_text(text: String) -> Result<String, AppError> {
    if text.trim().is_empty() {
        return Err(AppError::validation("text must not be empty"));
    }
    Ok(text)
}

fn parse_priority(raw: &str) -> Result<Priority, AppError> {
    raw.parse().map_err(AppError::validation)
}

fn parse_deadline(raw: &str) -> Result<Deadline, AppError> {
    raw.parse().map_err(AppError::validation)
}
