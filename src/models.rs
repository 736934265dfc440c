//! Frontend Models
//!
//! Data structures matching backend entities.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::dates;

pub type TaskId = i64;

/// Task data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    /// Server timestamp, ISO 8601
    pub created_at: String,
}

/// Body of a create request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskDraft {
    pub title: String,
}

impl TaskDraft {
    /// Trimmed draft, or `None` when nothing but whitespace was typed
    pub fn new(raw: &str) -> Option<Self> {
        let title = raw.trim();
        if title.is_empty() {
            None
        } else {
            Some(Self { title: title.to_string() })
        }
    }
}

/// Partial update; unset fields are left untouched by the server
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub completed: Option<bool>,
    pub title: Option<String>,
}

impl TaskPatch {
    pub fn completed(completed: bool) -> Self {
        Self { completed: Some(completed), title: None }
    }

    pub fn title(title: impl Into<String>) -> Self {
        Self { completed: None, title: Some(title.into()) }
    }

    /// Query-string pairs for the supplied fields only
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(completed) = self.completed {
            pairs.push(("completed", completed.to_string()));
        }
        if let Some(title) = &self.title {
            pairs.push(("title", title.clone()));
        }
        pairs
    }
}

/// A task prepared for display, timestamp resolved to local time
#[derive(Debug, Clone, PartialEq)]
pub struct TaskView {
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
    /// `None` when the server timestamp could not be parsed
    pub created_at: Option<DateTime<Local>>,
    pub created_at_raw: String,
}

impl From<&Task> for TaskView {
    fn from(task: &Task) -> Self {
        let created_at = match dates::parse_task_date(&task.created_at) {
            Ok(date) => Some(date),
            Err(err) => {
                tracing::warn!(task_id = task.id, raw = %task.created_at, "Unparseable task timestamp: {}", err);
                None
            }
        };
        Self {
            id: task.id,
            title: task.title.clone(),
            completed: task.completed,
            created_at,
            created_at_raw: task.created_at.clone(),
        }
    }
}

impl TaskView {
    /// "added today at 09:15" / "completed Monday 21st July at 18:00"
    pub fn date_label(&self, now: &DateTime<Local>) -> String {
        let verb = if self.completed { "completed" } else { "added" };
        match &self.created_at {
            Some(date) => format!("{} {}", verb, dates::format_task_date(date, now)),
            None => format!("{} {}", verb, self.created_at_raw),
        }
    }
}
