use crate::error::{Result, TodosError, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

pub type TodoId = u64;

/// Largest id a todo may hold. Stored ids are read back as signed integers,
/// so anything above `i64::MAX` could be written but never loaded again.
pub const MAX_TODO_ID: TodoId = i64::MAX as TodoId;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoStatus {
    #[default]
    Pending,
    Done,
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TodoStatus::Pending => write!(f, "pending"),
            TodoStatus::Done => write!(f, "done"),
        }
    }
}

impl FromStr for TodoStatus {
    type Err = TodosError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(TodoStatus::Pending),
            "done" => Ok(TodoStatus::Done),
            other => Err(TodosError::Api(format!("Unknown status: {}", other))),
        }
    }
}

/// Status selector for [`crate::todos::Todos::list`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Done,
}

impl StatusFilter {
    pub fn matches(&self, status: TodoStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => status == TodoStatus::Pending,
            StatusFilter::Done => status == TodoStatus::Done,
        }
    }
}

impl From<TodoStatus> for StatusFilter {
    fn from(status: TodoStatus) -> Self {
        match status {
            TodoStatus::Pending => StatusFilter::Pending,
            TodoStatus::Done => StatusFilter::Done,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = TodosError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse::<TodoStatus>().map(StatusFilter::from)
    }
}

/// How an update treats the due date.
///
/// Kept separate from `Option<DateTime>` so that "leave it alone" and
/// "remove it" cannot be confused.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DueUpdate {
    #[default]
    NoChange,
    Clear,
    Set(DateTime<Utc>),
}

/// Partial update payload for [`crate::todos::Todos::update`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TodoUpdate {
    pub description: Option<String>,
    pub due: DueUpdate,
}

impl TodoUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn due(mut self, due: DateTime<Utc>) -> Self {
        self.due = DueUpdate::Set(due);
        self
    }

    pub fn clear_due(mut self) -> Self {
        self.due = DueUpdate::Clear;
        self
    }

    /// True when the payload names no field at all.
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.due == DueUpdate::NoChange
    }
}

/// A single todo item.
///
/// Fields are private so that a `Todo` can only exist with a positive id and
/// a non-blank description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Todo {
    id: TodoId,
    description: String,
    status: TodoStatus,
    modified: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    due: Option<DateTime<Utc>>,
}

impl Todo {
    /// A pending todo, modified now, with no due date.
    pub fn new(
        id: TodoId,
        description: impl Into<String>,
    ) -> std::result::Result<Self, ValidationError> {
        Self::with_fields(id, description, TodoStatus::Pending, Utc::now(), None)
    }

    pub fn with_fields(
        id: TodoId,
        description: impl Into<String>,
        status: TodoStatus,
        modified: DateTime<Utc>,
        due: Option<DateTime<Utc>>,
    ) -> std::result::Result<Self, ValidationError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(ValidationError::InvalidDescription);
        }
        Ok(Self {
            id: validate_id(id)?,
            description,
            status,
            modified,
            due,
        })
    }

    pub fn id(&self) -> TodoId {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> TodoStatus {
        self.status
    }

    pub fn modified(&self) -> DateTime<Utc> {
        self.modified
    }

    pub fn due(&self) -> Option<DateTime<Utc>> {
        self.due
    }

    pub fn is_done(&self) -> bool {
        self.status == TodoStatus::Done
    }

    pub fn mark_done(&mut self) {
        self.status = TodoStatus::Done;
        self.touch();
    }

    pub fn mark_pending(&mut self) {
        self.status = TodoStatus::Pending;
        self.touch();
    }

    /// Re-ids the todo. Only the collection manager swaps or renumbers ids.
    pub(crate) fn set_id(&mut self, id: TodoId) -> std::result::Result<(), ValidationError> {
        self.id = validate_id(id)?;
        Ok(())
    }

    /// Blank descriptions are ignored; `modified` is refreshed regardless.
    pub(crate) fn apply_update(&mut self, update: &TodoUpdate) {
        if let Some(description) = &update.description {
            if !description.trim().is_empty() {
                self.description = description.clone();
            }
        }
        match update.due {
            DueUpdate::NoChange => {}
            DueUpdate::Clear => self.due = None,
            DueUpdate::Set(due) => self.due = Some(due),
        }
        self.touch();
    }

    fn touch(&mut self) {
        self.modified = Utc::now();
    }

    /// Renders this single todo as a YAML mapping.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Parses a single YAML mapping, applying the same defaults as
    /// [`decode_collection`].
    pub fn from_yaml(text: &str) -> Result<Self> {
        let raw: RawTodo = serde_yaml::from_str(text)?;
        Ok(raw.into_todo(Utc::now())?)
    }
}

fn validate_id(id: TodoId) -> std::result::Result<TodoId, ValidationError> {
    if id == 0 {
        return Err(ValidationError::InvalidId(0));
    }
    if id > MAX_TODO_ID {
        return Err(ValidationError::IdOutOfRange(id));
    }
    Ok(id)
}

// Every key is optional here so that legacy or hand-edited files can be
// repaired on load instead of rejected by serde.
#[derive(Deserialize)]
struct RawTodo {
    id: Option<i64>,
    description: Option<String>,
    status: Option<TodoStatus>,
    modified: Option<DateTime<Utc>>,
    due: Option<DateTime<Utc>>,
}

impl RawTodo {
    fn into_todo(self, now: DateTime<Utc>) -> std::result::Result<Todo, ValidationError> {
        let raw_id = self.id.ok_or(ValidationError::MissingRequiredField("id"))?;
        let description = self
            .description
            .ok_or(ValidationError::MissingRequiredField("description"))?;
        if raw_id < 1 {
            return Err(ValidationError::InvalidId(raw_id));
        }
        Todo::with_fields(
            raw_id as TodoId,
            description,
            self.status.unwrap_or_default(),
            self.modified.unwrap_or(now),
            self.due,
        )
    }
}

/// Decodes a stored blob into todos, in stored order.
///
/// Blank input and a YAML null document both decode to an empty collection.
/// Two entries sharing an id fail the whole decode.
pub fn decode_collection(text: &str) -> Result<Vec<Todo>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    let raw: Option<Vec<RawTodo>> = serde_yaml::from_str(text)?;
    let now = Utc::now();
    let todos = raw
        .unwrap_or_default()
        .into_iter()
        .map(|entry| entry.into_todo(now))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut seen = HashSet::with_capacity(todos.len());
    for todo in &todos {
        if !seen.insert(todo.id()) {
            return Err(ValidationError::DuplicateId(todo.id()).into());
        }
    }
    Ok(todos)
}

pub fn encode_collection(todos: &[Todo]) -> Result<String> {
    Ok(serde_yaml::to_string(todos)?)
}
