//! # API Facade
//!
//! A thin layer over [`Todos`] that every front end talks to. It:
//! - **Dispatches** to the collection manager
//! - **Builds listings** the manager does not own (due today, overdue,
//!   most recently modified) out of its primitive queries
//! - **Returns structured types** (`Result<CmdResult>`), never strings for
//!   a terminal
//!
//! `TodosApi<S: Storage>` is generic over the storage so that the same facade
//! runs against [`crate::store::fs::FileStorage`] in production and
//! [`crate::store::memory::InMemoryStorage`] in tests.

use crate::dates::end_of_day;
use crate::error::Result;
use crate::model::{StatusFilter, Todo, TodoId, TodoStatus, TodoUpdate};
use crate::store::Storage;
use crate::todos::Todos;
use chrono::{DateTime, Local, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Todos created, changed or removed by the command
    pub affected_todos: Vec<Todo>,
    /// Todos the command was asked to show
    pub listed_todos: Vec<Todo>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_todos(mut self, todos: Vec<Todo>) -> Self {
        self.affected_todos = todos;
        self
    }

    pub fn with_listed_todos(mut self, todos: Vec<Todo>) -> Self {
        self.listed_todos = todos;
        self
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.add_message(message);
        self
    }
}

pub struct TodosApi<S: Storage> {
    todos: Todos<S>,
}

impl<S: Storage> TodosApi<S> {
    pub fn new(storage: S) -> Self {
        Self {
            todos: Todos::new(storage),
        }
    }

    pub fn todos(&self) -> &Todos<S> {
        &self.todos
    }

    pub fn add_todo(
        &mut self,
        description: &str,
        due: Option<DateTime<Utc>>,
    ) -> Result<CmdResult> {
        let todo = self.todos.create(description, due)?;
        let message = CmdMessage::success(format!(
            "Todo added ({}): {}",
            todo.id(),
            todo.description()
        ));
        Ok(CmdResult::default()
            .with_affected_todos(vec![todo])
            .with_message(message))
    }

    pub fn get_todo(&mut self, id: TodoId) -> Result<CmdResult> {
        let todo = self.todos.find(id)?;
        Ok(CmdResult::default().with_listed_todos(vec![todo]))
    }

    pub fn list_todos(&mut self, filter: StatusFilter) -> Result<CmdResult> {
        let todos = self.todos.list(filter)?;
        Ok(CmdResult::default().with_listed_todos(todos))
    }

    pub fn list_due_by(&mut self, cutoff: DateTime<Utc>) -> Result<CmdResult> {
        let todos = self.todos.list_due_by(cutoff)?;
        Ok(CmdResult::default().with_listed_todos(todos))
    }

    /// Pending todos due today or earlier.
    pub fn list_due_today(&mut self) -> Result<CmdResult> {
        self.list_due_by(end_of_day(&Local::now()))
    }

    pub fn list_due_this_week(&mut self) -> Result<CmdResult> {
        let todos = self.todos.list_due_this_week()?;
        Ok(CmdResult::default().with_listed_todos(todos))
    }

    pub fn list_overdue(&mut self) -> Result<CmdResult> {
        self.list_overdue_at(Utc::now())
    }

    /// Pending todos whose due date is strictly before `now`, by id.
    pub fn list_overdue_at(&mut self, now: DateTime<Utc>) -> Result<CmdResult> {
        let todos = self
            .todos
            .list(StatusFilter::Pending)?
            .into_iter()
            .filter(|todo| todo.due().is_some_and(|due| due < now))
            .collect();
        Ok(CmdResult::default().with_listed_todos(todos))
    }

    pub fn most_recently_modified(&mut self) -> Result<CmdResult> {
        let latest = self
            .todos
            .list(StatusFilter::All)?
            .into_iter()
            .reduce(|latest, todo| {
                if todo.modified() > latest.modified() {
                    todo
                } else {
                    latest
                }
            });
        Ok(match latest {
            Some(todo) => CmdResult::default().with_listed_todos(vec![todo]),
            None => CmdResult::default().with_message(CmdMessage::info("No todos found")),
        })
    }

    pub fn mark_done(&mut self, id: TodoId) -> Result<CmdResult> {
        let todo = self.todos.mark_done(id)?;
        let message = CmdMessage::success(format!("Todo {} marked as done", todo.id()));
        Ok(CmdResult::default()
            .with_affected_todos(vec![todo])
            .with_message(message))
    }

    pub fn mark_pending(&mut self, id: TodoId) -> Result<CmdResult> {
        let todo = self.todos.mark_pending(id)?;
        let message = CmdMessage::success(format!("Todo {} marked as pending", todo.id()));
        Ok(CmdResult::default()
            .with_affected_todos(vec![todo])
            .with_message(message))
    }

    /// Front ends must say what to change; an empty payload is answered with
    /// a warning and leaves the collection untouched.
    pub fn update_todo(&mut self, id: TodoId, update: &TodoUpdate) -> Result<CmdResult> {
        if update.is_empty() {
            return Ok(CmdResult::default().with_message(CmdMessage::warning(
                "No updates provided. Please specify either description or due date.",
            )));
        }
        let todo = self.todos.update(id, update)?;
        let message = CmdMessage::success(format!(
            "Todo updated ({}): {}",
            todo.id(),
            todo.description()
        ));
        Ok(CmdResult::default()
            .with_affected_todos(vec![todo])
            .with_message(message))
    }

    pub fn move_todo(&mut self, from: TodoId, to: TodoId) -> Result<CmdResult> {
        let todo = self.todos.move_todo(from, to)?;
        let message = CmdMessage::success(format!("Todo moved from {} to {}", from, to));
        Ok(CmdResult::default()
            .with_affected_todos(vec![todo])
            .with_message(message))
    }

    pub fn delete_todo(&mut self, id: TodoId) -> Result<CmdResult> {
        let todo = self.todos.destroy(id)?;
        let message = CmdMessage::success(format!(
            "Todo deleted ({}): {}",
            todo.id(),
            todo.description()
        ));
        Ok(CmdResult::default()
            .with_affected_todos(vec![todo])
            .with_message(message))
    }

    pub fn clear_todos(&mut self, status: Option<TodoStatus>) -> Result<CmdResult> {
        let removed = self.todos.clear(status)?;
        let scope = match status {
            Some(status) => format!("{} ", status),
            None => String::new(),
        };
        Ok(CmdResult::default().with_message(CmdMessage::success(format!(
            "Cleared {} {}todo(s)",
            removed, scope
        ))))
    }

    pub fn renumber_todos(&mut self) -> Result<CmdResult> {
        let todos = self.todos.renumber()?;
        let message = CmdMessage::success(format!("Renumbered {} todo(s)", todos.len()));
        Ok(CmdResult::default()
            .with_affected_todos(todos)
            .with_message(message))
    }
}
