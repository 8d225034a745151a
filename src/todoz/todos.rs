//! # Collection Manager
//!
//! [`Todos`] owns every todo for one storage medium. It is the only code that
//! allocates ids, and the only code that decides when to persist.
//!
//! ## Lifecycle
//!
//! A manager starts `Unloaded`, holding nothing but its [`Storage`]. The first
//! operation that needs the working set reads the storage exactly once,
//! decodes it and moves to `Loaded`. From then on the in-memory set is the
//! truth; later changes to the medium by someone else are not observed.
//!
//! ## Persistence
//!
//! Every successful mutation re-encodes the *entire* working set and hands it
//! to [`Storage::write`]. If that write fails the error is returned but the
//! in-memory change stays applied: the working set and the medium disagree
//! until the next successful write. Callers that need strict durability
//! should treat any I/O error from a mutating call as a reason to reload.
//!
//! ## Ids
//!
//! New ids are `max(existing) + 1`, or 1 for an empty collection, so a freed
//! id in the middle of the range is never reused by `create`. Only `move_todo`
//! and `renumber` reassign ids.

use crate::dates::end_of_week;
use crate::error::{Result, TodosError, ValidationError};
use crate::model::{
    decode_collection, encode_collection, StatusFilter, Todo, TodoId, TodoStatus, TodoUpdate,
};
use crate::store::Storage;
use chrono::{DateTime, Local, TimeZone, Utc};
use tracing::debug;

enum WorkingSet {
    Unloaded,
    Loaded(Vec<Todo>),
}

pub struct Todos<S: Storage> {
    storage: S,
    working_set: WorkingSet,
}

impl<S: Storage> Todos<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            working_set: WorkingSet::Unloaded,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.working_set, WorkingSet::Loaded(_))
    }

    /// Todos matching `filter`, ascending by id.
    pub fn list(&mut self, filter: StatusFilter) -> Result<Vec<Todo>> {
        debug!(?filter, "list");
        let mut result: Vec<Todo> = self
            .items()?
            .iter()
            .filter(|todo| filter.matches(todo.status()))
            .cloned()
            .collect();
        result.sort_by_key(Todo::id);
        debug!(count = result.len(), "list returning");
        Ok(result)
    }

    /// Pending todos with a due date at or before `cutoff`, ascending by due
    /// date. Ties keep their working-set order.
    pub fn list_due_by(&mut self, cutoff: DateTime<Utc>) -> Result<Vec<Todo>> {
        debug!(%cutoff, "list_due_by");
        let mut result: Vec<Todo> = self
            .items()?
            .iter()
            .filter(|todo| !todo.is_done() && todo.due().is_some_and(|due| due <= cutoff))
            .cloned()
            .collect();
        result.sort_by_key(Todo::due);
        debug!(count = result.len(), "list_due_by returning");
        Ok(result)
    }

    /// [`Todos::list_due_by`] with the end of the current local week as cutoff.
    pub fn list_due_this_week(&mut self) -> Result<Vec<Todo>> {
        self.list_due_this_week_at(&Local::now())
    }

    pub fn list_due_this_week_at<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> Result<Vec<Todo>> {
        self.list_due_by(end_of_week(now))
    }

    pub fn create(
        &mut self,
        description: impl Into<String>,
        due: Option<DateTime<Utc>>,
    ) -> Result<Todo> {
        let description = description.into();
        debug!(%description, ?due, "create");
        let id = self.next_id()?;
        let todo = Todo::with_fields(id, description, TodoStatus::Pending, Utc::now(), due)?;
        self.items()?.push(todo.clone());
        self.save()?;
        debug!(id, "created todo");
        Ok(todo)
    }

    pub fn find(&mut self, id: TodoId) -> Result<Todo> {
        debug!(id, "find");
        let items = self.items()?;
        let todo = items
            .iter()
            .find(|todo| todo.id() == id)
            .cloned()
            .ok_or(TodosError::NotFound(id))?;
        Ok(todo)
    }

    pub fn mark_done(&mut self, id: TodoId) -> Result<Todo> {
        debug!(id, "mark_done");
        self.mutate(id, Todo::mark_done)
    }

    pub fn mark_pending(&mut self, id: TodoId) -> Result<Todo> {
        debug!(id, "mark_pending");
        self.mutate(id, Todo::mark_pending)
    }

    /// Gives the todo at `from` the id `to`. Whatever todo held `to` takes
    /// `from` in exchange, so ids stay unique. Both ids change in memory
    /// before the single write.
    pub fn move_todo(&mut self, from: TodoId, to: TodoId) -> Result<Todo> {
        debug!(from, to, "move_todo");
        let items = self.items()?;
        let source = position_of(items, from)?;
        let other = items
            .iter()
            .position(|todo| todo.id() == to)
            .filter(|&index| index != source);

        // Validate the target before touching anything.
        items[source].set_id(to)?;
        if let Some(index) = other {
            items[index].set_id(from)?;
        }
        let moved = items[source].clone();

        self.save()?;
        debug!(from, to, swapped = other.is_some(), "moved todo");
        Ok(moved)
    }

    pub fn destroy(&mut self, id: TodoId) -> Result<Todo> {
        debug!(id, "destroy");
        let items = self.items()?;
        let index = position_of(items, id)?;
        let removed = items.remove(index);
        self.save()?;
        debug!(id, "destroyed todo");
        Ok(removed)
    }

    /// Removes every todo, or only those with `status`. Returns how many
    /// were removed.
    pub fn clear(&mut self, status: Option<TodoStatus>) -> Result<usize> {
        debug!(?status, "clear");
        let items = self.items()?;
        let before = items.len();
        match status {
            None => items.clear(),
            Some(status) => items.retain(|todo| todo.status() != status),
        }
        let removed = before - items.len();
        self.save()?;
        debug!(removed, "cleared todos");
        Ok(removed)
    }

    /// Reassigns ids `1..=N` in working-set order, which is not necessarily
    /// id order.
    pub fn renumber(&mut self) -> Result<Vec<Todo>> {
        debug!("renumber");
        let items = self.items()?;
        for (index, todo) in items.iter_mut().enumerate() {
            todo.set_id(index as TodoId + 1)?;
        }
        let renumbered = items.clone();
        self.save()?;
        debug!(count = renumbered.len(), "renumbered todos");
        Ok(renumbered)
    }

    /// Applies a partial update. A blank description is ignored rather than
    /// rejected; `modified` is refreshed even when nothing else changes.
    pub fn update(&mut self, id: TodoId, update: &TodoUpdate) -> Result<Todo> {
        debug!(id, ?update, "update");
        self.mutate(id, |todo| todo.apply_update(update))
    }

    fn mutate(&mut self, id: TodoId, change: impl FnOnce(&mut Todo)) -> Result<Todo> {
        let items = self.items()?;
        let index = position_of(items, id)?;
        change(&mut items[index]);
        let todo = items[index].clone();
        self.save()?;
        Ok(todo)
    }

    fn next_id(&mut self) -> Result<TodoId> {
        let next = match self.items()?.iter().map(Todo::id).max() {
            None => 1,
            Some(max) => max
                .checked_add(1)
                .ok_or(ValidationError::IdOutOfRange(max))?,
        };
        debug!(next, "next_id");
        Ok(next)
    }

    fn items(&mut self) -> Result<&mut Vec<Todo>> {
        match self.working_set {
            WorkingSet::Loaded(ref mut items) => Ok(items),
            WorkingSet::Unloaded => {
                debug!("loading todos from storage");
                let items = decode_collection(&self.storage.read()?)?;
                debug!(count = items.len(), "loaded todos");
                self.working_set = WorkingSet::Loaded(items);
                self.items()
            }
        }
    }

    fn save(&mut self) -> Result<()> {
        let data = match &self.working_set {
            WorkingSet::Loaded(items) => encode_collection(items)?,
            // Nothing was ever loaded, so nothing can have changed.
            WorkingSet::Unloaded => return Ok(()),
        };
        self.storage.write(&data)?;
        debug!("saved todos");
        Ok(())
    }
}

fn position_of(items: &[Todo], id: TodoId) -> Result<usize> {
    items
        .iter()
        .position(|todo| todo.id() == id)
        .ok_or(TodosError::NotFound(id))
}
