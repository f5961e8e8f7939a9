use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{GtdError, Result};
use crate::model::Task;

/// Tasks addressed by a dense integer id.
///
/// A list built through [`TaskList::append`] always holds ids `0..len`, in
/// insertion order. Lists returned by [`TaskList::select`] are views: they
/// keep the ids of the list they were taken from, so their ids may be sparse.
/// Appending always uses an id above every existing one, so it never
/// overwrites an entry, even on a view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: BTreeMap<u64, Task>,
}

/// One task paired with its id, the shape used for JSON output.
#[derive(Debug, Serialize)]
pub struct Entry<'a> {
    pub id: u64,
    #[serde(flatten)]
    pub task: &'a Task,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Insert `task` under the id after the highest one in use and return it.
    ///
    /// For a dense list this is the current size.
    pub fn append(&mut self, task: Task) -> u64 {
        let id = self.tasks.last_key_value().map_or(0, |(&last, _)| last + 1);
        self.tasks.insert(id, task);
        id
    }

    /// Overwrite the task stored under `id`. The id must already exist.
    pub fn replace(&mut self, id: i64, task: Task) -> Result<()> {
        *self.get_mut(id)? = task;
        Ok(())
    }

    pub fn get(&self, id: i64) -> Result<&Task> {
        let key = checked_id(id)?;
        self.tasks.get(&key).ok_or(GtdError::TaskNotFound(id))
    }

    pub fn get_mut(&mut self, id: i64) -> Result<&mut Task> {
        let key = checked_id(id)?;
        self.tasks.get_mut(&key).ok_or(GtdError::TaskNotFound(id))
    }

    /// Copy the tasks matching `predicate` into a new list, keeping their ids.
    pub fn select<P>(&self, predicate: P) -> TaskList
    where
        P: Fn(&Task) -> bool,
    {
        let tasks = self
            .tasks
            .iter()
            .filter(|(_, task)| predicate(task))
            .map(|(&id, task)| (id, task.clone()))
            .collect();
        TaskList { tasks }
    }

    /// Tasks in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &Task)> {
        self.tasks.iter().map(|(&id, task)| (id, task))
    }

    pub fn ids(&self) -> Vec<u64> {
        self.tasks.keys().copied().collect()
    }

    pub fn entries(&self) -> Vec<Entry<'_>> {
        self.iter().map(|(id, task)| Entry { id, task }).collect()
    }
}

/// Convert a user-supplied id to a list key, rejecting negative values.
pub fn checked_id(id: i64) -> Result<u64> {
    u64::try_from(id).map_err(|_| GtdError::NegativeId(id))
}

impl std::fmt::Display for TaskList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (id, task) in self.iter() {
            writeln!(f, "{id}: {task}")?;
        }
        Ok(())
    }
}
