//! Generic task operations.
//!
//! Every operation reloads the task file, so nothing a caller holds in memory
//! between calls affects the result. Queries are parameterised by a
//! [`Selector`] and updates by a [`Mutator`]; the named ones in [`selectors`]
//! and [`mutators`] cover the built-in commands.
//!
//! Writes carry unreadable lines from the task file through unchanged and
//! report how many there were in [`Saved::kept_unreadable`].

use tracing::{debug, info};

use crate::error::{GtdError, Result};
use crate::list::TaskList;
use crate::model::{Task, parse_due};
use crate::store::FileStore;

/// Chooses which tasks a query returns.
pub trait Selector {
    fn select(&self, tasks: &TaskList) -> TaskList;
}

impl<F> Selector for F
where
    F: Fn(&TaskList) -> TaskList,
{
    fn select(&self, tasks: &TaskList) -> TaskList {
        self(tasks)
    }
}

/// Changes a single task in place.
pub trait Mutator {
    fn apply(&self, task: &mut Task);
}

impl<F> Mutator for F
where
    F: Fn(&mut Task),
{
    fn apply(&self, task: &mut Task) {
        self(task)
    }
}

pub mod selectors {
    use crate::list::TaskList;
    use crate::model::{is_due_today, is_pending};

    pub fn all(tasks: &TaskList) -> TaskList {
        tasks.clone()
    }

    pub fn pending(tasks: &TaskList) -> TaskList {
        tasks.select(is_pending)
    }

    pub fn due_today(tasks: &TaskList) -> TaskList {
        tasks.select(is_due_today)
    }
}

pub mod mutators {
    use crate::model::Task;

    pub fn tick(task: &mut Task) {
        task.tick();
    }

    pub fn untick(task: &mut Task) {
        task.untick();
    }
}

/// The result of a write, plus the number of unreadable lines it preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Saved<T> {
    pub value: T,
    pub kept_unreadable: usize,
}

/// Add a pending task due on `raw_due` (`YYYY-MM-DD`) and return its id.
pub fn add(store: &FileStore, description: &str, raw_due: &str) -> Result<Saved<u64>> {
    if description.contains(['\t', '\n', '\r']) {
        return Err(GtdError::InvalidInput(
            "description must not contain tabs or line breaks".into(),
        ));
    }
    let due = parse_due(raw_due)?;
    let task = Task::with_due(description, due);

    let mut loaded = store.load()?;
    let id = loaded.tasks.append(task);
    store.save_loaded(&loaded)?;
    info!(id, "added task");
    Ok(Saved {
        value: id,
        kept_unreadable: loaded.skipped.len(),
    })
}

pub fn query_one(store: &FileStore, id: i64) -> Result<Task> {
    let tasks = store.load()?.tasks;
    tasks.get(id).cloned()
}

pub fn query_many<S>(store: &FileStore, selector: S) -> Result<TaskList>
where
    S: Selector,
{
    let tasks = store.load()?.tasks;
    let selected = selector.select(&tasks);
    debug!(total = tasks.len(), selected = selected.len(), "queried tasks");
    Ok(selected)
}

/// Apply `mutator` to task `id` and persist the result.
pub fn update<M>(store: &FileStore, id: i64, mutator: M) -> Result<Saved<Task>>
where
    M: Mutator,
{
    let mut loaded = store.load()?;
    let mut task = loaded.tasks.get(id)?.clone();
    mutator.apply(&mut task);
    loaded.tasks.replace(id, task.clone())?;
    store.save_loaded(&loaded)?;
    info!(id, done = task.done, "updated task");
    Ok(Saved {
        value: task,
        kept_unreadable: loaded.skipped.len(),
    })
}
