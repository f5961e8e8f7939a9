use crate::error::Result;
use crate::ops::{self, Selector};
use crate::output::{self, Format};
use crate::store::FileStore;

pub fn run<S>(store: &FileStore, selector: S, format: Format) -> Result<()>
where
    S: Selector,
{
    let tasks = ops::query_many(store, selector)?;
    output::print_tasks(&tasks, format)
}
