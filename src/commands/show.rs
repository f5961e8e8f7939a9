use crate::error::Result;
use crate::list::checked_id;
use crate::ops;
use crate::output::{self, Format};
use crate::store::FileStore;
use crate::task_id::parse_task_id;

pub fn run(store: &FileStore, id: &str, format: Format) -> Result<()> {
    let id = parse_task_id(id)?;
    let key = checked_id(id)?;
    let task = ops::query_one(store, id)?;
    output::print_task(key, &task, format)
}
