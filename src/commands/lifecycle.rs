use crate::error::Result;
use crate::list::checked_id;
use crate::ops::{self, Mutator, mutators};
use crate::output::{self, Format};
use crate::store::FileStore;
use crate::task_id::parse_task_id;

fn set_done<M>(store: &FileStore, id: &str, mutator: M, format: Format) -> Result<()>
where
    M: Mutator,
{
    let id = parse_task_id(id)?;
    let key = checked_id(id)?;
    let saved = ops::update(store, id, mutator)?;
    output::print_done(key, saved.kept_unreadable, format)
}

pub fn tick(store: &FileStore, id: &str, format: Format) -> Result<()> {
    set_done(store, id, mutators::tick, format)
}

pub fn untick(store: &FileStore, id: &str, format: Format) -> Result<()> {
    set_done(store, id, mutators::untick, format)
}
