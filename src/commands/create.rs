use crate::error::Result;
use crate::ops;
use crate::output::{self, Format};
use crate::store::FileStore;

pub fn run(store: &FileStore, description: &str, due: &str, format: Format) -> Result<()> {
    let saved = ops::add(store, description, due)?;
    output::print_done(saved.value, saved.kept_unreadable, format)
}
