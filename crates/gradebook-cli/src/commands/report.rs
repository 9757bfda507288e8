//! The `gradebook report` command.

use anyhow::Result;

use super::{open_store, StoreOptions};

pub fn execute(options: &StoreOptions, id: u32) -> Result<()> {
    let store = open_store(options)?;
    print!("{}", store.report_for(id)?);
    Ok(())
}
