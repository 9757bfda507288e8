//! The `gradebook export` command.

use std::path::PathBuf;

use anyhow::Result;

use gradebook_core::export::RosterExport;
use gradebook_core::traits::RosterStorage;

use super::{open_store, StoreOptions};

pub fn execute(options: &StoreOptions, output: PathBuf) -> Result<()> {
    let store = open_store(options)?;
    let export = RosterExport::from_students(store.students(), store.storage().location());
    export.save_json(&output)?;
    println!(
        "Exported {} student(s) to {}",
        export.students.len(),
        output.display()
    );
    Ok(())
}
