//! The mutating subcommands: `add`, `update`, `delete` and `grade`.

use anyhow::Result;

use super::{open_store, StoreOptions};

pub fn add(options: &StoreOptions, name: String) -> Result<()> {
    let mut store = open_store(options)?;
    let id = store.add_student(name)?;
    println!("Added student with ID {id}.");
    Ok(())
}

pub fn update(options: &StoreOptions, id: u32, name: String) -> Result<()> {
    let mut store = open_store(options)?;
    store.update_student(id, name)?;
    println!("Updated student {id}.");
    Ok(())
}

pub fn delete(options: &StoreOptions, id: u32) -> Result<()> {
    let mut store = open_store(options)?;
    let removed = store.delete_student(id)?;
    println!("Removed {removed} student(s).");
    Ok(())
}

pub fn grade(options: &StoreOptions, id: u32, subject: String, grade: f64) -> Result<()> {
    let mut store = open_store(options)?;
    store.add_grade(id, &subject, grade)?;
    println!("Recorded {subject}: {grade} for student {id}.");
    Ok(())
}
