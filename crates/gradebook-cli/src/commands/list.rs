//! The `gradebook list` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use gradebook_core::model::Student;
use gradebook_core::roster::StudentListing;

use super::{open_store, StoreOptions};

pub fn execute(options: &StoreOptions, plain: bool) -> Result<()> {
    let store = open_store(options)?;

    match store.list_students() {
        StudentListing::Empty => println!("No students available."),
        StudentListing::Summaries(lines) if plain => {
            for line in lines {
                println!("{line}");
            }
        }
        StudentListing::Summaries(_) => println!("{}", student_table(store.students())),
    }

    Ok(())
}

fn student_table(students: &[Student]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Subjects", "GPA"]);

    for student in students {
        table.add_row(vec![
            Cell::new(student.id),
            Cell::new(&student.name),
            Cell::new(student.grades.len()),
            Cell::new(format!("{:.2}", student.calculate_gpa())),
        ]);
    }

    table
}
