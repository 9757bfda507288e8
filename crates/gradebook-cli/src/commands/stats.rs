//! The `gradebook stats` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use gradebook_core::statistics::{compute_roster_stats, RosterStats};

use super::{open_store, StoreOptions};

pub fn execute(options: &StoreOptions, format: String) -> Result<()> {
    let store = open_store(options)?;
    let stats = compute_roster_stats(store.students());

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&stats)?),
        _ => print_text(&stats),
    }

    Ok(())
}

fn print_text(stats: &RosterStats) {
    println!(
        "Students: {} ({} graded)",
        stats.student_count, stats.graded_count
    );
    println!("Class average: {:.2}", stats.class_average);
    if let Some(top) = &stats.top_student {
        println!("Top student: {} (ID: {}, GPA: {:.2})", top.name, top.id, top.gpa);
    }

    if stats.per_subject.is_empty() {
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Subject", "Grades", "Mean", "Min", "Max"]);
    for (subject, s) in &stats.per_subject {
        table.add_row(vec![
            Cell::new(subject),
            Cell::new(s.count),
            Cell::new(format!("{:.2}", s.mean)),
            Cell::new(s.min),
            Cell::new(s.max),
        ]);
    }
    println!("\n{table}");
}
