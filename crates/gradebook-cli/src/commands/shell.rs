//! The `gradebook shell` command: the numbered interactive menu.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use gradebook_core::error::RosterError;
use gradebook_core::roster::{RosterStore, StudentListing};
use gradebook_core::traits::RosterStorage;

use super::{open_store, StoreOptions};

const MENU: &str = "Student Grading System
1. Add Student
2. Update Student
3. Delete Student
4. Add Grade
5. Display Students
6. Generate Report Card
7. Exit
";

pub fn execute(options: &StoreOptions) -> Result<()> {
    let mut store = open_store(options)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&mut store, stdin.lock(), stdout.lock())
}

/// Drive the menu until the user exits or input ends.
///
/// Not-found results are reported and the loop continues. Storage failures
/// end the session with an error.
pub fn run<S, R, W>(store: &mut RosterStore<S>, mut input: R, mut out: W) -> Result<()>
where
    S: RosterStorage,
    R: BufRead,
    W: Write,
{
    loop {
        write!(out, "{MENU}")?;
        let Some(choice) = prompt(&mut input, &mut out, "Choose an option: ")? else {
            return Ok(());
        };

        let outcome = match choice.trim() {
            "1" => add_student(store, &mut input, &mut out),
            "2" => update_student(store, &mut input, &mut out),
            "3" => delete_student(store, &mut input, &mut out),
            "4" => add_grade(store, &mut input, &mut out),
            "5" => display_students(store, &mut out),
            "6" => report_card(store, &mut input, &mut out),
            "7" => return Ok(()),
            _ => {
                writeln!(out, "Invalid choice. Please try again.")?;
                Ok(Step::Continue)
            }
        };

        match outcome {
            Ok(Step::Continue) => {}
            Ok(Step::EndOfInput) => return Ok(()),
            Err(e) => {
                let not_found = e
                    .downcast_ref::<RosterError>()
                    .is_some_and(RosterError::is_not_found);
                if !not_found {
                    return Err(e);
                }
                writeln!(out, "Student not found.")?;
            }
        }
    }
}

enum Step {
    Continue,
    EndOfInput,
}

/// Print `label` and read one line. `None` means input is exhausted.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> Result<Option<String>> {
    write!(out, "{label}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Prompt until the answer parses as `T`.
fn prompt_parsed<T, R, W>(input: &mut R, out: &mut W, label: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    R: BufRead,
    W: Write,
{
    loop {
        let Some(answer) = prompt(input, out, label)? else {
            return Ok(None);
        };
        match answer.trim().parse() {
            Ok(value) => return Ok(Some(value)),
            Err(_) => writeln!(out, "Invalid number: {answer:?}")?,
        }
    }
}

fn add_student<S: RosterStorage, R: BufRead, W: Write>(
    store: &mut RosterStore<S>,
    input: &mut R,
    out: &mut W,
) -> Result<Step> {
    let Some(name) = prompt(input, out, "Enter Name: ")? else {
        return Ok(Step::EndOfInput);
    };
    let id = store.add_student(name)?;
    writeln!(out, "Added student with ID {id}.")?;
    Ok(Step::Continue)
}

fn update_student<S: RosterStorage, R: BufRead, W: Write>(
    store: &mut RosterStore<S>,
    input: &mut R,
    out: &mut W,
) -> Result<Step> {
    let Some(id) = prompt_parsed::<u32, _, _>(input, out, "Enter Student ID to update: ")? else {
        return Ok(Step::EndOfInput);
    };
    let Some(name) = prompt(input, out, "Enter New Name: ")? else {
        return Ok(Step::EndOfInput);
    };
    store.update_student(id, name)?;
    Ok(Step::Continue)
}

fn delete_student<S: RosterStorage, R: BufRead, W: Write>(
    store: &mut RosterStore<S>,
    input: &mut R,
    out: &mut W,
) -> Result<Step> {
    let Some(id) = prompt_parsed::<u32, _, _>(input, out, "Enter Student ID to delete: ")? else {
        return Ok(Step::EndOfInput);
    };
    store.delete_student(id)?;
    Ok(Step::Continue)
}

fn add_grade<S: RosterStorage, R: BufRead, W: Write>(
    store: &mut RosterStore<S>,
    input: &mut R,
    out: &mut W,
) -> Result<Step> {
    let Some(id) = prompt_parsed::<u32, _, _>(input, out, "Enter Student ID to add grade: ")?
    else {
        return Ok(Step::EndOfInput);
    };
    let Some(subject) = prompt(input, out, "Enter Subject: ")? else {
        return Ok(Step::EndOfInput);
    };
    let Some(grade) = prompt_parsed::<f64, _, _>(input, out, "Enter Grade: ")? else {
        return Ok(Step::EndOfInput);
    };
    store.add_grade(id, subject, grade)?;
    Ok(Step::Continue)
}

fn display_students<S: RosterStorage, W: Write>(
    store: &RosterStore<S>,
    out: &mut W,
) -> Result<Step> {
    match store.list_students() {
        StudentListing::Empty => writeln!(out, "No students available.")?,
        StudentListing::Summaries(lines) => {
            for line in lines {
                writeln!(out, "{line}")?;
            }
        }
    }
    Ok(Step::Continue)
}

fn report_card<S: RosterStorage, R: BufRead, W: Write>(
    store: &RosterStore<S>,
    input: &mut R,
    out: &mut W,
) -> Result<Step> {
    let Some(id) =
        prompt_parsed::<u32, _, _>(input, out, "Enter Student ID to generate report card: ")?
    else {
        return Ok(Step::EndOfInput);
    };
    writeln!(out, "{}", store.report_for(id)?)?;
    Ok(Step::Continue)
}
