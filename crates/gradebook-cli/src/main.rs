//! gradebook CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use gradebook_core::error::RosterError;

mod commands;

use commands::StoreOptions;

#[derive(Parser)]
#[command(name = "gradebook", version, about = "Student roster and grade tracker")]
struct Cli {
    /// Roster file (overrides config and GRADEBOOK_DATA_FILE)
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Skip records with an unparseable id instead of failing the load
    #[arg(long, global = true)]
    lenient: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a student
    Add {
        /// Student name
        name: String,
    },

    /// Rename a student
    Update {
        /// Student ID
        id: u32,
        /// New name
        name: String,
    },

    /// Delete a student
    Delete {
        /// Student ID
        id: u32,
    },

    /// Record a grade (overwrites an existing grade for the subject)
    Grade {
        /// Student ID
        id: u32,
        /// Subject name
        subject: String,
        /// Numeric grade
        #[arg(allow_negative_numbers = true)]
        grade: f64,
    },

    /// List all students
    List {
        /// Print one summary line per student instead of a table
        #[arg(long)]
        plain: bool,
    },

    /// Print a student's report card
    Report {
        /// Student ID
        id: u32,
    },

    /// Show roster statistics
    Stats {
        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Export the roster with GPAs and statistics as JSON
    Export {
        /// Output file
        #[arg(long)]
        output: PathBuf,
    },

    /// Interactive menu
    Shell,

    /// Create a starter config file
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gradebook=error")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = StoreOptions {
        data_file: cli.data_file,
        config: cli.config,
        lenient: cli.lenient,
    };

    let result = match cli.command {
        Commands::Add { name } => commands::students::add(&options, name),
        Commands::Update { id, name } => commands::students::update(&options, id, name),
        Commands::Delete { id } => commands::students::delete(&options, id),
        Commands::Grade { id, subject, grade } => {
            commands::students::grade(&options, id, subject, grade)
        }
        Commands::List { plain } => commands::list::execute(&options, plain),
        Commands::Report { id } => commands::report::execute(&options, id),
        Commands::Stats { format } => commands::stats::execute(&options, format),
        Commands::Export { output } => commands::export::execute(&options, output),
        Commands::Shell => commands::shell::execute(&options),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        let not_found = e
            .downcast_ref::<RosterError>()
            .is_some_and(RosterError::is_not_found);
        if not_found {
            eprintln!("Student not found.");
        } else {
            eprintln!("Error: {e:#}");
        }
        process::exit(1);
    }
}
