//! The `gradebook init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    let path = std::path::Path::new("gradebook.toml");
    if path.exists() {
        println!("gradebook.toml already exists, skipping.");
    } else {
        std::fs::write(path, SAMPLE_CONFIG)?;
        println!("Created gradebook.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit gradebook.toml to choose where the roster is stored");
    println!("  2. Run: gradebook add \"Ada Lovelace\"");
    println!("  3. Run: gradebook shell");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gradebook configuration

# Roster file, one student per line: id|name|subject:grade,...
# GRADEBOOK_DATA_FILE and --data-file override this.
data_file = "students.txt"

# What to do with a record whose id is not a number:
#   "strict"  - refuse to load the roster
#   "lenient" - skip the record and print a warning
id_policy = "strict"
"#;
