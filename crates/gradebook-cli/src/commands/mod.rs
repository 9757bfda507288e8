//! Subcommand implementations.

pub mod export;
pub mod init;
pub mod list;
pub mod report;
pub mod shell;
pub mod stats;
pub mod students;

use std::path::PathBuf;

use anyhow::Result;

use gradebook_core::codec::IdPolicy;
use gradebook_core::config::load_config_from;
use gradebook_core::roster::RosterStore;
use gradebook_core::storage::FileStorage;

/// Global flags that decide which roster is opened and how.
#[derive(Debug, Clone, Default)]
pub struct StoreOptions {
    pub data_file: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub lenient: bool,
}

/// Resolve configuration and open the roster file.
///
/// Records skipped during the load are reported on stderr.
pub fn open_store(options: &StoreOptions) -> Result<RosterStore<FileStorage>> {
    let config = load_config_from(options.config.as_deref())?;

    let data_file = options.data_file.clone().unwrap_or(config.data_file);
    let policy = if options.lenient {
        IdPolicy::Lenient
    } else {
        config.id_policy
    };

    tracing::debug!(data_file = %data_file.display(), %policy, "opening roster");
    let store = RosterStore::open(FileStorage::new(data_file), policy)?;
    for diagnostic in store.load_diagnostics() {
        eprintln!("warning: {diagnostic}");
    }
    Ok(store)
}
