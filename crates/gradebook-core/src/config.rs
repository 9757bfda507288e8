//! Gradebook configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::codec::IdPolicy;
use crate::storage::DEFAULT_DATA_FILE;

/// Environment variable overriding [`GradebookConfig::data_file`].
pub const DATA_FILE_ENV: &str = "GRADEBOOK_DATA_FILE";

/// Top-level gradebook configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradebookConfig {
    /// Path of the roster file.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// How records with an unparseable id are handled on load.
    #[serde(default)]
    pub id_policy: IdPolicy,
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

impl Default for GradebookConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            id_policy: IdPolicy::default(),
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `gradebook.toml` in the current directory
/// 2. `~/.config/gradebook/config.toml`
///
/// `GRADEBOOK_DATA_FILE` overrides the data file from either.
pub fn load_config() -> Result<GradebookConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<GradebookConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("gradebook.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|home| home.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => GradebookConfig::default(),
    };

    Ok(apply_env_overrides(config, |key| std::env::var(key).ok()))
}

/// Parse a TOML config document.
pub fn parse_config(content: &str) -> Result<GradebookConfig> {
    Ok(toml::from_str(content)?)
}

fn apply_env_overrides(
    mut config: GradebookConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> GradebookConfig {
    if let Some(file) = lookup(DATA_FILE_ENV).filter(|v| !v.trim().is_empty()) {
        config.data_file = PathBuf::from(file);
    }
    config
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gradebook"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = GradebookConfig::default();
        assert_eq!(config.data_file, PathBuf::from("students.txt"));
        assert_eq!(config.id_policy, IdPolicy::Strict);
    }

    #[test]
    fn parse_full_config() {
        let config = parse_config(
            r#"
data_file = "/var/lib/gradebook/roster.txt"
id_policy = "lenient"
"#,
        )
        .unwrap();
        assert_eq!(config.data_file, PathBuf::from("/var/lib/gradebook/roster.txt"));
        assert_eq!(config.id_policy, IdPolicy::Lenient);
    }

    #[test]
    fn missing_keys_use_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, GradebookConfig::default());
    }

    #[test]
    fn unknown_policy_is_rejected() {
        assert!(parse_config("id_policy = \"sloppy\"").is_err());
    }

    #[test]
    fn explicit_missing_path_fails() {
        let err = load_config_from(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gradebook.toml");
        std::fs::write(&path, "id_policy = \"lenient\"\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.id_policy, IdPolicy::Lenient);
    }

    #[test]
    fn env_override_replaces_data_file() {
        let config = apply_env_overrides(GradebookConfig::default(), |key| {
            (key == DATA_FILE_ENV).then(|| "other.txt".to_string())
        });
        assert_eq!(config.data_file, PathBuf::from("other.txt"));

        let config = apply_env_overrides(GradebookConfig::default(), |_| Some("  ".into()));
        assert_eq!(config.data_file, PathBuf::from("students.txt"));
    }
}
