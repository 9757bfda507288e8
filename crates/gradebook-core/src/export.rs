//! JSON export of the roster with computed GPAs and statistics.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Grades, Student};
use crate::statistics::{compute_roster_stats, RosterStats};

/// A point-in-time snapshot of the roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterExport {
    /// When the export was generated.
    pub generated_at: DateTime<Utc>,
    /// Where the roster was loaded from.
    pub source: String,
    /// Students in roster order.
    pub students: Vec<StudentExport>,
    /// Aggregate statistics.
    pub stats: RosterStats,
}

/// One exported student.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentExport {
    pub id: u32,
    pub name: String,
    /// Unrounded GPA.
    pub gpa: f64,
    pub grades: Grades,
}

impl From<&Student> for StudentExport {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id,
            name: student.name.clone(),
            gpa: student.calculate_gpa(),
            grades: student.grades.clone(),
        }
    }
}

impl RosterExport {
    /// Build an export from the current roster.
    pub fn from_students(students: &[Student], source: impl Into<String>) -> Self {
        Self {
            generated_at: Utc::now(),
            source: source.into(),
            students: students.iter().map(StudentExport::from).collect(),
            stats: compute_roster_stats(students),
        }
    }

    /// Save the export as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize export")?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write export to {}", path.display()))?;
        Ok(())
    }

    /// Load an export from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read export from {}", path.display()))?;
        let export: RosterExport =
            serde_json::from_str(&content).context("failed to parse export JSON")?;
        Ok(export)
    }
}
