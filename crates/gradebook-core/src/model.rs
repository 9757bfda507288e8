//! Core data model types for gradebook.
//!
//! A [`Student`] owns its identity, a display name and an insertion-ordered
//! set of subject grades, and derives its GPA and report card from them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single recorded grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    /// Subject name, unique within a student's grades.
    pub subject: String,
    /// Numeric grade.
    pub value: f64,
}

/// Subject to grade mapping that remembers insertion order.
///
/// Overwriting an existing subject keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grades(Vec<Grade>);

impl Grades {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a grade, overwriting any existing grade for the subject.
    pub fn set(&mut self, subject: impl Into<String>, value: f64) {
        let subject = subject.into();
        match self.0.iter_mut().find(|g| g.subject == subject) {
            Some(existing) => existing.value = value,
            None => self.0.push(Grade { subject, value }),
        }
    }

    pub fn get(&self, subject: &str) -> Option<f64> {
        self.0.iter().find(|g| g.subject == subject).map(|g| g.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Grade> {
        self.0.iter()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().map(|g| g.value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One student record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Roster-assigned identity. Never changes after assignment.
    pub id: u32,
    /// Display name, stored verbatim.
    pub name: String,
    /// Recorded grades in insertion order.
    #[serde(default)]
    pub grades: Grades,
}

impl Student {
    /// Create a student with no grades.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            grades: Grades::new(),
        }
    }

    /// Arithmetic mean of all grades, or `0.0` when there are none.
    ///
    /// The value is not rounded; two-decimal formatting happens at display time.
    pub fn calculate_gpa(&self) -> f64 {
        if self.grades.is_empty() {
            return 0.0;
        }
        let total: f64 = self.grades.values().sum();
        total / self.grades.len() as f64
    }

    /// One-line summary: id, name and GPA to two decimal places.
    pub fn summary(&self) -> String {
        format!(
            "ID: {}, Name: {}, GPA: {:.2}",
            self.id,
            self.name,
            self.calculate_gpa()
        )
    }

    /// Multi-line report card listing every grade followed by the GPA.
    pub fn report_card(&self) -> String {
        let mut report = format!("Report Card for {} (ID: {})\n", self.name, self.id);
        report.push_str("----------------------------------\n");
        for grade in self.grades.iter() {
            report.push_str(&format!("{}: {}\n", grade.subject, grade.value));
        }
        report.push_str(&format!("GPA: {:.2}\n", self.calculate_gpa()));
        report
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}
