//! Aggregate statistics over a roster.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::Student;

/// Roster-wide statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterStats {
    /// Number of students in the roster.
    pub student_count: usize,
    /// Students with at least one grade.
    pub graded_count: usize,
    /// Mean GPA over graded students; 0 when nobody has grades.
    pub class_average: f64,
    /// Highest GPA among graded students. Earlier students win ties.
    pub top_student: Option<TopStudent>,
    /// Per-subject statistics keyed by subject name.
    pub per_subject: BTreeMap<String, SubjectStats>,
}

/// The student with the best GPA.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopStudent {
    pub id: u32,
    pub name: String,
    pub gpa: f64,
}

/// Statistics for one subject across all students.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectStats {
    /// Number of grades recorded.
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Compute statistics for a roster.
pub fn compute_roster_stats(students: &[Student]) -> RosterStats {
    let graded: Vec<&Student> = students.iter().filter(|s| !s.grades.is_empty()).collect();

    let class_average = if graded.is_empty() {
        0.0
    } else {
        graded.iter().map(|s| s.calculate_gpa()).sum::<f64>() / graded.len() as f64
    };

    let mut top_student: Option<TopStudent> = None;
    for student in &graded {
        let gpa = student.calculate_gpa();
        if top_student.as_ref().map_or(true, |top| gpa > top.gpa) {
            top_student = Some(TopStudent {
                id: student.id,
                name: student.name.clone(),
                gpa,
            });
        }
    }

    let mut per_subject: BTreeMap<String, SubjectStats> = BTreeMap::new();
    for grade in students.iter().flat_map(|s| s.grades.iter()) {
        per_subject
            .entry(grade.subject.clone())
            .and_modify(|stats| {
                stats.count += 1;
                stats.mean += grade.value;
                stats.min = stats.min.min(grade.value);
                stats.max = stats.max.max(grade.value);
            })
            .or_insert(SubjectStats {
                count: 1,
                mean: grade.value,
                min: grade.value,
                max: grade.value,
            });
    }
    // `mean` holds the running sum until here.
    for stats in per_subject.values_mut() {
        stats.mean /= stats.count as f64;
    }

    RosterStats {
        student_count: students.len(),
        graded_count: graded.len(),
        class_average,
        top_student,
        per_subject,
    }
}
