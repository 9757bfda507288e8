//! Flat-file roster format.
//!
//! One student per line: `id|name|subject:grade,subject:grade`. The grade
//! segment is left empty when a student has no grades. Nothing is escaped, so
//! names and subjects must not contain `|`, `,`, `:` or line breaks. A name
//! with a newline is written as two lines and the second loads as a bogus
//! record.
//!
//! Decoding is forgiving: malformed records and grade values are skipped and
//! reported as [`LoadDiagnostic`]s instead of failing the whole load. The one
//! exception is an unparseable id, which is governed by [`IdPolicy`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CodecError;
use crate::model::Student;

const FIELD_SEPARATOR: &str = "|";
const PAIR_SEPARATOR: &str = ",";
const GRADE_SEPARATOR: &str = ":";

/// What to do with a record whose id field is not an integer.
///
/// Ids are accepted in `0..=u32::MAX` after trimming surrounding whitespace.
/// A leading `+` is allowed. Negatives and anything wider than `u32` count as
/// unparseable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdPolicy {
    /// Abort the whole load.
    #[default]
    Strict,
    /// Skip the record and report a diagnostic.
    Lenient,
}

impl fmt::Display for IdPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdPolicy::Strict => write!(f, "strict"),
            IdPolicy::Lenient => write!(f, "lenient"),
        }
    }
}

/// A recoverable problem found while decoding. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadDiagnostic {
    /// The record has fewer than two fields and was skipped.
    InvalidRecord { line: usize, record: String },
    /// A grade value did not parse as a number; only that pair was skipped.
    InvalidGrade {
        line: usize,
        subject: String,
        value: String,
    },
    /// The id did not parse and the record was skipped (lenient policy only).
    InvalidId { line: usize, value: String },
}

impl LoadDiagnostic {
    pub fn line(&self) -> usize {
        match self {
            LoadDiagnostic::InvalidRecord { line, .. }
            | LoadDiagnostic::InvalidGrade { line, .. }
            | LoadDiagnostic::InvalidId { line, .. } => *line,
        }
    }
}

impl fmt::Display for LoadDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadDiagnostic::InvalidRecord { line, record } => {
                write!(f, "line {line}: invalid student record: {record}")
            }
            LoadDiagnostic::InvalidGrade {
                line,
                subject,
                value,
            } => write!(f, "line {line}: invalid grade value for {subject}: {value:?}"),
            LoadDiagnostic::InvalidId { line, value } => {
                write!(f, "line {line}: invalid student id {value:?}, record skipped")
            }
        }
    }
}

/// Result of decoding a roster file.
#[derive(Debug, Clone, Default)]
pub struct Decoded {
    /// Students in file order.
    pub students: Vec<Student>,
    /// Everything that was skipped along the way.
    pub diagnostics: Vec<LoadDiagnostic>,
}

/// Encode one student as a single line, without the trailing newline.
pub fn encode_student(student: &Student) -> String {
    let grades = student
        .grades
        .iter()
        .map(|g| format!("{}{GRADE_SEPARATOR}{}", g.subject, g.value))
        .collect::<Vec<_>>()
        .join(PAIR_SEPARATOR);
    format!(
        "{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{grades}",
        student.id, student.name
    )
}

/// Encode a whole roster, one newline-terminated line per student.
pub fn encode_roster(students: &[Student]) -> String {
    let mut out = String::new();
    for student in students {
        out.push_str(&encode_student(student));
        out.push('\n');
    }
    out
}

/// Decode a roster file's contents.
///
/// Every line is a record, blank ones included: a line with fewer than two
/// `|` fields is skipped with [`LoadDiagnostic::InvalidRecord`]. The id field
/// must parse as a `u32` (see [`IdPolicy`]).
pub fn decode_roster(content: &str, policy: IdPolicy) -> Result<Decoded, CodecError> {
    let mut decoded = Decoded::default();

    for (index, raw) in content.lines().enumerate() {
        let line = index + 1;
        let fields: Vec<&str> = raw.split(FIELD_SEPARATOR).collect();
        if fields.len() < 2 {
            decoded.diagnostics.push(LoadDiagnostic::InvalidRecord {
                line,
                record: raw.to_string(),
            });
            continue;
        }

        let id = match fields[0].trim().parse::<u32>() {
            Ok(id) => id,
            Err(_) => match policy {
                IdPolicy::Strict => {
                    return Err(CodecError::InvalidId {
                        line,
                        value: fields[0].to_string(),
                    });
                }
                IdPolicy::Lenient => {
                    decoded.diagnostics.push(LoadDiagnostic::InvalidId {
                        line,
                        value: fields[0].to_string(),
                    });
                    continue;
                }
            },
        };

        let mut student = Student::new(id, fields[1]);
        if let Some(segment) = fields.get(2).filter(|s| !s.trim().is_empty()) {
            decode_grades(segment, line, &mut student, &mut decoded.diagnostics);
        }
        decoded.students.push(student);
    }

    Ok(decoded)
}

fn decode_grades(
    segment: &str,
    line: usize,
    student: &mut Student,
    diagnostics: &mut Vec<LoadDiagnostic>,
) {
    for pair in segment.split(PAIR_SEPARATOR) {
        let parts: Vec<&str> = pair.split(GRADE_SEPARATOR).collect();
        // Wrong pair shape is dropped without a diagnostic.
        let [subject, value] = parts.as_slice() else {
            continue;
        };
        match value.trim().parse::<f64>() {
            Ok(grade) => student.grades.set(*subject, grade),
            Err(_) => diagnostics.push(LoadDiagnostic::InvalidGrade {
                line,
                subject: subject.to_string(),
                value: value.to_string(),
            }),
        }
    }
}
