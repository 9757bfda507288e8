//! The roster store: CRUD over students with write-through persistence.
//!
//! The store loads its backend once on construction and rewrites the whole
//! backend after every successful mutation. Lookups are linear scans.

use crate::codec::{decode_roster, encode_roster, IdPolicy, LoadDiagnostic};
use crate::error::RosterError;
use crate::model::Student;
use crate::traits::RosterStorage;

/// Outcome of [`RosterStore::list_students`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentListing {
    /// The roster has no students.
    Empty,
    /// One summary line per student, in roster order.
    Summaries(Vec<String>),
}

/// Owns the roster and its storage backend.
#[derive(Debug)]
pub struct RosterStore<S: RosterStorage> {
    storage: S,
    policy: IdPolicy,
    students: Vec<Student>,
    diagnostics: Vec<LoadDiagnostic>,
}

impl<S: RosterStorage> RosterStore<S> {
    /// Load the roster from `storage`.
    ///
    /// Skipped records and grades are available afterwards through
    /// [`RosterStore::load_diagnostics`]. Under [`IdPolicy::Strict`] an
    /// unparseable id fails the whole load.
    pub fn open(storage: S, policy: IdPolicy) -> Result<Self, RosterError> {
        let mut store = Self {
            storage,
            policy,
            students: Vec::new(),
            diagnostics: Vec::new(),
        };
        store.reload()?;
        Ok(store)
    }

    /// Discard the in-memory roster and load it again from storage.
    pub fn reload(&mut self) -> Result<(), RosterError> {
        let decoded = match self.storage.load()? {
            Some(content) => decode_roster(&content, self.policy)?,
            None => Default::default(),
        };

        for diagnostic in &decoded.diagnostics {
            tracing::warn!(location = %self.storage.location(), "{diagnostic}");
        }
        tracing::info!(
            location = %self.storage.location(),
            students = decoded.students.len(),
            skipped = decoded.diagnostics.len(),
            "roster loaded"
        );

        self.students = decoded.students;
        self.diagnostics = decoded.diagnostics;
        Ok(())
    }

    /// Add a student with no grades and return its id.
    ///
    /// The id is one past the id of the last student in the roster (or 1 for
    /// an empty roster). It is not the maximum id, so deleting the last
    /// student lets its id be handed out again. Fails with
    /// [`RosterError::IdsExhausted`], leaving the roster untouched, when the
    /// last id is `u32::MAX`.
    pub fn add_student(&mut self, name: impl Into<String>) -> Result<u32, RosterError> {
        let id = match self.students.last() {
            Some(last) => last
                .id
                .checked_add(1)
                .ok_or(RosterError::IdsExhausted { last: last.id })?,
            None => 1,
        };
        self.students.push(Student::new(id, name));
        self.persist()?;
        Ok(id)
    }

    /// Rename the first student with `id`.
    pub fn update_student(&mut self, id: u32, name: impl Into<String>) -> Result<(), RosterError> {
        let student = self.find_mut(id)?;
        student.name = name.into();
        self.persist()
    }

    /// Remove every student with `id` and return how many were removed.
    ///
    /// Persists even when nothing matched.
    pub fn delete_student(&mut self, id: u32) -> Result<usize, RosterError> {
        let before = self.students.len();
        self.students.retain(|s| s.id != id);
        let removed = before - self.students.len();
        self.persist()?;
        Ok(removed)
    }

    /// Set or overwrite `subject`'s grade on the first student with `id`.
    pub fn add_grade(
        &mut self,
        id: u32,
        subject: impl Into<String>,
        grade: f64,
    ) -> Result<(), RosterError> {
        let student = self.find_mut(id)?;
        student.grades.set(subject, grade);
        self.persist()
    }

    /// Summaries of every student, or [`StudentListing::Empty`].
    pub fn list_students(&self) -> StudentListing {
        if self.students.is_empty() {
            return StudentListing::Empty;
        }
        StudentListing::Summaries(self.students.iter().map(Student::summary).collect())
    }

    /// Full report card for the first student with `id`.
    pub fn report_for(&self, id: u32) -> Result<String, RosterError> {
        self.get(id)
            .map(Student::report_card)
            .ok_or(RosterError::NotFound { id })
    }

    /// First student with `id`, if any.
    pub fn get(&self, id: u32) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    /// All students in roster order.
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Problems skipped during the most recent load.
    pub fn load_diagnostics(&self) -> &[LoadDiagnostic] {
        &self.diagnostics
    }

    pub fn policy(&self) -> IdPolicy {
        self.policy
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn find_mut(&mut self, id: u32) -> Result<&mut Student, RosterError> {
        self.students
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(RosterError::NotFound { id })
    }

    fn persist(&mut self) -> Result<(), RosterError> {
        self.storage.save(&encode_roster(&self.students))?;
        Ok(())
    }
}

#[cfg(test)]
impl<S: RosterStorage> RosterStore<S> {
    /// Push a student without id assignment or persistence.
    fn push_raw(&mut self, student: Student) {
        self.students.push(student);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn empty_store() -> RosterStore<MemoryStorage> {
        RosterStore::open(MemoryStorage::new(), IdPolicy::Strict).unwrap()
    }

    fn seeded(contents: &str) -> RosterStore<MemoryStorage> {
        RosterStore::open(MemoryStorage::with_contents(contents), IdPolicy::Strict).unwrap()
    }

    #[test]
    fn first_student_gets_id_one() {
        let mut store = empty_store();
        assert_eq!(store.add_student("Ann").unwrap(), 1);
        assert_eq!(store.add_student("Bob").unwrap(), 2);
        assert_eq!(store.storage().contents(), Some("1|Ann|\n2|Bob|\n"));
    }

    #[test]
    fn id_follows_last_student_not_maximum() {
        let mut store = empty_store();
        store.add_student("Ann").unwrap();
        store.add_student("Bob").unwrap();
        store.delete_student(2).unwrap();
        assert_eq!(store.add_student("Cy").unwrap(), 2);

        let mut store = seeded("7|Ann|\n3|Bob|\n");
        assert_eq!(store.add_student("Cy").unwrap(), 4);
    }

    #[test]
    fn add_fails_when_ids_are_exhausted() {
        let mut store = seeded("4294967295|Ann|\n");
        let err = store.add_student("Bob").unwrap_err();
        assert!(matches!(err, RosterError::IdsExhausted { last: u32::MAX }));
        assert_eq!(store.len(), 1);
        assert_eq!(store.storage().save_count(), 0);
        assert_eq!(store.storage().contents(), Some("4294967295|Ann|\n"));
    }

    #[test]
    fn every_mutation_persists() {
        let mut store = empty_store();
        store.add_student("Ann").unwrap();
        store.update_student(1, "Anne").unwrap();
        store.add_grade(1, "Math", 90.0).unwrap();
        store.delete_student(1).unwrap();
        assert_eq!(store.storage().save_count(), 4);
        assert_eq!(store.storage().contents(), Some(""));
    }

    #[test]
    fn update_renames_first_match() {
        let mut store = seeded("1|Ann|Math:90\n");
        store.update_student(1, "Anne").unwrap();
        assert_eq!(store.get(1).unwrap().name, "Anne");
        assert_eq!(store.storage().contents(), Some("1|Anne|Math:90\n"));
    }

    #[test]
    fn not_found_is_a_no_op_without_persisting() {
        let mut store = seeded("1|Ann|\n");
        let err = store.update_student(9, "Nobody").unwrap_err();
        assert!(matches!(err, RosterError::NotFound { id: 9 }));
        let err = store.add_grade(9, "Math", 50.0).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.storage().save_count(), 0);
        assert_eq!(store.students(), &[Student::new(1, "Ann")]);
    }

    #[test]
    fn delete_then_mutate_reports_not_found() {
        let mut store = empty_store();
        let id = store.add_student("Ann").unwrap();
        assert_eq!(store.delete_student(id).unwrap(), 1);
        assert!(store.update_student(id, "Anne").unwrap_err().is_not_found());
        assert!(store.add_grade(id, "Math", 1.0).unwrap_err().is_not_found());
        assert!(store.report_for(id).unwrap_err().is_not_found());
    }

    #[test]
    fn delete_missing_id_still_persists() {
        let mut store = seeded("1|Ann|\n");
        assert_eq!(store.delete_student(42).unwrap(), 0);
        assert_eq!(store.storage().save_count(), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn delete_removes_all_duplicates() {
        let mut store = seeded("1|Ann|\n2|Bob|\n");
        store.push_raw(Student::new(1, "Ann again"));
        assert_eq!(store.delete_student(1).unwrap(), 2);
        assert_eq!(store.students(), &[Student::new(2, "Bob")]);
    }

    #[test]
    fn duplicate_ids_update_only_first() {
        let mut store = seeded("1|Ann|\n1|Twin|\n");
        store.update_student(1, "Anne").unwrap();
        assert_eq!(store.students()[0].name, "Anne");
        assert_eq!(store.students()[1].name, "Twin");
    }

    #[test]
    fn add_grade_overwrites_subject() {
        let mut store = empty_store();
        store.add_student("Ann").unwrap();
        store.add_grade(1, "Math", 60.0).unwrap();
        store.add_grade(1, "Bio", 80.0).unwrap();
        store.add_grade(1, "Math", 100.0).unwrap();
        let ann = store.get(1).unwrap();
        assert_eq!(ann.grades.get("Math"), Some(100.0));
        assert_eq!(ann.calculate_gpa(), 90.0);
        assert_eq!(store.storage().contents(), Some("1|Ann|Math:100,Bio:80\n"));
    }

    #[test]
    fn empty_listing_is_distinct() {
        let store = empty_store();
        assert_eq!(store.list_students(), StudentListing::Empty);
        assert!(store.is_empty());
    }

    #[test]
    fn listing_is_in_roster_order() {
        let store = seeded("2|Bob|Math:80\n1|Ann|\n");
        assert_eq!(
            store.list_students(),
            StudentListing::Summaries(vec![
                "ID: 2, Name: Bob, GPA: 80.00".into(),
                "ID: 1, Name: Ann, GPA: 0.00".into(),
            ])
        );
    }

    #[test]
    fn report_contains_grades_and_gpa() {
        let store = seeded("4|Dee|Math:90,Bio:85\n");
        let report = store.report_for(4).unwrap();
        assert!(report.contains("Dee"));
        assert!(report.contains("ID: 4"));
        assert!(report.contains("Math: 90"));
        assert!(report.contains("Bio: 85"));
        assert!(report.contains("GPA: 87.50"));
    }

    #[test]
    fn load_diagnostics_are_collected() {
        let store = seeded("5\n3|Ann|Math:90,Bio:abc\n");
        assert_eq!(store.len(), 1);
        assert_eq!(store.load_diagnostics().len(), 2);
        assert_eq!(store.get(3).unwrap().grades.len(), 1);
    }

    #[test]
    fn strict_load_fails_on_bad_id() {
        let err = RosterStore::open(MemoryStorage::with_contents("abc|Ann|\n"), IdPolicy::Strict)
            .unwrap_err();
        assert!(matches!(err, RosterError::Codec(_)));
    }

    #[test]
    fn lenient_load_skips_bad_id() {
        let store = RosterStore::open(
            MemoryStorage::with_contents("abc|Ann|\n2|Bob|\n"),
            IdPolicy::Lenient,
        )
        .unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.policy(), IdPolicy::Lenient);
        assert!(matches!(
            store.load_diagnostics(),
            [LoadDiagnostic::InvalidId { line: 1, .. }]
        ));
    }

    #[test]
    fn reload_picks_up_saved_state() {
        let mut store = empty_store();
        store.add_student("Ann").unwrap();
        store.add_grade(1, "Math", 75.5).unwrap();
        let before = store.students().to_vec();
        store.reload().unwrap();
        assert_eq!(store.students(), before.as_slice());
    }
}
