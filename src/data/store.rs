//! In-memory record store backed by a JSON file.
//!
//! The full list is loaded once and rewritten after every successful mutation.
//! Lookups are linear scans; insertion order is display order.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};

use super::error::{StoreError, ValidationError};
use super::models::{validate_marks, validate_year, Field, Student, StudentUpdate, UpdateReport};
use super::storage::Storage;

/// What happened when the backing file was loaded
#[derive(Debug)]
pub enum LoadOutcome {
    /// The file was read and held this many records
    Loaded(usize),
    /// No file yet; the store starts empty
    Missing,
    /// The file could not be read or parsed; the store starts empty
    Recovered(StoreError),
}

/// Owns the student records and keeps the backing file in step with them
pub struct RecordStore {
    storage: Storage,
    students: Vec<Student>,
}

impl RecordStore {
    /// Open the store at `path` and load whatever it already holds
    pub fn open(path: impl Into<PathBuf>) -> (Self, LoadOutcome) {
        let mut store = RecordStore {
            storage: Storage::new(path),
            students: Vec::new(),
        };
        let outcome = store.load();
        (store, outcome)
    }

    /// Replace the in-memory records with the contents of the backing file.
    ///
    /// Never fails: a missing, unreadable or corrupt file leaves the store empty.
    pub fn load(&mut self) -> LoadOutcome {
        match self.storage.read() {
            Ok(Some(students)) => {
                self.students = dedupe_ids(students);
                info!("loaded {} records from {}", self.len(), self.path().display());
                LoadOutcome::Loaded(self.len())
            }
            Ok(None) => {
                self.students.clear();
                info!("no data file at {}, starting empty", self.path().display());
                LoadOutcome::Missing
            }
            Err(err) => {
                self.students.clear();
                warn!("{err}; starting with empty records");
                LoadOutcome::Recovered(err)
            }
        }
    }

    /// Write every record to the backing file. In-memory state is untouched on failure.
    pub fn save(&self) -> Result<(), StoreError> {
        self.storage
            .write(&self.students)
            .inspect_err(|err| error!("{err}"))?;
        debug!(
            "saved {} records to {}",
            self.students.len(),
            self.path().display()
        );
        Ok(())
    }

    pub fn find(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Validate and append a new record, then persist.
    ///
    /// If persisting fails the record stays in memory and the error is returned.
    pub fn add(
        &mut self,
        id: &str,
        name: &str,
        branch: &str,
        year: i64,
        marks: f64,
    ) -> Result<&Student, StoreError> {
        let student = Student::new(id, name, branch, year, marks)?;
        if self.contains(&student.id) {
            return Err(ValidationError::DuplicateId(student.id).into());
        }

        debug!("adding record {}", student.id);
        self.students.push(student);
        self.save()?;

        let index = self.students.len() - 1;
        Ok(&self.students[index])
    }

    /// Apply the supplied fields of `changes` to the record with `id`.
    ///
    /// Each field is validated on its own: an invalid value is reported in
    /// [`UpdateReport::rejected`] while the remaining fields still apply.
    /// The file is rewritten only when something changed.
    pub fn update(&mut self, id: &str, changes: StudentUpdate) -> Result<UpdateReport, StoreError> {
        let student = self
            .students
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let mut report = UpdateReport::default();

        if let Some(name) = non_blank(changes.name) {
            student.name = name;
            report.applied.push(Field::Name);
        }
        if let Some(branch) = non_blank(changes.branch) {
            student.branch = branch;
            report.applied.push(Field::Branch);
        }
        if let Some(year) = changes.year {
            match validate_year(year) {
                Ok(year) => {
                    student.year = year;
                    report.applied.push(Field::Year);
                }
                Err(err) => report.rejected.push((Field::Year, err)),
            }
        }
        if let Some(marks) = changes.marks {
            match validate_marks(marks) {
                Ok(marks) => {
                    student.marks = marks;
                    report.applied.push(Field::Marks);
                }
                Err(err) => report.rejected.push((Field::Marks, err)),
            }
        }

        for (field, err) in &report.rejected {
            warn!("rejected {field} change for {id}: {err}");
        }

        if report.changed() {
            debug!("updated {id}: {:?}", report.applied);
            self.save()?;
        }
        Ok(report)
    }

    /// Remove the first record with `id`, persist, and hand the removed record back
    pub fn delete(&mut self, id: &str) -> Result<Student, StoreError> {
        let index = self
            .students
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let removed = self.students.remove(index);
        debug!("deleted record {}", removed.id);
        self.save()?;
        Ok(removed)
    }

    /// Every record in insertion order
    pub fn list_all(&self) -> &[Student] {
        &self.students
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn path(&self) -> &Path {
        self.storage.path()
    }
}

/// Trimmed text, or `None` if nothing is left
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Keep the first record for each id so loaded data honours uniqueness
fn dedupe_ids(students: Vec<Student>) -> Vec<Student> {
    let mut seen = HashSet::new();
    students
        .into_iter()
        .filter(|s| {
            let first = seen.insert(s.id.clone());
            if !first {
                warn!("dropping duplicate record for id {}", s.id);
            }
            first
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn empty_store() -> (TempDir, RecordStore) {
        let dir = tempfile::tempdir().unwrap();
        let (store, outcome) = RecordStore::open(dir.path().join("students.json"));
        assert!(matches!(outcome, LoadOutcome::Missing));
        (dir, store)
    }

    fn on_disk(store: &RecordStore) -> Vec<Student> {
        Storage::new(store.path()).read().unwrap().unwrap_or_default()
    }

    #[test]
    fn test_add_unused_id() {
        let (_dir, mut store) = empty_store();

        let added = store.add("S1", "Alice", "CS", 2, 88.5).unwrap().clone();

        assert_eq!(store.len(), 1);
        assert_eq!(store.find("S1"), Some(&added));
        assert_eq!(on_disk(&store), vec![added]);
    }

    #[test]
    fn test_add_duplicate_id_leaves_store_unchanged() {
        let (_dir, mut store) = empty_store();
        store.add("S1", "Alice", "CS", 2, 88.5).unwrap();

        let err = store.add("S1", "Other", "ME", 1, 10.0).unwrap_err();

        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::DuplicateId(ref id)) if id == "S1"
        ));
        assert_eq!(store.len(), 1);
        assert_eq!(store.find("S1").unwrap().name, "Alice");
    }

    #[test]
    fn test_add_rejects_invalid_fields() {
        let (_dir, mut store) = empty_store();

        assert!(store.add("", "Alice", "CS", 2, 88.5).is_err());
        assert!(store.add("S1", "Alice", "CS", 0, 88.5).is_err());
        assert!(store.add("S1", "Alice", "CS", -3, 88.5).is_err());
        assert!(store.add("S1", "Alice", "CS", 2, 100.5).is_err());
        assert!(store.add("S1", "Alice", "CS", 2, -1.0).is_err());
        assert!(store.is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_find_missing_id() {
        let (_dir, store) = empty_store();
        assert!(store.find("nope").is_none());
    }

    #[test]
    fn test_delete_existing_id() {
        let (_dir, mut store) = empty_store();
        store.add("S1", "Alice", "CS", 2, 88.5).unwrap();
        store.add("S2", "Bob", "ME", 1, 60.0).unwrap();

        let removed = store.delete("S1").unwrap();

        assert_eq!(removed.id, "S1");
        assert_eq!(store.len(), 1);
        assert_eq!(store.list_all()[0].id, "S2");
        assert_eq!(on_disk(&store).len(), 1);
    }

    #[test]
    fn test_delete_missing_id_leaves_store_unchanged() {
        let (_dir, mut store) = empty_store();
        store.add("S1", "Alice", "CS", 2, 88.5).unwrap();

        let err = store.delete("S2").unwrap_err();

        assert!(matches!(err, StoreError::NotFound(ref id) if id == "S2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_unspecified_fields_are_kept() {
        let (_dir, mut store) = empty_store();
        store.add("S1", "Alice", "CS", 2, 88.5).unwrap();

        let report = store
            .update("S1", StudentUpdate::new().name("   ").year(3))
            .unwrap();

        assert_eq!(report.applied, vec![Field::Year]);
        let student = store.find("S1").unwrap();
        assert_eq!(student.name, "Alice");
        assert_eq!(student.branch, "CS");
        assert_eq!(student.year, 3);
        assert_eq!(student.marks, 88.5);
        assert_eq!(on_disk(&store)[0].year, 3);
    }

    #[test]
    fn test_update_rejects_only_the_invalid_field() {
        let (_dir, mut store) = empty_store();
        store.add("S1", "Alice", "CS", 2, 88.5).unwrap();

        let report = store
            .update(
                "S1",
                StudentUpdate::new().branch("EE").year(0).marks(101.0),
            )
            .unwrap();

        assert_eq!(report.applied, vec![Field::Branch]);
        assert_eq!(report.rejected.len(), 2);
        assert_eq!(report.rejected[0], (Field::Year, ValidationError::InvalidYear(0)));
        let student = store.find("S1").unwrap();
        assert_eq!(student.branch, "EE");
        assert_eq!(student.year, 2);
        assert_eq!(student.marks, 88.5);
    }

    #[test]
    fn test_update_missing_id() {
        let (_dir, mut store) = empty_store();
        let err = store.update("S1", StudentUpdate::new().year(2)).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let (_dir, mut store) = empty_store();
        store.add("S2", "Bob", "ME", 1, 60.0).unwrap();
        store.add("S1", "Alice", "CS", 2, 88.5).unwrap();
        store.add("S3", "Cara", "EE", 4, 99.25).unwrap();

        let (reopened, outcome) = RecordStore::open(store.path());

        assert!(matches!(outcome, LoadOutcome::Loaded(3)));
        assert_eq!(reopened.list_all(), store.list_all());
    }

    #[test]
    fn test_corrupt_file_recovers_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.json");
        std::fs::write(&path, "[{\"Student_id\": ").unwrap();

        let (store, outcome) = RecordStore::open(&path);

        assert!(matches!(outcome, LoadOutcome::Recovered(StoreError::Parse { .. })));
        assert!(store.is_empty());
    }

    #[test]
    fn test_unreadable_path_recovers_empty() {
        let dir = tempfile::tempdir().unwrap();

        let (store, outcome) = RecordStore::open(dir.path());

        assert!(matches!(
            outcome,
            LoadOutcome::Recovered(StoreError::Persistence { .. })
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_drops_duplicate_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.json");
        let records = vec![
            Student::new("S1", "Alice", "CS", 2, 88.5).unwrap(),
            Student::new("S1", "Impostor", "CS", 2, 10.0).unwrap(),
            Student::new("S2", "Bob", "ME", 1, 60.0).unwrap(),
        ];
        Storage::new(&path).write(&records).unwrap();

        let (store, outcome) = RecordStore::open(&path);

        assert!(matches!(outcome, LoadOutcome::Loaded(2)));
        assert_eq!(store.find("S1").unwrap().name, "Alice");
    }

    #[test]
    fn test_save_failure_keeps_memory_state() {
        let dir = tempfile::tempdir().unwrap();
        let (mut store, _) = RecordStore::open(dir.path().join("missing").join("students.json"));

        let err = store.add("S1", "Alice", "CS", 2, 88.5).unwrap_err();

        assert!(matches!(err, StoreError::Persistence { .. }));
        assert_eq!(store.len(), 1);
        assert!(store.contains("S1"));
    }

    #[test]
    fn test_full_lifecycle() {
        let (_dir, mut store) = empty_store();

        store.add("S1", "Alice", "CS", 2, 88.5).unwrap();
        assert_eq!(store.list_all().len(), 1);

        store.update("S1", StudentUpdate::new().year(3)).unwrap();
        assert_eq!(store.find("S1").unwrap().year, 3);

        store.delete("S1").unwrap();
        assert!(store.is_empty());

        let text = std::fs::read_to_string(store.path()).unwrap();
        let on_disk: Vec<serde_json::Value> = serde_json::from_str(&text).unwrap();
        assert!(on_disk.is_empty());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn add_accepts_exactly_the_valid_ranges(year in -5i64..10, marks in -20.0f64..120.0) {
            let (_dir, mut store) = empty_store();
            let valid = year > 0 && (0.0..=100.0).contains(&marks);

            let result = store.add("S1", "Alice", "CS", year, marks);

            prop_assert_eq!(result.is_ok(), valid);
            prop_assert_eq!(store.len(), usize::from(valid));
        }
    }
}
