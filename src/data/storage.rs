//! JSON file storage for student records.
//!
//! File format:
//! - A single JSON array of objects
//! - Keys: `Student_id`, `Name`, `Branch`, `Year`, `Marks`
//! - Written with 4-space indentation, rewritten in full on every save

use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::error::StoreError;
use super::models::Student;

const INDENT: &[u8] = b"    ";

/// Storage interface for the backing JSON file
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    /// Create a new Storage instance pointing at the backing file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Storage { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record from the backing file.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn read(&self) -> Result<Option<Vec<Student>>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StoreError::reading(&self.path, err)),
        };

        let students: Vec<Student> =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| {
                if source.is_io() {
                    StoreError::reading(&self.path, source.into())
                } else {
                    StoreError::Parse {
                        path: self.path.clone(),
                        source,
                    }
                }
            })?;

        Ok(Some(students))
    }

    /// Overwrite the backing file with `students`
    pub fn write(&self, students: &[Student]) -> Result<(), StoreError> {
        let file = File::create(&self.path).map_err(|err| StoreError::writing(&self.path, err))?;
        let mut writer = BufWriter::new(file);

        let formatter = PrettyFormatter::with_indent(INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
        students
            .serialize(&mut serializer)
            .map_err(|err| StoreError::writing(&self.path, err.into()))?;

        writer
            .flush()
            .map_err(|err| StoreError::writing(&self.path, err))
    }
}
