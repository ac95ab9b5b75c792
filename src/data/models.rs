//! Data models representing a student record and the changes applied to it.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// Lowest accepted mark
pub const MIN_MARKS: f64 = 0.0;
/// Highest accepted mark
pub const MAX_MARKS: f64 = 100.0;

/// A single student record as stored in the backing file
///
/// Field names on disk follow the established file format
/// (`Student_id`, `Name`, `Branch`, `Year`, `Marks`). Unknown keys are ignored on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    #[serde(rename = "Student_id")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Branch")]
    pub branch: String,
    #[serde(rename = "Year")]
    pub year: i64,
    #[serde(rename = "Marks")]
    pub marks: f64,
}

impl Student {
    /// Create a validated record.
    ///
    /// Text fields are trimmed. Uniqueness of the id is a store concern and is not checked here.
    pub fn new(
        id: &str,
        name: &str,
        branch: &str,
        year: i64,
        marks: f64,
    ) -> Result<Self, ValidationError> {
        Ok(Student {
            id: validate_id(id)?,
            name: name.trim().to_string(),
            branch: branch.trim().to_string(),
            year: validate_year(year)?,
            marks: validate_marks(marks)?,
        })
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID:{},Name:{},Branch:{},Year:{},Marks:{}",
            self.id,
            self.name,
            self.branch,
            self.year,
            format_marks(self.marks)
        )
    }
}

/// Trim an id and reject it if nothing is left
pub fn validate_id(id: &str) -> Result<String, ValidationError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ValidationError::EmptyId);
    }
    Ok(id.to_string())
}

pub fn validate_year(year: i64) -> Result<i64, ValidationError> {
    if year <= 0 {
        return Err(ValidationError::InvalidYear(year));
    }
    Ok(year)
}

/// Marks must be finite and within `[MIN_MARKS, MAX_MARKS]`, both ends inclusive
pub fn validate_marks(marks: f64) -> Result<f64, ValidationError> {
    if !marks.is_finite() || !(MIN_MARKS..=MAX_MARKS).contains(&marks) {
        return Err(ValidationError::MarksOutOfRange(marks));
    }
    Ok(marks)
}

/// Render marks the way they are shown in listings: whole numbers keep one decimal place
pub fn format_marks(marks: f64) -> String {
    if marks.is_finite() && marks.fract() == 0.0 {
        format!("{marks:.1}")
    } else {
        format!("{marks}")
    }
}

/// The editable fields of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Branch,
    Year,
    Marks,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Field::Name => "name",
            Field::Branch => "branch",
            Field::Year => "year",
            Field::Marks => "marks",
        };
        f.write_str(label)
    }
}

/// A partial update to a record. `None` leaves the field unchanged.
///
/// A name or branch that is blank after trimming is treated the same as `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentUpdate {
    pub name: Option<String>,
    pub branch: Option<String>,
    pub year: Option<i64>,
    pub marks: Option<f64>,
}

impl StudentUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    pub fn year(mut self, year: i64) -> Self {
        self.year = Some(year);
        self
    }

    pub fn marks(mut self, marks: f64) -> Self {
        self.marks = Some(marks);
        self
    }
}

/// Outcome of applying a [`StudentUpdate`]: which fields changed and which were refused
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateReport {
    pub applied: Vec<Field>,
    pub rejected: Vec<(Field, ValidationError)>,
}

impl UpdateReport {
    /// True if at least one field was written
    pub fn changed(&self) -> bool {
        !self.applied.is_empty()
    }
}
