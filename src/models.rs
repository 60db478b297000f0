//! Data models for roster processing
//!
//! This module contains the core data structure for representing a student
//! record, together with its derived average and its two textual renderings.

use crate::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Identifier value used when a student's identifier is unknown
pub const UNKNOWN_ID: i32 = -1;

/// Name-keyed mapping of students produced by parsing a roster file
///
/// Keys are full student names. On a name collision the record parsed last
/// wins; the mapping enforces no uniqueness beyond that.
pub type Roster = HashMap<String, Student>;

// =============================================================================
// Student Record Structure
// =============================================================================

/// A single student record with identifier, name, and grades
///
/// Instances are immutable after construction. Grades are extended through
/// [`Student::with_grade`], which returns a new record rather than mutating
/// the receiver, so accumulated records never share grade storage.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Student {
    /// Identification number; [`UNKNOWN_ID`] when not supplied
    pub num_id: i32,

    /// Full name (e.g., "Blanca Agirrebarrenetse"); the roster key
    pub name: String,

    /// Grades in order of appearance in the source line; may be empty
    grades: Vec<f64>,
}

impl Student {
    /// Create a new student record
    ///
    /// The grades slice is copied element-by-element into the record's own
    /// sequence, so the caller's storage is never aliased.
    pub fn new(name: impl Into<String>, num_id: i32, grades: &[f64]) -> Self {
        Self {
            num_id,
            name: name.into(),
            grades: grades.to_vec(),
        }
    }

    /// Create a student with an unknown identifier and no grades yet
    pub fn with_name(name: impl Into<String>) -> Self {
        Self::new(name, UNKNOWN_ID, &[])
    }

    /// Return a new record with `grade` appended to the grade sequence
    ///
    /// Identifier and name carry over unchanged; the receiver is not
    /// modified. Adding a grade to a student is therefore
    /// `student = student.with_grade(grade)`.
    pub fn with_grade(&self, grade: f64) -> Self {
        let mut grades = self.grades.clone();
        grades.push(grade);
        Self {
            num_id: self.num_id,
            name: self.name.clone(),
            grades,
        }
    }

    /// Grades in source order
    pub fn grades(&self) -> &[f64] {
        &self.grades
    }

    /// Arithmetic mean of the grades, or `0.0` when none are recorded
    ///
    /// The empty case is an explicit rule, not an error.
    pub fn average(&self) -> f64 {
        if self.grades.is_empty() {
            0.0
        } else {
            self.grades.iter().sum::<f64>() / self.grades.len() as f64
        }
    }

    /// Canonical rendering: `Student("NAME", ID, [G1, G2, ...])`
    ///
    /// Feeding the result back through [`Student::from_str`] reproduces an
    /// equal record, for names without embedded quote characters.
    pub fn canonical(&self) -> String {
        format!("Student({:?}, {}, {:?})", self.name, self.num_id, self.grades)
    }
}

/// Pattern for the canonical rendering produced by [`Student::canonical`]
fn canonical_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"^Student\("(?P<name>[^"]*)",\s*(?P<id>-?\d+),\s*\[(?P<grades>[^\]]*)\]\)$"#)
            .expect("canonical student pattern must compile")
    })
}

impl FromStr for Student {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let captures = canonical_pattern().captures(s.trim()).ok_or_else(|| {
            Error::canonical_format(format!("expected Student(\"name\", id, [grades]), got '{s}'"))
        })?;

        let num_id: i32 = captures["id"]
            .parse()
            .map_err(|_| Error::canonical_format(format!("invalid identifier in '{s}'")))?;

        let mut grades = Vec::new();
        for token in captures["grades"].split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            let grade: f64 = token
                .parse()
                .map_err(|_| Error::canonical_format(format!("invalid grade '{token}' in '{s}'")))?;
            grades.push(grade);
        }

        Ok(Self {
            num_id,
            name: captures["name"].to_string(),
            grades,
        })
    }
}

impl fmt::Display for Student {
    /// Tab-separated columns: identifier, name, average to one decimal
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{:.1}", self.num_id, self.name, self.average())
    }
}
