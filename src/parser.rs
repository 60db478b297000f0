//! Roster file parsing
//!
//! This module turns a line-oriented roster file into a name-keyed
//! [`Roster`]. Each line is attempted against a single pattern with three
//! named capture groups (identifier, name, grades); lines that do not match
//! are skipped silently so that headers, separators, and blank lines never
//! fail a parse. Only the file-open and read failures propagate.

use crate::models::{Roster, Student};
use crate::{Error, Result};
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// Line pattern for one student record
///
/// Matches `<identifier> <name, possibly multi-word> <grade> [<grade> ...]`
/// with fields separated by runs of whitespace (spaces or tabs). The name
/// group is non-greedy so trailing grade tokens are not absorbed into it.
/// The grade block must be closed by whitespace or the end of the line
/// (lines are read without their terminator).
const LINE_PATTERN: &str =
    r"(?P<id>\d+)\s+(?P<name>[\w\s]+?)\s+(?P<grades>[\d.]+(?:[ \t]+[\d.]+)*)(?:\s|$)";

// =============================================================================
// Parsing Statistics
// =============================================================================

/// Parsing result with the accumulated roster and basic statistics
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Name-keyed mapping of successfully parsed students
    pub roster: Roster,

    /// Basic parsing statistics
    pub stats: ParseStats,
}

/// Simple parsing statistics
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Total number of lines read from the file
    pub lines_total: usize,

    /// Number of student records successfully parsed
    pub records_parsed: usize,

    /// Number of lines skipped because they did not match the line pattern
    pub lines_skipped: usize,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self {
            lines_total: 0,
            records_parsed: 0,
            lines_skipped: 0,
        }
    }

    /// Calculate success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.lines_total == 0 {
            0.0
        } else {
            (self.records_parsed as f64 / self.lines_total as f64) * 100.0
        }
    }
}

impl Default for ParseStats {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Roster Parser
// =============================================================================

/// Parser for whitespace-delimited student roster files
///
/// The parser holds the compiled line pattern and no other state; each call
/// to [`RosterParser::parse_file`] produces an independent roster, so one
/// parser instance can be reused across files.
#[derive(Debug)]
pub struct RosterParser {
    line_pattern: Regex,
}

impl RosterParser {
    /// Create a new parser with the line pattern compiled once
    pub fn new() -> Self {
        Self {
            line_pattern: Regex::new(LINE_PATTERN).expect("roster line pattern must compile"),
        }
    }

    /// Attempt to extract a student record from a single line
    ///
    /// Returns `None` for lines that do not match the pattern, and also for
    /// lines whose captured tokens fail numeric conversion. The skip policy
    /// lives here, isolated from file I/O.
    pub fn parse_line(&self, line: &str) -> Option<Student> {
        let captures = self.line_pattern.captures(line)?;

        let num_id: i32 = match captures["id"].parse() {
            Ok(id) => id,
            Err(_) => {
                debug!("Skipping line with unparseable identifier: {line:?}");
                return None;
            }
        };

        let mut grades = Vec::new();
        for token in captures["grades"].split_whitespace() {
            match token.parse::<f64>() {
                Ok(grade) => grades.push(grade),
                Err(_) => {
                    debug!("Skipping line with unparseable grade {token:?}: {line:?}");
                    return None;
                }
            }
        }

        Some(Student::new(&captures["name"], num_id, &grades))
    }

    /// Parse a roster file and return the roster with statistics
    ///
    /// The file handle is owned by this call and released on every exit
    /// path. A path that cannot be opened is a propagated error; a line
    /// that does not match is counted as skipped and dropped.
    pub fn parse_file(&self, path: &Path) -> Result<ParseResult> {
        info!("Parsing roster file: {}", path.display());

        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::file_not_found(path.display().to_string()),
            _ => Error::io(format!("Failed to open roster file {}", path.display()), e),
        })?;

        let mut roster = Roster::new();
        let mut stats = ParseStats::new();

        for line in BufReader::new(file).lines() {
            let line = line
                .map_err(|e| Error::io(format!("Failed to read from {}", path.display()), e))?;
            stats.lines_total += 1;

            match self.parse_line(&line) {
                Some(student) => {
                    // Name collisions overwrite: last record wins
                    roster.insert(student.name.clone(), student);
                    stats.records_parsed += 1;
                }
                None => {
                    stats.lines_skipped += 1;
                }
            }
        }

        info!(
            "Parsed {} students from {} lines ({} skipped)",
            stats.records_parsed, stats.lines_total, stats.lines_skipped
        );

        Ok(ParseResult { roster, stats })
    }
}

impl Default for RosterParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a roster file into a name-keyed mapping of students
///
/// This is the library entry point for callers that only want the mapping;
/// [`RosterParser::parse_file`] additionally reports statistics.
pub fn read_roster(path: impl AsRef<Path>) -> Result<Roster> {
    let result = RosterParser::new().parse_file(path.as_ref())?;
    Ok(result.roster)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> RosterParser {
        RosterParser::new()
    }

    mod line_tests {
        use super::*;

        #[test]
        fn test_parse_line_tab_separated() {
            let student = parser()
                .parse_line("171\tBlanca Agirrebarrenetse\t9.5")
                .unwrap();

            assert_eq!(student.num_id, 171);
            assert_eq!(student.name, "Blanca Agirrebarrenetse");
            assert_eq!(student.grades(), &[9.5]);
        }

        #[test]
        fn test_parse_line_space_separated() {
            let student = parser()
                .parse_line("23   Carles Balcells de Lara   4.9")
                .unwrap();

            assert_eq!(student.num_id, 23);
            assert_eq!(student.name, "Carles Balcells de Lara");
            assert_eq!(student.grades(), &[4.9]);
        }

        #[test]
        fn test_parse_line_multiple_grades() {
            let student = parser()
                .parse_line("68\tDavid Garcia Fuster\t7.0 8.5 6.25")
                .unwrap();

            assert_eq!(student.num_id, 68);
            assert_eq!(student.name, "David Garcia Fuster");
            assert_eq!(student.grades(), &[7.0, 8.5, 6.25]);
        }

        #[test]
        fn test_parse_line_trailing_whitespace() {
            let student = parser().parse_line("171\tBlanca Agirrebarrenetse\t9.5 \t").unwrap();
            assert_eq!(student.grades(), &[9.5]);
        }

        #[test]
        fn test_name_does_not_absorb_grades() {
            // Non-greedy name: the grade tokens stay out of the name capture
            let student = parser().parse_line("5 Ana Maria 9.0 8.0").unwrap();
            assert_eq!(student.name, "Ana Maria");
            assert_eq!(student.grades(), &[9.0, 8.0]);
        }

        #[test]
        fn test_blank_line_skipped() {
            assert!(parser().parse_line("").is_none());
            assert!(parser().parse_line("   \t  ").is_none());
        }

        #[test]
        fn test_header_line_skipped() {
            assert!(parser().parse_line("id\tname\tgrades").is_none());
            assert!(parser().parse_line("--------------------").is_none());
        }

        #[test]
        fn test_line_without_grades_skipped() {
            assert!(parser().parse_line("171\tBlanca Agirrebarrenetse").is_none());
        }

        #[test]
        fn test_malformed_grade_token_skipped() {
            // Matches the character class but is not a valid float
            assert!(parser().parse_line("171\tBlanca Agirrebarrenetse\t9..5").is_none());
        }
    }

    mod file_tests {
        use super::*;
        use std::io::Write;

        #[test]
        fn test_parse_file_counts_and_roster() {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            writeln!(file, "id\tname\tgrade").unwrap();
            writeln!(file, "171\tBlanca Agirrebarrenetse\t9.5").unwrap();
            writeln!(file).unwrap();
            writeln!(file, "23\tCarles Balcells de Lara\t4.9").unwrap();

            let result = parser().parse_file(file.path()).unwrap();

            assert_eq!(result.stats.lines_total, 4);
            assert_eq!(result.stats.records_parsed, 2);
            assert_eq!(result.stats.lines_skipped, 2);
            assert_eq!(result.stats.success_rate(), 50.0);
            assert_eq!(result.roster.len(), 2);
        }

        #[test]
        fn test_duplicate_name_last_wins() {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            writeln!(file, "1\tAna Maria\t5.0").unwrap();
            writeln!(file, "2\tAna Maria\t9.0").unwrap();

            let result = parser().parse_file(file.path()).unwrap();

            assert_eq!(result.roster.len(), 1);
            let student = &result.roster["Ana Maria"];
            assert_eq!(student.num_id, 2);
            assert_eq!(student.grades(), &[9.0]);
        }

        #[test]
        fn test_missing_file_is_an_error() {
            let result = parser().parse_file(Path::new("/nonexistent/roster.txt"));
            assert!(matches!(result, Err(Error::FileNotFound { .. })));
        }
    }
}
