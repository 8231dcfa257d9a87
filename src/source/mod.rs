//! Loading owner-scoped snapshots of subjects and grades.
//!
//! [`SnapshotSource`] is the async trait every backend implements.
//! [`CsvSource`] reads (and appends to) a local data directory.
//! [`RestSource`] reads from the hosted REST backend.

mod csv_dir;
mod rest;

pub use self::csv_dir::CsvSource;
pub use self::rest::RestSource;

use anyhow::Result;
use std::collections::HashSet;
use tracing::warn;

use crate::model::{Grade, Session, Subject};
use crate::validate::Validate;

/// An immutable view of one user's subjects and grades.
///
/// Subjects are ordered by name, grades by date with the newest first.
/// Records that fail [`Validate`] are dropped on construction, and so are
/// grades whose subject is missing (including subjects dropped as invalid).
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    subjects: Vec<Subject>,
    grades: Vec<Grade>,
}

impl Snapshot {
    pub fn new(mut subjects: Vec<Subject>, mut grades: Vec<Grade>) -> Self {
        subjects.retain(|s| match s.validate() {
            Ok(()) => true,
            Err(e) => {
                warn!(subject_id = %s.id, error = %e, "Dropped invalid subject");
                false
            }
        });
        grades.retain(|g| match g.validate() {
            Ok(()) => true,
            Err(e) => {
                warn!(grade_id = %g.id, error = %e, "Dropped invalid grade");
                false
            }
        });

        subjects.sort_by(|a, b| a.name.cmp(&b.name));

        let known: HashSet<&str> = subjects.iter().map(|s| s.id.as_str()).collect();
        let before = grades.len();
        grades.retain(|g| known.contains(g.subject_id.as_str()));
        let orphaned = before - grades.len();
        if orphaned > 0 {
            warn!(orphaned, "Dropped grades without a subject");
        }

        grades.sort_by(|a, b| b.test_date.cmp(&a.test_date));

        Self { subjects, grades }
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn grades(&self) -> &[Grade] {
        &self.grades
    }

    pub fn subject(&self, id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    /// Grades of one subject, newest first.
    pub fn grades_for(&self, subject_id: &str) -> Vec<Grade> {
        self.grades
            .iter()
            .filter(|g| g.subject_id == subject_id)
            .cloned()
            .collect()
    }
}

/// A place snapshots can be loaded from.
#[async_trait::async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Loads everything owned by the session's user.
    ///
    /// # Errors
    ///
    /// Fails for anonymous sessions and on any read or decode error.
    async fn load(&self, session: &Session) -> Result<Snapshot>;
}
