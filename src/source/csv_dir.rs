use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::{Snapshot, SnapshotSource};
use crate::model::{Grade, NewGrade, NewSubject, Session, Subject};
use crate::validate::Validate;

pub const SUBJECTS_FILE: &str = "subjects.csv";
pub const GRADES_FILE: &str = "grades.csv";

/// A data directory holding `subjects.csv` and `grades.csv`.
///
/// Both files carry a header row with the record field names. Rows of
/// every owner live in the same files; loads filter by the session's user.
#[derive(Debug, Clone)]
pub struct CsvSource {
    dir: PathBuf,
}

impl CsvSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn subjects_path(&self) -> PathBuf {
        self.dir.join(SUBJECTS_FILE)
    }

    fn grades_path(&self) -> PathBuf {
        self.dir.join(GRADES_FILE)
    }

    /// Reads the snapshot synchronously. [`SnapshotSource::load`] wraps this.
    pub fn load_sync(&self, session: &Session) -> Result<Snapshot> {
        let user_id = session.require_user()?;

        let subjects: Vec<Subject> = read_rows(&self.subjects_path())?
            .into_iter()
            .filter(|s: &Subject| s.user_id == user_id)
            .collect();
        let grades: Vec<Grade> = read_rows(&self.grades_path())?
            .into_iter()
            .filter(|g: &Grade| g.user_id == user_id)
            .collect();

        debug!(
            subjects = subjects.len(),
            grades = grades.len(),
            "Loaded rows from data directory"
        );

        Ok(Snapshot::new(subjects, grades))
    }

    /// Validates and stores a new subject for the session's user.
    #[tracing::instrument(skip(self, session, draft), fields(dir = %self.dir.display()))]
    pub fn append_subject(&self, session: &Session, draft: NewSubject) -> Result<Subject> {
        let user_id = session.require_user()?;
        let subject = draft.into_subject(user_id);
        subject.validate()?;

        append_row(&self.subjects_path(), &subject)?;
        info!(subject_id = %subject.id, name = %subject.name, "Subject added");
        Ok(subject)
    }

    /// Validates and stores a new grade. The subject must belong to the
    /// session's user.
    #[tracing::instrument(skip(self, session, draft), fields(dir = %self.dir.display()))]
    pub fn append_grade(&self, session: &Session, draft: NewGrade) -> Result<Grade> {
        let user_id = session.require_user()?;
        let grade = draft.into_grade(user_id);
        grade.validate()?;

        let snapshot = self.load_sync(session)?;
        if snapshot.subject(&grade.subject_id).is_none() {
            anyhow::bail!("unknown subject '{}'", grade.subject_id);
        }

        append_row(&self.grades_path(), &grade)?;
        info!(grade_id = %grade.id, subject_id = %grade.subject_id, value = grade.grade, "Grade added");
        Ok(grade)
    }
}

#[async_trait::async_trait]
impl SnapshotSource for CsvSource {
    #[tracing::instrument(skip(self, session), fields(dir = %self.dir.display()))]
    async fn load(&self, session: &Session) -> Result<Snapshot> {
        self.load_sync(session)
    }
}

/// Reads every row of a CSV file. A missing file has no rows.
fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        debug!(path = %path.display(), "CSV file missing, treating as empty");
        return Ok(Vec::new());
    }

    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut rdr = csv::Reader::from_reader(file);

    let mut rows = Vec::new();
    for (line, result) in rdr.deserialize().enumerate() {
        let record: T =
            result.with_context(|| format!("bad row {} in {}", line + 1, path.display()))?;
        rows.push(record);
    }

    Ok(rows)
}

/// Appends one record, writing the header only when the file is new.
fn append_row<T: Serialize>(path: &Path, record: &T) -> Result<()> {
    let file_exists = path.exists();
    debug!(path = %path.display(), file_exists, "Appending CSV record");

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);

    writer.serialize(record)?;
    writer.flush()?;

    Ok(())
}
