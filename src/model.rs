//! Subject and grade records as stored by the backend.
//!
//! Field names follow the backend's column names so the same types
//! deserialize from both the CSV data directory and REST responses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Display colors offered for new subjects. The first entry is the default.
pub const SUBJECT_COLORS: [&str; 10] = [
    "#3B82F6", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6", "#F97316", "#06B6D4", "#84CC16",
    "#EC4899", "#6B7280",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub color: String,
    pub target_grade: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub id: String,
    pub user_id: String,
    pub subject_id: String,
    /// Numeric value in `[1, 10]`.
    pub grade: f64,
    #[serde(default = "default_weight")]
    pub weight: f64,
    pub test_type: TestType,
    pub description: Option<String>,
    pub test_date: NaiveDate,
}

fn default_weight() -> f64 {
    1.0
}

/// Kind of assessment a grade was earned on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TestType {
    #[default]
    #[serde(rename = "SO")]
    So,
    #[serde(rename = "PW")]
    Pw,
    Toets,
    Mondeling,
    Presentatie,
    Praktijk,
    Overig,
}

impl TestType {
    pub const ALL: [TestType; 7] = [
        TestType::So,
        TestType::Pw,
        TestType::Toets,
        TestType::Mondeling,
        TestType::Presentatie,
        TestType::Praktijk,
        TestType::Overig,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TestType::So => "SO",
            TestType::Pw => "PW",
            TestType::Toets => "Toets",
            TestType::Mondeling => "Mondeling",
            TestType::Presentatie => "Presentatie",
            TestType::Praktijk => "Praktijk",
            TestType::Overig => "Overig",
        }
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TestType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let known: Vec<_> = TestType::ALL.iter().map(TestType::as_str).collect();
                format!("unknown test type '{s}', expected one of {}", known.join(", "))
            })
    }
}

/// User input for a subject that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubject {
    pub name: String,
    pub color: Option<String>,
    pub target_grade: Option<f64>,
}

impl NewSubject {
    /// Assigns an id and owner. The name is trimmed and the color falls
    /// back to the first palette entry.
    pub fn into_subject(self, user_id: &str) -> Subject {
        Subject {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: self.name.trim().to_string(),
            color: self.color.unwrap_or_else(|| SUBJECT_COLORS[0].to_string()),
            target_grade: self.target_grade,
        }
    }
}

/// User input for a grade that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGrade {
    pub subject_id: String,
    pub grade: f64,
    pub weight: f64,
    pub test_type: TestType,
    pub description: Option<String>,
    pub test_date: NaiveDate,
}

impl NewGrade {
    /// Assigns an id and owner. Blank descriptions are stored as absent.
    pub fn into_grade(self, user_id: &str) -> Grade {
        Grade {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            subject_id: self.subject_id,
            grade: self.grade,
            weight: self.weight,
            test_type: self.test_type,
            description: self.description.filter(|d| !d.trim().is_empty()),
            test_date: self.test_date,
        }
    }
}

/// Who the current caller is. Snapshot queries are scoped to the
/// authenticated user; anonymous callers get nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    Authenticated { user_id: String },
    Anonymous,
}

impl Session {
    /// Builds a session from an optional user id, treating blank ids as anonymous.
    pub fn from_user_id(user_id: Option<String>) -> Self {
        match user_id {
            Some(id) if !id.trim().is_empty() => Session::Authenticated {
                user_id: id.trim().to_string(),
            },
            _ => Session::Anonymous,
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            Session::Authenticated { user_id } => Some(user_id),
            Session::Anonymous => None,
        }
    }

    /// Returns the owner id or fails for anonymous sessions.
    pub fn require_user(&self) -> anyhow::Result<&str> {
        self.user_id()
            .ok_or_else(|| anyhow::anyhow!("not signed in: set --user or GRADE_TRACKER_USER_ID"))
    }
}
