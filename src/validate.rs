//! Data-entry checks applied before records or queries reach the aggregator.

use thiserror::Error;

use crate::model::{Grade, Subject};

pub const MIN_GRADE: f64 = 1.0;
pub const MAX_GRADE: f64 = 10.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} must be between 1 and 10, got {value}")]
    OutOfRange { field: &'static str, value: f64 },

    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} cannot be empty")]
    Empty { field: &'static str },
}

pub type Result<T> = std::result::Result<T, ValidationError>;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_grade_value(field: &'static str, value: f64) -> Result<()> {
    if !(MIN_GRADE..=MAX_GRADE).contains(&value) {
        return Err(ValidationError::OutOfRange { field, value });
    }
    Ok(())
}

pub fn validate_weight(field: &'static str, value: f64) -> Result<()> {
    // NaN fails this comparison too
    if !(value > 0.0 && value.is_finite()) {
        return Err(ValidationError::NotPositive { field, value });
    }
    Ok(())
}

pub fn validate_non_empty(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}

impl Validate for Grade {
    fn validate(&self) -> Result<()> {
        validate_non_empty("subject_id", &self.subject_id)?;
        validate_grade_value("grade", self.grade)?;
        validate_weight("weight", self.weight)
    }
}

impl Validate for Subject {
    fn validate(&self) -> Result<()> {
        validate_non_empty("name", &self.name)?;
        validate_non_empty("color", &self.color)?;
        if let Some(target) = self.target_grade {
            validate_grade_value("target_grade", target)?;
        }
        Ok(())
    }
}

/// A checked request for the grade needed on the next test.
///
/// Construction is the only way to obtain one, so `next_weight` is
/// always positive by the time [`crate::aggregator::average::required_grade`]
/// divides by it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequiredGradeQuery {
    target: f64,
    next_weight: f64,
}

impl RequiredGradeQuery {
    pub fn new(target: f64, next_weight: f64) -> Result<Self> {
        validate_grade_value("target", target)?;
        validate_weight("next_weight", next_weight)?;
        Ok(Self {
            target,
            next_weight,
        })
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn next_weight(&self) -> f64 {
        self.next_weight
    }
}
