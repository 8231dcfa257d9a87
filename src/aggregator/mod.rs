//! Grade aggregation.
//!
//! Pure functions over caller-supplied snapshots: weighted averages, the
//! grade needed on the next test, pass rates, distribution buckets, and
//! monthly series. Nothing here performs I/O or validates input; records
//! are checked at data entry by [`crate::validate`].

pub mod average;
pub mod grade;
pub mod report;
pub mod stats;
pub mod types;
pub mod utility;

pub use average::{required_grade, weighted_average};
pub use stats::{PASS_THRESHOLD, distribution, monthly_average, pass_rate};
