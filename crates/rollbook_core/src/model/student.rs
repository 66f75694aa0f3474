//! Student domain model.
//!
//! # Responsibility
//! - Define the canonical student record shared by both store variants.
//! - Enforce the required-field constraints on every write path.
//!
//! # Invariants
//! - `id` is store-assigned, stable, and never reused within a store lifetime.
//! - `roll_no` is caller-chosen and unique across live records.
//! - `created_at` is assigned once by the store and never mutated.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned surrogate identifier for a student record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type StudentId = i64;

/// Lookup key accepted by operations that address a student either way.
///
/// The roll number is the caller-facing identifier; the surrogate id is the
/// store-facing one. `NotFound` errors carry this key so messages can name
/// whichever form the caller used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentKey {
    /// Store-assigned surrogate id.
    Id(StudentId),
    /// Caller-chosen roll number.
    RollNo(String),
}

impl Display for StudentKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id {id}"),
            Self::RollNo(roll_no) => write!(f, "roll no `{roll_no}`"),
        }
    }
}

/// Violation of a required-field constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentValidationError {
    /// `roll_no` is empty or whitespace-only.
    EmptyRollNo,
    /// `first_name` is empty or whitespace-only.
    EmptyFirstName,
    /// `last_name` is empty or whitespace-only.
    EmptyLastName,
}

impl Display for StudentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyRollNo => write!(f, "roll_no must not be empty"),
            Self::EmptyFirstName => write!(f, "first_name must not be empty"),
            Self::EmptyLastName => write!(f, "last_name must not be empty"),
        }
    }
}

impl Error for StudentValidationError {}

/// Persisted student record.
///
/// Optional fields distinguish "absent" (`None`) from an empty string; the
/// stores never collapse one into the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Surrogate id assigned by the store on creation, immutable afterward.
    pub id: StudentId,
    /// Caller-chosen unique roll number.
    pub roll_no: String,
    /// Required given name.
    pub first_name: String,
    /// Required family name.
    pub last_name: String,
    /// Optional contact address.
    pub email: Option<String>,
    /// Optional enrolled course name.
    pub course: Option<String>,
    /// Optional study year.
    pub year: Option<i32>,
    /// Unix epoch milliseconds, assigned by the store at insert time.
    pub created_at: i64,
}

impl Student {
    /// Checks the required-field constraints on an existing record.
    ///
    /// # Errors
    /// Returns the first violated constraint in field order.
    pub fn validate(&self) -> Result<(), StudentValidationError> {
        validate_required(&self.roll_no, &self.first_name, &self.last_name)
    }

    /// Full display name in `first last` order.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Input for the add operation: every caller-supplied field of [`Student`].
///
/// `id` and `created_at` are intentionally absent; the store assigns both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    /// Caller-chosen unique roll number.
    pub roll_no: String,
    /// Required given name.
    pub first_name: String,
    /// Required family name.
    pub last_name: String,
    /// Optional contact address.
    pub email: Option<String>,
    /// Optional enrolled course name.
    pub course: Option<String>,
    /// Optional study year.
    pub year: Option<i32>,
}

impl NewStudent {
    /// Creates an add request with the required fields set and optional
    /// fields absent.
    pub fn new(
        roll_no: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            roll_no: roll_no.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: None,
            course: None,
            year: None,
        }
    }

    /// Checks the required-field constraints on an add request.
    ///
    /// # Errors
    /// Returns the first violated constraint in field order.
    pub fn validate(&self) -> Result<(), StudentValidationError> {
        validate_required(&self.roll_no, &self.first_name, &self.last_name)
    }
}

fn validate_required(
    roll_no: &str,
    first_name: &str,
    last_name: &str,
) -> Result<(), StudentValidationError> {
    if roll_no.trim().is_empty() {
        return Err(StudentValidationError::EmptyRollNo);
    }
    if first_name.trim().is_empty() {
        return Err(StudentValidationError::EmptyFirstName);
    }
    if last_name.trim().is_empty() {
        return Err(StudentValidationError::EmptyLastName);
    }
    Ok(())
}
