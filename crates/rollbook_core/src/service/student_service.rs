//! Student use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for the menu programs.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation or uniqueness checks.
//! - The generic surface remains storage-agnostic; only the mark-book calls
//!   are tied to the in-memory store.

use crate::model::student::{NewStudent, Student, StudentId, StudentKey};
use crate::repo::memory_repo::MemoryStudentRepository;
use crate::repo::student_repo::{RepoResult, StudentRepository};
use std::collections::BTreeMap;

/// Use-case facade over a student repository.
///
/// Construct with whichever store the program runs on; the menu layer only
/// ever talks to this type.
pub struct StudentService<R: StudentRepository> {
    repo: R,
}

impl<R: StudentRepository> StudentService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds a new student and returns the store-assigned id.
    pub fn add_student(&mut self, student: &NewStudent) -> RepoResult<StudentId> {
        self.repo.add_student(student)
    }

    /// Gets one student by surrogate id.
    pub fn get_by_id(&self, id: StudentId) -> RepoResult<Option<Student>> {
        self.repo.get_by_id(id)
    }

    /// Gets one student by roll number.
    pub fn get_by_roll_no(&self, roll_no: &str) -> RepoResult<Option<Student>> {
        self.repo.get_by_roll_no(roll_no)
    }

    /// Lists all students ordered by ascending id.
    pub fn list_all(&self) -> RepoResult<Vec<Student>> {
        self.repo.list_all()
    }

    /// Replaces the mutable fields of an existing student.
    ///
    /// Returns repository-level not-found, validation, and duplicate-roll
    /// errors unchanged.
    pub fn update_student(&mut self, student: &Student) -> RepoResult<()> {
        self.repo.update_student(student)
    }

    /// Deletes a student by surrogate id.
    pub fn delete_student(&mut self, id: StudentId) -> RepoResult<()> {
        self.repo.delete_student(id)
    }
}

/// Mark-book operations, available when the service runs on the in-memory
/// store.
impl StudentService<MemoryStudentRepository> {
    /// Records (or overwrites) one subject score for a student.
    pub fn add_mark(&mut self, key: &StudentKey, subject: &str, score: f64) -> RepoResult<()> {
        self.repo.add_mark(key, subject, score)
    }

    /// Returns a student's mark book, ordered by subject name.
    pub fn marks(&self, key: &StudentKey) -> RepoResult<BTreeMap<String, f64>> {
        self.repo.marks(key)
    }
}
