//! Core domain logic for rollbook.
//! This crate is the single source of truth for student-record invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging};
pub use model::student::{
    NewStudent, Student, StudentId, StudentKey, StudentValidationError,
};
pub use repo::memory_repo::MemoryStudentRepository;
pub use repo::student_repo::{
    RepoError, RepoResult, SqliteStudentRepository, StudentRepository,
};
pub use service::student_service::StudentService;
