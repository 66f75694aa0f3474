//! Repository layer contracts and store implementations.
//!
//! # Responsibility
//! - Define the data-access contract for student records.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Every write path enforces `validate()` before touching a store.
//! - Repository APIs return semantic errors (`NotFound`, `DuplicateRollNo`)
//!   in addition to DB transport errors.

pub mod memory_repo;
pub mod student_repo;
