//! Domain model for student records.
//!
//! # Responsibility
//! - Define the canonical data structures used by repositories and services.
//! - Keep one record shape shared by the durable and in-memory stores.
//!
//! # Invariants
//! - Every record is identified by a store-assigned `StudentId`.
//! - Required-field constraints are enforced via `validate()` before any
//!   write reaches a store.

pub mod student;
