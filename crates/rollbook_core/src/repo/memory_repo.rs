//! In-memory student store with the mark-book bolt-on.
//!
//! # Responsibility
//! - Provide the same repository contract as the SQLite store, without
//!   persistence.
//! - Own the per-student subject→score mark book.
//!
//! # Invariants
//! - Surrogate ids come from a monotonic counter and are never reused,
//!   matching the durable store's AUTOINCREMENT behavior.
//! - The roll-number index always mirrors the live records.
//! - A record's marks are dropped with it on delete and untouched by field
//!   updates.

use crate::model::student::{NewStudent, Student, StudentId, StudentKey};
use crate::repo::student_repo::{RepoError, RepoResult, StudentRepository};
use std::collections::{BTreeMap, HashMap};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone)]
struct MemoryRecord {
    student: Student,
    marks: BTreeMap<String, f64>,
}

/// Process-lifetime student store backing the in-memory program.
///
/// Records live in a `BTreeMap` keyed by surrogate id, so iteration order is
/// the list contract's ascending-id order for free.
#[derive(Debug)]
pub struct MemoryStudentRepository {
    records: BTreeMap<StudentId, MemoryRecord>,
    roll_index: HashMap<String, StudentId>,
    next_id: StudentId,
}

impl Default for MemoryStudentRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStudentRepository {
    /// Creates an empty store. The first assigned id is 1.
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
            roll_index: HashMap::new(),
            next_id: 1,
        }
    }

    /// Inserts or overwrites one `(subject → score)` entry for a student.
    ///
    /// Latest write wins per subject; the score and subject name are not
    /// validated further.
    ///
    /// # Errors
    /// Returns `NotFound` carrying the caller's key form when the student
    /// does not exist.
    pub fn add_mark(&mut self, key: &StudentKey, subject: &str, score: f64) -> RepoResult<()> {
        let record = self.record_mut(key)?;
        record.marks.insert(subject.to_string(), score);
        Ok(())
    }

    /// Returns a student's mark book, ordered by subject name.
    ///
    /// # Errors
    /// Returns `NotFound` carrying the caller's key form when the student
    /// does not exist.
    pub fn marks(&self, key: &StudentKey) -> RepoResult<BTreeMap<String, f64>> {
        self.record(key).map(|record| record.marks.clone())
    }

    fn resolve(&self, key: &StudentKey) -> Option<StudentId> {
        match key {
            StudentKey::Id(id) => Some(*id),
            StudentKey::RollNo(roll_no) => self.roll_index.get(roll_no).copied(),
        }
    }

    fn record(&self, key: &StudentKey) -> RepoResult<&MemoryRecord> {
        self.resolve(key)
            .and_then(|id| self.records.get(&id))
            .ok_or_else(|| RepoError::NotFound(key.clone()))
    }

    fn record_mut(&mut self, key: &StudentKey) -> RepoResult<&mut MemoryRecord> {
        let id = match self.resolve(key) {
            Some(id) => id,
            None => return Err(RepoError::NotFound(key.clone())),
        };
        self.records
            .get_mut(&id)
            .ok_or_else(|| RepoError::NotFound(key.clone()))
    }
}

impl StudentRepository for MemoryStudentRepository {
    fn add_student(&mut self, student: &NewStudent) -> RepoResult<StudentId> {
        student.validate()?;

        if self.roll_index.contains_key(&student.roll_no) {
            return Err(RepoError::DuplicateRollNo(student.roll_no.clone()));
        }

        // next_id starts at 1 and only grows, so deleted ids never come back.
        let id = self.next_id;
        self.next_id += 1;

        let stored = Student {
            id,
            roll_no: student.roll_no.clone(),
            first_name: student.first_name.clone(),
            last_name: student.last_name.clone(),
            email: student.email.clone(),
            course: student.course.clone(),
            year: student.year,
            created_at: now_epoch_ms(),
        };
        self.roll_index.insert(stored.roll_no.clone(), id);
        self.records.insert(
            id,
            MemoryRecord {
                student: stored,
                marks: BTreeMap::new(),
            },
        );

        Ok(id)
    }

    fn get_by_id(&self, id: StudentId) -> RepoResult<Option<Student>> {
        Ok(self.records.get(&id).map(|record| record.student.clone()))
    }

    fn get_by_roll_no(&self, roll_no: &str) -> RepoResult<Option<Student>> {
        Ok(self
            .roll_index
            .get(roll_no)
            .and_then(|id| self.records.get(id))
            .map(|record| record.student.clone()))
    }

    fn list_all(&self) -> RepoResult<Vec<Student>> {
        Ok(self
            .records
            .values()
            .map(|record| record.student.clone())
            .collect())
    }

    fn update_student(&mut self, student: &Student) -> RepoResult<()> {
        student.validate()?;

        let Some(record) = self.records.get_mut(&student.id) else {
            return Err(RepoError::NotFound(StudentKey::Id(student.id)));
        };

        if self
            .roll_index
            .get(&student.roll_no)
            .is_some_and(|&holder| holder != student.id)
        {
            return Err(RepoError::DuplicateRollNo(student.roll_no.clone()));
        }

        let previous_roll = record.student.roll_no.clone();
        record.student.roll_no = student.roll_no.clone();
        record.student.first_name = student.first_name.clone();
        record.student.last_name = student.last_name.clone();
        record.student.email = student.email.clone();
        record.student.course = student.course.clone();
        record.student.year = student.year;
        // id and created_at keep their stored values.

        if previous_roll != student.roll_no {
            self.roll_index.remove(&previous_roll);
            self.roll_index.insert(student.roll_no.clone(), student.id);
        }

        Ok(())
    }

    fn delete_student(&mut self, id: StudentId) -> RepoResult<()> {
        let Some(record) = self.records.remove(&id) else {
            return Err(RepoError::NotFound(StudentKey::Id(id)));
        };
        self.roll_index.remove(&record.student.roll_no);
        Ok(())
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as i64)
}
