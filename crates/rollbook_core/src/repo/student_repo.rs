//! Student repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the stable CRUD API over the `students` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths call `validate()` before any SQL mutation.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Roll-number uniqueness is enforced on add *and* update.

use crate::db::schema::SCHEMA_VERSION;
use crate::db::DbError;
use crate::model::student::{NewStudent, Student, StudentId, StudentKey, StudentValidationError};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const STUDENT_SELECT_SQL: &str = "SELECT
    id,
    roll_no,
    first_name,
    last_name,
    email,
    course,
    year,
    created_at
FROM students";

const REQUIRED_COLUMNS: &[&str] = &[
    "id",
    "roll_no",
    "first_name",
    "last_name",
    "email",
    "course",
    "year",
    "created_at",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for student persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// A required-field constraint was violated.
    Validation(StudentValidationError),
    /// Storage transport failure.
    Db(DbError),
    /// The roll number is already taken by another record.
    DuplicateRollNo(String),
    /// The addressed student does not exist.
    NotFound(StudentKey),
    /// A persisted row violates the record constraints.
    InvalidData(String),
    /// The connection has not had the baseline schema applied.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// The schema version matches but a required table is absent.
    MissingRequiredTable(&'static str),
    /// The schema version matches but a required column is absent.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateRollNo(roll_no) => {
                write!(f, "a student with roll no `{roll_no}` already exists")
            }
            Self::NotFound(key) => write!(f, "student not found: {key}"),
            Self::InvalidData(details) => {
                write!(f, "invalid persisted student record: {details}")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection not initialized: schema version {actual_version}, expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StudentValidationError> for RepoError {
    fn from(value: StudentValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository contract shared by the durable and in-memory stores.
///
/// Mutating operations commit before returning; there is no batching and no
/// deferred flush. `Ok(None)` from the lookups is the "not found" signal;
/// zero-row updates and deletes surface [`RepoError::NotFound`] instead.
pub trait StudentRepository {
    /// Inserts a new record and returns the assigned surrogate id.
    fn add_student(&mut self, student: &NewStudent) -> RepoResult<StudentId>;
    /// Looks a record up by surrogate id.
    fn get_by_id(&self, id: StudentId) -> RepoResult<Option<Student>>;
    /// Looks a record up by roll number.
    fn get_by_roll_no(&self, roll_no: &str) -> RepoResult<Option<Student>>;
    /// Returns every record ordered by ascending id.
    fn list_all(&self) -> RepoResult<Vec<Student>>;
    /// Replaces all mutable fields of the record matching `student.id`.
    ///
    /// `id` and `created_at` are never touched.
    fn update_student(&mut self, student: &Student) -> RepoResult<()>;
    /// Removes the record with the given id. The id is never reassigned.
    fn delete_student(&mut self, id: StudentId) -> RepoResult<()>;
}

/// SQLite-backed student repository.
pub struct SqliteStudentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStudentRepository<'conn> {
    /// Constructs a repository from a bootstrapped connection.
    ///
    /// # Errors
    /// Rejects connections whose schema version, table, or columns do not
    /// match what this build expects, so that query failures surface here
    /// with a precise cause rather than deep inside an operation.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl StudentRepository for SqliteStudentRepository<'_> {
    fn add_student(&mut self, student: &NewStudent) -> RepoResult<StudentId> {
        student.validate()?;

        self.conn
            .execute(
                "INSERT INTO students (roll_no, first_name, last_name, email, course, year)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
                params![
                    student.roll_no.as_str(),
                    student.first_name.as_str(),
                    student.last_name.as_str(),
                    student.email.as_deref(),
                    student.course.as_deref(),
                    student.year,
                ],
            )
            .map_err(|err| map_roll_no_conflict(err, &student.roll_no))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_by_id(&self, id: StudentId) -> RepoResult<Option<Student>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STUDENT_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_student_row(row)?));
        }

        Ok(None)
    }

    fn get_by_roll_no(&self, roll_no: &str) -> RepoResult<Option<Student>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STUDENT_SELECT_SQL} WHERE roll_no = ?1;"))?;

        let mut rows = stmt.query([roll_no])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_student_row(row)?));
        }

        Ok(None)
    }

    fn list_all(&self) -> RepoResult<Vec<Student>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STUDENT_SELECT_SQL} ORDER BY id ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut students = Vec::new();
        while let Some(row) = rows.next()? {
            students.push(parse_student_row(row)?);
        }

        Ok(students)
    }

    fn update_student(&mut self, student: &Student) -> RepoResult<()> {
        student.validate()?;

        let changed = self
            .conn
            .execute(
                "UPDATE students
                 SET
                    roll_no = ?1,
                    first_name = ?2,
                    last_name = ?3,
                    email = ?4,
                    course = ?5,
                    year = ?6
                 WHERE id = ?7;",
                params![
                    student.roll_no.as_str(),
                    student.first_name.as_str(),
                    student.last_name.as_str(),
                    student.email.as_deref(),
                    student.course.as_deref(),
                    student.year,
                    student.id,
                ],
            )
            .map_err(|err| map_roll_no_conflict(err, &student.roll_no))?;

        if changed == 0 {
            return Err(RepoError::NotFound(StudentKey::Id(student.id)));
        }

        Ok(())
    }

    fn delete_student(&mut self, id: StudentId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM students WHERE id = ?1;", params![id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(StudentKey::Id(id)));
        }

        Ok(())
    }
}

fn parse_student_row(row: &Row<'_>) -> RepoResult<Student> {
    let student = Student {
        id: row.get("id")?,
        roll_no: row.get("roll_no")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
        course: row.get("course")?,
        year: row.get("year")?,
        created_at: row.get("created_at")?,
    };
    // A row that fails validation was not written through this API; surface
    // it as corrupt state rather than an input error.
    student
        .validate()
        .map_err(|err| RepoError::InvalidData(format!("row id {}: {err}", student.id)))?;
    Ok(student)
}

/// Maps a UNIQUE-constraint failure on `students.roll_no` to the domain
/// error; anything else stays a transport error.
fn map_roll_no_conflict(err: rusqlite::Error, roll_no: &str) -> RepoError {
    if is_unique_violation(&err) {
        return RepoError::DuplicateRollNo(roll_no.to_string());
    }
    RepoError::Db(DbError::Sqlite(err))
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != SCHEMA_VERSION {
        return Err(RepoError::UninitializedConnection {
            expected_version: SCHEMA_VERSION,
            actual_version,
        });
    }

    if !table_exists(conn, "students")? {
        return Err(RepoError::MissingRequiredTable("students"));
    }

    for &column in REQUIRED_COLUMNS {
        if !table_has_column(conn, "students", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "students",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        if name == column {
            return Ok(true);
        }
    }
    Ok(false)
}
