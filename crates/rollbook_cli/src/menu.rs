//! Interactive flows behind each menu choice.
//!
//! # Responsibility
//! - Run the field interviews for add and update.
//! - Drive the list, find, delete, and add-marks round trips.
//!
//! # Invariants
//! - Flows are generic over the repository, so both binaries share them.
//! - `Ok(None)` from a prompt aborts the current flow without touching the
//!   store; the caller's menu loop then decides whether to exit.
//! - Storage errors are printed for the operator, never propagated as `Err`.

use crate::prompt::Prompter;
use crate::view::{optional_text, student_line, year_text};
use rollbook_core::{
    MemoryStudentRepository, NewStudent, RepoError, Student, StudentKey, StudentRepository,
    StudentService,
};
use std::io::{self, BufRead};

/// Collects the fields of a new student. Returns `Ok(None)` on EOF.
pub fn collect_new_student<R: BufRead>(
    prompter: &mut Prompter<R>,
) -> io::Result<Option<NewStudent>> {
    let Some(roll_no) = prompter.line("Roll no: ")? else {
        return Ok(None);
    };
    let Some(first_name) = prompter.line("First name: ")? else {
        return Ok(None);
    };
    let Some(last_name) = prompter.line("Last name: ")? else {
        return Ok(None);
    };
    let Some(email) = prompter.optional("Email (optional): ")? else {
        return Ok(None);
    };
    let Some(course) = prompter.optional("Course (optional): ")? else {
        return Ok(None);
    };
    let Some(year) = prompter.optional_year("Year (optional): ")? else {
        return Ok(None);
    };

    Ok(Some(NewStudent {
        roll_no,
        first_name,
        last_name,
        email,
        course,
        year,
    }))
}

/// Per-field update interview over an existing record.
///
/// Blank input keeps the current value; a non-numeric year keeps the old
/// value with a notice. Returns `Ok(None)` on EOF.
pub fn revise_student<R: BufRead>(
    prompter: &mut Prompter<R>,
    current: &Student,
) -> io::Result<Option<Student>> {
    println!("Leave blank to keep current value.");
    let mut revised = current.clone();

    let Some(roll_no) = prompter.line(&format!("Roll no ({}): ", current.roll_no))? else {
        return Ok(None);
    };
    if !roll_no.is_empty() {
        revised.roll_no = roll_no;
    }

    let Some(first_name) = prompter.line(&format!("First name ({}): ", current.first_name))? else {
        return Ok(None);
    };
    if !first_name.is_empty() {
        revised.first_name = first_name;
    }

    let Some(last_name) = prompter.line(&format!("Last name ({}): ", current.last_name))? else {
        return Ok(None);
    };
    if !last_name.is_empty() {
        revised.last_name = last_name;
    }

    let Some(email) = prompter.line(&format!("Email ({}): ", optional_text(&current.email)))?
    else {
        return Ok(None);
    };
    if !email.is_empty() {
        revised.email = Some(email);
    }

    let Some(course) = prompter.line(&format!("Course ({}): ", optional_text(&current.course)))?
    else {
        return Ok(None);
    };
    if !course.is_empty() {
        revised.course = Some(course);
    }

    let Some(year) = prompter.line(&format!("Year ({}): ", year_text(current.year)))? else {
        return Ok(None);
    };
    if !year.is_empty() {
        match year.parse::<i32>() {
            Ok(parsed) => revised.year = Some(parsed),
            Err(_) => println!("Invalid year entered; keeping old value."),
        }
    }

    Ok(Some(revised))
}

/// Menu choice 1: interview for a new student and store it.
pub fn add_flow<R, S>(
    prompter: &mut Prompter<R>,
    service: &mut StudentService<S>,
) -> io::Result<()>
where
    R: BufRead,
    S: StudentRepository,
{
    let Some(draft) = collect_new_student(prompter)? else {
        return Ok(());
    };
    match service.add_student(&draft) {
        Ok(id) => println!("Student added with ID: {id}"),
        Err(err) => println!("Add failed: {err}"),
    }
    Ok(())
}

/// Menu choice 2: print every student, one line each.
pub fn list_flow<S: StudentRepository>(service: &StudentService<S>) {
    match service.list_all() {
        Ok(students) if students.is_empty() => println!("No students found."),
        Ok(students) => {
            for student in &students {
                println!("{}", student_line(student));
            }
        }
        Err(err) => println!("List failed: {err}"),
    }
}

/// Menu choice 3: look a student up by id or roll no and print it.
///
/// Returns the found record so callers can append store-specific detail.
pub fn find_flow<R, S>(
    prompter: &mut Prompter<R>,
    service: &StudentService<S>,
) -> io::Result<Option<Student>>
where
    R: BufRead,
    S: StudentRepository,
{
    let Some(mode) = prompter.line("Search by (1) ID or (2) Roll no? ")? else {
        return Ok(None);
    };
    let found = if mode == "1" {
        let Some(id) = prompter.integer("Enter ID: ")? else {
            return Ok(None);
        };
        service.get_by_id(id)
    } else {
        let Some(roll_no) = prompter.line("Enter roll no: ")? else {
            return Ok(None);
        };
        service.get_by_roll_no(&roll_no)
    };
    match found {
        Ok(Some(student)) => {
            println!("{}", student_line(&student));
            Ok(Some(student))
        }
        Ok(None) => {
            println!("Not found.");
            Ok(None)
        }
        Err(err) => {
            println!("Find failed: {err}");
            Ok(None)
        }
    }
}

/// Menu choice 4: load by id, run the revision interview, store the result.
pub fn update_flow<R, S>(
    prompter: &mut Prompter<R>,
    service: &mut StudentService<S>,
) -> io::Result<()>
where
    R: BufRead,
    S: StudentRepository,
{
    let Some(id) = prompter.integer("Enter student ID to update: ")? else {
        return Ok(());
    };
    let current = match service.get_by_id(id) {
        Ok(Some(student)) => student,
        Ok(None) => {
            println!("No student with given ID.");
            return Ok(());
        }
        Err(err) => {
            println!("Update failed: {err}");
            return Ok(());
        }
    };
    let Some(revised) = revise_student(prompter, &current)? else {
        return Ok(());
    };
    match service.update_student(&revised) {
        Ok(()) => println!("Updated."),
        Err(err) => println!("Update failed: {err}"),
    }
    Ok(())
}

/// Menu choice 5: delete by id.
pub fn delete_flow<R, S>(
    prompter: &mut Prompter<R>,
    service: &mut StudentService<S>,
) -> io::Result<()>
where
    R: BufRead,
    S: StudentRepository,
{
    let Some(id) = prompter.integer("Enter student ID to delete: ")? else {
        return Ok(());
    };
    match service.delete_student(id) {
        Ok(()) => println!("Deleted."),
        Err(RepoError::NotFound(_)) => println!("Delete failed (ID may not exist)."),
        Err(err) => println!("Delete failed: {err}"),
    }
    Ok(())
}

/// Mark-book choice of the in-memory binary: record one score by roll no.
pub fn add_marks_flow<R: BufRead>(
    prompter: &mut Prompter<R>,
    service: &mut StudentService<MemoryStudentRepository>,
) -> io::Result<()> {
    let Some(roll_no) = prompter.line("Roll no: ")? else {
        return Ok(());
    };
    let Some(subject) = prompter.line("Subject: ")? else {
        return Ok(());
    };
    let Some(score) = prompter.score("Score: ")? else {
        return Ok(());
    };
    match service.add_mark(&StudentKey::RollNo(roll_no), &subject, score) {
        Ok(()) => println!("Marks added."),
        Err(err) => println!("Add marks failed: {err}"),
    }
    Ok(())
}
