//! Console rendering of students and mark books.
//!
//! # Responsibility
//! - Keep the fixed line formats in one place, out of the menu flows.

use rollbook_core::Student;
use std::collections::BTreeMap;

/// Placeholder shown for absent optional fields.
const ABSENT: &str = "-";

/// One student as a pipe-separated listing line.
pub fn student_line(student: &Student) -> String {
    format!(
        "{} | {} | {} | {} | {} | Year: {}",
        student.id,
        student.roll_no,
        student.full_name(),
        optional_text(&student.email),
        optional_text(&student.course),
        year_text(student.year),
    )
}

/// A mark book as indented `subject: score` lines, in subject order.
pub fn mark_lines(marks: &BTreeMap<String, f64>) -> Vec<String> {
    marks
        .iter()
        .map(|(subject, score)| format!("  {subject}: {score}"))
        .collect()
}

pub fn optional_text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(ABSENT)
}

pub fn year_text(year: Option<i32>) -> String {
    match year {
        Some(year) => year.to_string(),
        None => ABSENT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_student() -> Student {
        Student {
            id: 4,
            roll_no: "R-4".to_string(),
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: Some("ann@example.com".to_string()),
            course: None,
            year: Some(2),
            created_at: 1_700_000_000_000,
        }
    }

    #[test]
    fn student_line_fills_every_column() {
        let line = student_line(&sample_student());
        assert_eq!(line, "4 | R-4 | Ann Lee | ann@example.com | - | Year: 2");
    }

    #[test]
    fn student_line_dashes_absent_fields() {
        let mut student = sample_student();
        student.email = None;
        student.year = None;
        let line = student_line(&student);
        assert_eq!(line, "4 | R-4 | Ann Lee | - | - | Year: -");
    }

    #[test]
    fn mark_lines_follow_subject_order() {
        let mut marks = BTreeMap::new();
        marks.insert("physics".to_string(), 71.0);
        marks.insert("algebra".to_string(), 88.5);
        assert_eq!(mark_lines(&marks), vec!["  algebra: 88.5", "  physics: 71"]);
    }
}
