use rollbook_core::db::open_db;
use rollbook_core::db::open_db_in_memory;
use rollbook_core::{
    NewStudent, RepoError, SqliteStudentRepository, StudentKey, StudentRepository,
    StudentValidationError,
};

#[test]
fn add_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let mut repo = SqliteStudentRepository::try_new(&conn).unwrap();

    let id = repo.add_student(&full_student("R1")).unwrap();

    let loaded = repo.get_by_id(id).unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.roll_no, "R1");
    assert_eq!(loaded.first_name, "Ann");
    assert_eq!(loaded.last_name, "Lee");
    assert_eq!(loaded.email.as_deref(), Some("ann@example.com"));
    assert_eq!(loaded.course.as_deref(), Some("physics"));
    assert_eq!(loaded.year, Some(2));
    assert!(loaded.created_at > 0);
}

#[test]
fn first_add_into_empty_store_gets_id_one() {
    let conn = open_db_in_memory().unwrap();
    let mut repo = SqliteStudentRepository::try_new(&conn).unwrap();

    let id = repo.add_student(&NewStudent::new("R1", "Ann", "Lee")).unwrap();
    assert_eq!(id, 1);

    let students = repo.list_all().unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].roll_no, "R1");
    assert_eq!(students[0].full_name(), "Ann Lee");
}

#[test]
fn add_with_taken_roll_no_is_rejected_and_store_is_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let mut repo = SqliteStudentRepository::try_new(&conn).unwrap();

    repo.add_student(&full_student("R1")).unwrap();

    let err = repo.add_student(&NewStudent::new("R1", "Bea", "Cruz")).unwrap_err();
    assert!(matches!(err, RepoError::DuplicateRollNo(roll) if roll == "R1"));

    let students = repo.list_all().unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].first_name, "Ann");
    let kept = repo.get_by_roll_no("R1").unwrap().unwrap();
    assert_eq!(kept.first_name, "Ann");
}

#[test]
fn deleted_roll_no_can_be_taken_by_a_new_record() {
    let conn = open_db_in_memory().unwrap();
    let mut repo = SqliteStudentRepository::try_new(&conn).unwrap();

    let first = repo.add_student(&NewStudent::new("R1", "Ann", "Lee")).unwrap();
    repo.delete_student(first).unwrap();

    let second = repo.add_student(&NewStudent::new("R1", "Bea", "Cruz")).unwrap();
    assert!(second > first);
    assert_eq!(
        repo.get_by_roll_no("R1").unwrap().unwrap().first_name,
        "Bea"
    );
}

#[test]
fn add_rejects_blank_required_fields() {
    let conn = open_db_in_memory().unwrap();
    let mut repo = SqliteStudentRepository::try_new(&conn).unwrap();

    let err = repo.add_student(&NewStudent::new("  ", "Ann", "Lee")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(StudentValidationError::EmptyRollNo)
    ));

    let err = repo.add_student(&NewStudent::new("R1", "", "Lee")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(StudentValidationError::EmptyFirstName)
    ));

    let err = repo.add_student(&NewStudent::new("R1", "Ann", " ")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(StudentValidationError::EmptyLastName)
    ));

    assert!(repo.list_all().unwrap().is_empty());
}

#[test]
fn lookups_for_absent_students_return_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();

    assert!(repo.get_by_id(41).unwrap().is_none());
    assert!(repo.get_by_roll_no("R404").unwrap().is_none());
}

#[test]
fn get_by_roll_no_matches_exactly() {
    let conn = open_db_in_memory().unwrap();
    let mut repo = SqliteStudentRepository::try_new(&conn).unwrap();

    repo.add_student(&NewStudent::new("R10", "Ann", "Lee")).unwrap();

    assert!(repo.get_by_roll_no("R1").unwrap().is_none());
    let found = repo.get_by_roll_no("R10").unwrap().unwrap();
    assert_eq!(found.first_name, "Ann");
}

#[test]
fn list_is_ordered_by_ascending_id() {
    let conn = open_db_in_memory().unwrap();
    let mut repo = SqliteStudentRepository::try_new(&conn).unwrap();

    for roll in ["R3", "R1", "R2"] {
        repo.add_student(&NewStudent::new(roll, "Ann", "Lee")).unwrap();
    }

    let ids: Vec<i64> = repo.list_all().unwrap().iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn deleted_ids_are_never_reassigned() {
    let conn = open_db_in_memory().unwrap();
    let mut repo = SqliteStudentRepository::try_new(&conn).unwrap();

    let first = repo.add_student(&NewStudent::new("R1", "Ann", "Lee")).unwrap();
    let second = repo.add_student(&NewStudent::new("R2", "Bea", "Cruz")).unwrap();
    repo.delete_student(second).unwrap();

    let third = repo.add_student(&NewStudent::new("R3", "Cal", "Diaz")).unwrap();
    assert!(third > second);
    assert!(repo.get_by_id(second).unwrap().is_none());
    assert!(repo.get_by_id(first).unwrap().is_some());
}

#[test]
fn update_replaces_fields_but_keeps_id_and_created_at() {
    let conn = open_db_in_memory().unwrap();
    let mut repo = SqliteStudentRepository::try_new(&conn).unwrap();

    let id = repo.add_student(&full_student("R1")).unwrap();
    let original = repo.get_by_id(id).unwrap().unwrap();

    let mut revised = original.clone();
    revised.roll_no = "R9".to_string();
    revised.first_name = "Anna".to_string();
    revised.email = None;
    revised.year = Some(4);
    repo.update_student(&revised).unwrap();

    let stored = repo.get_by_id(id).unwrap().unwrap();
    assert_eq!(stored.roll_no, "R9");
    assert_eq!(stored.first_name, "Anna");
    assert_eq!(stored.email, None);
    assert_eq!(stored.year, Some(4));
    assert_eq!(stored.id, original.id);
    assert_eq!(stored.created_at, original.created_at);
    assert!(repo.get_by_roll_no("R1").unwrap().is_none());
}

#[test]
fn update_of_missing_student_returns_not_found_and_changes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let mut repo = SqliteStudentRepository::try_new(&conn).unwrap();

    let id = repo.add_student(&full_student("R1")).unwrap();
    let original = repo.get_by_id(id).unwrap().unwrap();

    let mut ghost = original.clone();
    ghost.id = 999;
    ghost.first_name = "Bea".to_string();

    let err = repo.update_student(&ghost).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(StudentKey::Id(999))));

    assert_eq!(repo.get_by_id(id).unwrap().unwrap(), original);
    assert_eq!(repo.list_all().unwrap().len(), 1);
}

#[test]
fn update_to_taken_roll_no_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let mut repo = SqliteStudentRepository::try_new(&conn).unwrap();

    repo.add_student(&NewStudent::new("R1", "Ann", "Lee")).unwrap();
    let second = repo.add_student(&NewStudent::new("R2", "Bea", "Cruz")).unwrap();

    let mut revised = repo.get_by_id(second).unwrap().unwrap();
    revised.roll_no = "R1".to_string();

    let err = repo.update_student(&revised).unwrap_err();
    assert!(matches!(err, RepoError::DuplicateRollNo(roll) if roll == "R1"));

    let stored = repo.get_by_id(second).unwrap().unwrap();
    assert_eq!(stored.roll_no, "R2");
}

#[test]
fn update_keeping_own_roll_no_succeeds() {
    let conn = open_db_in_memory().unwrap();
    let mut repo = SqliteStudentRepository::try_new(&conn).unwrap();

    let id = repo.add_student(&NewStudent::new("R1", "Ann", "Lee")).unwrap();
    let mut revised = repo.get_by_id(id).unwrap().unwrap();
    revised.last_name = "Leeson".to_string();

    repo.update_student(&revised).unwrap();
    let stored = repo.get_by_id(id).unwrap().unwrap();
    assert_eq!(stored.roll_no, "R1");
    assert_eq!(stored.last_name, "Leeson");
}

#[test]
fn update_rejects_blank_required_fields() {
    let conn = open_db_in_memory().unwrap();
    let mut repo = SqliteStudentRepository::try_new(&conn).unwrap();

    let id = repo.add_student(&NewStudent::new("R1", "Ann", "Lee")).unwrap();
    let mut revised = repo.get_by_id(id).unwrap().unwrap();
    revised.first_name = "   ".to_string();

    let err = repo.update_student(&revised).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(StudentValidationError::EmptyFirstName)
    ));
}

#[test]
fn delete_removes_the_record() {
    let conn = open_db_in_memory().unwrap();
    let mut repo = SqliteStudentRepository::try_new(&conn).unwrap();

    let id = repo.add_student(&NewStudent::new("R1", "Ann", "Lee")).unwrap();
    repo.delete_student(id).unwrap();

    assert!(repo.get_by_id(id).unwrap().is_none());
    assert!(repo.list_all().unwrap().is_empty());
}

#[test]
fn delete_of_missing_student_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let mut repo = SqliteStudentRepository::try_new(&conn).unwrap();

    let err = repo.delete_student(7).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(StudentKey::Id(7))));
}

#[test]
fn rows_written_past_the_api_surface_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO students (roll_no, first_name, last_name) VALUES ('R1', '', 'Lee');",
        [],
    )
    .unwrap();

    let repo = SqliteStudentRepository::try_new(&conn).unwrap();
    let err = repo.get_by_roll_no("R1").unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));

    let err = repo.list_all().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn records_survive_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rollbook.sqlite3");

    let id = {
        let conn = open_db(&path).unwrap();
        let mut repo = SqliteStudentRepository::try_new(&conn).unwrap();
        repo.add_student(&full_student("R1")).unwrap()
    };

    let conn = open_db(&path).unwrap();
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();
    let loaded = repo.get_by_id(id).unwrap().unwrap();
    assert_eq!(loaded.roll_no, "R1");
    assert_eq!(loaded.email.as_deref(), Some("ann@example.com"));
}

#[test]
fn writes_are_visible_across_connections_to_the_same_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rollbook.sqlite3");

    let conn_a = open_db(&path).unwrap();
    let conn_b = open_db(&path).unwrap();
    let mut repo_a = SqliteStudentRepository::try_new(&conn_a).unwrap();
    let repo_b = SqliteStudentRepository::try_new(&conn_b).unwrap();

    let id = repo_a.add_student(&NewStudent::new("R1", "Ann", "Lee")).unwrap();
    let seen = repo_b.get_by_id(id).unwrap().unwrap();
    assert_eq!(seen.roll_no, "R1");
}

fn full_student(roll_no: &str) -> NewStudent {
    NewStudent {
        roll_no: roll_no.to_string(),
        first_name: "Ann".to_string(),
        last_name: "Lee".to_string(),
        email: Some("ann@example.com".to_string()),
        course: Some("physics".to_string()),
        year: Some(2),
    }
}
