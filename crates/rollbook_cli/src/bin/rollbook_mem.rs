//! In-memory student record manager with a mark book.
//!
//! Same menu as the SQLite binary plus an add-marks option; all records live
//! for the session only and vanish on exit.

use log::info;
use rollbook_cli::menu;
use rollbook_cli::prompt::Prompter;
use rollbook_cli::view::mark_lines;
use rollbook_core::{MemoryStudentRepository, StudentKey, StudentService};
use std::io::{self, BufRead};
use std::process::ExitCode;

fn main() -> ExitCode {
    rollbook_cli::init_logging_or_warn();

    let mut service = StudentService::new(MemoryStudentRepository::new());

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock());
    if let Err(err) = run_menu(&mut prompter, &mut service) {
        eprintln!("Input error: {err}");
    }
    info!("event=menu_exit module=cli status=ok store=memory");
    ExitCode::SUCCESS
}

fn run_menu<R: BufRead>(
    prompter: &mut Prompter<R>,
    service: &mut StudentService<MemoryStudentRepository>,
) -> io::Result<()> {
    loop {
        print_menu();
        let Some(choice) = prompter.line("Enter choice: ")? else {
            println!();
            break;
        };
        match choice.as_str() {
            "1" => menu::add_flow(prompter, service)?,
            "2" => menu::list_flow(service),
            "3" => find_with_marks(prompter, service)?,
            "4" => menu::update_flow(prompter, service)?,
            "5" => menu::delete_flow(prompter, service)?,
            "6" => menu::add_marks_flow(prompter, service)?,
            "0" => {
                println!("Exiting...");
                break;
            }
            _ => println!("Invalid choice. Try again."),
        }
    }
    Ok(())
}

/// The find flow of this binary also prints the student's mark book.
fn find_with_marks<R: BufRead>(
    prompter: &mut Prompter<R>,
    service: &StudentService<MemoryStudentRepository>,
) -> io::Result<()> {
    let Some(student) = menu::find_flow(prompter, service)? else {
        return Ok(());
    };
    match service.marks(&StudentKey::Id(student.id)) {
        Ok(marks) => {
            println!("Marks:");
            for line in mark_lines(&marks) {
                println!("{line}");
            }
        }
        Err(err) => println!("Marks unavailable: {err}"),
    }
    Ok(())
}

fn print_menu() {
    println!();
    println!("=== Student Record Management ===");
    println!("1. Add student");
    println!("2. List students");
    println!("3. Find student by ID or Roll no");
    println!("4. Update student");
    println!("5. Delete student");
    println!("6. Add marks");
    println!("0. Exit");
}
