//! SQLite-backed student record manager.
//!
//! Opens `rollbook.sqlite3` in the working directory and serves the numbered
//! menu until the operator picks `0` or closes stdin. Only a storage-open
//! failure at startup is fatal.

use log::info;
use rollbook_cli::menu;
use rollbook_cli::prompt::Prompter;
use rollbook_core::db::open_db;
use rollbook_core::{SqliteStudentRepository, StudentService};
use std::io::{self, BufRead};
use std::process::ExitCode;

const DB_FILE_NAME: &str = "rollbook.sqlite3";

fn main() -> ExitCode {
    rollbook_cli::init_logging_or_warn();

    let conn = match open_db(DB_FILE_NAME) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("Cannot open {DB_FILE_NAME}: {err}");
            return ExitCode::FAILURE;
        }
    };
    let repo = match SqliteStudentRepository::try_new(&conn) {
        Ok(repo) => repo,
        Err(err) => {
            eprintln!("Student store is not usable: {err}");
            return ExitCode::FAILURE;
        }
    };
    let mut service = StudentService::new(repo);

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock());
    if let Err(err) = run_menu(&mut prompter, &mut service) {
        eprintln!("Input error: {err}");
    }
    info!("event=menu_exit module=cli status=ok store=sqlite");
    ExitCode::SUCCESS
}

fn run_menu<R: BufRead>(
    prompter: &mut Prompter<R>,
    service: &mut StudentService<SqliteStudentRepository<'_>>,
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
            "3" => {
                menu::find_flow(prompter, service)?;
            }
            "4" => menu::update_flow(prompter, service)?,
            "5" => menu::delete_flow(prompter, service)?,
            "0" => {
                println!("Exiting...");
                break;
            }
            _ => println!("Invalid choice. Try again."),
        }
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
    println!("0. Exit");
}
