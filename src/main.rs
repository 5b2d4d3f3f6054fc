//! # todo - Interactive To-Do List
//!
//! A single-user task list with a retro terminal menu. Tasks live in memory for
//! the session and are persisted to a plain-text file in the working directory.
//!
//! ## Session
//!
//! 1. `tasks.txt` is loaded once at startup. A missing file means an empty list;
//!    malformed lines are skipped and listed on the first screen.
//! 2. Every menu action (add, view, complete, delete, edit, sort) works on the
//!    in-memory [`store::TaskStore`].
//! 3. On exit the whole list is written back to the file exactly once.
//!
//! ## File format
//!
//! One task per line, comma separated, no header:
//!
//! ```text
//! 1,Buy milk,false,Low
//! 2,Call the bank,true,High
//! ```
//!
//! Descriptions containing commas are refused at input so that every saved
//! line can be read back.

use std::path::Path;

use clap::Parser;
use tracing_subscriber::EnvFilter;

pub mod cli;
pub mod codec;
pub mod error;
pub mod fields;
pub mod store;
pub mod task;
pub mod tui {
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod menu;
    pub mod run;
    pub mod utils;
}

use cli::Cli;
use codec::{Loaded, TaskFile};
use store::TaskStore;
use tui::run::run_menu;

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("todo_list=debug"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let file = TaskFile::new(&cli.file);
    let loaded = match file.load() {
        Ok(loaded) => loaded,
        Err(e) => {
            // Leave an unreadable file alone rather than saving an empty list over it.
            eprintln!("Failed to load tasks: {e}");
            std::process::exit(1);
        }
    };

    let notices = load_report(&loaded, file.path());
    let mut store = TaskStore::from_tasks(loaded.tasks);
    tracing::debug!(next_id = store.next_id(), "store ready");

    if let Err(e) = run_menu(&mut store, notices) {
        eprintln!("Error running menu: {e}");
    }

    match file.save(store.list()) {
        Ok(()) => println!("Tasks saved successfully!"),
        Err(e) => {
            eprintln!("Failed to save tasks: {e}");
            std::process::exit(1);
        }
    }
}

/// Lines describing the outcome of the startup load.
fn load_report(loaded: &Loaded, path: &Path) -> Vec<String> {
    if !loaded.existed {
        return vec!["No saved tasks found.".to_string()];
    }
    let mut lines = vec![format!(
        "Tasks loaded successfully! {} task(s) from {}",
        loaded.tasks.len(),
        path.display()
    )];
    if !loaded.warnings.is_empty() {
        lines.push(format!("{} line(s) skipped:", loaded.warnings.len()));
        lines.extend(loaded.warnings.iter().map(|w| w.to_string()));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MalformedRecord;

    #[test]
    fn test_report_for_missing_file() {
        let report = load_report(&Loaded::default(), Path::new("tasks.txt"));
        assert_eq!(report, vec!["No saved tasks found.".to_string()]);
    }

    #[test]
    fn test_report_lists_warnings() {
        let (tasks, warnings) = codec::decode("1,a,false,Low\n2,b\n");
        let loaded = Loaded {
            tasks,
            warnings,
            existed: true,
        };
        let report = load_report(&loaded, Path::new("tasks.txt"));
        assert_eq!(report[0], "Tasks loaded successfully! 1 task(s) from tasks.txt");
        assert_eq!(report[1], "1 line(s) skipped:");
        assert_eq!(
            report[2],
            MalformedRecord::FieldCount {
                line_no: 2,
                line: "2,b".into(),
                found: 2
            }
            .to_string()
        );
    }

    #[test]
    fn test_session_round_trip_through_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = TaskFile::new(dir.path().join("tasks.txt"));

        let mut store = TaskStore::from_tasks(file.load().unwrap().tasks);
        store.add("first", fields::Priority::Medium).unwrap();
        store.add("second", fields::Priority::High).unwrap();
        store.complete(1).unwrap();
        store.delete(2);
        file.save(store.list()).unwrap();

        let mut reopened = TaskStore::from_tasks(file.load().unwrap().tasks);
        assert_eq!(reopened.list(), store.list());
        assert_eq!(reopened.add("third", fields::Priority::Low).unwrap(), 2);
    }
}
