use std::path::PathBuf;

use clap::Parser;

use crate::codec::DEFAULT_PATH;

/// Interactive to-do list with a plain-text task file.
/// Tasks are read from ./tasks.txt on start and written back on exit.
#[derive(Parser, Debug)]
#[command(name = "todo", version, about = "Interactive to-do list manager")]
pub struct Cli {
    /// Path to the task file.
    #[arg(long, default_value = DEFAULT_PATH)]
    pub file: PathBuf,

    /// Write debug logs to stderr. Redirect stderr while the menu is open.
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_tasks_txt() {
        let cli = Cli::try_parse_from(["todo"]).unwrap();
        assert_eq!(cli.file, PathBuf::from("tasks.txt"));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_file_override() {
        let cli = Cli::try_parse_from(["todo", "--file", "/tmp/mine.txt", "-v"]).unwrap();
        assert_eq!(cli.file, PathBuf::from("/tmp/mine.txt"));
        assert!(cli.verbose);
    }
}
