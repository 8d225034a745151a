use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use todoz::dates::parse_due;
use todoz::model::{StatusFilter, TodoId, TodoStatus};

#[derive(Parser, Debug)]
#[command(name = "todoz", bin_name = "todoz", version)]
#[command(about = "A small, file-backed todo list", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the todo file (defaults to $TODOZ_DATA, then the OS data dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub base_dir: Option<PathBuf>,

    /// Directory for log files (defaults to <base-dir>/logs)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub log_dir: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a todo
    #[command(alias = "a")]
    Add {
        /// Description of the todo
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,

        /// Due date (YYYY-MM-DD or RFC 3339)
        #[arg(long, value_parser = parse_due)]
        due: Option<DateTime<Utc>>,
    },

    /// Show a single todo
    Get { id: TodoId },

    /// List todos
    #[command(alias = "ls")]
    List {
        /// all, pending or done
        #[arg(short, long, default_value = "all")]
        status: StatusFilter,
    },

    /// List pending todos due today or overdue
    DueToday,

    /// List pending todos due this week or earlier
    DueWeek,

    /// List pending todos due on or before a date
    DueBy {
        #[arg(value_parser = parse_due)]
        date: DateTime<Utc>,
    },

    /// List pending todos past their due date
    Overdue,

    /// Show the most recently modified todo
    Recent,

    /// Mark a todo as done
    Done { id: TodoId },

    /// Mark a todo as pending again
    Undo { id: TodoId },

    /// Change a todo's description and/or due date
    Update {
        id: TodoId,

        /// New description (blank values are ignored)
        #[arg(short, long)]
        description: Option<String>,

        /// New due date (YYYY-MM-DD or RFC 3339)
        #[arg(long, value_parser = parse_due, conflicts_with = "clear_due")]
        due: Option<DateTime<Utc>>,

        /// Remove the due date
        #[arg(long)]
        clear_due: bool,
    },

    /// Give a todo a new id, swapping with any todo already holding it
    #[command(alias = "mv")]
    Move { from: TodoId, to: TodoId },

    /// Delete a todo
    #[command(alias = "rm")]
    Delete { id: TodoId },

    /// Delete all todos, or only those with a status
    Clear {
        /// pending or done
        #[arg(short, long)]
        status: Option<TodoStatus>,
    },

    /// Reassign ids 1..N
    Renumber,

    /// Print the path of the todo file
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_add_with_due() {
        let cli = Cli::try_parse_from(["todoz", "add", "buy", "milk", "--due", "2024-12-31"])
            .unwrap();
        match cli.command {
            Some(Commands::Add { description, due }) => {
                assert_eq!(description.join(" "), "buy milk");
                assert!(due.is_some());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn list_status_defaults_to_all() {
        let cli = Cli::try_parse_from(["todoz", "list"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::List {
                status: StatusFilter::All
            })
        ));
    }

    #[test]
    fn rejects_bad_status_and_date() {
        assert!(Cli::try_parse_from(["todoz", "list", "--status", "someday"]).is_err());
        assert!(Cli::try_parse_from(["todoz", "due-by", "tomorrowish"]).is_err());
    }

    #[test]
    fn due_and_clear_due_conflict() {
        assert!(Cli::try_parse_from([
            "todoz",
            "update",
            "1",
            "--due",
            "2024-01-01",
            "--clear-due"
        ])
        .is_err());
    }

    #[test]
    fn global_base_dir_after_subcommand() {
        let cli = Cli::try_parse_from(["todoz", "list", "--base-dir", "/tmp/x"]).unwrap();
        assert_eq!(cli.base_dir, Some(PathBuf::from("/tmp/x")));
    }
}
