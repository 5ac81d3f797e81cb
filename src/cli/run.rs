//! Command execution for the CLI.
//!
//! This module handles running CLI commands and producing output.

use crate::app::App;
use crate::clock::parse_timestamp;
use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::dashboard::Dashboard;
use crate::session::KeySpace;
use crate::storage::{MemoryStore, SqliteStore};
use crate::tasks::{Priority, Task, TaskCounts, TaskDraft, TaskFilter, TaskUpdate};
use crate::traits::KeyValueStore;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

/// Output from running the CLI, with separate stdout and stderr messages.
#[derive(Debug)]
pub struct CliOutput {
    /// Exit code for the process.
    pub exit_code: ExitCode,
    /// Messages to print to stdout.
    pub stdout: Vec<String>,
    /// Messages to print to stderr.
    pub stderr: Vec<String>,
}

/// Open the configured storage, restore the session and run one command.
pub fn run(cli: Cli, config: &Config) -> CliOutput {
    let store = open_store(config, cli.database);
    let mut app = App::start_default(store, KeySpace::new(config.namespace.clone()));
    run_command(&mut app, cli.command)
}

/// Run one command against an already started application.
pub fn run_command<S: KeyValueStore + Clone>(app: &mut App<S>, command: Command) -> CliOutput {
    if command.needs_session() {
        let Some(dashboard) = app.dashboard_mut() else {
            return error_output(NOT_LOGGED_IN.to_string());
        };
        return run_task_command(dashboard, command);
    }

    match command {
        Command::Login { username } => match app.login(&username) {
            Ok(()) => {
                let name = app.session().username().unwrap_or_default();
                success_output(format!("Logged in as {name}"))
            }
            Err(e) => error_output(e.to_string()),
        },
        Command::Logout => {
            let message = app
                .session()
                .username()
                .map_or_else(|| "Not logged in".to_string(), |name| format!("Logged out {name}"));
            app.logout();
            success_output(message)
        }
        Command::Whoami => match app.session().username() {
            Some(name) => success_output(name.to_string()),
            None => error_output(NOT_LOGGED_IN.to_string()),
        },
        Command::Users => CliOutput {
            exit_code: ExitCode::SUCCESS,
            stdout: app.sessions().list_known_usernames(),
            stderr: vec![],
        },
        Command::Debug => CliOutput {
            exit_code: ExitCode::SUCCESS,
            stdout: app
                .sessions()
                .debug_summary()
                .into_iter()
                .map(|(key, description)| format!("{key}: {description}"))
                .collect(),
            stderr: vec![],
        },
        task_command => error_output(format!("{task_command:?} requires a session")),
    }
}

const NOT_LOGGED_IN: &str = "Not logged in. Run `task-keeper login <name>` first.";

const NOTHING_TO_UPDATE: &str =
    "Nothing to update. Pass at least one of --title, --description, --priority, --due, --clear-due.";

fn run_task_command<S: KeyValueStore>(dashboard: &mut Dashboard<S>, command: Command) -> CliOutput {
    match command {
        Command::Add { title, description, priority, due, completed } => {
            let priority = match Priority::from_str(&priority) {
                Ok(p) => p,
                Err(e) => return error_output(e.to_string()),
            };
            let draft = TaskDraft { title, description, completed, priority, due_date: due };
            dashboard.begin_create();
            match dashboard.create(draft) {
                Ok(task) => json_output(&task),
                Err(e) => error_output(e.to_string()),
            }
        }
        Command::Edit { id, title, description, priority, due, clear_due } => {
            let priority = match priority.as_deref().map(Priority::from_str).transpose() {
                Ok(p) => p,
                Err(e) => return error_output(e.to_string()),
            };
            let due_date = if clear_due { Some(None) } else { due.map(Some) };
            let update = TaskUpdate { title, description, completed: None, priority, due_date };
            if update.is_empty() {
                return error_output(NOTHING_TO_UPDATE.to_string());
            }

            if !dashboard.begin_edit(&id) {
                return error_output(format!("Task not found: {id}"));
            }
            match dashboard.update(&id, update) {
                Ok(_) => match dashboard.task(&id) {
                    Some(task) => json_output(task),
                    None => error_output(format!("Task not found: {id}")),
                },
                Err(e) => error_output(e.to_string()),
            }
        }
        Command::Toggle { id } => {
            if !dashboard.toggle(&id) {
                return error_output(format!("Task not found: {id}"));
            }
            let state = match dashboard.task(&id) {
                Some(task) if task.completed => "completed",
                _ => "pending",
            };
            success_output(format!("Task {id} is now {state}"))
        }
        Command::Delete { id } => {
            if dashboard.delete(&id) {
                success_output(format!("Deleted task {id}"))
            } else {
                error_output(format!("Task not found: {id}"))
            }
        }
        Command::List { filter, search, json } => {
            let filter = match TaskFilter::from_str(&filter) {
                Ok(f) => f,
                Err(e) => return error_output(e.to_string()),
            };
            dashboard.set_filter(filter);
            dashboard.set_query(search);
            list_output(dashboard, json)
        }
        Command::Login { .. }
        | Command::Logout
        | Command::Whoami
        | Command::Users
        | Command::Debug => error_output("not a task command".to_string()),
    }
}

fn list_output<S: KeyValueStore>(dashboard: &Dashboard<S>, json: bool) -> CliOutput {
    let tasks = dashboard.visible_tasks();
    let counts = dashboard.counts();

    if json {
        let items: Vec<TaskListItem> = tasks
            .iter()
            .map(|task| TaskListItem { overdue: dashboard.is_overdue(task), task })
            .collect();
        return json_output(&ListOutput { counts, tasks: items });
    }

    let mut lines = vec![format!(
        "all: {}  completed: {}  pending: {}",
        counts.all, counts.completed, counts.pending
    )];
    if tasks.is_empty() {
        lines.push("No tasks found".to_string());
    }
    lines.extend(tasks.iter().map(|task| format_task_line(task, dashboard.is_overdue(task))));
    CliOutput { exit_code: ExitCode::SUCCESS, stdout: lines, stderr: vec![] }
}

fn format_task_line(task: &Task, overdue: bool) -> String {
    let mark = if task.completed { "x" } else { " " };
    let mut line = format!("[{mark}] {}  {}  ({})", task.id, task.title, task.priority);
    if let Some(ref due) = task.due_date {
        line.push_str(&format!("  due {due}"));
        if overdue {
            line.push_str(" (Overdue)");
        }
    }
    if let Some(created) = parse_timestamp(&task.created_at) {
        line.push_str(&created.format("  created %Y-%m-%d at %H:%M").to_string());
    }
    if !task.description.is_empty() {
        line.push_str(&format!("\n      {}", task.description));
    }
    line
}

// === Helper Functions ===

fn open_store(config: &Config, database: Option<PathBuf>) -> Rc<dyn KeyValueStore> {
    let Some(path) = database.or_else(|| config.resolved_database_path()) else {
        tracing::warn!("no home directory; tasks will not be persisted");
        return Rc::new(MemoryStore::new());
    };

    match SqliteStore::with_path(&path) {
        Ok(store) => Rc::new(store),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "storage unavailable; tasks will not be persisted");
            Rc::new(MemoryStore::new())
        }
    }
}

fn json_output<T: Serialize>(value: &T) -> CliOutput {
    match serde_json::to_string_pretty(value) {
        Ok(json) => CliOutput { exit_code: ExitCode::SUCCESS, stdout: vec![json], stderr: vec![] },
        Err(e) => error_output(e.to_string()),
    }
}

fn success_output(message: String) -> CliOutput {
    CliOutput { exit_code: ExitCode::SUCCESS, stdout: vec![message], stderr: vec![] }
}

fn error_output(message: String) -> CliOutput {
    CliOutput { exit_code: ExitCode::from(1), stdout: vec![], stderr: vec![message] }
}

// === Output Types ===

/// A task in list output, with its overdue flag.
#[derive(Debug, Serialize)]
struct TaskListItem<'a> {
    #[serde(flatten)]
    task: &'a Task,
    overdue: bool,
}

/// JSON output of the `list` command.
#[derive(Debug, Serialize)]
struct ListOutput<'a> {
    counts: TaskCounts,
    tasks: Vec<TaskListItem<'a>>,
}
