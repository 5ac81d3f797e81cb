//! Tests for the CLI module.

use super::*;
use crate::app::App;
use crate::config::Config;
use crate::session::KeySpace;
use crate::storage::MemoryStore;
use crate::tasks::SequentialIdGenerator;
use crate::testing::ManualClock;
use crate::traits::KeyValueStore;
use clap::Parser;
use std::process::ExitCode;
use std::rc::Rc;
use tempfile::TempDir;

fn start(store: &MemoryStore) -> App<MemoryStore> {
    App::start(
        store.clone(),
        KeySpace::default(),
        Rc::new(ManualClock::at_epoch_2024()),
        Rc::new(SequentialIdGenerator::new()),
    )
}

fn exec(store: &MemoryStore, args: &[&str]) -> CliOutput {
    let mut argv = vec!["task-keeper"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();
    let mut app = start(store);
    run_command(&mut app, cli.command)
}

fn stdout(output: &CliOutput) -> String {
    output.stdout.join("\n")
}

#[test]
fn test_parse_add_defaults() {
    let cli = Cli::try_parse_from(["task-keeper", "add", "--title", "Buy milk"]).unwrap();
    assert_eq!(
        cli.command,
        Command::Add {
            title: "Buy milk".to_string(),
            description: String::new(),
            priority: "medium".to_string(),
            due: None,
            completed: false,
        }
    );
}

#[test]
fn test_parse_global_options() {
    let cli =
        Cli::try_parse_from(["task-keeper", "whoami", "--database", "/tmp/x.sqlite3"]).unwrap();
    assert_eq!(cli.database.as_deref(), Some(std::path::Path::new("/tmp/x.sqlite3")));
    assert!(cli.config.is_none());
}

#[test]
fn test_parse_edit_due_conflicts_with_clear() {
    let result =
        Cli::try_parse_from(["task-keeper", "edit", "1", "--due", "2024-01-01", "--clear-due"]);
    assert!(result.is_err());
}

#[test]
fn test_needs_session() {
    assert!(!Command::Login { username: "al".to_string() }.needs_session());
    assert!(!Command::Logout.needs_session());
    assert!(!Command::Users.needs_session());
    assert!(Command::Toggle { id: "1".to_string() }.needs_session());
    assert!(Command::List { filter: "all".into(), search: String::new(), json: false }
        .needs_session());
}

#[test]
fn test_task_commands_require_login() {
    let store = MemoryStore::new();
    let output = exec(&store, &["list"]);
    assert_eq!(output.exit_code, ExitCode::from(1));
    assert!(output.stderr[0].contains("Not logged in"));

    let output = exec(&store, &["whoami"]);
    assert_eq!(output.exit_code, ExitCode::from(1));
}

#[test]
fn test_login_validation_message() {
    let store = MemoryStore::new();
    let output = exec(&store, &["login", " a "]);
    assert_eq!(output.exit_code, ExitCode::from(1));
    assert_eq!(output.stderr, vec!["Username must be at least 2 characters long"]);
}

#[test]
fn test_session_flow() {
    let store = MemoryStore::new();

    let output = exec(&store, &["login", "  Alice "]);
    assert_eq!(output.exit_code, ExitCode::SUCCESS);
    assert_eq!(stdout(&output), "Logged in as Alice");

    assert_eq!(stdout(&exec(&store, &["whoami"])), "Alice");

    let output = exec(&store, &["add", "--title", "Buy milk", "--priority", "high"]);
    assert_eq!(output.exit_code, ExitCode::SUCCESS);
    let task: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(task["title"], "Buy milk");
    assert_eq!(task["priority"], "high");
    assert_eq!(task["completed"], false);

    let output = exec(&store, &["logout"]);
    assert_eq!(stdout(&output), "Logged out Alice");
    assert_eq!(exec(&store, &["users"]).stdout, vec!["alice"]);

    exec(&store, &["login", "ALICE"]);
    let listing = stdout(&exec(&store, &["list"]));
    assert!(listing.contains("Buy milk"));
}

#[test]
fn test_add_rejects_blank_title_and_bad_priority() {
    let store = MemoryStore::new();
    exec(&store, &["login", "bob"]);

    let output = exec(&store, &["add", "--title", "   "]);
    assert_eq!(output.exit_code, ExitCode::from(1));
    assert_eq!(output.stderr, vec!["Task title is required"]);

    let output = exec(&store, &["add", "--title", "x", "--priority", "urgent"]);
    assert_eq!(output.exit_code, ExitCode::from(1));
    assert!(output.stderr[0].contains("invalid priority"));
}

#[test]
fn test_edit_toggle_delete() {
    let store = MemoryStore::new();
    exec(&store, &["login", "bob"]);
    exec(&store, &["add", "--title", "Draft", "--due", "2024-02-01"]);

    // Every invocation restarts the app with a fresh sequential generator,
    // so the first task created is always task-1.
    let output = exec(&store, &["edit", "task-1", "--title", "Final", "--clear-due"]);
    assert_eq!(output.exit_code, ExitCode::SUCCESS);
    let task: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(task["title"], "Final");
    assert!(task.get("dueDate").is_none());

    assert_eq!(stdout(&exec(&store, &["toggle", "task-1"])), "Task task-1 is now completed");
    assert_eq!(stdout(&exec(&store, &["toggle", "task-1"])), "Task task-1 is now pending");

    let output = exec(&store, &["edit", "ghost", "--title", "x"]);
    assert_eq!(output.stderr, vec!["Task not found: ghost"]);
    assert_eq!(exec(&store, &["toggle", "ghost"]).exit_code, ExitCode::from(1));

    assert_eq!(stdout(&exec(&store, &["delete", "task-1"])), "Deleted task task-1");
    assert_eq!(exec(&store, &["delete", "task-1"]).exit_code, ExitCode::from(1));
}

#[test]
fn test_list_filter_search_and_counts() {
    let store = MemoryStore::new();
    let mut app = start(&store);
    app.login("carol").unwrap();
    run_command(&mut app, Command::Add {
        title: "Buy milk".to_string(),
        description: String::new(),
        priority: "medium".to_string(),
        due: Some("2023-12-01".to_string()),
        completed: false,
    });
    run_command(&mut app, Command::Add {
        title: "Pay bills".to_string(),
        description: String::new(),
        priority: "low".to_string(),
        due: None,
        completed: true,
    });

    let output = run_command(&mut app, Command::List {
        filter: "pending".to_string(),
        search: "buy".to_string(),
        json: false,
    });
    assert_eq!(output.stdout[0], "all: 2  completed: 1  pending: 1");
    assert_eq!(output.stdout.len(), 2);
    assert!(output.stdout[1].starts_with("[ ] task-1  Buy milk  (medium)"));
    assert!(output.stdout[1].contains("due 2023-12-01 (Overdue)"));
    assert!(output.stdout[1].ends_with("created 2024-01-01 at 00:00"));

    let output = run_command(&mut app, Command::List {
        filter: "completed".to_string(),
        search: String::new(),
        json: true,
    });
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["counts"]["completed"], 1);
    assert_eq!(json["tasks"].as_array().unwrap().len(), 1);
    assert_eq!(json["tasks"][0]["title"], "Pay bills");
    assert_eq!(json["tasks"][0]["overdue"], false);

    let output = run_command(&mut app, Command::List {
        filter: "done".to_string(),
        search: String::new(),
        json: false,
    });
    assert_eq!(output.exit_code, ExitCode::from(1));
}

#[test]
fn test_edit_without_fields_is_rejected() {
    let store = MemoryStore::new();
    exec(&store, &["login", "bob"]);
    exec(&store, &["add", "--title", "Stable"]);
    let before = store.get("task-manager-tasks-bob").unwrap();

    let output = exec(&store, &["edit", "task-1"]);
    assert_eq!(output.exit_code, ExitCode::from(1));
    assert!(output.stderr[0].starts_with("Nothing to update"));
    assert_eq!(store.get("task-manager-tasks-bob").unwrap(), before);
}

#[test]
fn test_second_add_in_new_process_gets_distinct_id() {
    let store = MemoryStore::new();
    exec(&store, &["login", "bob"]);
    exec(&store, &["add", "--title", "First"]);
    exec(&store, &["add", "--title", "Second"]);

    assert_eq!(stdout(&exec(&store, &["delete", "task-1"])), "Deleted task task-1");
    let listing = exec(&store, &["list"]);
    assert_eq!(listing.stdout[0], "all: 1  completed: 0  pending: 1");
    assert!(listing.stdout[1].starts_with("[ ] task-2  Second"));
}

#[test]
fn test_list_empty() {
    let store = MemoryStore::new();
    exec(&store, &["login", "dora"]);
    let output = exec(&store, &["list"]);
    assert_eq!(output.stdout, vec!["all: 0  completed: 0  pending: 0", "No tasks found"]);
}

#[test]
fn test_debug_dump() {
    let store = MemoryStore::new();
    exec(&store, &["login", "Eve"]);
    exec(&store, &["add", "--title", "One"]);

    let output = exec(&store, &["debug"]);
    assert_eq!(
        output.stdout,
        vec!["task-manager-tasks-eve: 1 tasks", "task-manager-username: Eve"]
    );
}

#[test]
fn test_run_uses_database_override() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("cli.sqlite3");
    let db_arg = db.to_string_lossy().to_string();
    let config = Config::default();

    let login = Cli::try_parse_from(["task-keeper", "--database", &db_arg, "login", "frank"]).unwrap();
    assert_eq!(run(login, &config).exit_code, ExitCode::SUCCESS);

    let add =
        Cli::try_parse_from(["task-keeper", "--database", &db_arg, "add", "-t", "Persisted"]).unwrap();
    assert_eq!(run(add, &config).exit_code, ExitCode::SUCCESS);

    let list = Cli::try_parse_from(["task-keeper", "--database", &db_arg, "list"]).unwrap();
    let output = run(list, &config);
    assert!(db.exists());
    assert_eq!(output.stdout[0], "all: 1  completed: 0  pending: 1");
    assert!(output.stdout[1].contains("Persisted"));
}
