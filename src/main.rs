//! CLI binary for `task_keeper`.
//!
//! This binary is a thin wrapper that parses arguments and delegates to the library.

use std::process::ExitCode;

use clap::Parser;
use task_keeper::cli::{run, Cli};
use task_keeper::config::Config;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = Config::load_or_default(cli.config.as_deref());

    if let Err(e) = task_keeper::logging::init(config.log_filter()) {
        eprintln!("Warning: logging init failed: {e}");
    }

    let output = run(cli, &config);

    for line in output.stdout {
        println!("{line}");
    }
    for msg in output.stderr {
        eprintln!("{msg}");
    }

    output.exit_code
}
