//! CLI binary for `taskboard`.
//!
//! This binary is a thin wrapper that parses arguments and delegates to the library.

use clap::Parser;
use std::process::ExitCode;
use taskboard::cli::{run, Cli};
use taskboard::config::BoardConfig;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // A broken config is reported by `run`; logging just falls back to defaults.
    let log_filter = BoardConfig::load_from(&cli.base_dir).ok().flatten().and_then(|c| c.log_filter);
    taskboard::logging::init(log_filter.as_deref());

    let output = run(cli);

    for line in output.stdout {
        println!("{line}");
    }
    for msg in output.stderr {
        eprintln!("{msg}");
    }

    output.exit_code
}
