#![allow(clippy::print_stderr, clippy::print_stdout)]

//! `cmdkit` demo binary: `cmdkit <command> <subcommand> [--flag value]...`.
//!
//! Exit codes: `0` success, `2` malformed command line, `1` anything else.

mod commands;
mod config;

use crate::config::AppConfig;
use cmdkit::{AppError, CliApp};
use std::process::ExitCode;

/// Application name; also the environment prefix (`CMDKIT_*`, `CMDKIT_LOG_*`).
pub(crate) const ENV_PREFIX: &str = "cmdkit";

const USAGE_EXIT: u8 = 2;

fn main() -> ExitCode {
    let mut app = match CliApp::<AppConfig>::new(ENV_PREFIX) {
        Ok(app) => app,
        Err(err) => return fail(&err),
    };

    let _logger = match app.init_logging() {
        Ok(logger) => logger,
        Err(err) => return fail(&err),
    };

    let config = app.config().clone();
    if let Err(err) = commands::register(app.commands_mut(), &config) {
        return fail(&err.into());
    }

    tracing::debug!(?config, "Starting");
    match app.run_env() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => fail(&err),
    }
}

/// Usage errors were already reported with the usage text; everything else is printed here.
fn fail(err: &AppError) -> ExitCode {
    if err.is_usage() {
        return ExitCode::from(USAGE_EXIT);
    }
    eprintln!("Error: {err}");
    ExitCode::FAILURE
}
