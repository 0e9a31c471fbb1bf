//! `predict-diabetes` entrypoint.
//!
//! A thin wrapper over the `cli` module: parse the eight values, predict,
//! print the label, and exit with the matching status.
//! For programmatic use, prefer the library API (`diabetes_predict::api`).

use std::process::ExitCode;

mod cli;

fn main() -> ExitCode {
    ExitCode::from(cli::run())
}
