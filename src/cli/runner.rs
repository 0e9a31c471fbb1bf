use std::ffi::OsString;
use std::io::Write;

use tracing::debug;

use diabetes_predict::{PredictConfig, Prediction, XgbLoader, predict_from_args};

use super::args::CliArgs;
use super::errors::AppError;
use super::logging;

/// Process exit status for a printed prediction.
pub const EXIT_OK: u8 = 0;
/// Process exit status for every failure.
pub const EXIT_FAILURE: u8 = 1;

fn predict(args: &CliArgs, config: &PredictConfig) -> Result<Prediction, AppError> {
    debug!("Received {} value(s)", args.values.len());
    Ok(predict_from_args(args.values.as_slice(), config, &XgbLoader)?)
}

/// Run one request end to end and return the process exit status.
///
/// This is the single error boundary: on success exactly one line (the label)
/// goes to `out`; on any failure exactly one tagged line goes to `err` and
/// nothing is written to `out`.
pub fn run_with<I, T>(
    argv: I,
    config: &PredictConfig,
    out: &mut impl Write,
    err: &mut impl Write,
) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let result = match CliArgs::try_from_argv(argv) {
        Ok(args) => predict(&args, config).and_then(|p| {
            writeln!(out, "{p}")?;
            out.flush()?;
            Ok(())
        }),
        Err(e) => Err(AppError::usage(&e)),
    };

    match result {
        Ok(()) => EXIT_OK,
        Err(e) => {
            let _ = writeln!(err, "{}", e.tagged());
            EXIT_FAILURE
        }
    }
}

/// CLI entry: process arguments, environment configuration, real stdio.
pub fn run() -> u8 {
    logging::init();
    let config = PredictConfig::from_env();
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    run_with(std::env::args_os(), &config, &mut stdout.lock(), &mut stderr.lock())
}
