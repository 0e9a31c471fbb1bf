//! Command Line Interface (CLI) layer.
//!
//! Defines argument parsing (`args`), error types and the stderr tag
//! (`errors`), optional diagnostics (`logging`), and the single-request
//! orchestration with its top-level error boundary (`runner`).
//!
//! When embedding the classifier in another application, use the library
//! API (`diabetes_predict::api`) instead of this module.
pub mod args;
pub mod errors;
pub mod logging;
pub mod runner;

pub use runner::run;
