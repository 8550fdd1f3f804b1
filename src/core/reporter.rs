// src/core/reporter.rs

//! User-facing error and warning reporting.
//!
//! Every message is interpolated against the caller's [`Environment`] before
//! printing, so reports can reference variables the same way commands do.
//! Library code signals fatal conditions by returning a [`FatalError`] and
//! letting exactly one top-level call site decide to print and exit; burying
//! `process::exit` inside library paths makes them untestable.

use crate::constants::{ERROR_PREFIX, WARNING_PREFIX};
use crate::core::interpolator::Interpolator;
use crate::environment::Environment;
use colored::Colorize;
use std::io::Write;

/// A fatal, user-facing error carrying an already-interpolated message.
///
/// This is the value to propagate up when execution cannot continue. The
/// designated end of the line for it is [`report_and_exit`] (or [`abort`],
/// which builds and reports in one step).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct FatalError {
    /// The interpolated message shown to the user.
    pub message: String,
}

/// Builds a [`FatalError`] from a message template.
pub fn fatal(env: &Environment, msg: &str) -> FatalError {
    FatalError {
        message: render(env, msg),
    }
}

/// Prints a warning and continues execution.
///
/// Output goes to stdout, interleaved with the command output it refers to.
pub fn warn(env: &Environment, msg: &str) {
    println!("{}", warning_message(env, msg));
}

/// Prints a fatal error and terminates the process with a failure status.
///
/// This is the single top-level handler for fatal conditions: it writes the
/// message to stdout, flushes, and exits with status 1.
pub fn abort(env: &Environment, msg: &str) -> ! {
    report_and_exit(&fatal(env, msg))
}

/// Reports an already-built [`FatalError`] and terminates the process.
pub fn report_and_exit(error: &FatalError) -> ! {
    println!("{}", format_fatal(&error.message));
    // stdout must be flushed before the process dies.
    let _ = std::io::stdout().flush();
    std::process::exit(1);
}

/// The exact text [`abort`] prints, kept as a pure function so it stays
/// testable without terminating the test process.
pub fn fatal_message(env: &Environment, msg: &str) -> String {
    format_fatal(&render(env, msg))
}

/// The exact text [`warn`] prints.
pub fn warning_message(env: &Environment, msg: &str) -> String {
    format!("{}: {}", WARNING_PREFIX.yellow().bold(), render(env, msg))
}

fn format_fatal(message: &str) -> String {
    format!("\n{}: {}", ERROR_PREFIX.red().bold(), message)
}

/// Interpolates a message template, falling back to the raw text if expansion
/// fails. A report must never be masked by a secondary error.
fn render(env: &Environment, msg: &str) -> String {
    match Interpolator::new(env).expand_string(msg) {
        Ok(rendered) => rendered,
        Err(e) => {
            log::debug!("message interpolation failed, printing raw text: {e}");
            msg.to_string()
        }
    }
}

// MARK: --- UNIT TESTS ---
