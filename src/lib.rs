// src/lib.rs

//! String interpolation and console reporting utilities for command-execution tools.
//!
//! The crate provides three small pieces of plumbing that a task runner needs
//! around every command it prints or executes:
//!
//! - [`Interpolator`]: recursive expansion of `$(name)` references (plus the
//!   legacy `%(name)s` syntax) against an [`Environment`] mapping.
//! - [`abort`] / [`warn`] and the [`FatalError`] type: user-facing error and
//!   warning reporting with interpolated messages.
//! - [`indent`] / [`indent_lines`]: indentation for formatted console output.
//!
//! ```
//! use weft::{Environment, interpolate};
//!
//! let mut env = Environment::new();
//! env.set("host", "example.com");
//! assert_eq!(interpolate(&env, "deploying to $(host)").unwrap(), "deploying to example.com");
//! ```

pub mod constants;
pub mod core;
pub mod environment;

pub use crate::core::interpolator::{InterpolationError, Interpolator, interpolate};
pub use crate::core::reporter::{FatalError, abort, fatal, report_and_exit, warn};
pub use crate::core::text::{indent, indent_lines};
pub use crate::environment::Environment;
