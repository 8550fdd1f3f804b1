// src/constants.rs

/// Maximum depth of nested variable resolution before expansion is aborted.
pub const MAX_RECURSION_DEPTH: u32 = 32;

/// Default number of spaces prepended to each line by the indent helpers.
pub const DEFAULT_INDENT: usize = 4;

/// Prefix printed before fatal error messages.
pub const ERROR_PREFIX: &str = "Error";

/// Prefix printed before warning messages.
pub const WARNING_PREFIX: &str = "Warning";
