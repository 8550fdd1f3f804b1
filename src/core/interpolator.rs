// src/core/interpolator.rs

//! Recursive expansion of `$(name)` environment references in template strings.
//!
//! A variable's value may itself contain further `$(other)` references, which
//! are resolved transitively. Cycles and runaway chains are detected and
//! reported as errors instead of overflowing the stack.

use crate::constants::MAX_RECURSION_DEPTH;
use crate::environment::Environment;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use thiserror::Error;

lazy_static! {
    /// A `$(name)` token with an optional backslash escape. Group 1 is the
    /// escape marker, group 2 the full token text, group 3 the variable name.
    /// Names are restricted to word characters and hyphens; anything else
    /// (`$(a b)`, `$()`, an unterminated `$(`) simply fails to match and
    /// passes through untouched.
    static ref TOKEN_REGEX: Regex = Regex::new(r"(\\?)(\$\(([\w-]+)\))").unwrap();

    /// The legacy percent syntax: `%%` (a literal percent) or `%(name)s`.
    static ref PERCENT_REGEX: Regex = Regex::new(r"%%|%\(([\w-]+)\)s").unwrap();
}

/// Errors produced when variable expansion cannot terminate.
///
/// Lookup failures are deliberately *not* errors: an unknown `$(name)` passes
/// through unchanged so that messages about missing variables can mention them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InterpolationError {
    /// A variable's value refers back to a variable already being resolved.
    #[error("Cyclical variable reference detected: {chain} -> {name}")]
    CyclicReference {
        /// The variable that closed the cycle.
        name: String,
        /// The resolution chain that led back to it, e.g. `a -> b`.
        chain: String,
    },
    /// The resolution chain grew deeper than [`MAX_RECURSION_DEPTH`].
    #[error(
        "Maximum recursion depth ({limit}) exceeded during expansion. Check for indirect cycles."
    )]
    RecursionLimit {
        /// The configured depth limit.
        limit: u32,
    },
}

/// Expands environment references in a template string.
///
/// The interpolator borrows its [`Environment`] for the duration of one
/// expansion and never mutates it. Each top-level call starts with a fresh
/// recursion state, so an interpolator can be reused across templates.
#[derive(Debug, Clone)]
pub struct Interpolator<'a> {
    env: &'a Environment,
    // Variables currently being resolved, in order. Used for cycle detection.
    recursion_stack: Vec<String>,
    // Runaway protection for long non-cyclic chains.
    recursion_depth: u32,
}

impl<'a> Interpolator<'a> {
    /// Creates an interpolator reading from `env`.
    pub fn new(env: &'a Environment) -> Self {
        Self {
            env,
            recursion_stack: Vec::new(),
            recursion_depth: 0,
        }
    }

    /// Creates a new interpolator for a deeper recursion level.
    fn new_for_recursion(&self) -> Self {
        Self {
            env: self.env,
            recursion_stack: self.recursion_stack.clone(),
            recursion_depth: self.recursion_depth + 1,
        }
    }

    /// Expands an optional template, passing absence through unchanged.
    ///
    /// This mirrors how message pipelines hand around optional strings: a
    /// `None` simply stays `None` and is never an error.
    pub fn format(&mut self, template: Option<&str>) -> Result<Option<String>, InterpolationError> {
        match template {
            None => Ok(None),
            Some(s) => self.expand_string(s).map(Some),
        }
    }

    /// Recursively expands all `$(name)` tokens (and legacy `%(name)s`
    /// directives) in a string.
    pub fn expand_string(&mut self, template: &str) -> Result<String, InterpolationError> {
        // Protection against runaway recursion.
        if self.recursion_depth >= MAX_RECURSION_DEPTH {
            return Err(InterpolationError::RecursionLimit {
                limit: MAX_RECURSION_DEPTH,
            });
        }

        // The legacy pass runs first over the whole string, then the result
        // is scanned for `$(name)` tokens.
        let resolved = self.percent_pass(template);

        let mut output = String::with_capacity(resolved.len());
        let mut last_end = 0;
        for caps in TOKEN_REGEX.captures_iter(&resolved) {
            let full_match = caps.get(0).unwrap();
            output.push_str(&resolved[last_end..full_match.start()]);
            last_end = full_match.end();

            let escaped = !caps[1].is_empty();
            let name = &caps[3];
            if escaped {
                // `\$(name)` suppresses substitution; the escape marker is dropped.
                output.push_str(&caps[2]);
            } else if self.env.contains(name) {
                output.push_str(&self.resolve_variable(name)?);
            } else {
                // Unknown variable: pass the token through unchanged.
                output.push_str(full_match.as_str());
            }
        }
        output.push_str(&resolved[last_end..]);

        Ok(output)
    }

    /// Resolves one variable, expanding its value recursively with cycle
    /// detection.
    fn resolve_variable(&mut self, name: &str) -> Result<String, InterpolationError> {
        if self.recursion_stack.iter().any(|n| n == name) {
            return Err(InterpolationError::CyclicReference {
                name: name.to_string(),
                chain: self.recursion_stack.join(" -> "),
            });
        }
        self.recursion_stack.push(name.to_string());

        // Presence was checked by the caller; an empty default keeps this
        // total without panicking.
        let raw_value = self.env.get(name).unwrap_or_default();
        log::debug!("expanding $({name}) -> '{raw_value}'");

        // The sub-expansion manages its own depth.
        let mut sub_interpolator = self.new_for_recursion();
        let expanded = sub_interpolator.expand_string(raw_value)?;

        self.recursion_stack.pop();
        Ok(expanded)
    }

    /// Resolves the legacy percent syntax in a single, non-recursive pass.
    ///
    /// `%%` collapses to a literal `%`, `%(name)s` resolves against the
    /// environment when `name` is set, and every other percent sign survives
    /// as-is. Nothing in this pass can fail.
    fn percent_pass(&self, template: &str) -> String {
        PERCENT_REGEX
            .replace_all(template, |caps: &Captures<'_>| {
                let directive = caps.get(0).unwrap().as_str();
                if directive == "%%" {
                    return "%".to_string();
                }
                match caps.get(1).and_then(|name| self.env.get(name.as_str())) {
                    Some(value) => value.to_string(),
                    // Unknown name: the directive passes through unchanged.
                    None => directive.to_string(),
                }
            })
            .into_owned()
    }
}

/// Expands a template against `env` in one shot.
///
/// Convenience wrapper over [`Interpolator`] for the common case of a single
/// template string.
pub fn interpolate(env: &Environment, template: &str) -> Result<String, InterpolationError> {
    Interpolator::new(env).expand_string(template)
}

// MARK: --- UNIT TESTS ---

#[cfg(test)]
mod tests {
    use super::*;

    fn env_of(pairs: &[(&str, &str)]) -> Environment {
        pairs.iter().copied().collect()
    }

    // --- Basic substitution ---

    #[test]
    fn test_format_none_is_none() {
        let env = Environment::new();
        let mut interpolator = Interpolator::new(&env);
        assert_eq!(interpolator.format(None), Ok(None));
    }

    #[test]
    fn test_plain_text_passes_through() {
        let env = Environment::new();
        assert_eq!(interpolate(&env, "no vars here").unwrap(), "no vars here");
        assert_eq!(interpolate(&env, "").unwrap(), "");
    }

    #[test]
    fn test_simple_substitution() {
        let env = env_of(&[("host", "example.com")]);
        assert_eq!(interpolate(&env, "$(host)").unwrap(), "example.com");
        assert_eq!(
            interpolate(&env, "deploy to $(host) now").unwrap(),
            "deploy to example.com now"
        );
    }

    #[test]
    fn test_hyphenated_and_underscored_names() {
        let env = env_of(&[("build-dir", "/tmp/build"), ("log_file", "out.log")]);
        assert_eq!(
            interpolate(&env, "$(build-dir)/$(log_file)").unwrap(),
            "/tmp/build/out.log"
        );
    }

    #[test]
    fn test_unknown_variable_passes_through() {
        let env = Environment::new();
        assert_eq!(interpolate(&env, "$(missing)").unwrap(), "$(missing)");
    }

    #[test]
    fn test_malformed_tokens_pass_through() {
        let env = env_of(&[("a", "1")]);
        assert_eq!(interpolate(&env, "$(a b)").unwrap(), "$(a b)");
        assert_eq!(interpolate(&env, "$()").unwrap(), "$()");
        assert_eq!(
            interpolate(&env, "$(unterminated").unwrap(),
            "$(unterminated"
        );
    }

    // --- Escaping ---

    #[test]
    fn test_escape_suppresses_substitution() {
        let env = env_of(&[("host", "example.com")]);
        assert_eq!(interpolate(&env, r"\$(host)").unwrap(), "$(host)");
    }

    #[test]
    fn test_escaped_and_unescaped_in_one_string() {
        let env = env_of(&[("host", "example.com")]);
        assert_eq!(
            interpolate(&env, r"\$(host) resolves to $(host)").unwrap(),
            "$(host) resolves to example.com"
        );
    }

    #[test]
    fn test_escaped_unknown_variable() {
        let env = Environment::new();
        assert_eq!(interpolate(&env, r"\$(missing)").unwrap(), "$(missing)");
    }

    // --- Recursive resolution ---

    #[test]
    fn test_nested_resolution() {
        let env = env_of(&[("a", "$(b)"), ("b", "final")]);
        assert_eq!(interpolate(&env, "$(a)").unwrap(), "final");
    }

    #[test]
    fn test_nested_resolution_with_surrounding_text() {
        let env = env_of(&[("url", "https://$(host)/api"), ("host", "example.com")]);
        assert_eq!(
            interpolate(&env, "GET $(url)").unwrap(),
            "GET https://example.com/api"
        );
    }

    #[test]
    fn test_same_variable_twice_is_not_a_cycle() {
        let env = env_of(&[("x", "v")]);
        assert_eq!(interpolate(&env, "$(x) and $(x)").unwrap(), "v and v");
    }

    #[test]
    fn test_direct_cycle_is_detected() {
        let env = env_of(&[("a", "$(a)")]);
        let err = interpolate(&env, "$(a)").unwrap_err();
        assert!(matches!(err, InterpolationError::CyclicReference { .. }));
        assert!(err.to_string().contains("a -> a"));
    }

    #[test]
    fn test_indirect_cycle_is_detected() {
        let env = env_of(&[("a", "$(b)"), ("b", "$(c)"), ("c", "$(a)")]);
        let err = interpolate(&env, "$(a)").unwrap_err();
        assert!(matches!(err, InterpolationError::CyclicReference { .. }));
        assert!(err.to_string().contains("a -> b -> c -> a"));
    }

    #[test]
    fn test_recursion_limit_on_deep_chain() {
        // A linear chain deeper than the limit, with no repeated name.
        let mut env = Environment::new();
        for i in 0..40 {
            env.set(format!("v{i}"), format!("$(v{})", i + 1));
        }
        env.set("v40", "done");
        let err = interpolate(&env, "$(v0)").unwrap_err();
        assert_eq!(
            err,
            InterpolationError::RecursionLimit {
                limit: MAX_RECURSION_DEPTH
            }
        );
    }

    #[test]
    fn test_chain_below_limit_resolves() {
        let mut env = Environment::new();
        for i in 0..10 {
            env.set(format!("v{i}"), format!("$(v{})", i + 1));
        }
        env.set("v10", "done");
        assert_eq!(interpolate(&env, "$(v0)").unwrap(), "done");
    }

    // --- Legacy percent syntax ---

    #[test]
    fn test_doubled_percent_collapses() {
        let env = Environment::new();
        assert_eq!(interpolate(&env, "100%% done").unwrap(), "100% done");
    }

    #[test]
    fn test_stray_percent_survives() {
        let env = Environment::new();
        assert_eq!(interpolate(&env, "50% off").unwrap(), "50% off");
        assert_eq!(interpolate(&env, "%").unwrap(), "%");
    }

    #[test]
    fn test_percent_directive_resolves() {
        let env = env_of(&[("name", "world")]);
        assert_eq!(interpolate(&env, "hello %(name)s").unwrap(), "hello world");
    }

    #[test]
    fn test_unknown_percent_directive_passes_through() {
        let env = Environment::new();
        assert_eq!(interpolate(&env, "%(missing)s").unwrap(), "%(missing)s");
    }

    #[test]
    fn test_percent_directive_inside_variable_value() {
        let env = env_of(&[("greeting", "Hello %(name)s"), ("name", "world")]);
        assert_eq!(interpolate(&env, "$(greeting)").unwrap(), "Hello world");
    }

    // --- Idempotence ---

    #[test]
    fn test_idempotent_on_fully_resolved_output() {
        let env = env_of(&[("host", "example.com")]);
        let once = interpolate(&env, "deploy to $(host)").unwrap();
        let twice = interpolate(&env, &once).unwrap();
        assert_eq!(once, twice);
    }
}
