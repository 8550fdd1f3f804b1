// src/environment.rs

//! The substitution source for interpolation.
//!
//! The surrounding tool owns its environment and mutates it freely between
//! commands; everything in this crate only ever borrows it read-only.

use std::collections::HashMap;

/// A mapping from variable names to string values, used as the substitution
/// source for every interpolation and reporting call.
///
/// Values are stored as strings. [`Environment::set`] accepts anything
/// implementing [`ToString`], so callers can insert numbers, paths, booleans
/// and so on without converting at each call site.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Creates an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a variable.
    pub fn set(&mut self, name: impl Into<String>, value: impl ToString) {
        self.vars.insert(name.into(), value.to_string());
    }

    /// Removes a variable, returning its previous value if it was set.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.vars.remove(name)
    }

    /// Returns `true` if `name` is set.
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Looks up the value of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Number of variables currently set.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns `true` if no variables are set.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut env = Self::new();
        env.extend(iter);
        env
    }
}

impl<K: Into<String>, V: ToString> Extend<(K, V)> for Environment {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.set(name, value);
        }
    }
}

// MARK: --- UNIT TESTS ---
