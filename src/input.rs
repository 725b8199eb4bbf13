//! Per-invocation variable contexts.
//!
//! An [`Input`] is one named-variable record the workload is invoked
//! against: a mapping from variable name to an opaque JSON value. Inputs
//! are created by the caller before a run and only ever borrowed by the
//! engine, never mutated.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One named-variable record a workload is invoked against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Input {
    variables: HashMap<String, Value>,
}

impl Input {
    /// Create an empty input context
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable, builder style
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// Set a variable, replacing any previous value under the same name
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.variables.insert(name.into(), value.into());
    }

    /// Look up a variable by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Iterate over the variable names in this context
    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    /// Number of variables in this context
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// True when the context carries no variables
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl FromIterator<(String, Value)> for Input {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            variables: iter.into_iter().collect(),
        }
    }
}
