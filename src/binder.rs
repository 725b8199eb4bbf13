//! Variable binding for raw workload source.
//!
//! The workload source refers to input variables with the bracket form
//! `[name]`. Before compilation every such reference is rewritten to a
//! per-invocation context lookup, `Variables["name"]`, so that the same
//! compiled unit resolves each input's own variables at run time instead
//! of a shared global.
//!
//! The rewrite is idempotent: the bracket pattern disappears after the
//! first pass (`Variables["x"]` no longer contains `[x]`), so reapplying
//! the binder to already-bound source leaves it unchanged.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::input::Input;

fn reference_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\[([A-Za-z_][A-Za-z0-9_]*)\]").expect("reference pattern is valid")
    })
}

/// True when `name` can be bound as a variable.
///
/// Names must be plain identifiers; anything else cannot appear in the
/// bracket reference form and is rejected before a run starts.
pub fn valid_variable_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Collect the distinct variable names referenced in bracket form.
pub fn referenced_names(source: &str) -> HashSet<String> {
    reference_pattern()
        .captures_iter(source)
        .map(|captures| captures[1].to_string())
        .collect()
}

/// Rewrite every `[name]` reference for the variables present in `inputs`
/// into a `Variables["name"]` context lookup.
///
/// No-op when there are no inputs or no variables. Only the exact bracket
/// pattern is rewritten, so `[x]` never matches inside `[xyz]` and the
/// rewrite never corrupts already-bound source.
pub fn bind(source: &str, inputs: &[Input]) -> String {
    if inputs.is_empty() {
        return source.to_string();
    }

    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for input in inputs {
        for name in input.variable_names() {
            if seen.insert(name) {
                names.push(name);
            }
        }
    }

    if names.is_empty() {
        return source.to_string();
    }

    let mut bound = source.to_string();
    for name in names {
        let reference = format!("[{name}]");
        let lookup = format!("Variables[\"{name}\"]");
        bound = bound.replace(&reference, &lookup);
    }

    let unbound: Vec<String> = referenced_names(&bound)
        .into_iter()
        .filter(|name| !seen.contains(name.as_str()))
        .collect();
    if !unbound.is_empty() {
        debug!(?unbound, "bracket references have no matching input variable");
    }

    bound
}
