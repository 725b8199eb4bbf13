//! Aggregated run results.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::compile::Diagnostic;
use crate::engine::InvocationOutcome;

/// The aggregated outcome of one run.
///
/// Created once per run and immutable afterwards. `succeeded` is true iff
/// compilation produced no diagnostics and every invocation succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResults {
    diagnostics: Vec<Diagnostic>,
    outcomes: Vec<InvocationOutcome>,
    succeeded: bool,
}

impl RunResults {
    /// Results for a run that never executed because compilation failed
    pub fn from_diagnostics(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            diagnostics,
            outcomes: Vec::new(),
            succeeded: false,
        }
    }

    /// Results for a run that compiled cleanly and executed its inputs
    pub fn from_outcomes(outcomes: Vec<InvocationOutcome>) -> Self {
        let succeeded = outcomes.iter().all(|outcome| outcome.succeeded);
        Self {
            diagnostics: Vec::new(),
            outcomes,
            succeeded,
        }
    }

    /// Overall success flag
    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    /// Compile-time diagnostics; non-empty means nothing executed
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Per-input outcomes in original input order
    pub fn outcomes(&self) -> &[InvocationOutcome] {
        &self.outcomes
    }

    /// Every outcome's value in original order, `None` for failed outcomes
    pub fn outputs(&self) -> Vec<Option<Value>> {
        self.outcomes
            .iter()
            .map(|outcome| {
                if outcome.succeeded {
                    outcome.value.clone()
                } else {
                    None
                }
            })
            .collect()
    }

    /// Flattened human-readable messages: all diagnostics first, then the
    /// errors of failed outcomes in outcome order. Internal faults of
    /// succeeded outcomes are not included.
    pub fn messages(&self) -> Vec<String> {
        let mut messages: Vec<String> = self
            .diagnostics
            .iter()
            .map(Diagnostic::to_string)
            .collect();
        messages.extend(
            self.outcomes
                .iter()
                .filter(|outcome| !outcome.succeeded)
                .filter_map(|outcome| outcome.error.clone()),
        );
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::Invocation;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn ok(index: usize, value: i64) -> InvocationOutcome {
        InvocationOutcome::success(index, None, Invocation::value(value))
    }

    #[test]
    fn test_diagnostics_mean_failure_and_no_outcomes() {
        let results = RunResults::from_diagnostics(vec![
            Diagnostic::error("unexpected end of source"),
            Diagnostic::warning("unused variable 'y'"),
        ]);

        assert!(!results.succeeded());
        assert!(results.outcomes().is_empty());
        assert_eq!(results.diagnostics().len(), 2);
    }

    #[test]
    fn test_all_outcomes_succeeding_means_success() {
        let results = RunResults::from_outcomes(vec![ok(0, 2), ok(1, 4)]);
        assert!(results.succeeded());
        assert_eq!(results.outputs(), vec![Some(json!(2)), Some(json!(4))]);
        assert!(results.messages().is_empty());
    }

    #[test]
    fn test_one_failure_flips_success() {
        let results = RunResults::from_outcomes(vec![
            ok(0, 2),
            InvocationOutcome::failure(1, None, "divide by zero"),
            ok(2, 6),
        ]);

        assert!(!results.succeeded());
        assert_eq!(
            results.outputs(),
            vec![Some(json!(2)), None, Some(json!(6))]
        );
        assert_eq!(results.messages(), vec!["divide by zero".to_string()]);
    }

    #[test]
    fn test_messages_order_diagnostics_first() {
        let mut results = RunResults::from_outcomes(vec![
            InvocationOutcome::failure(0, None, "first failure"),
            InvocationOutcome::failure(1, None, "second failure"),
        ]);
        results.diagnostics = vec![Diagnostic::warning("deprecated syntax")];

        assert_eq!(
            results.messages(),
            vec![
                "warning: deprecated syntax".to_string(),
                "first failure".to_string(),
                "second failure".to_string(),
            ]
        );
    }

    #[test]
    fn test_internal_fault_not_in_messages() {
        let results = RunResults::from_outcomes(vec![InvocationOutcome::success(
            0,
            None,
            Invocation::value(1).with_fault("overflow clamped"),
        )]);

        assert!(results.succeeded());
        assert!(results.messages().is_empty());
    }
}
