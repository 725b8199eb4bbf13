//! Per-input invocation outcomes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::compile::Invocation;
use crate::input::Input;

/// The result of invoking the workload against one input.
///
/// Exactly one outcome exists per input, at the input's original index.
/// `succeeded` is false iff the invocation itself failed; an internal
/// fault reported by a successful invocation is carried in `error`
/// without flipping `succeeded`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationOutcome {
    /// Original position of the input in the run's input sequence
    pub index: usize,
    /// The input this outcome belongs to; `None` for the single synthetic
    /// default-context invocation of an empty run
    pub input: Option<Input>,
    /// Return value of the invocation, if any
    pub value: Option<Value>,
    /// Error message: the invocation failure when `succeeded` is false,
    /// or an internal non-fatal fault when `succeeded` is true
    pub error: Option<String>,
    /// Whether the invocation completed without failing
    pub succeeded: bool,
}

impl InvocationOutcome {
    /// Outcome of an invocation that completed, with whatever value and
    /// internal fault it reported
    pub fn success(index: usize, input: Option<Input>, invocation: Invocation) -> Self {
        Self {
            index,
            input,
            value: invocation.value,
            error: invocation.fault,
            succeeded: true,
        }
    }

    /// Outcome of an invocation that failed
    pub fn failure(index: usize, input: Option<Input>, error: impl Into<String>) -> Self {
        Self {
            index,
            input,
            value: None,
            error: Some(error.into()),
            succeeded: false,
        }
    }
}
