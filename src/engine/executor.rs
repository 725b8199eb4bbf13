//! The executor state machine.
//!
//! One run: `invoke` the compiled workload once per input (or once with a
//! default context when no inputs were supplied), under the selected
//! concurrency mode, and return the outcomes keyed by original input
//! index. Every invocation failure is caught inside the outcome-producing
//! future itself, so one input's failure never aborts, skips, or corrupts
//! a sibling's outcome.

use std::sync::Arc;

use futures::future;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};

use crate::compile::Workload;
use crate::engine::outcome::InvocationOutcome;
use crate::input::Input;
use crate::{MultirunError, Result};

/// Concurrency policy for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConcurrencyMode {
    /// Invoke inputs strictly in order, one at a time
    Series,
    /// Invoke all inputs concurrently with no ceiling
    ParallelUnbounded,
    /// Invoke inputs concurrently, never more than the limit in flight
    ParallelBounded(usize),
}

/// Concurrency ceiling derived from available hardware parallelism
pub fn default_concurrency() -> usize {
    num_cpus::get().max(1)
}

/// Drives one compiled workload across a run's inputs
pub struct Executor {
    unit: Arc<dyn Workload>,
}

impl Executor {
    /// Create an executor owning the workload for one run
    pub fn new(unit: Arc<dyn Workload>) -> Self {
        Self { unit }
    }

    /// Run the workload once per input under `mode`.
    ///
    /// Returns one outcome per input in original input order, or a single
    /// default-context outcome when `inputs` is empty. The only error this
    /// returns is a configuration error raised before any invocation
    /// starts; invocation failures are recorded per-outcome.
    #[instrument(skip(self, inputs), fields(input_count = inputs.len(), mode = ?mode))]
    pub async fn run(
        &self,
        inputs: &[Input],
        mode: ConcurrencyMode,
    ) -> Result<Vec<InvocationOutcome>> {
        if let ConcurrencyMode::ParallelBounded(limit) = mode {
            if limit == 0 {
                return Err(MultirunError::Config(
                    "concurrency limit must be at least 1".to_string(),
                ));
            }
        }

        if inputs.is_empty() {
            debug!("no inputs supplied, invoking once with a default context");
            return Ok(vec![invoke_one(self.unit.as_ref(), 0, None).await]);
        }

        match mode {
            ConcurrencyMode::Series => Ok(self.run_series(inputs).await),
            ConcurrencyMode::ParallelUnbounded => Ok(self.run_parallel(inputs, None).await),
            ConcurrencyMode::ParallelBounded(limit) => {
                Ok(self.run_parallel(inputs, Some(limit)).await)
            }
        }
    }

    async fn run_series(&self, inputs: &[Input]) -> Vec<InvocationOutcome> {
        let mut outcomes = Vec::with_capacity(inputs.len());
        for (index, input) in inputs.iter().enumerate() {
            outcomes.push(invoke_one(self.unit.as_ref(), index, Some(input)).await);
        }
        outcomes
    }

    /// Spawn one task per input and join the handles in index order.
    ///
    /// Joining every handle is what makes the call return only after all
    /// invocations have completed, and the join itself is the visibility
    /// barrier for the outcome buffer. In bounded mode each task acquires
    /// a semaphore permit before invoking; the permit is an RAII guard, so
    /// release is paired with acquire even when the invocation fails.
    async fn run_parallel(
        &self,
        inputs: &[Input],
        limit: Option<usize>,
    ) -> Vec<InvocationOutcome> {
        let semaphore = limit.map(|limit| Arc::new(Semaphore::new(limit)));

        let handles: Vec<JoinHandle<InvocationOutcome>> = inputs
            .iter()
            .enumerate()
            .map(|(index, input)| {
                let unit = Arc::clone(&self.unit);
                let input = input.clone();
                let semaphore = semaphore.clone();
                tokio::spawn(async move {
                    let _permit = match semaphore {
                        Some(semaphore) => Some(
                            semaphore
                                .acquire_owned()
                                .await
                                .expect("run semaphore is never closed"),
                        ),
                        None => None,
                    };
                    invoke_one(unit.as_ref(), index, Some(&input)).await
                })
            })
            .collect();

        let mut outcomes = Vec::with_capacity(inputs.len());
        for (index, joined) in future::join_all(handles).await.into_iter().enumerate() {
            match joined {
                Ok(outcome) => outcomes.push(outcome),
                Err(join_error) => {
                    warn!(index, error = %join_error, "invocation task panicked");
                    outcomes.push(InvocationOutcome::failure(
                        index,
                        Some(inputs[index].clone()),
                        MultirunError::Join(join_error).to_string(),
                    ));
                }
            }
        }
        outcomes
    }
}

/// Invoke the workload once, converting any failure into the outcome.
async fn invoke_one(unit: &dyn Workload, index: usize, input: Option<&Input>) -> InvocationOutcome {
    let default_context;
    let context = match input {
        Some(input) => input,
        None => {
            default_context = Input::default();
            &default_context
        }
    };

    match unit.invoke(context).await {
        Ok(invocation) => {
            if let Some(fault) = &invocation.fault {
                debug!(index, fault = %fault, "invocation reported an internal fault");
            }
            InvocationOutcome::success(index, input.cloned(), invocation)
        }
        Err(error) => {
            debug!(index, error = %error, "invocation failed");
            InvocationOutcome::failure(index, input.cloned(), error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::{from_fn, Invocation};

    #[test]
    fn test_default_concurrency_is_at_least_one() {
        assert!(default_concurrency() >= 1);
    }

    #[tokio::test]
    async fn test_zero_limit_is_rejected_before_any_invocation() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let unit = from_fn(move |_context: Input| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Invocation::empty())
            }
        });
        let executor = Executor::new(unit);

        let inputs = vec![Input::new().with_var("x", 1)];
        let err = executor
            .run(&inputs, ConcurrencyMode::ParallelBounded(0))
            .await
            .unwrap_err();

        assert!(matches!(err, MultirunError::Config(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_inputs_invoke_once_with_default_context() {
        let unit = from_fn(|context: Input| async move {
            assert!(context.is_empty());
            Ok(Invocation::value("ran"))
        });

        let outcomes = Executor::new(unit)
            .run(&[], ConcurrencyMode::Series)
            .await
            .unwrap();

        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].index, 0);
        assert!(outcomes[0].input.is_none());
        assert!(outcomes[0].succeeded);
    }
}
