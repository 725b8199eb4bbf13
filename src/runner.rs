//! Caller-facing run orchestration.
//!
//! A [`Runner`] holds the raw workload source, the execution mode, the
//! reference registry, and the host-supplied compiler, and drives one run
//! end to end: bind variables, compile once, execute every input, and
//! aggregate the outcomes. A failed compile short-circuits straight to
//! the aggregated results with diagnostics only.

use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use crate::binder;
use crate::compile::{ModuleRef, ReferenceRegistry, WorkloadCompiler};
use crate::engine::{ConcurrencyMode, Executor};
use crate::input::Input;
use crate::results::RunResults;
use crate::{MultirunError, Result};

/// How the caller asks a run to be scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// One invocation at a time, in input order
    #[default]
    Series,
    /// Concurrent invocations; bounded when a concurrency limit is set,
    /// unbounded otherwise
    Parallel,
}

/// Orchestrates bind, compile, execute, and aggregate for one workload
pub struct Runner {
    source: String,
    mode: ExecutionMode,
    concurrency_limit: Option<usize>,
    references: ReferenceRegistry,
    compiler: Arc<dyn WorkloadCompiler>,
}

impl Runner {
    /// Create a runner for `source`, compiled by `compiler`
    pub fn new(source: impl Into<String>, compiler: Arc<dyn WorkloadCompiler>) -> Self {
        Self {
            source: source.into(),
            mode: ExecutionMode::Series,
            concurrency_limit: None,
            references: ReferenceRegistry::new(),
            compiler,
        }
    }

    /// Set the execution mode
    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Cap concurrent invocations in [`ExecutionMode::Parallel`].
    ///
    /// Without a limit, parallel runs are unbounded. Hosts that want the
    /// hardware-derived ceiling can pass
    /// [`default_concurrency()`](crate::engine::default_concurrency).
    pub fn with_concurrency_limit(mut self, limit: usize) -> Self {
        self.concurrency_limit = Some(limit);
        self
    }

    /// Add module references visible inside the compiled workload
    pub fn add_references<I>(&mut self, references: I)
    where
        I: IntoIterator<Item = ModuleRef>,
    {
        self.references.add_references(references);
    }

    /// Add namespace imports opened inside the compiled workload
    pub fn add_imports<I, S>(&mut self, imports: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.references.add_imports(imports);
    }

    /// The registry handed to the compiler
    pub fn references(&self) -> &ReferenceRegistry {
        &self.references
    }

    /// Run the workload across `inputs`.
    ///
    /// Always returns a [`RunResults`]; the only `Err` is a configuration
    /// error raised before binding or execution starts.
    #[instrument(skip(self, inputs))]
    pub async fn run(&self, inputs: &[Input]) -> Result<RunResults> {
        let run_id = format!("run-{}", Uuid::new_v4());

        validate_inputs(inputs)?;
        let mode = self.concurrency_mode()?;

        info!(
            run_id = %run_id,
            input_count = inputs.len(),
            mode = ?mode,
            "starting run"
        );

        let bound = binder::bind(&self.source, inputs);
        let unit = match self.compiler.compile(&bound, &self.references) {
            Ok(unit) => unit,
            Err(diagnostics) => {
                info!(
                    run_id = %run_id,
                    diagnostic_count = diagnostics.len(),
                    "compilation produced diagnostics, skipping execution"
                );
                return Ok(RunResults::from_diagnostics(diagnostics));
            }
        };

        let outcomes = Executor::new(unit).run(inputs, mode).await?;
        let results = RunResults::from_outcomes(outcomes);

        info!(
            run_id = %run_id,
            outcome_count = results.outcomes().len(),
            succeeded = results.succeeded(),
            "run completed"
        );

        Ok(results)
    }

    fn concurrency_mode(&self) -> Result<ConcurrencyMode> {
        match (self.mode, self.concurrency_limit) {
            (ExecutionMode::Series, _) => Ok(ConcurrencyMode::Series),
            (ExecutionMode::Parallel, None) => Ok(ConcurrencyMode::ParallelUnbounded),
            (ExecutionMode::Parallel, Some(0)) => Err(MultirunError::Config(
                "concurrency limit must be at least 1".to_string(),
            )),
            (ExecutionMode::Parallel, Some(limit)) => Ok(ConcurrencyMode::ParallelBounded(limit)),
        }
    }
}

fn validate_inputs(inputs: &[Input]) -> Result<()> {
    for input in inputs {
        for name in input.variable_names() {
            if !binder::valid_variable_name(name) {
                return Err(MultirunError::Config(format!(
                    "invalid variable name {name:?}"
                )));
            }
        }
    }
    Ok(())
}

impl std::fmt::Debug for Runner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner")
            .field("source_len", &self.source.len())
            .field("mode", &self.mode)
            .field("concurrency_limit", &self.concurrency_limit)
            .field("references", &self.references)
            .finish()
    }
}
