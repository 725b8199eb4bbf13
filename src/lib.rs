//! # Multirun
//!
//! A batch workload execution engine: compile one user-supplied unit of work
//! once, then run it across many variable sets, either in series or with
//! controlled parallelism, and collect every per-input outcome into a single
//! ordered result set.
//!
//! ## Overview
//!
//! Multirun is an in-process library meant for "run this computation across
//! N parameter sets" workflows embedded inside a larger host application.
//! The host supplies the raw source of the workload and a compiler for it;
//! multirun binds the inputs' variables into the source, compiles it once,
//! drives the invocations under the selected concurrency policy, and hands
//! back one [`results::RunResults`] with per-input values, per-input errors,
//! compile diagnostics, and an overall success flag.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use multirun::compile::{from_fn, Diagnostic, Invocation, ReferenceRegistry,
//!     Workload, WorkloadCompiler};
//! use multirun::input::Input;
//! use multirun::runner::{ExecutionMode, Runner};
//!
//! struct DoublingCompiler;
//!
//! impl WorkloadCompiler for DoublingCompiler {
//!     fn compile(
//!         &self,
//!         _source: &str,
//!         _references: &ReferenceRegistry,
//!     ) -> Result<Arc<dyn Workload>, Vec<Diagnostic>> {
//!         Ok(from_fn(|context: Input| async move {
//!             let x = context.get("x").and_then(|v| v.as_i64()).unwrap_or(0);
//!             Ok(Invocation::value(x * 2))
//!         }))
//!     }
//! }
//!
//! # async fn example() -> multirun::Result<()> {
//! let runner = Runner::new("[x] * 2", Arc::new(DoublingCompiler))
//!     .with_mode(ExecutionMode::Series);
//!
//! let results = runner.run(&[Input::new().with_var("x", 21)]).await?;
//!
//! assert!(results.succeeded());
//! assert_eq!(results.outputs(), vec![Some(serde_json::json!(42))]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Key Guarantees
//!
//! - **Order preservation**: outcomes always come back in input order, no
//!   matter which invocations finish first
//! - **Failure isolation**: one input's failure never aborts or corrupts a
//!   sibling invocation's outcome
//! - **Single compile**: the workload source is bound and compiled exactly
//!   once per run; non-empty diagnostics short-circuit execution entirely
//! - **Bounded parallelism**: a counting permit caps in-flight invocations,
//!   released even when an invocation fails
//!
//! ## Modules
//!
//! - [`binder`]: variable binding for raw workload source
//! - [`compile`]: the compiler boundary, diagnostics, and module references
//! - [`engine`]: the executor driving invocations under a concurrency mode
//! - [`input`]: per-invocation variable contexts
//! - [`results`]: aggregation of outcomes and diagnostics
//! - [`runner`]: the caller-facing bind/compile/execute/aggregate pipeline

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

use thiserror::Error;

/// Result type for multirun operations
pub type Result<T> = std::result::Result<T, MultirunError>;

/// Main error type for multirun operations
#[derive(Error, Debug)]
pub enum MultirunError {
    /// Compilation failed before any invocation could start
    #[error("compile error: {0}")]
    Compile(String),

    /// A single invocation of the workload failed
    #[error("invocation error: {0}")]
    Invocation(String),

    /// Invalid run configuration (concurrency limit, variable names)
    #[error("configuration error: {0}")]
    Config(String),

    /// Join error from async tasks
    #[error("async join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Variable binding for raw workload source
pub mod binder;

/// Compiler boundary: diagnostics, module references, workload traits
pub mod compile;

/// Execution engine module
pub mod engine;

/// Per-invocation variable contexts
pub mod input;

/// Result aggregation module
pub mod results;

/// Caller-facing run orchestration
pub mod runner;
