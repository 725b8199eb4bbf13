//! Execution engine.
//!
//! The [`Executor`] drives one compiled workload across zero or more
//! inputs under a [`ConcurrencyMode`] and returns one
//! [`InvocationOutcome`] per input, in original input order.

/// The executor state machine
pub mod executor;

/// Per-input invocation outcomes
pub mod outcome;

pub use executor::{default_concurrency, ConcurrencyMode, Executor};
pub use outcome::InvocationOutcome;
