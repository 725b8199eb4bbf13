//! Compilation boundary.
//!
//! The compiler itself is an external capability the host supplies; this
//! module owns everything the engine exchanges with it: compile-time
//! diagnostics, the registry of module references visible inside the
//! compiled unit, and the [`Workload`]/[`WorkloadCompiler`] traits.

/// Compile-time diagnostics
pub mod diagnostics;

/// Module references and imports visible to the compiled workload
pub mod references;

/// Workload and compiler traits
pub mod workload;

pub use diagnostics::{Diagnostic, Severity};
pub use references::{ModuleRef, ReferenceRegistry};
pub use workload::{from_fn, FnWorkload, Invocation, Workload, WorkloadCompiler};
