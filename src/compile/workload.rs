//! Workload and compiler traits.
//!
//! A [`Workload`] is the opaque executable the compiler produced from
//! bound source: stateless between invocations, re-invoked with a fresh
//! context each call. The [`WorkloadCompiler`] is supplied by the host and
//! called exactly once per run.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::compile::{Diagnostic, ReferenceRegistry};
use crate::input::Input;
use crate::Result;

/// What one invocation handed back.
///
/// `fault` carries a non-fatal issue reported by the workload's own
/// execution context. It rides alongside a successful invocation's value
/// and does not by itself mark the invocation as failed; a failed
/// invocation is an `Err` from [`Workload::invoke`] instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Invocation {
    /// Return value, if the workload produced one
    pub value: Option<Value>,
    /// Internal non-fatal issue reported during execution
    pub fault: Option<String>,
}

impl Invocation {
    /// Invocation that produced a value
    pub fn value(value: impl Into<Value>) -> Self {
        Self {
            value: Some(value.into()),
            fault: None,
        }
    }

    /// Invocation that produced nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// Attach an internal fault, builder style
    pub fn with_fault(mut self, fault: impl Into<String>) -> Self {
        self.fault = Some(fault.into());
        self
    }
}

/// The opaque compiled form of the user-supplied workload
#[async_trait]
pub trait Workload: Send + Sync {
    /// Run the workload once against `context`.
    ///
    /// An `Err` marks this invocation as failed; it is recovered per-input
    /// by the engine and never aborts sibling invocations.
    async fn invoke(&self, context: &Input) -> Result<Invocation>;
}

/// The external compiler capability, called exactly once per run
pub trait WorkloadCompiler: Send + Sync {
    /// Turn bound source plus references into one reusable workload, or a
    /// non-empty diagnostic set on failure.
    fn compile(
        &self,
        source: &str,
        references: &ReferenceRegistry,
    ) -> std::result::Result<Arc<dyn Workload>, Vec<Diagnostic>>;
}

type InvokeFn =
    Box<dyn Fn(Input) -> Pin<Box<dyn Future<Output = Result<Invocation>> + Send>> + Send + Sync>;

/// Workload backed by a plain async closure
pub struct FnWorkload {
    invoke: InvokeFn,
}

#[async_trait]
impl Workload for FnWorkload {
    async fn invoke(&self, context: &Input) -> Result<Invocation> {
        (self.invoke)(context.clone()).await
    }
}

/// Build a workload from an async closure.
///
/// Convenient for hosts whose workloads are native code rather than
/// compiled source, and for tests.
pub fn from_fn<F, Fut>(f: F) -> Arc<dyn Workload>
where
    F: Fn(Input) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Invocation>> + Send + 'static,
{
    Arc::new(FnWorkload {
        invoke: Box::new(move |input| Box::pin(f(input))),
    })
}
