//! Compile-time diagnostics.
//!
//! A non-empty diagnostic sequence coming back from the compiler means the
//! run never executes a single invocation; the diagnostics are surfaced
//! verbatim on the aggregated [`RunResults`](crate::results::RunResults).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a compile-time message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// Informational message
    Info,
    /// Compilation succeeded but something looks suspect
    Warning,
    /// Compilation failed
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// One compile-time message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// How severe the message is
    pub severity: Severity,
    /// Human-readable message text
    pub message: String,
}

impl Diagnostic {
    /// Create a diagnostic with an explicit severity
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }

    /// Shorthand for an error diagnostic
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Shorthand for a warning diagnostic
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}
