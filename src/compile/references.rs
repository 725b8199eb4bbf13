//! Module references and imports visible to the compiled workload.
//!
//! The registry collects what the host wants the compiled unit to see:
//! module references (loaded libraries) plus namespace imports opened
//! inside the unit. Duplicates and dynamic entries are silently filtered
//! before the set is handed to the compiler.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Handle to a module the compiled workload may reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRef {
    /// Module name, unique within the registry
    pub name: String,
    /// Dynamically generated modules cannot be referenced and are filtered
    pub dynamic: bool,
}

impl ModuleRef {
    /// Reference to a regular loaded module
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dynamic: false,
        }
    }

    /// Reference to a dynamically generated module
    pub fn dynamic(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dynamic: true,
        }
    }
}

/// Ordered, de-duplicated set of references and imports for one run
#[derive(Debug, Clone, Default)]
pub struct ReferenceRegistry {
    references: Vec<ModuleRef>,
    imports: Vec<String>,
}

impl ReferenceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add module references, skipping dynamic, unnamed, and duplicate entries
    pub fn add_references<I>(&mut self, references: I)
    where
        I: IntoIterator<Item = ModuleRef>,
    {
        for reference in references {
            if reference.dynamic || reference.name.trim().is_empty() {
                debug!(name = %reference.name, "skipping unusable module reference");
                continue;
            }
            if self.references.iter().any(|r| r.name == reference.name) {
                continue;
            }
            self.references.push(reference);
        }
    }

    /// Add namespace imports, skipping empty and duplicate entries
    pub fn add_imports<I, S>(&mut self, imports: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for import in imports {
            let import = import.into();
            if import.trim().is_empty() || self.imports.contains(&import) {
                continue;
            }
            self.imports.push(import);
        }
    }

    /// References in insertion order
    pub fn references(&self) -> &[ModuleRef] {
        &self.references
    }

    /// Imports in insertion order
    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    /// True when nothing has been registered
    pub fn is_empty(&self) -> bool {
        self.references.is_empty() && self.imports.is_empty()
    }
}
