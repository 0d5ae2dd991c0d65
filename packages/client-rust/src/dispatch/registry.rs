use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use super::operation::ApiOperation;

/// Name -> operation table.
///
/// Populated once at startup (see `catalog::register_catalog`) and then
/// moved into the dispatcher, which only reads it. Lookups are exact,
/// case-sensitive name matches.
#[derive(Default)]
pub struct OperationRegistry {
    operations: HashMap<&'static str, Arc<dyn ApiOperation>>,
}

impl OperationRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            operations: HashMap::new(),
        }
    }

    /// Register an operation under its `name()`.
    ///
    /// A duplicate name replaces the earlier entry and is logged; the catalog
    /// is expected never to contain one.
    pub fn register<T: ApiOperation + 'static>(&mut self, operation: T) {
        self.register_arc(Arc::new(operation));
    }

    /// Register an already shared operation.
    pub fn register_arc(&mut self, operation: Arc<dyn ApiOperation>) {
        let name = operation.name();
        if self.operations.insert(name, operation).is_some() {
            warn!(operation = name, "duplicate operation registration replaced");
        }
    }

    /// Retrieve an operation by its exact name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn ApiOperation>> {
        self.operations.get(name).cloned()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.operations.keys().copied().collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
