//! Registry of external dependencies collected during a run.

use indexmap::IndexMap;
use uidl_core::DependencyDescriptor;

/// Dependencies keyed by the name they are imported under.
///
/// Registration is last-write-wins: registering a key again replaces the
/// descriptor but keeps the key's original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DependencyRegistry {
    dependencies: IndexMap<String, DependencyDescriptor>,
}

impl DependencyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a dependency, replacing any previous one under `key`.
    pub fn register(&mut self, key: impl Into<String>, dependency: DependencyDescriptor) {
        let key = key.into();
        if let Some(previous) = self.dependencies.get(&key) {
            if *previous != dependency {
                tracing::debug!(
                    key = %key,
                    previous = %previous.meta.path,
                    replacement = %dependency.meta.path,
                    "dependency re-registered with different metadata"
                );
            }
        }
        self.dependencies.insert(key, dependency);
    }

    pub fn get(&self, key: &str) -> Option<&DependencyDescriptor> {
        self.dependencies.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.dependencies.contains_key(key)
    }

    /// All registered dependencies, in first-registration order.
    pub fn dependencies(&self) -> &IndexMap<String, DependencyDescriptor> {
        &self.dependencies
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.dependencies.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }

    pub fn into_inner(self) -> IndexMap<String, DependencyDescriptor> {
        self.dependencies
    }
}
