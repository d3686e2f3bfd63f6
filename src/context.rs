use std::{any::Any, collections::HashMap, fmt, sync::Arc};

/// Key under which contextual information is stored.
pub type ContextKey = String;

/// Read-only keyed map created once per top-level operation and handed, unchanged, to every
/// nested decode.
#[derive(Clone, Default)]
pub struct Context {
    entries: HashMap<ContextKey, Arc<dyn Any + Send + Sync>>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry. Only available while building, before the context is frozen into an
    /// operation.
    pub fn with<T>(mut self, key: impl Into<ContextKey>, value: T) -> Self
    where
        T: Any + Send + Sync,
    {
        self.entries.insert(key.into(), Arc::new(value));
        self
    }

    /// Returns the value stored under `key` if it has type `T`.
    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.entries.get(key)?.downcast_ref()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}
