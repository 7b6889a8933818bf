//! The migration-unit contract and the registry that resolves logical names
//! to concrete implementations.

/// One versioned schema-change unit: a forward batch run by `migrate` and a
/// backward batch run on rollback. Both batches must be non-empty when the
/// unit is invoked; an empty batch is a configuration error, not a no-op.
pub trait SchemaMigration {
    fn forward_statements(&self) -> Vec<String>;
    fn backward_statements(&self) -> Vec<String>;
}

/// An ordered mapping from logical names to factories, populated at startup.
/// Lookups fail closed: a name with no entry is an error at the call site,
/// never a silent fallback.
pub struct Registry<T: ?Sized> {
    entries: Vec<(&'static str, fn() -> Box<T>)>,
}

impl<T: ?Sized> Registry<T> {
    pub fn new() -> Registry<T> {
        Registry {
            entries: Vec::new(),
        }
    }

    pub fn register(&mut self, name: &'static str, factory: fn() -> Box<T>) {
        self.entries.push((name, factory));
    }

    pub fn resolve(&self, name: &str) -> Option<Box<T>> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|(_, factory)| factory())
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }
}

impl<T: ?Sized> Default for Registry<T> {
    fn default() -> Self {
        Registry::new()
    }
}
