//! Interceptor registries.

use parking_lot::RwLock;
use std::sync::Arc;

/// Ordered registry of interceptors of one kind.
///
/// Ids come from a counter and are never reused, so ejecting an id twice, or
/// an id that was never handed out, is a no-op. Only live interceptors are
/// stored. Clones share the same registry.
pub struct InterceptorManager<I: ?Sized> {
    handlers: Arc<RwLock<Registry<I>>>,
}

struct Registry<I: ?Sized> {
    next_id: usize,
    entries: Vec<(usize, Arc<I>)>,
}

impl<I: ?Sized> InterceptorManager<I> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(Registry {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Register an interceptor and return its id.
    pub fn register(&self, interceptor: Arc<I>) -> usize {
        let mut registry = self.handlers.write();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.entries.push((id, interceptor));
        id
    }

    /// Remove the interceptor registered under `id`.
    pub fn eject(&self, id: usize) {
        self.handlers.write().entries.retain(|(entry, _)| *entry != id);
    }

    /// Remove every interceptor.
    pub fn clear(&self) {
        self.handlers.write().entries.clear();
    }

    /// Number of live interceptors.
    pub fn len(&self) -> usize {
        self.handlers.read().entries.len()
    }

    /// Whether no interceptor is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live interceptors in registration order.
    ///
    /// The lock is released before returning, so callers may await while
    /// walking the result.
    pub fn snapshot(&self) -> Vec<Arc<I>> {
        self.handlers
            .read()
            .entries
            .iter()
            .map(|(_, interceptor)| Arc::clone(interceptor))
            .collect()
    }
}

impl<I: ?Sized> Clone for InterceptorManager<I> {
    fn clone(&self) -> Self {
        Self {
            handlers: Arc::clone(&self.handlers),
        }
    }
}

impl<I: ?Sized> Default for InterceptorManager<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ?Sized> std::fmt::Debug for InterceptorManager<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterceptorManager")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Named: Send + Sync {
        fn name(&self) -> &'static str;
    }

    struct Tag(&'static str);

    impl Named for Tag {
        fn name(&self) -> &'static str {
            self.0
        }
    }

    fn names(manager: &InterceptorManager<dyn Named>) -> Vec<&'static str> {
        manager.snapshot().iter().map(|i| i.name()).collect()
    }

    #[test]
    fn test_register_keeps_order() {
        let manager: InterceptorManager<dyn Named> = InterceptorManager::new();
        assert!(manager.is_empty());

        assert_eq!(manager.register(Arc::new(Tag("a"))), 0);
        assert_eq!(manager.register(Arc::new(Tag("b"))), 1);
        assert_eq!(manager.register(Arc::new(Tag("c"))), 2);

        assert_eq!(manager.len(), 3);
        assert_eq!(names(&manager), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_eject_is_idempotent() {
        let manager: InterceptorManager<dyn Named> = InterceptorManager::new();
        let a = manager.register(Arc::new(Tag("a")));
        let b = manager.register(Arc::new(Tag("b")));

        manager.eject(a);
        manager.eject(a);
        manager.eject(42);

        assert_eq!(names(&manager), vec!["b"]);

        // Ids are not reused after ejection.
        let c = manager.register(Arc::new(Tag("c")));
        assert_ne!(c, a);
        assert_ne!(c, b);
        assert_eq!(names(&manager), vec!["b", "c"]);
    }

    #[test]
    fn test_clones_share_registry() {
        let manager: InterceptorManager<dyn Named> = InterceptorManager::new();
        let handle = manager.clone();
        let id = manager.register(Arc::new(Tag("a")));

        assert_eq!(handle.len(), 1);
        handle.eject(id);
        assert!(manager.is_empty());
    }

    #[test]
    fn test_clear() {
        let manager: InterceptorManager<dyn Named> = InterceptorManager::new();
        manager.register(Arc::new(Tag("a")));
        manager.register(Arc::new(Tag("b")));
        manager.clear();
        assert!(manager.is_empty());

        let id = manager.register(Arc::new(Tag("c")));
        assert_eq!(id, 2);
    }

    #[test]
    fn test_ejected_entries_are_not_retained() {
        let manager: InterceptorManager<dyn Named> = InterceptorManager::new();
        let keep = manager.register(Arc::new(Tag("keep")));

        for _ in 0..1000 {
            let id = manager.register(Arc::new(Tag("per-request")));
            manager.eject(id);
        }

        assert_eq!(manager.handlers.read().entries.len(), 1);
        assert_eq!(names(&manager), vec!["keep"]);

        // The counter keeps going, so old ids stay dead.
        let next = manager.register(Arc::new(Tag("next")));
        assert_eq!(next, 1001);
        manager.eject(keep);
        assert_eq!(names(&manager), vec!["next"]);
    }
}
