// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Design Store
// ─────────────────────────────────────────────────────────────────────
//! Lookup interface for designs by id and by interaction context.
//!
//! The core never persists anything. Callers either preload an
//! [`InMemoryDesigns`] or plug their storage layer in through
//! [`ExternalDesigns`].

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;

use ludics_types::{Design, DesignId, LudicsError, LudicsResult};

/// Trait for design lookup backends.
pub trait DesignStore: Send + Sync {
    /// Design with the given id, if known.
    fn get(&self, id: &DesignId) -> Option<Arc<Design>>;

    /// Every design registered under `context`, ordered by id.
    fn in_context(&self, context: &str) -> Vec<Arc<Design>>;

    /// Like [`DesignStore::get`], failing with `UnknownDesign`.
    fn resolve(&self, id: &DesignId) -> LudicsResult<Arc<Design>> {
        self.get(id)
            .ok_or_else(|| LudicsError::UnknownDesign(id.to_string()))
    }
}

/// In-memory store, safe to share between threads.
#[derive(Default)]
pub struct InMemoryDesigns {
    designs: RwLock<BTreeMap<DesignId, Arc<Design>>>,
}

impl InMemoryDesigns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_designs(designs: impl IntoIterator<Item = Design>) -> Self {
        let store = Self::new();
        for design in designs {
            store.insert(design);
        }
        store
    }

    /// Insert or replace; returns the previous design with that id.
    pub fn insert(&self, design: Design) -> Option<Arc<Design>> {
        self.designs
            .write()
            .insert(design.id().clone(), Arc::new(design))
    }

    pub fn remove(&self, id: &DesignId) -> Option<Arc<Design>> {
        self.designs.write().remove(id)
    }

    pub fn len(&self) -> usize {
        self.designs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.designs.read().is_empty()
    }

    pub fn ids(&self) -> Vec<DesignId> {
        self.designs.read().keys().cloned().collect()
    }
}

impl DesignStore for InMemoryDesigns {
    fn get(&self, id: &DesignId) -> Option<Arc<Design>> {
        self.designs.read().get(id).cloned()
    }

    fn in_context(&self, context: &str) -> Vec<Arc<Design>> {
        self.designs
            .read()
            .values()
            .filter(|d| d.context() == Some(context))
            .cloned()
            .collect()
    }
}

type GetFn = Box<dyn Fn(&DesignId) -> Option<Arc<Design>> + Send + Sync>;
type ContextFn = Box<dyn Fn(&str) -> Vec<Arc<Design>> + Send + Sync>;

/// Store that delegates to caller-supplied closures.
pub struct ExternalDesigns {
    get_fn: GetFn,
    context_fn: ContextFn,
}

impl ExternalDesigns {
    pub fn new(
        get_fn: impl Fn(&DesignId) -> Option<Arc<Design>> + Send + Sync + 'static,
        context_fn: impl Fn(&str) -> Vec<Arc<Design>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            get_fn: Box::new(get_fn),
            context_fn: Box::new(context_fn),
        }
    }
}

impl DesignStore for ExternalDesigns {
    fn get(&self, id: &DesignId) -> Option<Arc<Design>> {
        (self.get_fn)(id)
    }

    fn in_context(&self, context: &str) -> Vec<Arc<Design>> {
        (self.context_fn)(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ludics_types::{DesignBuilder, Player};

    fn design(id: &str, context: &str) -> Design {
        let mut b = DesignBuilder::new(id, Player::Proponent).context(context);
        b.proper("0", [1]).unwrap();
        b.build()
    }

    #[test]
    fn test_insert_and_get() {
        let store = InMemoryDesigns::new();
        assert!(store.is_empty());
        assert!(store.insert(design("a", "c1")).is_none());
        assert!(store.insert(design("a", "c1")).is_some());
        assert_eq!(store.len(), 1);
        assert!(store.get(&DesignId::from("a")).is_some());
    }

    #[test]
    fn test_resolve_unknown() {
        let store = InMemoryDesigns::new();
        let err = store.resolve(&DesignId::from("ghost")).unwrap_err();
        assert_eq!(err, LudicsError::UnknownDesign("ghost".into()));
    }

    #[test]
    fn test_in_context_filters_and_orders() {
        let store =
            InMemoryDesigns::with_designs([design("b", "c1"), design("a", "c1"), design("z", "c2")]);
        let ids: Vec<String> = store
            .in_context("c1")
            .iter()
            .map(|d| d.id().to_string())
            .collect();
        assert_eq!(ids, ["a", "b"]);
        assert!(store.in_context("none").is_empty());
    }

    #[test]
    fn test_remove() {
        let store = InMemoryDesigns::with_designs([design("a", "c1")]);
        assert!(store.remove(&DesignId::from("a")).is_some());
        assert!(store.is_empty());
        assert_eq!(store.ids(), Vec::<DesignId>::new());
    }

    #[test]
    fn test_external_store() {
        let shared = Arc::new(design("a", "c1"));
        let for_get = Arc::clone(&shared);
        let store = ExternalDesigns::new(
            move |id| (id.as_str() == "a").then(|| Arc::clone(&for_get)),
            |_| Vec::new(),
        );
        assert!(store.resolve(&DesignId::from("a")).is_ok());
        assert!(store.get(&DesignId::from("b")).is_none());
        assert!(store.in_context("c1").is_empty());
    }

    #[test]
    fn test_shared_between_threads() {
        let store = Arc::new(InMemoryDesigns::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    store.insert(design(&format!("d{i}"), "c"));
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(store.in_context("c").len(), 4);
    }
}
