// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Strategy Registry
// ─────────────────────────────────────────────────────────────────────
//! Named move policies, shared between simulator threads.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;

use ludics_core::{ChronicleExtractor, StrategyBuilder};
use ludics_types::{Design, LudicsError, LudicsResult, Strategy};

use crate::policy::{MovePolicy, StrategyPolicy};

#[derive(Default)]
pub struct StrategyRegistry {
    policies: RwLock<BTreeMap<String, Arc<dyn MovePolicy>>>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register under `id`, replacing any previous policy.
    pub fn register(&self, id: impl Into<String>, policy: Arc<dyn MovePolicy>) {
        let id = id.into();
        log::debug!("registering policy {id} ({})", policy.name());
        self.policies.write().insert(id, policy);
    }

    /// Register a ludics strategy under its own name.
    pub fn register_strategy(&self, strategy: &Strategy) {
        self.register(strategy.name.clone(), Arc::new(StrategyPolicy::new(strategy)));
    }

    /// Register the chronicle strategy of `design` under the design id.
    pub fn register_design(&self, design: &Design, extractor: &ChronicleExtractor) {
        let strategy = StrategyBuilder::from_design(design.id().to_string(), design, extractor);
        self.register_strategy(&strategy);
    }

    pub fn get(&self, id: &str) -> LudicsResult<Arc<dyn MovePolicy>> {
        self.policies
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| LudicsError::UnknownStrategy(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.policies.read().contains_key(id)
    }

    pub fn remove(&self, id: &str) -> Option<Arc<dyn MovePolicy>> {
        self.policies.write().remove(id)
    }

    /// Registered ids, ascending.
    pub fn ids(&self) -> Vec<String> {
        self.policies.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.policies.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.read().is_empty()
    }
}
