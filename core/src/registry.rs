//! Ordered registry of capability modules handed to the embedding runtime.
//!
//! The registry is the discovered baseline followed by the manually declared
//! feature modules, in declaration order. Nothing is deduplicated: when two
//! entries share a name both stay, and the runtime resolves the name to the
//! later one. Order is therefore the only precedence lever, and
//! [`ModuleRegistry::collisions`] reports where it is being pulled.
//!
//! A built registry has no mutating API:
//!
//! ```compile_fail
//! use satchel_core::ModuleRegistry;
//!
//! let registry = ModuleRegistry::build(Vec::new(), Vec::new());
//! registry.push(registry.modules()[0].clone());
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use satchel_types::CapabilityModule;

/// Entries that share an external name, in registration order.
///
/// The runtime resolves `name` to the module at the last index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCollision {
    pub name: String,
    pub indices: Vec<usize>,
}

impl NameCollision {
    #[must_use]
    pub fn winner(&self) -> usize {
        self.indices.last().copied().unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct ModuleRegistry {
    modules: Vec<Arc<dyn CapabilityModule>>,
    base_len: usize,
}

impl ModuleRegistry {
    /// Appends `manual` after `base`, both in the order given.
    #[must_use]
    pub fn build(
        base: Vec<Arc<dyn CapabilityModule>>,
        manual: Vec<Arc<dyn CapabilityModule>>,
    ) -> Self {
        let base_len = base.len();
        let mut modules = base;
        modules.extend(manual);

        let registry = Self { modules, base_len };

        for collision in registry.collisions() {
            tracing::warn!(
                name = %collision.name,
                indices = ?collision.indices,
                winner = collision.winner(),
                "Capability module name registered more than once; later registration takes precedence"
            );
        }
        tracing::info!(
            base = registry.base_len,
            manual = registry.manual().len(),
            "Module registry built"
        );

        registry
    }

    #[must_use]
    pub fn modules(&self) -> &[Arc<dyn CapabilityModule>] {
        &self.modules
    }

    /// The discovered baseline, in discovery order.
    #[must_use]
    pub fn base(&self) -> &[Arc<dyn CapabilityModule>] {
        &self.modules[..self.base_len]
    }

    /// The manually declared additions, in declaration order.
    #[must_use]
    pub fn manual(&self) -> &[Arc<dyn CapabilityModule>] {
        &self.modules[self.base_len..]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn CapabilityModule>> {
        self.modules.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(|module| module.name())
    }

    /// Names registered more than once, ordered by first occurrence.
    #[must_use]
    pub fn collisions(&self) -> Vec<NameCollision> {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        let mut collisions: Vec<NameCollision> = Vec::new();

        for (index, name) in self.names().enumerate() {
            match seen.get(name) {
                Some(&slot) => collisions[slot].indices.push(index),
                None => {
                    seen.insert(name, collisions.len());
                    collisions.push(NameCollision {
                        name: name.to_string(),
                        indices: vec![index],
                    });
                }
            }
        }

        collisions.retain(|c| c.indices.len() > 1);
        collisions
    }
}

impl<'a> IntoIterator for &'a ModuleRegistry {
    type Item = &'a Arc<dyn CapabilityModule>;
    type IntoIter = std::slice::Iter<'a, Arc<dyn CapabilityModule>>;

    fn into_iter(self) -> Self::IntoIter {
        self.modules.iter()
    }
}
