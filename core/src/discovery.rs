//! Baseline module discovery.
//!
//! Discovery is an explicit, build-time registration list rather than a
//! runtime scan: platform integrations hand the host a plain sequence of
//! modules and the registry takes it as-is.

use std::sync::Arc;

use satchel_types::{CapabilityModule, HostConfig};

/// Supplies the baseline modules for a host configuration.
pub trait ModuleDiscovery: Send + Sync {
    fn discover(&self, host: &HostConfig) -> Vec<Arc<dyn CapabilityModule>>;
}

/// Discovery over a fixed list of modules.
#[derive(Debug, Clone, Default)]
pub struct StaticDiscovery {
    modules: Vec<Arc<dyn CapabilityModule>>,
}

impl StaticDiscovery {
    #[must_use]
    pub fn new(modules: Vec<Arc<dyn CapabilityModule>>) -> Self {
        Self { modules }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

impl ModuleDiscovery for StaticDiscovery {
    fn discover(&self, _host: &HostConfig) -> Vec<Arc<dyn CapabilityModule>> {
        self.modules.clone()
    }
}
