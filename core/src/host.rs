//! Accessors the embedding runtime pulls after bootstrap.

use std::fmt::Write;
use std::sync::Arc;

use satchel_types::{ArchitectureMode, CapabilityModule, EngineMode, HostConfig};

use crate::registry::ModuleRegistry;

/// Read-only view of the bootstrapped host.
///
/// Shared with the embedding runtime as `Arc<RuntimeHost>`; every accessor is
/// a plain read, so any number of runtime threads may call them.
#[derive(Debug)]
pub struct RuntimeHost {
    config: HostConfig,
    registry: Arc<ModuleRegistry>,
}

impl RuntimeHost {
    pub(crate) fn new(config: HostConfig, registry: ModuleRegistry) -> Self {
        Self {
            config,
            registry: Arc::new(registry),
        }
    }

    #[must_use]
    pub fn module_registry(&self) -> &Arc<ModuleRegistry> {
        &self.registry
    }

    #[must_use]
    pub fn bundle_entry_name(&self) -> &str {
        self.config.bundle_entry_name()
    }

    #[must_use]
    pub fn is_debug(&self) -> bool {
        self.config.debug_mode()
    }

    #[must_use]
    pub fn is_new_architecture(&self) -> bool {
        self.config.architecture_mode() == ArchitectureMode::New
    }

    #[must_use]
    pub fn is_bytecode_engine(&self) -> bool {
        self.config.engine_mode() == EngineMode::Bytecode
    }

    #[must_use]
    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Multi-line description of the resolved host, for startup logs.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Bundle entry: {}", self.bundle_entry_name());
        let _ = writeln!(
            out,
            "Architecture: {}",
            self.config.architecture_mode().as_str()
        );
        let _ = writeln!(out, "Engine: {}", self.config.engine_mode().as_str());
        let _ = writeln!(out, "Debug: {}", self.is_debug());
        let _ = writeln!(out, "Modules ({}):", self.registry.len());

        let base_len = self.registry.base().len();
        for (index, module) in self.registry.iter().enumerate() {
            let origin = if index < base_len { "base" } else { "manual" };
            let _ = writeln!(
                out,
                "  {index:>2}. {} [{origin}] {} capabilities",
                module.name(),
                module.capabilities().len()
            );
        }
        for collision in self.registry.collisions() {
            let _ = writeln!(
                out,
                "  ! {} registered at {:?}; #{} takes precedence",
                collision.name,
                collision.indices,
                collision.winner()
            );
        }
        out
    }
}
