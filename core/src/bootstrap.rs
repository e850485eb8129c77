//! One-shot host bootstrap.
//!
//! # Sequence
//!
//! ```text
//! RuntimeBootstrap::run()
//!   1. NativeLoader::initialize           (failure -> FatalInit, nothing else runs)
//!   2. NewArchitectureEntryPoint::load    (only when architecture = new)
//!   3. TransferTls::install(trust policy) (before any transfer traffic)
//!   4. ModuleRegistry::build(discovered, declared)
//!   -> Arc<RuntimeHost>
//! ```
//!
//! `RuntimeBootstrap` is constructed once in `main` and passed by reference.
//! `run` succeeds at most once per instance; later calls are rejected whether
//! or not the first call succeeded.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use satchel_config::PackagedConfig;
use satchel_trust::{AcceptAllTrustPolicy, CertificateTrust, TransferTls};
use satchel_types::{ArchitectureMode, CapabilityModule, HostConfig};

use crate::BootstrapError;
use crate::discovery::{ModuleDiscovery, StaticDiscovery};
use crate::features::declared_feature_modules;
use crate::host::RuntimeHost;
use crate::loader::{LibraryDirLoader, NativeLoader};
use crate::registry::ModuleRegistry;

/// Activation hook for the new runtime architecture. Must be idempotent.
pub trait NewArchitectureEntryPoint: Send + Sync {
    fn load(&self);
}

#[derive(Debug, Default)]
pub struct DefaultEntryPoint {
    loaded: OnceLock<()>,
}

impl NewArchitectureEntryPoint for DefaultEntryPoint {
    fn load(&self) {
        self.loaded.get_or_init(|| {
            tracing::info!("New architecture entry point loaded");
        });
    }
}

pub struct RuntimeBootstrap {
    config: PackagedConfig,
    loader: Box<dyn NativeLoader>,
    entry_point: Box<dyn NewArchitectureEntryPoint>,
    discovery: Box<dyn ModuleDiscovery>,
    manual: Vec<Arc<dyn CapabilityModule>>,
    trust_policy: Arc<dyn CertificateTrust>,
    transfer_tls: Arc<TransferTls>,
    started: AtomicBool,
    host: OnceLock<Arc<RuntimeHost>>,
}

impl RuntimeBootstrap {
    #[must_use]
    pub fn builder(config: PackagedConfig) -> RuntimeBootstrapBuilder {
        RuntimeBootstrapBuilder {
            config,
            loader: None,
            entry_point: None,
            discovery: None,
            manual: None,
            trust_policy: None,
            transfer_tls: None,
        }
    }

    pub fn run(&self) -> Result<Arc<RuntimeHost>, BootstrapError> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(BootstrapError::AlreadyBootstrapped);
        }

        let host_config = self.config.host();
        tracing::info!(
            architecture = host_config.architecture_mode().as_str(),
            engine = host_config.engine_mode().as_str(),
            debug = host_config.debug_mode(),
            "Bootstrapping host"
        );

        if let Err(err) = self.loader.initialize(self.config.native()) {
            tracing::error!(error = %err, "Native support libraries failed to load");
            return Err(BootstrapError::FatalInit(err));
        }

        if host_config.architecture_mode() == ArchitectureMode::New {
            self.entry_point.load();
        }

        self.transfer_tls
            .install(Arc::clone(&self.trust_policy))?;

        let base = self.discovery.discover(host_config);
        let registry = ModuleRegistry::build(base, self.manual.clone());

        let host = Arc::new(RuntimeHost::new(host_config.clone(), registry));
        let host = self.host.get_or_init(|| host);
        tracing::info!(modules = host.module_registry().len(), "Host bootstrap complete");
        Ok(Arc::clone(host))
    }

    /// The bootstrapped host, once [`run`](Self::run) has succeeded.
    #[must_use]
    pub fn host(&self) -> Option<&Arc<RuntimeHost>> {
        self.host.get()
    }

    #[must_use]
    pub fn config(&self) -> &HostConfig {
        self.config.host()
    }

    /// TLS holder for the transfer subsystem.
    #[must_use]
    pub fn transfer_tls(&self) -> &Arc<TransferTls> {
        &self.transfer_tls
    }
}

pub struct RuntimeBootstrapBuilder {
    config: PackagedConfig,
    loader: Option<Box<dyn NativeLoader>>,
    entry_point: Option<Box<dyn NewArchitectureEntryPoint>>,
    discovery: Option<Box<dyn ModuleDiscovery>>,
    manual: Option<Vec<Arc<dyn CapabilityModule>>>,
    trust_policy: Option<Arc<dyn CertificateTrust>>,
    transfer_tls: Option<Arc<TransferTls>>,
}

impl RuntimeBootstrapBuilder {
    pub fn native_loader(mut self, loader: impl NativeLoader + 'static) -> Self {
        self.loader = Some(Box::new(loader));
        self
    }

    pub fn entry_point(mut self, entry_point: impl NewArchitectureEntryPoint + 'static) -> Self {
        self.entry_point = Some(Box::new(entry_point));
        self
    }

    pub fn discovery(mut self, discovery: impl ModuleDiscovery + 'static) -> Self {
        self.discovery = Some(Box::new(discovery));
        self
    }

    /// Replaces the declared feature modules with an explicit list.
    pub fn manual_modules(mut self, modules: Vec<Arc<dyn CapabilityModule>>) -> Self {
        self.manual = Some(modules);
        self
    }

    pub fn trust_policy(mut self, policy: Arc<dyn CertificateTrust>) -> Self {
        self.trust_policy = Some(policy);
        self
    }

    pub fn transfer_tls(mut self, tls: Arc<TransferTls>) -> Self {
        self.transfer_tls = Some(tls);
        self
    }

    pub fn build(self) -> Result<RuntimeBootstrap, BootstrapError> {
        let manual = match self.manual {
            Some(manual) => manual,
            None => declared_feature_modules(self.config.module_order())?,
        };

        Ok(RuntimeBootstrap {
            loader: self
                .loader
                .unwrap_or_else(|| Box::new(LibraryDirLoader::new("."))),
            entry_point: self
                .entry_point
                .unwrap_or_else(|| Box::new(DefaultEntryPoint::default())),
            discovery: self
                .discovery
                .unwrap_or_else(|| Box::new(StaticDiscovery::empty())),
            manual,
            trust_policy: self
                .trust_policy
                .unwrap_or_else(|| Arc::new(AcceptAllTrustPolicy)),
            transfer_tls: self.transfer_tls.unwrap_or_default(),
            config: self.config,
            started: AtomicBool::new(false),
            host: OnceLock::new(),
        })
    }
}
