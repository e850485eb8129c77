//! Capability module registration contract.
//!
//! Any feature module that wants to be reachable from the application layer
//! implements [`CapabilityModule`]. The runtime addresses modules by
//! [`CapabilityModule::name`]; two modules may share a name, in which case
//! the one registered later takes precedence at resolution time.

use std::fmt;

use crate::{NonEmptyStaticStr, NonEmptyString};

/// A unit exposing named functionality to the application layer.
pub trait CapabilityModule: fmt::Debug + Send + Sync {
    /// External name the application layer uses to address this module.
    fn name(&self) -> &str;

    /// Names of the operations this module exposes.
    fn capabilities(&self) -> &[String];
}

/// Plain data implementation of [`CapabilityModule`].
///
/// Used for the build-time registration list and for baselines returned by
/// discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptor {
    name: NonEmptyString,
    capabilities: Vec<String>,
}

impl ModuleDescriptor {
    #[must_use]
    pub fn new<I, S>(name: NonEmptyString, capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name,
            capabilities: capabilities.into_iter().map(Into::into).collect(),
        }
    }

    /// Descriptor for a module whose name is fixed at compile time.
    #[must_use]
    pub fn fixed(name: NonEmptyStaticStr, capabilities: &[&str]) -> Self {
        Self::new(name.into(), capabilities.iter().copied())
    }

    #[must_use]
    pub fn exposes(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|c| c == capability)
    }
}

impl CapabilityModule for ModuleDescriptor {
    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn capabilities(&self) -> &[String] {
        &self.capabilities
    }
}
