//! Host bootstrap and runtime composition for Satchel.
//!
//! This crate drives the one-time startup sequence, assembles the capability
//! module registry, and exposes the result to the embedding runtime through
//! [`RuntimeHost`].

mod bootstrap;
pub mod discovery;
mod errors;
pub mod features;
mod host;
pub mod loader;
mod registry;

pub use bootstrap::{
    DefaultEntryPoint, NewArchitectureEntryPoint, RuntimeBootstrap, RuntimeBootstrapBuilder,
};
pub use discovery::{ModuleDiscovery, StaticDiscovery};
pub use errors::BootstrapError;
pub use host::RuntimeHost;
pub use loader::{LibraryDirLoader, NativeLoadError, NativeLoader};
pub use registry::{ModuleRegistry, NameCollision};
