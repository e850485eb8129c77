//! Bootstrap failure taxonomy.

use thiserror::Error;

use satchel_trust::TrustError;

use crate::loader::NativeLoadError;

#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The native support libraries could not be loaded. The process cannot continue.
    #[error("fatal: native support libraries failed to load: {0}")]
    FatalInit(#[source] NativeLoadError),
    #[error("host bootstrap already ran in this process")]
    AlreadyBootstrapped,
    #[error("failed to install transfer trust policy: {0}")]
    Trust(#[from] TrustError),
    #[error("unknown feature module '{0}' in declared module order")]
    UnknownFeatureModule(String),
}

impl BootstrapError {
    /// True for failures after which the process must exit.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::FatalInit(_))
    }
}
