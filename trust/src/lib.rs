//! Certificate trust for the Satchel transfer subsystem.
//!
//! - **`policy`**: the [`CertificateTrust`] capability and [`AcceptAllTrustPolicy`]
//! - **`verifier`**: adapter that plugs a policy into rustls
//! - **`transfer`**: install-once holder producing TLS configs and HTTP clients

mod policy;
mod transfer;
mod verifier;

pub use policy::{AcceptAllTrustPolicy, CertificateTrust};
pub use transfer::{TransferTls, TrustError};
pub use verifier::PolicyVerifier;
