//! Certificate-validation capability and the blanket-accept policy.

use std::fmt;

use rustls::DistinguishedName;
use rustls::pki_types::{CertificateDer, ServerName};

use satchel_types::TrustDecision;

/// Certificate-validation capability consulted by a TLS subsystem.
///
/// Chains are ordered end-entity first. Implementations must be safe to call
/// from any number of network threads at once.
pub trait CertificateTrust: fmt::Debug + Send + Sync {
    fn validate_client_chain(&self, chain: &[CertificateDer<'_>]) -> TrustDecision;

    fn validate_server_chain(
        &self,
        chain: &[CertificateDer<'_>],
        server_name: &ServerName<'_>,
    ) -> TrustDecision;

    /// Issuers this policy hints to peers when requesting client certificates.
    fn accepted_issuers(&self) -> &[DistinguishedName];

    /// True when the policy skips chain validation entirely.
    fn bypasses_validation(&self) -> bool {
        false
    }
}

/// Accepts every certificate chain without inspecting it.
///
/// Empty chains, expired or self-signed certificates, and hostname mismatches
/// are all accepted, and no issuers are advertised. There is no system trust
/// store fallback. Only install this for a subsystem whose peers are
/// user-configured wallet backends that commonly present self-signed
/// certificates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AcceptAllTrustPolicy;

impl CertificateTrust for AcceptAllTrustPolicy {
    fn validate_client_chain(&self, _chain: &[CertificateDer<'_>]) -> TrustDecision {
        TrustDecision::Accept
    }

    fn validate_server_chain(
        &self,
        _chain: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
    ) -> TrustDecision {
        TrustDecision::Accept
    }

    fn accepted_issuers(&self) -> &[DistinguishedName] {
        &[]
    }

    fn bypasses_validation(&self) -> bool {
        true
    }
}
