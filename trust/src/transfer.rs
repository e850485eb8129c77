//! TLS configuration for the transfer subsystem.
//!
//! The transfer subsystem moves files and blobs between the wallet and
//! user-configured backends. Its certificate trust is decided by a single
//! [`CertificateTrust`] policy installed once at bootstrap; every TLS
//! configuration and HTTP client it builds afterwards routes certificate
//! validation through that policy. Building either before a policy is
//! installed is an error, so no request can go out under default trust.

use std::sync::{Arc, OnceLock};

use rustls::crypto::CryptoProvider;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls::{ClientConfig, ServerConfig};
use thiserror::Error;

use crate::policy::CertificateTrust;
use crate::verifier::PolicyVerifier;

#[derive(Debug, Error)]
pub enum TrustError {
    #[error("a trust policy is already installed for the transfer subsystem")]
    AlreadyInstalled,
    #[error("no trust policy is installed for the transfer subsystem")]
    NotInstalled,
    #[error("failed to build TLS configuration: {0}")]
    Tls(#[from] rustls::Error),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

#[derive(Debug, Default)]
pub struct TransferTls {
    policy: OnceLock<Arc<dyn CertificateTrust>>,
}

impl TransferTls {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the subsystem's trust policy. Succeeds at most once.
    pub fn install(&self, policy: Arc<dyn CertificateTrust>) -> Result<(), TrustError> {
        let bypasses = policy.bypasses_validation();
        self.policy
            .set(policy)
            .map_err(|_| TrustError::AlreadyInstalled)?;

        if bypasses {
            tracing::warn!(
                "Transfer subsystem trust policy accepts every certificate: chain, expiry and hostname checks are disabled"
            );
        } else {
            tracing::info!("Transfer subsystem trust policy installed");
        }
        Ok(())
    }

    #[must_use]
    pub fn is_installed(&self) -> bool {
        self.policy.get().is_some()
    }

    pub fn policy(&self) -> Result<&Arc<dyn CertificateTrust>, TrustError> {
        self.policy.get().ok_or(TrustError::NotInstalled)
    }

    fn verifier(&self, provider: &CryptoProvider) -> Result<Arc<PolicyVerifier>, TrustError> {
        let policy = Arc::clone(self.policy()?);
        Ok(Arc::new(PolicyVerifier::new(policy, provider)))
    }

    /// Client-side TLS configuration for outbound transfers.
    pub fn client_config(&self) -> Result<ClientConfig, TrustError> {
        let provider = Arc::new(rustls::crypto::ring::default_provider());
        let verifier = self.verifier(&provider)?;
        let config = ClientConfig::builder_with_provider(provider)
            .with_safe_default_protocol_versions()?
            .dangerous()
            .with_custom_certificate_verifier(verifier)
            .with_no_client_auth();
        Ok(config)
    }

    /// Server-side TLS configuration for inbound transfers.
    ///
    /// Client certificates are requested but optional, and judged by the
    /// installed policy.
    pub fn server_config(
        &self,
        cert_chain: Vec<CertificateDer<'static>>,
        key: PrivateKeyDer<'static>,
    ) -> Result<ServerConfig, TrustError> {
        let provider = Arc::new(rustls::crypto::ring::default_provider());
        let verifier = self.verifier(&provider)?;
        let config = ServerConfig::builder_with_provider(provider)
            .with_safe_default_protocol_versions()?
            .with_client_cert_verifier(verifier)
            .with_single_cert(cert_chain, key)?;
        Ok(config)
    }

    /// HTTP client for the transfer subsystem.
    pub fn http_client(&self) -> Result<reqwest::Client, TrustError> {
        let tls = self.client_config()?;
        let client = reqwest::Client::builder()
            .use_preconfigured_tls(tls)
            .build()?;
        Ok(client)
    }
}
