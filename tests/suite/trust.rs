//! Transfer trust policy exercised through real TLS handshakes

use std::sync::Arc;

use rustls::DistinguishedName;
use rustls::pki_types::{CertificateDer, ServerName};

use satchel_trust::{AcceptAllTrustPolicy, CertificateTrust, TransferTls};
use satchel_types::TrustDecision;

use crate::common::{
    expired_identity, handshake, plain_server_config, self_signed_identity,
};

fn installed(policy: Arc<dyn CertificateTrust>) -> TransferTls {
    let tls = TransferTls::new();
    tls.install(policy).unwrap();
    tls
}

#[derive(Debug)]
struct PinnedName(&'static str);

impl CertificateTrust for PinnedName {
    fn validate_client_chain(&self, _chain: &[CertificateDer<'_>]) -> TrustDecision {
        TrustDecision::Accept
    }

    fn validate_server_chain(
        &self,
        chain: &[CertificateDer<'_>],
        server_name: &ServerName<'_>,
    ) -> TrustDecision {
        if chain.is_empty() {
            return TrustDecision::reject("empty chain");
        }
        match server_name {
            ServerName::DnsName(name) if name.as_ref() == self.0 => TrustDecision::Accept,
            _ => TrustDecision::reject("unexpected server name"),
        }
    }

    fn accepted_issuers(&self) -> &[DistinguishedName] {
        &[]
    }
}

#[test]
fn accept_all_completes_handshake_with_self_signed_server() {
    let tls = installed(Arc::new(AcceptAllTrustPolicy));
    let server = plain_server_config(self_signed_identity("node.local"));
    assert!(handshake(tls.client_config().unwrap(), server, "node.local").is_ok());
}

#[test]
fn accept_all_completes_handshake_with_hostname_mismatch() {
    let tls = installed(Arc::new(AcceptAllTrustPolicy));
    let server = plain_server_config(self_signed_identity("somewhere.else"));
    assert!(handshake(tls.client_config().unwrap(), server, "node.local").is_ok());
}

#[test]
fn accept_all_completes_handshake_with_expired_server() {
    let tls = installed(Arc::new(AcceptAllTrustPolicy));
    let server = plain_server_config(expired_identity("node.local"));
    assert!(handshake(tls.client_config().unwrap(), server, "node.local").is_ok());
}

#[test]
fn installed_policy_decides_handshake_outcome() {
    let tls = installed(Arc::new(PinnedName("node.local")));

    let server = plain_server_config(self_signed_identity("node.local"));
    assert!(handshake(tls.client_config().unwrap(), server, "node.local").is_ok());

    let server = plain_server_config(self_signed_identity("node.local"));
    assert!(handshake(tls.client_config().unwrap(), server, "other.local").is_err());
}

#[test]
fn inbound_server_config_accepts_clients_without_certificates() {
    let tls = installed(Arc::new(AcceptAllTrustPolicy));
    let identity = self_signed_identity("transfer.local");
    let server = tls
        .server_config(vec![identity.cert], identity.key)
        .unwrap();
    assert!(handshake(tls.client_config().unwrap(), server, "transfer.local").is_ok());
}

#[test]
fn accepted_issuers_stay_empty_after_handshakes() {
    let policy = Arc::new(AcceptAllTrustPolicy);
    let tls = installed(policy.clone());
    for _ in 0..2 {
        let server = plain_server_config(self_signed_identity("node.local"));
        handshake(tls.client_config().unwrap(), server, "node.local").unwrap();
        assert!(policy.accepted_issuers().is_empty());
    }
}
