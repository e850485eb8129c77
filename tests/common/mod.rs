//! Shared test utilities and fixtures
//!
//! Certificate minting, in-memory TLS handshakes, and module fixtures used
//! across the integration suite.

#![allow(dead_code)]

use std::io::Cursor;
use std::sync::Arc;

use rustls::pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer, ServerName};
use rustls::{ClientConfig, ClientConnection, Connection, ServerConfig, ServerConnection};

use satchel_types::{CapabilityModule, ModuleDescriptor, NonEmptyString};

/// A certificate plus the key that signed it.
pub struct TestIdentity {
    pub cert: CertificateDer<'static>,
    pub key: PrivateKeyDer<'static>,
}

/// Self-signed identity valid for `name`.
pub fn self_signed_identity(name: &str) -> TestIdentity {
    let certified = rcgen::generate_simple_self_signed(vec![name.to_string()]).unwrap();
    TestIdentity {
        cert: certified.cert.der().clone(),
        key: PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(
            certified.key_pair.serialize_der(),
        )),
    }
}

/// Self-signed identity for `name` that expired long ago.
pub fn expired_identity(name: &str) -> TestIdentity {
    let mut params = rcgen::CertificateParams::new(vec![name.to_string()]).unwrap();
    params.not_before = rcgen::date_time_ymd(2001, 1, 1);
    params.not_after = rcgen::date_time_ymd(2002, 1, 1);
    let key = rcgen::KeyPair::generate().unwrap();
    let cert = params.self_signed(&key).unwrap();
    TestIdentity {
        cert: cert.der().clone(),
        key: PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(key.serialize_der())),
    }
}

/// Plain server configuration presenting `identity`, with no client auth.
pub fn plain_server_config(identity: TestIdentity) -> ServerConfig {
    ServerConfig::builder_with_provider(Arc::new(rustls::crypto::ring::default_provider()))
        .with_safe_default_protocol_versions()
        .unwrap()
        .with_no_client_auth()
        .with_single_cert(vec![identity.cert], identity.key)
        .unwrap()
}

fn pump(from: &mut Connection, to: &mut Connection) -> Result<(), rustls::Error> {
    let mut wire = Vec::new();
    while from.wants_write() {
        from.write_tls(&mut wire).unwrap();
    }

    let len = wire.len() as u64;
    let mut cursor = Cursor::new(wire);
    while cursor.position() < len {
        to.read_tls(&mut cursor).unwrap();
        to.process_new_packets()?;
    }
    Ok(())
}

/// Runs a full TLS handshake between the two configurations in memory.
pub fn handshake(
    client: ClientConfig,
    server: ServerConfig,
    server_name: &'static str,
) -> Result<(), rustls::Error> {
    let name = ServerName::try_from(server_name).unwrap();
    let mut client = Connection::Client(ClientConnection::new(Arc::new(client), name).unwrap());
    let mut server = Connection::Server(ServerConnection::new(Arc::new(server)).unwrap());

    for _ in 0..16 {
        if !client.is_handshaking() && !server.is_handshaking() {
            return Ok(());
        }
        pump(&mut client, &mut server)?;
        pump(&mut server, &mut client)?;
    }
    panic!("handshake did not settle");
}

pub fn module(name: &str, capabilities: &[&str]) -> Arc<dyn CapabilityModule> {
    Arc::new(ModuleDescriptor::new(
        NonEmptyString::new(name).unwrap(),
        capabilities.iter().copied(),
    ))
}
