//! Transfer subsystem HTTP client

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;

use rustls::{ServerConnection, StreamOwned};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use satchel_trust::{AcceptAllTrustPolicy, TransferTls, TrustError};

use crate::common::{plain_server_config, self_signed_identity};

/// Serves one HTTPS request with a fixed body, then closes.
fn serve_once(listener: TcpListener, name: &str, body: &'static str) -> thread::JoinHandle<()> {
    let config = Arc::new(plain_server_config(self_signed_identity(name)));
    thread::spawn(move || {
        let (socket, _) = listener.accept().unwrap();
        let conn = ServerConnection::new(config).unwrap();
        let mut stream = StreamOwned::new(conn, socket);

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            assert!(n > 0, "client closed before sending a request");
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.conn.send_close_notify();
        stream.flush().unwrap();
    })
}

#[tokio::test]
async fn transfer_client_fetches_after_install() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/backup.bin"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"channel-backup".to_vec()))
        .mount(&server)
        .await;

    let tls = TransferTls::new();
    tls.install(Arc::new(AcceptAllTrustPolicy)).unwrap();
    let client = tls.http_client().unwrap();

    let response = client
        .get(format!("{}/backup.bin", server.uri()))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.bytes().await.unwrap().as_ref(), b"channel-backup");
}

#[tokio::test]
async fn transfer_client_accepts_self_signed_mismatched_https_peer() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = serve_once(listener, "elsewhere.test", "ok");

    let tls = TransferTls::new();
    tls.install(Arc::new(AcceptAllTrustPolicy)).unwrap();
    let client = tls.http_client().unwrap();

    let response = client
        .get(format!("https://localhost:{port}/"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "ok");

    server.join().unwrap();
}

#[test]
fn transfer_client_refused_before_install() {
    let tls = TransferTls::new();
    assert!(matches!(tls.http_client(), Err(TrustError::NotInstalled)));
}
