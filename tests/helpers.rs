// Shared test helpers for mock servers, clients and log capture.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::{Arc, Mutex};

use proxyfetch::{Client, LogSink, Logger};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use wiremock::MockServer;

/// Creates a client bound to the mock server's origin.
#[allow(dead_code)] // Used by other test files
pub fn client_for(server: &MockServer) -> Client {
    Client::new(&server.uri()).expect("mock server URI should be a valid base")
}

/// Returns a local port with nothing listening on it.
#[allow(dead_code)]
pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind a free port");
    let port = listener
        .local_addr()
        .expect("bound socket should have an address")
        .port();
    drop(listener);
    port
}

/// Log sink that keeps every message for later assertions.
#[derive(Default)]
#[allow(dead_code)]
pub struct CapturingSink {
    messages: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl CapturingSink {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("sink mutex poisoned").clone()
    }
}

impl LogSink for CapturingSink {
    fn debug(&self, message: &str) {
        self.messages
            .lock()
            .expect("sink mutex poisoned")
            .push(message.to_string());
    }
}

/// Creates a logger plus a handle to read back what it recorded.
#[allow(dead_code)]
pub fn capturing_logger() -> (Logger, Arc<CapturingSink>) {
    let sink = Arc::new(CapturingSink::default());
    (Logger::from_shared(sink.clone()), sink)
}

/// In-process SOCKS5 relay (RFC 1928 CONNECT with RFC 1929 username/password).
#[allow(dead_code)]
pub struct Socks5Relay {
    pub address: SocketAddr,
    credentials: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl Socks5Relay {
    /// `user:password` pairs presented by clients, in arrival order.
    pub fn credentials(&self) -> Vec<String> {
        self.credentials.lock().expect("relay mutex poisoned").clone()
    }
}

/// Starts a SOCKS5 relay on a free local port that tunnels to whatever the
/// client asks to CONNECT to.
#[allow(dead_code)]
pub async fn spawn_socks5_relay() -> Socks5Relay {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind relay listener");
    let address = listener.local_addr().expect("relay should have an address");
    let credentials = Arc::new(Mutex::new(Vec::new()));
    let seen = credentials.clone();
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let seen = seen.clone();
            tokio::spawn(async move {
                let _ = relay_connection(stream, seen).await;
            });
        }
    });
    Socks5Relay {
        address,
        credentials,
    }
}

#[allow(dead_code)]
async fn relay_connection(
    mut client: TcpStream,
    seen: Arc<Mutex<Vec<String>>>,
) -> std::io::Result<()> {
    // Greeting: VER NMETHODS METHODS...
    let mut head = [0u8; 2];
    client.read_exact(&mut head).await?;
    let mut methods = vec![0u8; head[1] as usize];
    client.read_exact(&mut methods).await?;

    if methods.contains(&0x02) {
        client.write_all(&[0x05, 0x02]).await?;
        // Sub-negotiation: VER ULEN UNAME PLEN PASSWD
        let mut ver_len = [0u8; 2];
        client.read_exact(&mut ver_len).await?;
        let mut user = vec![0u8; ver_len[1] as usize];
        client.read_exact(&mut user).await?;
        let mut plen = [0u8; 1];
        client.read_exact(&mut plen).await?;
        let mut password = vec![0u8; plen[0] as usize];
        client.read_exact(&mut password).await?;
        seen.lock().expect("relay mutex poisoned").push(format!(
            "{}:{}",
            String::from_utf8_lossy(&user),
            String::from_utf8_lossy(&password)
        ));
        client.write_all(&[0x01, 0x00]).await?;
    } else {
        client.write_all(&[0x05, 0x00]).await?;
    }

    // Request: VER CMD RSV ATYP DST.ADDR DST.PORT
    let mut request = [0u8; 4];
    client.read_exact(&mut request).await?;
    let host = match request[3] {
        0x01 => {
            let mut octets = [0u8; 4];
            client.read_exact(&mut octets).await?;
            Ipv4Addr::from(octets).to_string()
        }
        0x03 => {
            let mut len = [0u8; 1];
            client.read_exact(&mut len).await?;
            let mut name = vec![0u8; len[0] as usize];
            client.read_exact(&mut name).await?;
            String::from_utf8_lossy(&name).into_owned()
        }
        0x04 => {
            let mut octets = [0u8; 16];
            client.read_exact(&mut octets).await?;
            format!("[{}]", Ipv6Addr::from(octets))
        }
        _ => return Ok(()),
    };
    let mut port = [0u8; 2];
    client.read_exact(&mut port).await?;
    let port = u16::from_be_bytes(port);

    let mut upstream = match TcpStream::connect(format!("{host}:{port}")).await {
        Ok(upstream) => upstream,
        Err(e) => {
            // 0x05: connection refused
            client
                .write_all(&[0x05, 0x05, 0x00, 0x01, 0, 0, 0, 0, 0, 0])
                .await?;
            return Err(e);
        }
    };
    client
        .write_all(&[0x05, 0x00, 0x00, 0x01, 0, 0, 0, 0, 0, 0])
        .await?;
    tokio::io::copy_bidirectional(&mut client, &mut upstream).await?;
    Ok(())
}
