//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use routegate::{build_config, with_host, with_port, Server};

/// Server bound to an ephemeral port on loopback. Not started.
pub fn local_server() -> Server {
    let config = build_config([with_host("127.0.0.1"), with_port("0")]).unwrap();
    Server::new(config)
}

/// Start `server` and wait for its listener.
pub async fn start(server: &Server) -> SocketAddr {
    server.start().unwrap();
    tokio::time::timeout(Duration::from_secs(5), server.listening())
        .await
        .expect("listener did not bind in time")
        .expect("server closed before listening")
}

/// HTTP client that never goes through a proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap()
}
