//! routegate demo server.
//!
//! Serves a few routes across groups, then waits for SIGINT/SIGTERM and
//! shuts down gracefully.
//!
//! ```text
//! GET /health       root group
//! GET /v1/status    v1 group, tagged with x-api-version
//! GET /docs         docs group
//! ```

use std::path::PathBuf;

use axum::{
    extract::Request,
    http::{HeaderValue, Method},
    middleware::Next,
    Json,
};
use clap::Parser;
use serde_json::json;

use routegate::{
    build_config, config::ConfigOption, lifecycle::shutdown_signal,
    observability::logging::{init_logging, DEFAULT_DIRECTIVE},
    with_config_file, with_host, with_port, Group, Methods, Middleware, RouteRegistry, Server,
};

#[derive(Parser)]
#[command(name = "routegate")]
#[command(about = "HTTP server with grouped route registration", long_about = None)]
struct Cli {
    /// TOML config file, applied before the flags below
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind; empty binds all interfaces
    #[arg(long)]
    host: Option<String>,

    /// Port to bind
    #[arg(short, long)]
    port: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(DEFAULT_DIRECTIVE);

    tracing::info!("routegate v{} starting", env!("CARGO_PKG_VERSION"));

    let mut options: Vec<ConfigOption> = Vec::new();
    if let Some(path) = cli.config {
        options.push(with_config_file(path));
    }
    if let Some(host) = cli.host {
        options.push(with_host(host));
    }
    options.push(with_port(cli.port.unwrap_or_else(|| "8080".to_string())));
    let config = build_config(options)?;

    tracing::info!(
        address = %config.listen_address(),
        shutdown_timeout_ms = config.shutdown_timeout().as_millis() as u64,
        request_timeout_secs = config.request_timeout().as_secs(),
        "Configuration loaded"
    );

    let mut server = Server::new(config);

    let mut root = RouteRegistry::new();
    root.add_router(
        "/health",
        Methods::new().with(Method::GET, || async { Json(json!({ "status": "ok" })) }),
    );
    server.register_routers(Group::Root, &root, &[])?;

    let mut v1 = RouteRegistry::new();
    v1.add_router(
        "/status",
        Methods::new().with(Method::GET, || async {
            Json(json!({ "version": env!("CARGO_PKG_VERSION") }))
        }),
    );
    server.register_routers(Group::V1, &v1, &[Middleware::from_fn(tag_api_version)])?;

    let mut docs = RouteRegistry::new();
    docs.add_router(
        "",
        Methods::new().with(Method::GET, || async { "routegate: see /v1/status" }),
    );
    server.register_routers(Group::Docs, &docs, &[])?;

    for route in server.routes() {
        tracing::debug!(method = %route.method, path = %route.path, "Route bound");
    }

    server.start()?;
    if let Some(addr) = server.listening().await {
        tracing::info!(address = %addr, "Ready");
    }

    shutdown_signal().await;

    if let Err(err) = server.graceful_shutdown().await {
        tracing::warn!(error = %err, "Graceful shutdown incomplete, closing");
        server.close().await?;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn tag_api_version(request: Request, next: Next) -> axum::response::Response {
    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert("x-api-version", HeaderValue::from_static("v1"));
    response
}
