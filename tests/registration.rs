//! Route registration against a live listener.

mod common;

use axum::http::{Method, StatusCode};
use routegate::{
    build_config, with_config_file, with_port, Group, Methods, Middleware, RouteRegistry,
    Server,
};

#[tokio::test]
async fn serves_root_and_group_routes() {
    let mut server = common::local_server();

    let mut root = RouteRegistry::new();
    root.add_router("/test", Methods::new().with(Method::GET, || async { "test passed" }));
    server.register_routers(Group::Root, &root, &[]).unwrap();

    let mut users = RouteRegistry::with_prefix("/users");
    users
        .add_router_relative("", Methods::new().with(Method::GET, || async { "list" }))
        .add_router_relative(
            " /{id} ",
            Methods::new()
                .with(Method::GET, || async { "one" })
                .with(Method::DELETE, || async { StatusCode::NO_CONTENT }),
        );
    server.register_routers(Group::V2, &users, &[]).unwrap();

    let addr = common::start(&server).await;
    let client = common::client();
    let url = |path: &str| format!("http://{addr}{path}");

    let response = client.get(url("/test")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "test passed");

    let response = client.get(url("/v2/users")).send().await.unwrap();
    assert_eq!(response.text().await.unwrap(), "list");

    let response = client.get(url("/v2/users/7")).send().await.unwrap();
    assert_eq!(response.text().await.unwrap(), "one");

    let response = client.delete(url("/v2/users/7")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = client.post(url("/v2/users/7")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let response = client.get(url("/users")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    server.close().await.unwrap();
}

#[tokio::test]
async fn group_middleware_stays_in_its_group() {
    let mut server = common::local_server();

    let tag = Middleware::from_fn(|request, next: axum::middleware::Next| async move {
        let mut response = next.run(request).await;
        response
            .headers_mut()
            .insert("x-group", axum::http::HeaderValue::from_static("api"));
        response
    });

    let mut registry = RouteRegistry::new();
    registry.add_router("/ping", Methods::new().with(Method::GET, || async { "pong" }));
    server.register_routers(Group::Api, &registry, &[tag]).unwrap();
    server.register_routers(Group::Root, &registry, &[]).unwrap();

    let addr = common::start(&server).await;
    let client = common::client();

    let grouped = client.get(format!("http://{addr}/api/ping")).send().await.unwrap();
    assert_eq!(grouped.headers()["x-group"], "api");
    assert!(grouped.headers().contains_key("x-request-id"));

    let top = client.get(format!("http://{addr}/ping")).send().await.unwrap();
    assert_eq!(top.status(), StatusCode::OK);
    assert!(!top.headers().contains_key("x-group"));

    server.close().await.unwrap();
}

#[tokio::test]
async fn config_file_sets_listen_address() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("routegate.toml");
    std::fs::write(&path, "host = \"127.0.0.1\"\nshutdown_timeout_ms = 500\n").unwrap();

    let config = build_config([with_config_file(&path), with_port("0")]).unwrap();
    assert_eq!(config.listen_address(), "127.0.0.1:0");

    let mut server = Server::new(config);
    let mut registry = RouteRegistry::new();
    registry.add_router("/", Methods::new().with(Method::GET, || async { "home" }));
    server.register_routers(Group::Root, &registry, &[]).unwrap();

    let addr = common::start(&server).await;
    assert!(addr.ip().is_loopback());

    let body = common::client()
        .get(format!("http://{addr}/"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "home");

    server.graceful_shutdown().await.unwrap();
}
