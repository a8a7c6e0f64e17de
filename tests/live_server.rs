//! Runs the gateway on a real socket and talks to it over HTTP.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use civic_gateway::config::GatewayConfig;
use civic_gateway::{HttpServer, Shutdown};

mod common;

#[tokio::test]
async fn test_serves_and_shuts_down() {
    let hits = Arc::new(AtomicUsize::new(0));
    let server = HttpServer::new(GatewayConfig::default(), common::recording_catalog(&hits)).unwrap();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();

    let res = client
        .get(format!("http://{addr}/api/citizen/42"))
        .header("Origin", common::ALLOWED_ORIGIN)
        .send()
        .await
        .expect("gateway unreachable");
    assert_eq!(res.status(), 200);
    assert_eq!(
        res.headers()["access-control-allow-origin"],
        common::ALLOWED_ORIGIN
    );
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["group"], "citizen");
    assert_eq!(body["id"], "42");

    let preflight = client
        .request(reqwest::Method::OPTIONS, format!("http://{addr}/api/auth/login"))
        .header("Origin", common::ALLOWED_ORIGIN)
        .header("Access-Control-Request-Method", "POST")
        .send()
        .await
        .unwrap();
    assert_eq!(preflight.status(), 204);

    let blocked = client
        .get(format!("http://{addr}/api/issues"))
        .header("Origin", "http://evil.example")
        .send()
        .await
        .unwrap();
    assert_eq!(blocked.status(), 403);

    assert_eq!(hits.load(Ordering::SeqCst), 1);

    shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());
}
