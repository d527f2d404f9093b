//! Server lifecycle over real sockets: serve, drain, degraded startup.

use std::time::Duration;

use api_services::lifecycle::startup::{self, ServeOutcome};
use api_services::{AppConfig, HttpServer, Shutdown};
use tokio::net::TcpListener;

mod common;

use common::test_logger;

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_serves_until_shutdown() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(AppConfig::default(), test_logger());
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    let client = client();

    let health = client
        .get(format!("http://{addr}/api/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(health.status(), 200);
    let body: serde_json::Value = health.json().await.unwrap();
    assert_eq!(body["message"], "OK");

    let user = client
        .get(format!("http://{addr}/api/user"))
        .header("x-request-id", "live-1")
        .send()
        .await
        .unwrap();
    assert_eq!(user.status(), 500);
    assert_eq!(
        user.headers()["content-type"],
        "application/json; charset=utf-8"
    );
    let body: serde_json::Value = user.json().await.unwrap();
    assert_eq!(body["requestId"], "live-1");

    shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not drain")
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_bind_failure_stays_up_until_shutdown() {
    let occupied = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = occupied.local_addr().unwrap().port();

    let mut config = AppConfig::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = port;

    let shutdown = Shutdown::new();
    let handle = tokio::spawn({
        let shutdown = shutdown.clone();
        async move { startup::serve(config, test_logger(), &shutdown).await }
    });

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!handle.is_finished(), "degraded server must wait for shutdown");

    shutdown.trigger();
    let outcome = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("degraded server ignored shutdown")
        .unwrap();

    match outcome {
        ServeOutcome::Degraded(e) => assert_eq!(e.kind(), std::io::ErrorKind::AddrInUse),
        ServeOutcome::Stopped => panic!("bind on an occupied port succeeded"),
    }
    drop(occupied);
}

#[tokio::test]
async fn test_shutdown_during_bind_stops_server() {
    let mut config = AppConfig::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;

    let shutdown = Shutdown::new();
    let handle = tokio::spawn({
        let shutdown = shutdown.clone();
        async move { startup::serve(config, test_logger(), &shutdown).await }
    });

    // Signal as soon as serve has subscribed, before the server is up.
    while shutdown.receiver_count() == 0 {
        tokio::task::yield_now().await;
    }
    shutdown.trigger();

    let outcome = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("early shutdown signal was lost")
        .unwrap();
    assert!(matches!(outcome, ServeOutcome::Stopped), "{outcome:?}");
}

#[tokio::test]
async fn test_server_keeps_config() {
    let mut config = AppConfig::default();
    config.server.env = "staging".to_string();

    let server = HttpServer::new(config, test_logger());
    assert_eq!(server.config().server.env, "staging");
}
