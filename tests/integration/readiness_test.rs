//! Readiness loop tests against a live database.

use pgready::endpoint::Endpoint;
use pgready::pool::{create_pool, PoolSettings};
use pgready::readiness::{await_ready, ReadinessOutcome};
use std::time::{Duration, Instant};
use tokio::io::copy_bidirectional;
use tokio::net::{TcpListener, TcpStream};

macro_rules! require_database {
    () => {
        match std::env::var("PGREADY_TEST_URL").ok() {
            Some(url) => url,
            None => {
                eprintln!("Skipping test: PGREADY_TEST_URL not set");
                return;
            }
        }
    };
}

fn rewrite_port(url: &str, port: u16) -> String {
    let mut parsed = url::Url::parse(url).expect("test URL");
    parsed.set_host(Some("127.0.0.1")).expect("set host");
    parsed.set_port(Some(port)).expect("set port");
    parsed.to_string()
}

#[tokio::test]
async fn test_ready_returns_without_waiting() {
    let url = require_database!();
    let endpoint = Endpoint::resolve(&url).expect("resolve");
    let pool = create_pool(&endpoint, &PoolSettings::default()).expect("pool");

    let max_wait = Duration::from_secs(10);
    let started = Instant::now();
    let outcome = await_ready(&pool, max_wait, Duration::from_millis(300))
        .await
        .expect("no protocol error expected");

    assert!(matches!(outcome, ReadinessOutcome::Ready(_)));
    // Success returns immediately; nowhere near the deadline.
    assert!(started.elapsed() < Duration::from_secs(5));

    pool.close().await;
}

#[tokio::test]
async fn test_becomes_ready_mid_retry() {
    let url = require_database!();
    let backend = Endpoint::resolve(&url).expect("resolve");

    // Reserve a local port, then leave it closed until the "service"
    // comes up partway through the retry loop.
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("reserve port");
    let proxy_port = listener.local_addr().expect("addr").port();
    drop(listener);

    let backend_addr = format!("{}:{}", backend.host(), backend.port());
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(500)).await;
        let listener = TcpListener::bind(("127.0.0.1", proxy_port))
            .await
            .expect("bind proxy");
        loop {
            let Ok((mut inbound, _)) = listener.accept().await else {
                continue;
            };
            let backend_addr = backend_addr.clone();
            tokio::spawn(async move {
                if let Ok(mut outbound) = TcpStream::connect(&backend_addr).await {
                    let _ = copy_bidirectional(&mut inbound, &mut outbound).await;
                }
            });
        }
    });

    let endpoint = Endpoint::resolve(&rewrite_port(&url, proxy_port)).expect("resolve proxy");
    let settings = PoolSettings {
        connect_timeout: Duration::from_secs(2),
        ..PoolSettings::default()
    };
    let pool = create_pool(&endpoint, &settings).expect("pool");

    let max_wait = Duration::from_secs(10);
    let started = Instant::now();
    let outcome = await_ready(&pool, max_wait, Duration::from_millis(100))
        .await
        .expect("no protocol error expected");

    let elapsed = started.elapsed();
    assert!(
        matches!(outcome, ReadinessOutcome::Ready(_)),
        "service should become ready once the proxy is up"
    );
    assert!(elapsed >= Duration::from_millis(400), "ready too early");
    assert!(elapsed < max_wait, "waited past the success");

    pool.close().await;
}
