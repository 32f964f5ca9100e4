//! End-to-end resolution through a bound server and a fake repository host.

use std::time::Duration;

use reqwest::header::LOCATION;
use reqwest::{Method, StatusCode};
use vanity_server::ServerConfig;

mod common;

fn only_widget(path: &str) -> u16 {
    if path == "/acme/widget" {
        200
    } else {
        404
    }
}

#[tokio::test]
async fn test_go_get_serves_meta_tags() {
    let upstream = common::start_upstream(only_widget).await;
    let root = format!("{}acme/", upstream.root());
    let config = ServerConfig::new("acme.dev", &root, "").unwrap();
    let (addr, shutdown) = common::start_server(config).await;

    let res = common::client()
        .get(format!("http://{}/widget?go-get=1", addr))
        .send()
        .await
        .expect("server unreachable");

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.text().await.unwrap();
    let expected = format!(
        r#"<meta name="go-import" content="acme.dev/widget git {}widget">"#,
        root
    );
    assert!(body.contains(&expected), "body was:\n{}", body);
    assert_eq!(upstream.hits(), 1);

    shutdown.trigger();
}

#[tokio::test]
async fn test_browser_is_redirected_to_repository() {
    let upstream = common::start_upstream(only_widget).await;
    let root = format!("{}acme/", upstream.root());
    let config = ServerConfig::new("acme.dev", &root, "").unwrap();
    let (addr, shutdown) = common::start_server(config).await;
    let client = common::client();

    for path in ["/widget", "/widget/sub/pkg", "/widget?go-get=0"] {
        let res = client.get(format!("http://{}{}", addr, path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::FOUND, "status for {}", path);
        assert_eq!(res.headers()[LOCATION], format!("{}widget", root).as_str());
    }

    shutdown.trigger();
}

#[tokio::test]
async fn test_missing_repository_is_404() {
    let upstream = common::start_upstream(only_widget).await;
    let root = format!("{}acme/", upstream.root());
    let config = ServerConfig::new("acme.dev", &root, "").unwrap();
    let (addr, shutdown) = common::start_server(config).await;
    let client = common::client();

    for path in ["/ghost", "/ghost?go-get=1", "/ghost/sub?go-get=0"] {
        let res = client.get(format!("http://{}{}", addr, path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "status for {}", path);
        let body = res.text().await.unwrap();
        assert!(!body.contains("acme"), "no upstream detail in {:?}", body);
    }

    shutdown.trigger();
}

#[tokio::test]
async fn test_root_redirect_never_probes() {
    let upstream = common::start_upstream(only_widget).await;
    let mut config = ServerConfig::new("acme.dev", &upstream.root(), "").unwrap();
    config.set_root_redirect("https://github.com/acme");
    let (addr, shutdown) = common::start_server(config).await;

    let res = common::client().get(format!("http://{}/", addr)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers()[LOCATION], "https://github.com/acme");
    assert_eq!(upstream.hits(), 0);

    shutdown.trigger();
}

#[tokio::test]
async fn test_docs_redirect_keeps_sub_path() {
    let upstream = common::start_upstream(only_widget).await;
    let root = format!("{}acme/", upstream.root());
    let config = ServerConfig::new("acme.dev", &root, "https://pkg.go.dev/acme.dev").unwrap();
    let (addr, shutdown) = common::start_server(config).await;

    let res = common::client()
        .get(format!("http://{}/widget/sub", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers()[LOCATION], "https://pkg.go.dev/acme.dev/widget/sub");

    shutdown.trigger();
}

#[tokio::test]
async fn test_disabled_probe_serves_everything() {
    let upstream = common::start_upstream(|_| 404).await;
    let mut config = ServerConfig::new("acme.dev", &upstream.root(), "").unwrap();
    config.set_probe_enabled(false);
    let (addr, shutdown) = common::start_server(config).await;

    let res = common::client()
        .get(format!("http://{}/anything?go-get=1", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(upstream.hits(), 0);

    shutdown.trigger();
}

#[tokio::test]
async fn test_unreachable_upstream_is_404() {
    let mut config = ServerConfig::new("acme.dev", "http://127.0.0.1:1/", "").unwrap();
    config.set_probe_timeout(Duration::from_millis(300));
    let (addr, shutdown) = common::start_server(config).await;

    let res = common::client()
        .get(format!("http://{}/widget?go-get=1", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    shutdown.trigger();
}

#[tokio::test]
async fn test_wrong_method_is_405() {
    let upstream = common::start_upstream(only_widget).await;
    let config = ServerConfig::new("acme.dev", &upstream.root(), "").unwrap();
    let (addr, shutdown) = common::start_server(config).await;
    let client = common::client();

    for (method, path) in [
        (Method::POST, "/widget?go-get=1"),
        (Method::HEAD, "/widget"),
        (Method::DELETE, "/robots.txt"),
        (Method::PUT, "/.well-known/x"),
    ] {
        let res = client
            .request(method.clone(), format!("http://{}{}", addr, path))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED, "{} {}", method, path);
    }
    assert_eq!(upstream.hits(), 0);

    shutdown.trigger();
}
