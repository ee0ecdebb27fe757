mod common;

use std::{io, net::SocketAddr, sync::Arc};

use house_price::{App, server};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
};

async fn spawn(app: App) -> io::Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(server::serve(listener, Arc::new(app)));
    Ok(addr)
}

/// Sends one request and returns the status code and body.
async fn request(
    addr: SocketAddr,
    method: &str,
    path: &str,
    content_type: &str,
    body: &str,
) -> io::Result<(u16, String)> {
    let mut stream = TcpStream::connect(addr).await?;
    let req = format!(
        "{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\
         Content-Type: {content_type}\r\nContent-Length: {}\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(req.as_bytes()).await?;

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await?;
    let raw = String::from_utf8_lossy(&raw).into_owned();

    let status = raw
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| io::Error::other(format!("malformed response: {raw:?}")))?;
    let body = raw
        .split_once("\r\n\r\n")
        .map(|(_, body)| body.to_string())
        .unwrap_or_default();

    Ok((status, body))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn page_load_serves_the_form() -> io::Result<()> {
    let addr = spawn(common::forest_app("http-load")).await?;

    let (status, body) = request(addr, "GET", "/", "text/plain", "").await?;
    assert_eq!(status, 200);
    assert!(body.contains("<form method=\"post\""));
    assert!(body.contains("Predict Price"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn form_submission_renders_prediction() -> io::Result<()> {
    let addr = spawn(common::forest_app("http-submit")).await?;
    let form = "OverallQual=7&GrLivArea=2000&TotalBsmtSF=1000&GarageCars=2&YearBuilt=2000\
                &FullBath=2&predict=1";

    let (status, body) = request(
        addr,
        "POST",
        "/",
        "application/x-www-form-urlencoded",
        form,
    )
    .await?;
    assert_eq!(status, 200);
    assert!(body.contains("$275,000.00"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn json_endpoint_predicts_and_clamps() -> io::Result<()> {
    let addr = spawn(common::forest_app("http-json")).await?;
    let payload = r#"{"OverallQual": 0, "GrLivArea": 100, "TotalBsmtSF": 0,
                      "GarageCars": 0, "YearBuilt": 1800, "FullBath": 0}"#;

    let (status, body) = request(addr, "POST", "/api/predict", "application/json", payload).await?;
    assert_eq!(status, 200);

    let json: serde_json::Value = serde_json::from_str(&body).map_err(io::Error::other)?;
    assert_eq!(json["value"], 125_000.0);
    assert_eq!(json["formatted"], "$125,000.00");
    assert_eq!(json["features"]["YearBuilt"], 1872);
    assert_eq!(json["features"]["GrLivArea"], 300);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn prediction_failure_is_unprocessable() -> io::Result<()> {
    let addr = spawn(common::broken_model_app()).await?;

    let (status, body) = request(addr, "POST", "/api/predict", "application/json", "{}").await?;
    assert_eq!(status, 422);

    let json: serde_json::Value = serde_json::from_str(&body).map_err(io::Error::other)?;
    let error = json["error"].as_str().unwrap_or_default();
    assert!(error.starts_with("error making prediction:"), "{error}");
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn missing_model_is_reported() -> io::Result<()> {
    let dir = common::scratch_dir("http-missing");
    let addr = spawn(common::app_in(&dir)).await?;

    let (status, body) = request(addr, "GET", "/health", "text/plain", "").await?;
    assert_eq!(status, 200);
    assert!(body.contains("\"model_available\":false"));

    let (status, body) = request(addr, "POST", "/api/predict", "application/json", "{}").await?;
    assert_eq!(status, 503);
    assert!(body.contains("model unavailable"));

    let (status, body) = request(addr, "GET", "/", "text/plain", "").await?;
    assert_eq!(status, 200);
    assert!(body.contains("ERROR: Model file not found"));
    Ok(())
}
