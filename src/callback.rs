//! Provider callback plumbing.
//!
//! Inbound: a small HTTP listener that logs whatever the provider POSTs and
//! always acknowledges. It does not correlate callbacks with any deposit
//! flow. Outbound: a one-shot notification POST after a successful flow.

use crate::models::PaymentRecord;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use serde_json::Value;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

/// The callback routes. POST only; axum answers 405 for everything else.
pub fn router() -> Router {
    Router::new().route("/callback", post(handle_callback))
}

/// Bind and serve the callback listener until the process exits.
pub async fn serve(addr: String) -> anyhow::Result<()> {
    info!("Callback listener starting on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, router()).await?;
    Ok(())
}

/// Accept any POST body and acknowledge unconditionally. The JSON parse is
/// best-effort, for diagnostic logging only.
async fn handle_callback(body: String) -> (StatusCode, &'static str) {
    info!("Callback raw body: {}", body);

    match serde_json::from_str::<Value>(&body) {
        Ok(parsed) => info!("Callback parsed JSON: {:#}", parsed),
        Err(_) => warn!("Callback body is not valid JSON"),
    }

    (StatusCode::OK, "Callback received")
}

/// Notify the configured external system that the deposit completed.
/// Failure is logged and never retried; the deposit already succeeded.
pub async fn notify(url: &str, record: &PaymentRecord) {
    if url.is_empty() {
        warn!("CALLBACK_URL not set, skipping notification");
        return;
    }

    match reqwest::Client::new().post(url).json(record).send().await {
        Ok(response) => info!("Callback POST to {}, response: {}", url, response.status()),
        Err(err) => error!("Failed to POST callback: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::util::ServiceExt;

    #[tokio::test]
    async fn test_get_is_method_not_allowed() {
        let response = router()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/callback")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_post_json_is_acknowledged() {
        let response = router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/callback")
                    .body(Body::from(r#"{"event":"deposit.settled"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Callback received");
    }

    #[tokio::test]
    async fn test_post_malformed_json_is_still_acknowledged() {
        let response = router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/callback")
                    .body(Body::from("definitely-not-json{{{"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Callback received");
    }
}
