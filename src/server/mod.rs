//! HTTP webhook listener

#[cfg(test)]
mod tests;

use crate::config::ServerConfig;
use crate::error::RelayError;
use crate::relay::{Dispatch, Relay};
use crate::types::AlertRecord;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::Instrument;
use uuid::Uuid;

pub const HOME_TEXT: &str = "TradingView Webhook Service is running! 🚀";

struct AppState {
    relay: Relay,
}

/// JSON body returned to the webhook caller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookResponse {
    /// success, filtered or error
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
}

impl WebhookResponse {
    fn success(message: String) -> Self {
        Self {
            status: "success",
            message,
            category: None,
            reason: None,
        }
    }

    fn error(message: String) -> Self {
        Self {
            status: "error",
            message,
            category: None,
            reason: None,
        }
    }
}

pub fn router(relay: Relay) -> Router {
    let state = Arc::new(AppState { relay });

    Router::new()
        .route("/", get(home))
        .route("/webhook", post(webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn serve(config: &ServerConfig, relay: Relay) -> anyhow::Result<()> {
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Webhook listener on http://{}", addr);

    axum::serve(listener, router(relay)).await?;
    Ok(())
}

async fn home() -> &'static str {
    HOME_TEXT
}

async fn webhook(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> (StatusCode, Json<WebhookResponse>) {
    let span = tracing::info_span!("webhook", request_id = %Uuid::new_v4());
    handle(&state.relay, &body).instrument(span).await
}

/// Process one webhook body and map the result to an HTTP response
pub async fn handle(relay: &Relay, body: &[u8]) -> (StatusCode, Json<WebhookResponse>) {
    let record = match AlertRecord::from_slice(body) {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!("Rejected webhook body: {}", e);
            let status = if e.is_client_error() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            return (status, Json(WebhookResponse::error(e.to_string())));
        }
    };

    tracing::debug!("Received alert: {:?}", record);

    match relay.dispatch(&record).await {
        Ok(Dispatch::Sent { action, variant }) => {
            tracing::info!(%variant, "{} signal sent to Telegram", action);
            (
                StatusCode::OK,
                Json(WebhookResponse::success(format!(
                    "{} signal sent to Telegram!",
                    action
                ))),
            )
        }
        Ok(Dispatch::Filtered(rejection)) => {
            tracing::info!(
                category = rejection.category(),
                reason = rejection.reason(),
                "Alert filtered: {}",
                rejection
            );
            (
                StatusCode::OK,
                Json(WebhookResponse {
                    status: "filtered",
                    message: rejection.to_string(),
                    category: Some(rejection.category()),
                    reason: Some(rejection.reason()),
                }),
            )
        }
        Err(e) => {
            tracing::error!("Delivery failed: {}", e);
            let message = match e {
                RelayError::Delivery(diagnostic) => diagnostic,
                other => other.to_string(),
            };
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(WebhookResponse::error(message)),
            )
        }
    }
}
