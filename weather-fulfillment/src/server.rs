use anyhow::{Context, Result};
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    routing::{get, post},
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use weather_core::{Config, Fulfillment, FulfillmentResponse, OpenWeatherProvider, WebhookRequest};

const UNREADABLE_REQUEST_TEXT: &str = "Sorry, I couldn't understand that request.";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

// The platform treats any non-200 as a failed fulfillment, so even an
// unreadable body gets a 200 with an explanatory text.
async fn webhook(
    State(fulfillment): State<Arc<Fulfillment>>,
    body: Bytes,
) -> Json<FulfillmentResponse> {
    let request: WebhookRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "unreadable webhook body");
            return Json(FulfillmentResponse::new(UNREADABLE_REQUEST_TEXT));
        }
    };

    let response = fulfillment.respond(&request).await;
    info!(text = %response.fulfillment_text, "webhook fulfilled");
    Json(response)
}

pub fn build_router(fulfillment: Fulfillment) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/webhook", post(webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(fulfillment))
}

/// Build the provider from config and serve until Ctrl-C.
pub async fn serve(config: &Config) -> Result<()> {
    if !config.openweather.has_api_key() {
        warn!(
            "No OpenWeather API key configured; every lookup will be rejected by the provider. \
             Set {} or run `weather-fulfillment configure`.",
            weather_core::config::API_KEY_ENV
        );
    }

    let provider = OpenWeatherProvider::new(&config.openweather)
        .context("Failed to build OpenWeather HTTP client")?;
    let fulfillment = Fulfillment::new(Arc::new(provider), config.default_city.clone());
    let app = build_router(fulfillment);

    let bind_addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {bind_addr}"))?;

    info!("Weather fulfillment webhook listening on http://{bind_addr}/webhook");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
