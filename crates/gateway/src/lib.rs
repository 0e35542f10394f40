//! HTTP API gateway for Agentic Chat.
//!
//! Endpoints:
//!
//! - `POST /api/respond`      — `{ messages: [...] }` in, `{ message }` out
//! - `GET  /api/suggestions`  — conversation starters
//! - `GET  /health`           — liveness probe
//!
//! Built on Axum. The responder is built once at startup and shared behind
//! an `Arc`; handlers never mutate it.

use axum::body::Bytes;
use axum::extract::{ConnectInfo, DefaultBodyLimit};
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    middleware::{self, Next},
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{debug, error, info, warn};

use agentic_chat_config::{AppConfig, GatewayConfig};
use agentic_chat_core::{ChatMessage, Error, InputError};
use agentic_chat_responder::{PROMPT_SUGGESTIONS, PromptSuggestion, Responder};

/// Shared application state for the gateway.
pub struct GatewayState {
    pub responder: Arc<Responder>,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl GatewayState {
    pub fn new(responder: Arc<Responder>) -> Self {
        Self {
            responder,
            started_at: chrono::Utc::now(),
        }
    }
}

pub type SharedState = Arc<GatewayState>;

/// Build the bare API router without middleware.
pub fn api_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/respond", post(respond_handler))
        .route("/api/suggestions", get(suggestions_handler))
        .with_state(state)
}

/// Build the full router with middleware.
///
/// Layers applied:
/// - Request body size limit
/// - In-memory rate limiting per client address (`/health` exempt)
/// - CORS restricted to the configured origin
/// - HTTP trace logging
pub fn build_router(state: SharedState, config: &GatewayConfig) -> Result<Router, Error> {
    let origin = config.allowed_origin.parse().map_err(|_| {
        Error::config(format!(
            "gateway.allowed_origin is not a valid header value: '{}'",
            config.allowed_origin
        ))
    })?;

    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::AllowOrigin::exact(origin))
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600));

    let rate_limiter = Arc::new(
        RateLimiter::new(
            config.rate_limit_per_minute,
            std::time::Duration::from_secs(60),
        )
        .with_trusted_proxies(config.trusted_proxies.clone()),
    );

    Ok(api_router(state)
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .layer(middleware::from_fn(move |req, next| {
            let limiter = rate_limiter.clone();
            rate_limit_middleware(limiter, req, next)
        }))
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http()))
}

/// Start the gateway HTTP server.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let responder = Arc::new(Responder::builtin()?);
    info!(
        rules = responder.heuristics().len(),
        entries = responder.knowledge().entries().len(),
        "Responder ready"
    );

    let state = Arc::new(GatewayState::new(responder));
    let app = build_router(state, &config.gateway)?;

    let addr = config.bind_addr();
    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

// --- Rate Limiter ---

/// Simple in-memory sliding-window rate limiter.
///
/// Tracks request timestamps per client key.
/// Thread-safe via `std::sync::Mutex` (non-async, held briefly).
struct RateLimiter {
    max_requests: usize,
    window: std::time::Duration,
    trusted_proxies: Vec<IpAddr>,
    clients: std::sync::Mutex<HashMap<String, Vec<std::time::Instant>>>,
}

impl RateLimiter {
    fn new(max_requests: usize, window: std::time::Duration) -> Self {
        Self {
            max_requests,
            window,
            trusted_proxies: Vec::new(),
            clients: std::sync::Mutex::new(HashMap::new()),
        }
    }

    fn with_trusted_proxies(mut self, proxies: Vec<IpAddr>) -> Self {
        self.trusted_proxies = proxies;
        self
    }

    /// Key a request by its peer address. The first `X-Forwarded-For` hop is
    /// used only when the peer is a trusted proxy and the hop is an IP.
    /// Requests served without connection info share the "unknown" key.
    fn client_key(&self, req: &axum::extract::Request) -> String {
        let Some(ConnectInfo(peer)) = req.extensions().get::<ConnectInfo<SocketAddr>>() else {
            return "unknown".to_string();
        };
        let peer = peer.ip();

        if self.trusted_proxies.contains(&peer) {
            let forwarded = req
                .headers()
                .get("X-Forwarded-For")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.split(',').next())
                .and_then(|hop| hop.trim().parse::<IpAddr>().ok());
            if let Some(client) = forwarded {
                return client.to_string();
            }
        }

        peer.to_string()
    }

    /// Check if the client is within rate limits. Returns `true` if allowed.
    fn check(&self, client_key: &str) -> bool {
        let now = std::time::Instant::now();
        let mut clients = self.clients.lock().unwrap_or_else(|e| e.into_inner());

        if clients.len() > 10_000 {
            clients.retain(|_, timestamps| {
                timestamps
                    .last()
                    .is_some_and(|t| now.duration_since(*t) < self.window)
            });
        }

        let timestamps = clients.entry(client_key.to_string()).or_default();
        timestamps.retain(|t| now.duration_since(*t) < self.window);

        if timestamps.len() >= self.max_requests {
            return false;
        }

        timestamps.push(now);
        true
    }
}

/// Rate limiting middleware. Returns 429 Too Many Requests when exceeded.
async fn rate_limit_middleware(
    limiter: Arc<RateLimiter>,
    req: axum::extract::Request,
    next: Next,
) -> Result<axum::response::Response, StatusCode> {
    if req.uri().path() == "/health" {
        return Ok(next.run(req).await);
    }

    let client_key = limiter.client_key(&req);

    if !limiter.check(&client_key) {
        warn!(client = %client_key, "Rate limit exceeded");
        return Err(StatusCode::TOO_MANY_REQUESTS);
    }

    Ok(next.run(req).await)
}

// --- Handlers ---

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: i64,
}

async fn health_handler(State(state): State<SharedState>) -> Json<HealthResponse> {
    let uptime = chrono::Utc::now() - state.started_at;
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        uptime_secs: uptime.num_seconds(),
    })
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RespondResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Map a domain error onto its HTTP response. Input problems are reported
/// generically; the detail only goes to the log.
fn api_error(err: Error) -> ApiError {
    match err {
        Error::Input(e) => {
            warn!(error = %e, "Rejected respond payload");
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Invalid payload".into(),
                }),
            )
        }
        other => {
            error!(error = %other, "Responder task failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: other.to_string(),
                }),
            )
        }
    }
}

async fn respond_handler(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<RespondResponse>, ApiError> {
    let messages = parse_messages(&body)
        .map_err(Error::from)
        .map_err(api_error)?;

    let turns = messages.len();
    let responder = state.responder.clone();
    let message = tokio::task::spawn_blocking(move || responder.respond(&messages))
        .await
        .map_err(|e| api_error(Error::Internal(e.to_string())))?;

    debug!(turns, reply_len = message.len(), "Reply generated");
    Ok(Json(RespondResponse { message }))
}

async fn suggestions_handler() -> Json<&'static [PromptSuggestion]> {
    Json(PROMPT_SUGGESTIONS)
}

/// Decode a `{ "messages": [...] }` body into chat messages.
pub fn parse_messages(body: &[u8]) -> Result<Vec<ChatMessage>, InputError> {
    let payload: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| InputError::InvalidPayload(format!("body is not JSON: {e}")))?;

    let items = payload
        .get("messages")
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| InputError::InvalidPayload("`messages` must be an array".into()))?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item.clone()).map_err(|e| InputError::InvalidMessage {
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}
