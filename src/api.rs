//! REST API Server for the NeuraPay agent
//!
//! Exposes chat and direct tool invocation over HTTP for the frontend UI.

use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::conversational::ChatAgent;
use crate::models::ToolInput;
use crate::tools::ToolRegistry;

/// =============================
/// Request Models
/// =============================

#[derive(Debug, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Either a single `message` or a transcript whose last user turn is used
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub chat_id: Option<String>,
    pub user_id: Option<String>,
    pub message: Option<String>,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    fn user_text(&self) -> Option<&str> {
        self.message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .or_else(|| {
                self.messages
                    .iter()
                    .rev()
                    .find(|m| m.role == "user")
                    .map(|m| m.content.as_str())
            })
    }
}

/// =============================
/// Response Wrapper
/// =============================

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<Value>,
    pub error: Option<String>,
    pub timestamp: String,
}

impl ApiResponse {
    pub fn success<T: Serialize>(data: T) -> Self {
        Self {
            success: true,
            data: serde_json::to_value(data).ok(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub agent: Arc<ChatAgent>,
}

impl ApiState {
    fn registry(&self) -> &ToolRegistry {
        self.agent.registry()
    }
}

/// =============================
/// Helpers
/// =============================

fn stable_uuid_from_string(input: &str) -> uuid::Uuid {
    use sha2::{Digest, Sha256};

    let hash = Sha256::digest(input.as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&hash[..16]);

    // Set UUID version (4) and variant (RFC4122) bits.
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    uuid::Uuid::from_bytes(bytes)
}

fn parse_or_stable_uuid(value: Option<&str>, fallback_seed: &str) -> uuid::Uuid {
    match value {
        Some(v) if !v.trim().is_empty() => {
            uuid::Uuid::parse_str(v).unwrap_or_else(|_| stable_uuid_from_string(v))
        }
        _ => stable_uuid_from_string(fallback_seed),
    }
}

/// Resolve the (chat, user) memory scope. A request without a chat id
/// starts a fresh chat; the returned `chat_id` continues it.
fn chat_scope(req: &ChatRequest) -> (uuid::Uuid, uuid::Uuid) {
    let chat_id = match req.chat_id.as_deref().filter(|v| !v.trim().is_empty()) {
        Some(v) => parse_or_stable_uuid(Some(v), v),
        None => uuid::Uuid::new_v4(),
    };
    let user_id = parse_or_stable_uuid(req.user_id.as_deref(), &chat_id.to_string());
    (chat_id, user_id)
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// =============================
/// Health Endpoint
/// =============================

async fn health() -> Json<Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// =============================
/// Chat Endpoint
/// =============================

async fn chat_handler(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Json(req): Json<ChatRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    let Some(text) = req.user_text() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("No user message found".into())),
        );
    };

    let (chat_id, user_id) = chat_scope(&req);
    info!("chat_handler ids => chat_id={} user_id={}", chat_id, user_id);

    match state
        .agent
        .respond(user_id, chat_id, text, bearer_token(&headers))
        .await
    {
        Ok(reply) => (
            StatusCode::OK,
            Json(ApiResponse::success(serde_json::json!({
                "answer": reply.answer,
                "tool_calls": reply.tool_calls,
                "chat_id": chat_id.to_string(),
                "user_id": user_id.to_string(),
            }))),
        ),
        Err(e) => {
            warn!("Chat failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Chat failed: {}", e))),
            )
        }
    }
}

/// =============================
/// Tool Endpoints
/// =============================

async fn list_tools(State(state): State<ApiState>) -> Json<ApiResponse> {
    let registry = state.registry();
    let tools: Vec<Value> = registry
        .list()
        .into_iter()
        .filter_map(|name| registry.get(name))
        .map(|tool| {
            serde_json::json!({
                "name": tool.name(),
                "description": tool.description(),
                "requires_confirmation": tool.requires_confirmation(),
                "input_schema": tool.input_schema(),
            })
        })
        .collect();

    Json(ApiResponse::success(tools))
}

async fn invoke_tool(
    State(state): State<ApiState>,
    Path(name): Path<String>,
    headers: HeaderMap,
    body: Option<Json<Value>>,
) -> (StatusCode, Json<ApiResponse>) {
    let registry = state.registry();
    if registry.get(&name).is_none() {
        return (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Tool not found: {}", name))),
        );
    }

    let parameters = body.map(|Json(v)| v).unwrap_or(Value::Null);
    let user_id = headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let input = ToolInput::new(name, parameters).for_user(user_id, bearer_token(&headers));

    let output = registry.run(&input).await;
    let response = ApiResponse {
        success: output.success,
        data: Some(output.data),
        error: output.error,
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    (StatusCode::OK, Json(response))
}

/// =============================
/// Router
/// =============================

pub fn create_router(agent: Arc<ChatAgent>) -> Router {
    let state = ApiState { agent };

    Router::new()
        .route("/health", get(health))
        .route("/api/chat", post(chat_handler))
        .route("/api/tools", get(list_tools))
        .route("/api/tools/:name", post(invoke_tool))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(
    agent: Arc<ChatAgent>,
    port: u16,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let router = create_router(agent);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("API Server listening on http://0.0.0.0:{}", port);
    info!("Local: http://127.0.0.1:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}
