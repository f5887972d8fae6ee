//! Chat endpoints.
//!
//! - `POST /chat/`                      - run one request through the pipeline
//! - `GET  /chat/{session_id}/history`  - list a session's persisted turns

use std::net::SocketAddr;

use axum::Json;
use axum::extract::{ConnectInfo, Path, State};
use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

use chatgate_core::gateway::ChatOutcome;
use chatgate_core::session;
use chatgate_core::store::ConversationStore;
use chatgate_types::conversation::ConversationTurn;

use crate::http::error::AppError;
use crate::state::AppState;

/// Request body for `POST /chat/`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub user_input: String,
}

/// Response body for `POST /chat/`.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Response body for the history endpoint.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub session_id: String,
    pub turns: Vec<ConversationTurn>,
}

/// POST /chat/ - forward one user message through the gateway pipeline.
///
/// The caller is identified by its remote address for rate limiting; an
/// optional `session_id` header groups turns into a conversation.
pub async fn chat(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let client_key = addr.ip().to_string();
    let session_token = headers.get("session_id").and_then(|v| v.to_str().ok());

    let outcome = state
        .gateway
        .handle_chat(&client_key, session_token, &request.user_input)
        .await?;

    match outcome {
        ChatOutcome::Reply { reply, .. } => Ok(Json(ChatResponse { response: reply })),
        ChatOutcome::RateLimited => Err(AppError::RateLimited {
            retry_after: state.gateway.retry_after(),
        }),
    }
}

/// GET /chat/{session_id}/history - persisted turns for a session,
/// oldest first.
pub async fn history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<HistoryResponse>, AppError> {
    let sid = session::validate_token(&session_id).ok_or(AppError::InvalidSessionId)?;

    let turns = state.gateway.store().list(&sid).await?;

    Ok(Json(HistoryResponse {
        session_id: sid.to_string(),
        turns,
    }))
}
