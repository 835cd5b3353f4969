use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    routes::recommendations::{RecommendationItem, DEFAULT_COUNT},
    routes::AppState,
    services::chat::{self, ChatSession, ChatTurn},
};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Omit to start a new conversation
    pub session_id: Option<Uuid>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub session_id: Uuid,
    pub reply: String,
    /// Present on the turn that completes the questionnaire
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<RecommendationItem>>,
}

/// Handler for one conversational turn
pub async fn message(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    let session_id = request.session_id.unwrap_or_else(Uuid::new_v4);

    // Take the session out of the map so the lock is not held across
    // provider calls
    let (mut session, is_new) = {
        let mut sessions = state.sessions.write().await;
        match sessions.remove(&session_id) {
            Some(existing) => (existing, false),
            None => (ChatSession::new(), true),
        }
    };

    let (reply, recommendations) = if is_new {
        (session.opening(), None)
    } else {
        match session.advance(&request.message) {
            ChatTurn::Ask(prompt) => (prompt, None),
            ChatTurn::Hint(hint) => (hint, None),
            ChatTurn::Ready(prefs) => {
                tracing::info!(
                    request_id = %request_id,
                    session_id = %session_id,
                    "Preferences collected; building recommendations"
                );
                match state.recommender.recommend(&prefs, DEFAULT_COUNT).await {
                    Ok(movies) => {
                        let reply = chat::render_recommendations(&movies);
                        let items = movies.into_iter().map(RecommendationItem::from).collect();
                        (reply, Some(items))
                    }
                    // The chat surface reports failure in-conversation; the
                    // cause is preserved in the logs
                    Err(error) => {
                        tracing::error!(
                            request_id = %request_id,
                            session_id = %session_id,
                            error = %error,
                            "Recommendation build failed"
                        );
                        (
                            "Oops, I couldn't fetch recommendations right now. Type reset to start over."
                                .to_string(),
                            None,
                        )
                    }
                }
            }
        }
    };

    state.sessions.write().await.insert(session_id, session);

    Ok(Json(ChatResponse {
        session_id,
        reply,
        recommendations,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    pub session_id: Uuid,
}

/// Handler that restarts a conversation from the first question
pub async fn reset(
    State(state): State<AppState>,
    Json(request): Json<ResetRequest>,
) -> AppResult<Json<ChatResponse>> {
    let session = ChatSession::new();
    let reply = session.opening();

    state
        .sessions
        .write()
        .await
        .insert(request.session_id, session);

    Ok(Json(ChatResponse {
        session_id: request.session_id,
        reply,
        recommendations: None,
    }))
}
