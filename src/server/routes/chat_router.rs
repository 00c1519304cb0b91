use crate::server::errors::AppError;
use crate::server::serializers::{AppState, AskRequest};

use axum::{Json, extract::State, response::IntoResponse};
use std::sync::Arc;

use crate::db::{
    get_database_connection,
    models::{ChatMessage, ChatSession, Document, MessageRole, NewChatMessage},
};
use crate::rag;

pub async fn ask_question(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AskRequest>,
) -> Result<impl IntoResponse, AppError> {
    let question = payload.question.trim().to_string();
    if question.is_empty() {
        return Err(AppError::BadRequest("Question is required".to_string()));
    }

    let mut conn = get_database_connection()
        .map_err(|e| AppError::DatabaseError(format!("Could not connect to database: {}", e)))?;

    let session = match payload.session_id {
        Some(session_id) => Some(ChatSession::find(&mut conn, session_id)?.ok_or_else(|| {
            AppError::NotFoundError(format!("Session {} not found", session_id))
        })?),
        None => None,
    };

    ChatMessage::create(
        &mut conn,
        NewChatMessage {
            session_id: session.as_ref().map(|s| s.id),
            role: MessageRole::User.to_string(),
            content: question.clone(),
        },
    )?;

    // A session scopes retrieval to its own ready documents; without one the
    // whole index is searched.
    let allowed_documents = match &session {
        Some(session) => Some(Document::ready_ids_for_session(&mut conn, session.id)?),
        None => None,
    };

    let response =
        rag::answer::answer_question(&mut conn, &state.settings, &question, allowed_documents)
            .await
            .map_err(|e| AppError::AnswerError(e.to_string()))?;

    ChatMessage::create(
        &mut conn,
        NewChatMessage {
            session_id: session.as_ref().map(|s| s.id),
            role: MessageRole::Assistant.to_string(),
            content: response.answer.clone(),
        },
    )?;

    if let Some(session) = &session {
        ChatSession::rename_if_default(&mut conn, session.id, &question)?;
        ChatSession::touch(&mut conn, session.id)?;
    }

    Ok(Json(response))
}
