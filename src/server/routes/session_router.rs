use crate::server::errors::AppError;
use crate::server::serializers::{
    DocumentResponse, MessageResponse, SessionDetailResponse, SessionResponse,
};

use axum::{
    Json,
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::db::{
    get_database_connection,
    models::{ChatMessage, ChatSession, Document},
};

pub async fn create_session() -> Result<impl IntoResponse, AppError> {
    let mut conn = get_database_connection()
        .map_err(|e| AppError::DatabaseError(format!("Could not connect to database: {}", e)))?;

    let session = ChatSession::create(&mut conn)?;

    Ok((StatusCode::CREATED, Json(SessionResponse::from(session))))
}

pub async fn list_sessions() -> Result<impl IntoResponse, AppError> {
    let mut conn = get_database_connection()
        .map_err(|e| AppError::DatabaseError(format!("Could not connect to database: {}", e)))?;

    let sessions = ChatSession::list(&mut conn)?;

    let response: Vec<SessionResponse> = sessions.into_iter().map(SessionResponse::from).collect();

    Ok(Json(serde_json::json!({ "sessions": response })))
}

pub async fn get_session(Path(id): Path<Uuid>) -> Result<impl IntoResponse, AppError> {
    let mut conn = get_database_connection()
        .map_err(|e| AppError::DatabaseError(format!("Could not connect to database: {}", e)))?;

    let session = ChatSession::find(&mut conn, id)?
        .ok_or_else(|| AppError::NotFoundError(format!("Session {} not found", id)))?;

    let messages = ChatMessage::list_for_session(&mut conn, session.id)?;
    let documents = Document::list_for_session(&mut conn, Some(session.id))?;

    Ok(Json(SessionDetailResponse {
        id: session.id,
        title: session.title,
        messages: messages.into_iter().map(MessageResponse::from).collect(),
        documents: documents.into_iter().map(DocumentResponse::from).collect(),
    }))
}

pub async fn delete_session(Path(id): Path<Uuid>) -> Result<impl IntoResponse, AppError> {
    let mut conn = get_database_connection()
        .map_err(|e| AppError::DatabaseError(format!("Could not connect to database: {}", e)))?;

    let deleted = ChatSession::delete(&mut conn, id)?;
    if deleted == 0 {
        return Err(AppError::NotFoundError(format!("Session {} not found", id)));
    }

    Ok(Json(serde_json::json!({ "status": "deleted" })))
}
