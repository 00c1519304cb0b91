use crate::server::errors::AppError;
use crate::server::serializers::{AppState, DocumentListQuery, DocumentResponse, UploadResponse};

use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::warn;
use uuid::Uuid;

use crate::db::{
    get_database_connection,
    models::{ChatSession, Document, DocumentStatus, NewDocument},
};
use crate::rag;

pub async fn upload_document(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut file_name: Option<String> = None;
    let mut file_bytes: Option<axum::body::Bytes> = None;
    let mut session_field: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::FileUploadError(format!("Failed to process form: {}", e)))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                file_name = field.file_name().map(str::to_string);
                file_bytes = Some(field.bytes().await.map_err(|e| {
                    AppError::FileUploadError(format!("Failed to read file data: {}", e))
                })?);
            }
            Some("session_id") => {
                session_field = Some(field.text().await.map_err(|e| {
                    AppError::FileUploadError(format!("Failed to read session_id: {}", e))
                })?);
            }
            _ => {}
        }
    }

    let data = file_bytes.ok_or_else(|| AppError::FileUploadError("Missing file".to_string()))?;
    let original_name =
        file_name.ok_or_else(|| AppError::FileUploadError("File name not provided".to_string()))?;

    let mut conn = get_database_connection()
        .map_err(|e| AppError::DatabaseError(format!("Could not connect to database: {}", e)))?;

    let session = match session_field.filter(|raw| !raw.is_empty()) {
        Some(raw) => {
            let session_id = Uuid::parse_str(&raw)
                .map_err(|_| AppError::BadRequest(format!("Invalid session_id: {}", raw)))?;
            let session = ChatSession::find(&mut conn, session_id)?.ok_or_else(|| {
                AppError::NotFoundError(format!("Session {} not found", session_id))
            })?;
            Some(session)
        }
        None => None,
    };

    let document_id = Uuid::new_v4();
    let file_path = state.settings.upload_dir.join(document_id.to_string());

    let mut file = File::create(&file_path)
        .await
        .map_err(|e| AppError::FileUploadError(format!("Failed to create file: {}", e)))?;

    file.write_all(&data)
        .await
        .map_err(|e| AppError::FileUploadError(format!("Failed to write file: {}", e)))?;

    let mut hasher = Sha256::new();
    hasher.update(&data);
    let file_hash = format!("{:x}", hasher.finalize());

    let document = Document::create(
        &mut conn,
        NewDocument {
            id: document_id,
            session_id: session.as_ref().map(|s| s.id),
            file_path: file_path.to_string_lossy().to_string(),
            original_name: original_name.clone(),
            file_size: Some(data.len() as i64),
            file_hash: Some(file_hash),
            status: DocumentStatus::Processing.to_string(),
        },
    )?;

    // Ingestion runs inline; the document comes out ready or failed, never
    // stuck in processing.
    let (status, error) =
        match rag::ingest::process_document(&mut conn, &state.settings, &document).await {
            Ok(_chunks) => (DocumentStatus::Ready, String::new()),
            Err(e) => (DocumentStatus::Failed, e.to_string()),
        };

    Document::set_status(&mut conn, document.id, status, &error)?;

    if let Some(session) = &session {
        ChatSession::rename_if_default(&mut conn, session.id, &original_name)?;
    }

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            id: document.id,
            name: document.original_name,
            status: status.to_string(),
            error,
        }),
    ))
}

pub async fn list_documents(
    Query(query): Query<DocumentListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = get_database_connection()
        .map_err(|e| AppError::DatabaseError(format!("Could not connect to database: {}", e)))?;

    let documents = Document::list_for_session(&mut conn, query.session_id)?;

    let response: Vec<DocumentResponse> =
        documents.into_iter().map(DocumentResponse::from).collect();

    Ok(Json(serde_json::json!({ "documents": response })))
}

pub async fn delete_document(Path(id): Path<Uuid>) -> Result<impl IntoResponse, AppError> {
    let mut conn = get_database_connection()
        .map_err(|e| AppError::DatabaseError(format!("Could not connect to database: {}", e)))?;

    let document = Document::find(&mut conn, id)?
        .ok_or_else(|| AppError::NotFoundError(format!("Document {} not found", id)))?;

    rag::ingest::delete_document_chunks(&mut conn, document.id)
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    if let Err(e) = tokio::fs::remove_file(&document.file_path).await {
        warn!(document = %document.id, error = %e, "failed to remove uploaded file");
    }

    Document::delete(&mut conn, document.id)?;

    Ok(Json(serde_json::json!({ "status": "deleted" })))
}
