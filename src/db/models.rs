use chrono::{DateTime, Utc};
use diesel::prelude::*;
use pgvector::Vector;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::schema;
use schema::{chat_messages, chat_sessions, document_chunks, documents, vector_records};

pub const DEFAULT_SESSION_TITLE: &str = "New Chat";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentStatus {
    Processing,
    Ready,
    Failed,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Processing => "processing",
            DocumentStatus::Ready => "ready",
            DocumentStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Queryable, Selectable, Serialize, Identifiable)]
#[diesel(table_name = chat_sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ChatSession {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable, Deserialize)]
#[diesel(table_name = chat_sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewChatSession {
    pub title: String,
}

#[derive(Debug, Queryable, Selectable, Serialize, Identifiable, Associations)]
#[diesel(belongs_to(ChatSession, foreign_key = session_id))]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Document {
    pub id: Uuid,
    pub session_id: Option<Uuid>,
    pub file_path: String,
    pub original_name: String,
    pub file_size: Option<i64>,
    pub file_hash: Option<String>,
    pub status: String,
    pub error_message: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewDocument {
    pub id: Uuid,
    pub session_id: Option<Uuid>,
    pub file_path: String,
    pub original_name: String,
    pub file_size: Option<i64>,
    pub file_hash: Option<String>,
    pub status: String,
}

#[derive(Debug, Queryable, Selectable, Serialize, Identifiable, Associations)]
#[diesel(belongs_to(Document))]
#[diesel(table_name = document_chunks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DocumentChunk {
    pub id: Uuid,
    pub document_id: Uuid,
    pub chunk_index: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = document_chunks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewDocumentChunk {
    pub document_id: Uuid,
    pub chunk_index: i32,
    pub content: String,
}

#[derive(Debug, Queryable, Selectable, Serialize, Identifiable, Associations)]
#[diesel(belongs_to(ChatSession, foreign_key = session_id))]
#[diesel(table_name = chat_messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ChatMessage {
    pub id: Uuid,
    pub session_id: Option<Uuid>,
    pub role: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = chat_messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewChatMessage {
    pub session_id: Option<Uuid>,
    pub role: String,
    pub content: String,
}

#[derive(Debug, Queryable, Selectable, Identifiable)]
#[diesel(table_name = vector_records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct VectorRecord {
    pub id: Uuid,
    pub vector_key: String,
    pub document_id: Uuid,
    pub document_name: String,
    pub chunk_index: i32,
    pub content: String,
    pub embedding: Vector,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = vector_records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewVectorRecord {
    pub vector_key: String,
    pub document_id: Uuid,
    pub document_name: String,
    pub chunk_index: i32,
    pub content: String,
    pub embedding: Vector,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_strings_match_storage_values() {
        assert_eq!(DocumentStatus::Processing.as_str(), "processing");
        assert_eq!(DocumentStatus::Ready.as_str(), "ready");
        assert_eq!(DocumentStatus::Failed.as_str(), "failed");
    }

    #[test]
    fn role_strings_match_storage_values() {
        assert_eq!(MessageRole::User.to_string(), "user");
        assert_eq!(MessageRole::Assistant.to_string(), "assistant");
    }
}
