pub mod crud_chunks;
pub mod crud_documents;
pub mod crud_messages;
pub mod crud_sessions;
pub mod crud_vectors;
