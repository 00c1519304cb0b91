pub mod chat_router;
pub mod document_router;
pub mod session_router;
