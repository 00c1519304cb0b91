pub mod answer;
pub mod completion;
pub mod embeddings;
pub mod ingest;
pub mod splitter;

use std::env;
use std::fmt;

use crate::extract::ExtractError;

pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const GROQ_API_KEY: &str = "GROQ_API_KEY";

#[derive(Debug)]
pub enum RagError {
    MissingCredential(&'static str),
    UnsupportedFile(String),
    Extraction(String),
    Embedding(String),
    Completion(String),
    VectorStore(String),
    Database(String),
}

impl fmt::Display for RagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RagError::MissingCredential(name) => write!(f, "{} is not set", name),
            RagError::UnsupportedFile(suffix) => write!(f, "Unsupported file type: {}", suffix),
            RagError::Extraction(msg) => write!(f, "Extraction failed: {}", msg),
            RagError::Embedding(msg) => write!(f, "Embedding request failed: {}", msg),
            RagError::Completion(msg) => write!(f, "Completion request failed: {}", msg),
            RagError::VectorStore(msg) => write!(f, "Vector store error: {}", msg),
            RagError::Database(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for RagError {}

impl From<ExtractError> for RagError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::UnsupportedType(suffix) => RagError::UnsupportedFile(suffix),
            ExtractError::Failed(msg) => RagError::Extraction(msg),
        }
    }
}

impl From<diesel::result::Error> for RagError {
    fn from(err: diesel::result::Error) -> Self {
        RagError::Database(err.to_string())
    }
}

/// Both credentials gate every pipeline run, so their absence surfaces as a
/// document failure or answer error rather than a half-finished call chain.
pub fn ensure_api_keys() -> Result<(), RagError> {
    for name in [GEMINI_API_KEY, GROQ_API_KEY] {
        if env::var(name).is_err() {
            return Err(RagError::MissingCredential(name));
        }
    }
    Ok(())
}
