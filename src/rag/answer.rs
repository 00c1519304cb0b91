use diesel::PgConnection;
use pgvector::Vector;
use serde::Serialize;
use uuid::Uuid;

use crate::config::Settings;
use crate::db::models::VectorRecord;

use super::completion::{ChatTurn, CompletionClient};
use super::embeddings::EmbeddingsClient;
use super::{RagError, ensure_api_keys};

const SYSTEM_PROMPT: &str = "You are a helpful assistant. Answer strictly from the provided \
     context. If the context does not contain the answer, say you do not have enough information.";

const TOP_K: i64 = 5;

#[derive(Debug, Serialize)]
pub struct SourceChunk {
    pub document_id: Uuid,
    pub document_name: String,
    pub chunk_index: i32,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct RagAnswer {
    pub answer: String,
    pub sources: Vec<SourceChunk>,
}

pub fn build_prompt(question: &str, context_chunks: &[String]) -> Vec<ChatTurn> {
    let context_text = context_chunks.join("\n\n");
    vec![
        ChatTurn::system(SYSTEM_PROMPT),
        ChatTurn::user(format!(
            "Context:\n{}\n\nQuestion: {}",
            context_text, question
        )),
    ]
}

/// Embeds the question, retrieves the nearest chunks (optionally restricted
/// to an allow-list of document ids), and asks the chat model to answer from
/// that context. Returns the answer with the chunks it was grounded in.
pub async fn answer_question(
    conn: &mut PgConnection,
    settings: &Settings,
    question: &str,
    allowed_documents: Option<Vec<Uuid>>,
) -> Result<RagAnswer, RagError> {
    ensure_api_keys()?;

    let embedder = EmbeddingsClient::from_env(&settings.embedding_model)?;
    let query_embedding = embedder.embed(question).await?;

    let records = VectorRecord::nearest(
        conn,
        Vector::from(query_embedding),
        allowed_documents.as_deref(),
        TOP_K,
    )
    .map_err(|e| RagError::VectorStore(e.to_string()))?;

    let context_chunks: Vec<String> = records.iter().map(|r| r.content.clone()).collect();

    let completer = CompletionClient::from_env(&settings.completion_model)?;
    let answer = completer
        .complete(build_prompt(question, &context_chunks))
        .await?;

    let sources = records
        .into_iter()
        .map(|record| SourceChunk {
            document_id: record.document_id,
            document_name: record.document_name,
            chunk_index: record.chunk_index,
            content: record.content,
        })
        .collect();

    Ok(RagAnswer { answer, sources })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_is_system_then_user() {
        let context = vec!["First chunk.".to_string(), "Second chunk.".to_string()];
        let turns = build_prompt("What is this?", &context);

        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, "system");
        assert_eq!(turns[0].content, SYSTEM_PROMPT);
        assert_eq!(turns[1].role, "user");
        assert_eq!(
            turns[1].content,
            "Context:\nFirst chunk.\n\nSecond chunk.\n\nQuestion: What is this?"
        );
    }

    #[test]
    fn empty_context_still_builds_a_prompt() {
        let turns = build_prompt("Anything there?", &[]);

        assert_eq!(turns[1].content, "Context:\n\nQuestion: Anything there?");
    }
}
