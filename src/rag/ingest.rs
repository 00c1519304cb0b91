use std::path::Path;

use diesel::PgConnection;
use pgvector::Vector;
use tracing::info;
use uuid::Uuid;

use crate::config::Settings;
use crate::db::models::{Document, DocumentChunk, NewDocumentChunk, NewVectorRecord, VectorRecord};
use crate::extract;

use super::embeddings::EmbeddingsClient;
use super::splitter::TextSplitter;
use super::{RagError, ensure_api_keys};

pub fn vector_key_for(document_id: Uuid, chunk_index: usize) -> String {
    format!("{}-{}", document_id, chunk_index)
}

/// Runs the whole ingestion chain for one stored document: extract, chunk,
/// embed each chunk sequentially, upsert the vectors, then regenerate the
/// relational chunk rows. Any error aborts the document; vectors already
/// written stay behind for the next upsert to overwrite.
pub async fn process_document(
    conn: &mut PgConnection,
    settings: &Settings,
    document: &Document,
) -> Result<usize, RagError> {
    ensure_api_keys()?;

    let text = extract::extract_text(Path::new(&document.file_path), &document.original_name)?;

    let splitter = TextSplitter::new(settings.chunk_size, settings.chunk_overlap);
    let chunks = splitter.split_text(&text);

    let client = EmbeddingsClient::from_env(&settings.embedding_model)?;

    let mut records = Vec::with_capacity(chunks.len());
    for (index, chunk) in chunks.iter().enumerate() {
        let embedding = client.embed(chunk).await?;
        records.push(NewVectorRecord {
            vector_key: vector_key_for(document.id, index),
            document_id: document.id,
            document_name: document.original_name.clone(),
            chunk_index: index as i32,
            content: chunk.clone(),
            embedding: Vector::from(embedding),
        });
    }

    VectorRecord::upsert_batch(conn, &records).map_err(|e| RagError::VectorStore(e.to_string()))?;

    let rows: Vec<NewDocumentChunk> = chunks
        .iter()
        .enumerate()
        .map(|(index, chunk)| NewDocumentChunk {
            document_id: document.id,
            chunk_index: index as i32,
            content: chunk.clone(),
        })
        .collect();

    DocumentChunk::replace_for_document(conn, document.id, &rows)?;

    info!(document = %document.id, chunks = chunks.len(), "document ingested");

    Ok(chunks.len())
}

/// Removes a document's rows from both stores: vector records first, then
/// the relational chunk rows.
pub fn delete_document_chunks(conn: &mut PgConnection, document: Uuid) -> Result<(), RagError> {
    VectorRecord::delete_for_document(conn, document)
        .map_err(|e| RagError::VectorStore(e.to_string()))?;
    DocumentChunk::delete_for_document(conn, document)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_keys_join_document_and_index() {
        let id = Uuid::parse_str("6ecd8c99-4036-403d-bf84-cf8400f67836").unwrap();
        assert_eq!(
            vector_key_for(id, 3),
            "6ecd8c99-4036-403d-bf84-cf8400f67836-3"
        );
    }
}
