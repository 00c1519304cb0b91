use crate::db::schema::document_chunks::dsl::*;
use diesel::{ExpressionMethods, PgConnection, QueryDsl, RunQueryDsl};

use uuid::Uuid;

use crate::db::models::{DocumentChunk, NewDocumentChunk};

impl DocumentChunk {
    /// Regenerates a document's chunk rows wholesale: delete, then bulk
    /// insert. The two statements are not wrapped in a transaction.
    pub fn replace_for_document(
        conn: &mut PgConnection,
        document: Uuid,
        rows: &[NewDocumentChunk],
    ) -> Result<usize, diesel::result::Error> {
        diesel::delete(document_chunks.filter(document_id.eq(document))).execute(conn)?;

        if rows.is_empty() {
            return Ok(0);
        }

        diesel::insert_into(document_chunks)
            .values(rows)
            .execute(conn)
    }

    pub fn delete_for_document(
        conn: &mut PgConnection,
        document: Uuid,
    ) -> Result<usize, diesel::result::Error> {
        diesel::delete(document_chunks.filter(document_id.eq(document))).execute(conn)
    }
}
