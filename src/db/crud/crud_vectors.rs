use diesel::upsert::excluded;
use diesel::{ExpressionMethods, PgConnection, QueryDsl, RunQueryDsl};
use pgvector::{Vector, VectorExpressionMethods};
use uuid::Uuid;

use crate::db::models::{NewVectorRecord, VectorRecord};
use crate::db::schema::vector_records::dsl::*;

impl VectorRecord {
    /// Upserts on `vector_key`, so reprocessing a document overwrites its
    /// old vectors instead of duplicating them.
    pub fn upsert_batch(
        conn: &mut PgConnection,
        rows: &[NewVectorRecord],
    ) -> Result<usize, diesel::result::Error> {
        if rows.is_empty() {
            return Ok(0);
        }

        diesel::insert_into(vector_records)
            .values(rows)
            .on_conflict(vector_key)
            .do_update()
            .set((
                document_name.eq(excluded(document_name)),
                content.eq(excluded(content)),
                embedding.eq(excluded(embedding)),
            ))
            .execute(conn)
    }

    /// Nearest records to the query vector by L2 distance, optionally
    /// restricted to an allow-list of document ids. An empty allow-list
    /// matches nothing.
    pub fn nearest(
        conn: &mut PgConnection,
        query_embedding: Vector,
        allowed_documents: Option<&[Uuid]>,
        limit: i64,
    ) -> Result<Vec<VectorRecord>, diesel::result::Error> {
        match allowed_documents {
            Some(ids) => vector_records
                .filter(document_id.eq_any(ids))
                .order(embedding.l2_distance(query_embedding))
                .limit(limit)
                .load::<VectorRecord>(conn),
            None => vector_records
                .order(embedding.l2_distance(query_embedding))
                .limit(limit)
                .load::<VectorRecord>(conn),
        }
    }

    pub fn delete_for_document(
        conn: &mut PgConnection,
        document: Uuid,
    ) -> Result<usize, diesel::result::Error> {
        diesel::delete(vector_records.filter(document_id.eq(document))).execute(conn)
    }
}
