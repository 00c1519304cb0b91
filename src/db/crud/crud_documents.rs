use crate::db::schema::documents::dsl::*;
use diesel::{ExpressionMethods, OptionalExtension, PgConnection, QueryDsl, RunQueryDsl};

use uuid::Uuid;

use crate::db::models::{Document, DocumentStatus, NewDocument};

impl Document {
    pub fn create(
        conn: &mut PgConnection,
        new_document: NewDocument,
    ) -> Result<Document, diesel::result::Error> {
        diesel::insert_into(documents)
            .values(&new_document)
            .get_result(conn)
    }

    pub fn find(
        conn: &mut PgConnection,
        document_id: Uuid,
    ) -> Result<Option<Document>, diesel::result::Error> {
        documents.find(document_id).first(conn).optional()
    }

    /// Documents of a session, or unattached documents when no session is
    /// given, newest upload first.
    pub fn list_for_session(
        conn: &mut PgConnection,
        session: Option<Uuid>,
    ) -> Result<Vec<Document>, diesel::result::Error> {
        match session {
            Some(sid) => documents
                .filter(session_id.eq(sid))
                .order(uploaded_at.desc())
                .load::<Document>(conn),
            None => documents
                .filter(session_id.is_null())
                .order(uploaded_at.desc())
                .load::<Document>(conn),
        }
    }

    pub fn ready_ids_for_session(
        conn: &mut PgConnection,
        session: Uuid,
    ) -> Result<Vec<Uuid>, diesel::result::Error> {
        documents
            .filter(session_id.eq(session))
            .filter(status.eq(DocumentStatus::Ready.as_str()))
            .select(id)
            .load::<Uuid>(conn)
    }

    pub fn set_status(
        conn: &mut PgConnection,
        document_id: Uuid,
        new_status: DocumentStatus,
        error: &str,
    ) -> Result<usize, diesel::result::Error> {
        diesel::update(documents.find(document_id))
            .set((status.eq(new_status.as_str()), error_message.eq(error)))
            .execute(conn)
    }

    pub fn delete(
        conn: &mut PgConnection,
        document_id: Uuid,
    ) -> Result<usize, diesel::result::Error> {
        diesel::delete(documents.find(document_id)).execute(conn)
    }
}
