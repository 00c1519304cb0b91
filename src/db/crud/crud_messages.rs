use crate::db::schema::chat_messages::dsl::*;
use diesel::{ExpressionMethods, PgConnection, QueryDsl, RunQueryDsl};

use uuid::Uuid;

use crate::db::models::{ChatMessage, NewChatMessage};

impl ChatMessage {
    pub fn create(
        conn: &mut PgConnection,
        new_message: NewChatMessage,
    ) -> Result<ChatMessage, diesel::result::Error> {
        diesel::insert_into(chat_messages)
            .values(&new_message)
            .get_result(conn)
    }

    pub fn list_for_session(
        conn: &mut PgConnection,
        session: Uuid,
    ) -> Result<Vec<ChatMessage>, diesel::result::Error> {
        chat_messages
            .filter(session_id.eq(session))
            .order(created_at.asc())
            .load::<ChatMessage>(conn)
    }
}
