use crate::db::schema::chat_sessions::dsl::*;
use diesel::{ExpressionMethods, OptionalExtension, PgConnection, QueryDsl, RunQueryDsl};

use uuid::Uuid;

use crate::db::models::{ChatSession, DEFAULT_SESSION_TITLE, NewChatSession};

// Session titles are capped at the length the UI shows in the sidebar.
const MAX_TITLE_LEN: usize = 50;

pub fn truncate_title(raw: &str) -> String {
    raw.chars().take(MAX_TITLE_LEN).collect()
}

impl ChatSession {
    pub fn create(conn: &mut PgConnection) -> Result<ChatSession, diesel::result::Error> {
        let new_session = NewChatSession {
            title: DEFAULT_SESSION_TITLE.to_string(),
        };
        diesel::insert_into(chat_sessions)
            .values(&new_session)
            .get_result(conn)
    }

    pub fn find(
        conn: &mut PgConnection,
        session_id: Uuid,
    ) -> Result<Option<ChatSession>, diesel::result::Error> {
        chat_sessions.find(session_id).first(conn).optional()
    }

    pub fn list(conn: &mut PgConnection) -> Result<Vec<ChatSession>, diesel::result::Error> {
        chat_sessions
            .order(updated_at.desc())
            .load::<ChatSession>(conn)
    }

    pub fn delete(
        conn: &mut PgConnection,
        session_id: Uuid,
    ) -> Result<usize, diesel::result::Error> {
        diesel::delete(chat_sessions.find(session_id)).execute(conn)
    }

    /// Renames the session only while it still carries the default title, so
    /// the first upload or first question wins and later ones never retitle.
    pub fn rename_if_default(
        conn: &mut PgConnection,
        session_id: Uuid,
        new_title: &str,
    ) -> Result<usize, diesel::result::Error> {
        diesel::update(
            chat_sessions
                .filter(id.eq(session_id))
                .filter(title.eq(DEFAULT_SESSION_TITLE)),
        )
        .set((
            title.eq(truncate_title(new_title)),
            updated_at.eq(diesel::dsl::now),
        ))
        .execute(conn)
    }

    pub fn touch(
        conn: &mut PgConnection,
        session_id: Uuid,
    ) -> Result<usize, diesel::result::Error> {
        diesel::update(chat_sessions.find(session_id))
            .set(updated_at.eq(diesel::dsl::now))
            .execute(conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_title_caps_length() {
        let long = "q".repeat(80);
        assert_eq!(truncate_title(&long).chars().count(), 50);
        assert_eq!(truncate_title("short"), "short");
    }

    #[test]
    fn truncate_title_respects_char_boundaries() {
        let other_title = "ü".repeat(60);
        let truncated = truncate_title(&other_title);
        assert_eq!(truncated.chars().count(), 50);
        assert!(truncated.chars().all(|c| c == 'ü'));
    }
}
