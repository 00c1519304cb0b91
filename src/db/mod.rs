pub mod crud;
pub mod models;
pub mod schema;

use diesel::{Connection, pg::PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use std::env;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

pub fn get_database_connection() -> Result<PgConnection, diesel::result::ConnectionError> {
    let db_url = env::var("DATABASE_URL").map_err(|_| {
        diesel::result::ConnectionError::BadConnection("DATABASE_URL not set".into())
    })?;
    PgConnection::establish(&db_url)
}

pub fn run_migrations(
    conn: &mut PgConnection,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    conn.run_pending_migrations(MIGRATIONS)?;
    Ok(())
}
