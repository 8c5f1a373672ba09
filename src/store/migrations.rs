use anyhow::Result;
use log::info;
use rusqlite::Connection;

/// Creates the tables if they do not exist yet.
pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id          INTEGER PRIMARY KEY,
            email       TEXT NOT NULL UNIQUE,
            welcomed    INTEGER NOT NULL DEFAULT 0,
            invited     INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS user_pronoun_sets (
            id                      INTEGER PRIMARY KEY,
            user_id                 INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            preferred               INTEGER NOT NULL DEFAULT 0,
            nominative              VARCHAR(50) NOT NULL CHECK (length(nominative) <= 50),
            oblique                 VARCHAR(50) NOT NULL CHECK (length(oblique) <= 50),
            possessive              VARCHAR(50) NOT NULL CHECK (length(possessive) <= 50),
            possessive_determiner   VARCHAR(50) NOT NULL CHECK (length(possessive_determiner) <= 50),
            reflexive               VARCHAR(50) NOT NULL CHECK (length(reflexive) <= 50)
        );

        CREATE INDEX IF NOT EXISTS idx_user_pronoun_sets_user
            ON user_pronoun_sets(user_id);
        ",
    )?;

    info!("database migrations complete");
    Ok(())
}
