//! Relational store for users and their pronoun sets.
//!
//! The store is a single SQLite database opened once at startup. It is wrapped
//! in a [`Database`] that owns the connection behind a mutex and is shared with
//! every command handler through an `Arc`.
//!
//! # Tables
//!
//! - `users` - one row per person talking to the bot, keyed by email
//! - `user_pronoun_sets` - zero or more pronoun sets owned by a user
//!
//! # Database URI
//!
//! The `database.uri` configuration value follows the SQLAlchemy SQLite format:
//!
//! | URI | Target |
//! |-----|--------|
//! | `sqlite://` | in-memory database |
//! | `sqlite:///:memory:` | in-memory database |
//! | `sqlite:///genderbot.db` | `genderbot.db`, relative to the working directory |
//! | `sqlite:////var/lib/genderbot.db` | `/var/lib/genderbot.db` |
//! | `genderbot.db` | plain path, no scheme |

use std::{path::PathBuf, sync::Mutex, time::Duration};

use anyhow::{Result, anyhow};
use log::info;
use rusqlite::Connection;

mod migrations;
mod models;
mod queries;

pub use crate::store::models::{PronounForms, PronounSet, User};

/// Where the SQLite database lives.
#[derive(Debug, PartialEq, Eq)]
enum SqliteTarget {
    Memory,
    File(PathBuf),
}

/// Handle on the bot's SQLite database.
///
/// All queries go through [`Database::with_conn`], which serializes access to
/// the single underlying connection.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Opens the database designated by `uri` and runs the schema migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the URI scheme is not SQLite, if the database file
    /// cannot be opened, or if the migrations fail.
    pub fn open(uri: &str) -> Result<Self> {
        let conn = match parse_uri(uri)? {
            SqliteTarget::Memory => Connection::open_in_memory()?,
            SqliteTarget::File(path) => {
                let conn = Connection::open(&path)?;
                conn.busy_timeout(Duration::from_secs(5))?;
                conn.pragma_update(None, "journal_mode", "WAL")?;
                conn
            }
        };

        conn.pragma_update(None, "foreign_keys", "ON")?;

        migrations::run(&conn)?;

        info!("database opened at {}", uri);
        Ok(Database {
            conn: Mutex::new(conn),
        })
    }

    /// Opens a fresh in-memory database.
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        Self::open("sqlite://")
    }

    fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| anyhow!("database lock poisoned: {}", e))?;
        f(&conn)
    }
}

/// Resolves a `database.uri` value into a SQLite target.
fn parse_uri(uri: &str) -> Result<SqliteTarget> {
    let Some(rest) = uri.strip_prefix("sqlite://") else {
        if uri.contains("://") {
            return Err(anyhow!("unsupported database uri: {}", uri));
        }
        return Ok(match uri {
            "" | ":memory:" => SqliteTarget::Memory,
            path => SqliteTarget::File(PathBuf::from(path)),
        });
    };

    // `sqlite:///x.db` is relative, `sqlite:////x.db` is absolute
    let path = rest.strip_prefix('/').unwrap_or(rest);
    Ok(match path {
        "" | ":memory:" => SqliteTarget::Memory,
        path => SqliteTarget::File(PathBuf::from(path)),
    })
}
