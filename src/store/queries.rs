use anyhow::Result;
use log::{debug, info};
use rusqlite::{Connection, ErrorCode, OptionalExtension, Row, params};

use crate::store::{
    Database,
    models::{PronounForms, PronounSet, User},
};

const USER_COLUMNS: &str = "id, email, welcomed, invited";
const PRONOUN_SET_COLUMNS: &str = "s.id, s.user_id, s.preferred, s.nominative, s.oblique, \
     s.possessive, s.possessive_determiner, s.reflexive";

impl Database {
    // -- Users --

    /// Looks a user up by email. A missing user is `Ok(None)`, not an error.
    pub fn get_user(&self, email: &str) -> Result<Option<User>> {
        self.with_conn(|conn| query_user_by_email(conn, email))
    }

    /// Looks a user up by email and creates it when it does not exist yet.
    ///
    /// New users start with `welcomed` and `invited` set to `false`. If another
    /// connection inserts the same email between the lookup and the insert, the
    /// conflicting insert is abandoned and the existing row is returned.
    pub fn get_or_create_user(&self, email: &str) -> Result<User> {
        self.with_conn(|conn| {
            if let Some(user) = query_user_by_email(conn, email)? {
                return Ok(user);
            }
            insert_user_or_reload(conn, email)
        })
    }

    /// Sets the `welcomed` flag of a user. Calling it again is a no-op.
    pub fn mark_welcomed(&self, user_id: i64) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute("UPDATE users SET welcomed = 1 WHERE id = ?1", [user_id])?;
            Ok(())
        })
    }

    // -- Pronoun sets --

    /// Returns every pronoun set of a user, oldest first.
    #[cfg(test)]
    pub fn list_pronoun_sets(&self, user_id: i64) -> Result<Vec<PronounSet>> {
        self.with_conn(|conn| query_pronoun_sets(conn, user_id))
    }

    /// Returns every pronoun set of the user owning `email`, oldest first.
    ///
    /// Unknown emails yield an empty list.
    pub fn list_pronoun_sets_by_email(&self, email: &str) -> Result<Vec<PronounSet>> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {PRONOUN_SET_COLUMNS}
                 FROM user_pronoun_sets s
                 JOIN users u ON u.id = s.user_id
                 WHERE u.email = ?1
                 ORDER BY s.id"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map([email], pronoun_set_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Stores `forms` as the only pronoun set of a user.
    ///
    /// - no set yet: a new preferred set is inserted
    /// - exactly one set: its forms are overwritten in place
    /// - several sets: nothing changes and `None` is returned
    pub fn upsert_sole_set(&self, user_id: i64, forms: &PronounForms) -> Result<Option<PronounSet>> {
        self.with_conn(|conn| {
            let tx = conn.unchecked_transaction()?;
            let sets = query_pronoun_sets(&tx, user_id)?;

            let id = match sets.as_slice() {
                [] => {
                    tx.execute(
                        "INSERT INTO user_pronoun_sets
                            (user_id, preferred, nominative, oblique, possessive, possessive_determiner, reflexive)
                         VALUES (?1, 1, ?2, ?3, ?4, ?5, ?6)",
                        params![
                            user_id,
                            forms.nominative,
                            forms.oblique,
                            forms.possessive,
                            forms.possessive_determiner,
                            forms.reflexive
                        ],
                    )?;
                    tx.last_insert_rowid()
                }
                [existing] => {
                    tx.execute(
                        "UPDATE user_pronoun_sets
                         SET nominative = ?2, oblique = ?3, possessive = ?4,
                             possessive_determiner = ?5, reflexive = ?6
                         WHERE id = ?1",
                        params![
                            existing.id,
                            forms.nominative,
                            forms.oblique,
                            forms.possessive,
                            forms.possessive_determiner,
                            forms.reflexive
                        ],
                    )?;
                    existing.id
                }
                _ => {
                    debug!(
                        "user {} has {} pronoun sets, leaving them untouched",
                        user_id,
                        sets.len()
                    );
                    return Ok(None);
                }
            };

            let set = query_pronoun_set_by_id(&tx, id)?;
            tx.commit()?;
            Ok(set)
        })
    }
}

fn user_from_row(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        welcomed: row.get(2)?,
        invited: row.get(3)?,
    })
}

fn pronoun_set_from_row(row: &Row) -> rusqlite::Result<PronounSet> {
    Ok(PronounSet {
        id: row.get(0)?,
        user_id: row.get(1)?,
        preferred: row.get(2)?,
        forms: PronounForms {
            nominative: row.get(3)?,
            oblique: row.get(4)?,
            possessive: row.get(5)?,
            possessive_determiner: row.get(6)?,
            reflexive: row.get(7)?,
        },
    })
}

fn query_user_by_email(conn: &Connection, email: &str) -> Result<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1");
    let user = conn
        .query_row(&sql, [email], user_from_row)
        .optional()?;
    Ok(user)
}

fn insert_user_or_reload(conn: &Connection, email: &str) -> Result<User> {
    match conn.execute(
        "INSERT INTO users (email, welcomed, invited) VALUES (?1, 0, 0)",
        [email],
    ) {
        Ok(_) => {
            info!("created user {}", email);
            Ok(User {
                id: conn.last_insert_rowid(),
                email: email.to_owned(),
                welcomed: false,
                invited: false,
            })
        }
        Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
            debug!("user {} was created concurrently, reloading it", email);
            let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1");
            Ok(conn.query_row(&sql, [email], user_from_row)?)
        }
        Err(e) => Err(e.into()),
    }
}

fn query_pronoun_sets(conn: &Connection, user_id: i64) -> Result<Vec<PronounSet>> {
    let sql = format!(
        "SELECT {PRONOUN_SET_COLUMNS} FROM user_pronoun_sets s WHERE s.user_id = ?1 ORDER BY s.id"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([user_id], pronoun_set_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

fn query_pronoun_set_by_id(conn: &Connection, id: i64) -> Result<Option<PronounSet>> {
    let sql = format!("SELECT {PRONOUN_SET_COLUMNS} FROM user_pronoun_sets s WHERE s.id = ?1");
    let set = conn
        .query_row(&sql, [id], pronoun_set_from_row)
        .optional()?;
    Ok(set)
}
