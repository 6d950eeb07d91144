use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::models::{MemoryContent, MemoryRow, NewUser, ProfileUpdate, UserRow};
use crate::{Database, DbError, Result};

const USER_COLUMNS: &str = "id, name, email, username, password, profile_pic";
const MEMORY_COLUMNS: &str = "id, user_id, title, photos, date, notes, created_at";

impl Database {
    // -- Users --

    /// Insert a user. A duplicate username fails with `DbError::UsernameTaken`
    /// and leaves the table untouched.
    pub fn create_user(&self, user: &NewUser<'_>) -> Result<UserRow> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO users (id, name, email, username, password) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![user.id, user.name, user.email, user.username, user.password_hash],
            )
            .map_err(username_conflict)?;

            query_user_by_id(conn, user.id)?.ok_or(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| {
            let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1");
            let row = conn.query_row(&sql, [username], user_from_row).optional()?;
            Ok(row)
        })
    }

    #[cfg(test)]
    pub fn get_user_by_id(&self, id: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_id(conn, id))
    }

    /// Overwrite the profile fields of a user and return the updated row, or
    /// `None` when no user has this id.
    pub fn update_user_profile(&self, id: &str, update: &ProfileUpdate<'_>) -> Result<Option<UserRow>> {
        self.with_conn_mut(|conn| {
            let changed = conn
                .execute(
                    "UPDATE users SET name = ?2, email = ?3, username = ?4, profile_pic = ?5 WHERE id = ?1",
                    params![id, update.name, update.email, update.username, update.profile_pic],
                )
                .map_err(username_conflict)?;

            if changed == 0 {
                return Ok(None);
            }
            query_user_by_id(conn, id)
        })
    }

    // -- Memories --

    /// Insert a memory stamped with the current time.
    pub fn insert_memory(&self, id: &str, user_id: Option<&str>, content: &MemoryContent<'_>) -> Result<MemoryRow> {
        let photos = serde_json::to_string(content.photos)?;
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO memories (id, user_id, title, photos, date, notes, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![id, user_id, content.title, photos, content.date, content.notes, created_at],
            )?;

            query_memory_by_id(conn, id)?.ok_or(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
        })
    }

    /// All memories owned by `user_id`, oldest insert first.
    pub fn get_memories_for_user(&self, user_id: &str) -> Result<Vec<MemoryRow>> {
        self.with_conn(|conn| {
            let sql = format!("SELECT {MEMORY_COLUMNS} FROM memories WHERE user_id = ?1 ORDER BY rowid");
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map([user_id], raw_memory_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            rows.into_iter().map(RawMemory::decode).collect()
        })
    }

    #[cfg(test)]
    pub fn get_memory_by_id(&self, id: &str) -> Result<Option<MemoryRow>> {
        self.with_conn(|conn| query_memory_by_id(conn, id))
    }

    /// Replace title, photos, date and notes. `user_id` and `created_at` are
    /// never touched. Returns `None` when no memory has this id.
    pub fn update_memory(&self, id: &str, content: &MemoryContent<'_>) -> Result<Option<MemoryRow>> {
        let photos = serde_json::to_string(content.photos)?;

        self.with_conn_mut(|conn| {
            let changed = conn.execute(
                "UPDATE memories SET title = ?2, photos = ?3, date = ?4, notes = ?5 WHERE id = ?1",
                params![id, content.title, photos, content.date, content.notes],
            )?;

            if changed == 0 {
                return Ok(None);
            }
            query_memory_by_id(conn, id)
        })
    }

    /// Returns whether a row was removed.
    pub fn delete_memory(&self, id: &str) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let removed = conn.execute("DELETE FROM memories WHERE id = ?1", [id])?;
            Ok(removed > 0)
        })
    }
}

fn query_user_by_id(conn: &Connection, id: &str) -> Result<Option<UserRow>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1");
    let row = conn.query_row(&sql, [id], user_from_row).optional()?;
    Ok(row)
}

fn query_memory_by_id(conn: &Connection, id: &str) -> Result<Option<MemoryRow>> {
    let sql = format!("SELECT {MEMORY_COLUMNS} FROM memories WHERE id = ?1");
    conn.query_row(&sql, [id], raw_memory_from_row)
        .optional()?
        .map(RawMemory::decode)
        .transpose()
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        username: row.get(3)?,
        password: row.get(4)?,
        profile_pic: row.get(5)?,
    })
}

/// A memory row whose `photos` JSON has not been decoded yet. Decoding
/// happens outside the rusqlite row callback so JSON errors keep their type.
struct RawMemory {
    row: MemoryRow,
    photos: String,
}

impl RawMemory {
    fn decode(self) -> Result<MemoryRow> {
        let photos = serde_json::from_str(&self.photos)?;
        Ok(MemoryRow { photos, ..self.row })
    }
}

fn raw_memory_from_row(row: &Row<'_>) -> rusqlite::Result<RawMemory> {
    Ok(RawMemory {
        row: MemoryRow {
            id: row.get(0)?,
            user_id: row.get(1)?,
            title: row.get(2)?,
            photos: Vec::new(),
            date: row.get(4)?,
            notes: row.get(5)?,
            created_at: row.get(6)?,
        },
        photos: row.get(3)?,
    })
}

/// Map a violation of `users_username_key` to `UsernameTaken`. `id` is the
/// primary key and reports a different extended code.
fn username_conflict(e: rusqlite::Error) -> DbError {
    match &e {
        rusqlite::Error::SqliteFailure(err, _)
            if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            DbError::UsernameTaken
        }
        _ => DbError::Sqlite(e),
    }
}
