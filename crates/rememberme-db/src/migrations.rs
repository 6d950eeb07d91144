use rusqlite::Connection;
use tracing::info;

use crate::Result;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |r| r.get(0),
    )?;

    if version < 1 {
        info!("Running migration v1 (users, memories)");
        // Only `username` is constrained; every other column mirrors the
        // free-form documents clients send and may be NULL. The index treats a
        // missing username as one value, so at most one user can lack it, while
        // keeping NULL distinct from the empty string.
        conn.execute_batch(
            "
            CREATE TABLE users (
                id          TEXT PRIMARY KEY,
                name        TEXT,
                email       TEXT,
                username    TEXT,
                password    TEXT,
                profile_pic TEXT
            );

            CREATE TABLE memories (
                id          TEXT PRIMARY KEY,
                user_id     TEXT,
                title       TEXT,
                photos      TEXT NOT NULL DEFAULT '[]',
                date        TEXT,
                notes       TEXT,
                created_at  TEXT NOT NULL
            );

            CREATE UNIQUE INDEX users_username_key
                ON users (username IS NULL, IFNULL(username, ''));

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();
        run(&conn).unwrap();

        let version: i64 = conn
            .query_row("SELECT MAX(version) FROM schema_version", [], |r| r.get(0))
            .unwrap();
        assert_eq!(version, 1);
    }
}
