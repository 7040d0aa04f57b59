use rusqlite::Connection;

use crate::error::SantaResult;

/// Initialize the database schema. Creates all tables if they don't exist.
pub fn initialize(conn: &Connection) -> SantaResult<()> {
    conn.execute_batch(
        "
        PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS groups (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            admin_id TEXT NOT NULL,
            slug TEXT NOT NULL UNIQUE,
            is_drawn INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS participants (
            id TEXT PRIMARY KEY NOT NULL,
            group_id TEXT NOT NULL REFERENCES groups(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            phone TEXT NOT NULL,
            avatar_color TEXT,
            position INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS draw_results (
            group_id TEXT NOT NULL REFERENCES groups(id) ON DELETE CASCADE,
            giver_id TEXT NOT NULL REFERENCES participants(id) ON DELETE CASCADE,
            receiver_id TEXT NOT NULL REFERENCES participants(id) ON DELETE CASCADE,
            PRIMARY KEY (group_id, giver_id),
            UNIQUE (group_id, receiver_id)
        );

        CREATE TABLE IF NOT EXISTS posts (
            id TEXT PRIMARY KEY NOT NULL,
            group_id TEXT NOT NULL REFERENCES groups(id) ON DELETE CASCADE,
            author_id TEXT NOT NULL REFERENCES participants(id) ON DELETE CASCADE,
            content TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS comments (
            id TEXT PRIMARY KEY NOT NULL,
            post_id TEXT NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
            author_id TEXT NOT NULL REFERENCES participants(id) ON DELETE CASCADE,
            content TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS likes (
            post_id TEXT NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
            participant_id TEXT NOT NULL REFERENCES participants(id) ON DELETE CASCADE,
            PRIMARY KEY (post_id, participant_id)
        );

        CREATE INDEX IF NOT EXISTS idx_participants_group ON participants(group_id, position);
        CREATE INDEX IF NOT EXISTS idx_posts_group ON posts(group_id, created_at);
        CREATE INDEX IF NOT EXISTS idx_comments_post ON comments(post_id, created_at);
        ",
    )?;
    Ok(())
}

/// Create an in-memory connection for testing. Available in test builds.
pub fn test_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    initialize(&conn).unwrap();
    conn
}
