use rusqlite::{params, Connection};

use crate::db::parse_id;
use crate::error::SantaResult;
use crate::model::{Id, Like, Participant, Post};

/// Ignores a repeated like from the same participant.
pub fn insert(conn: &Connection, like: &Like) -> SantaResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO likes (post_id, participant_id) VALUES (?1, ?2)",
        params![like.post_id.to_db_string(), like.participant_id.to_db_string()],
    )?;
    Ok(())
}

pub fn delete(conn: &Connection, like: &Like) -> SantaResult<()> {
    conn.execute(
        "DELETE FROM likes WHERE post_id = ?1 AND participant_id = ?2",
        params![like.post_id.to_db_string(), like.participant_id.to_db_string()],
    )?;
    Ok(())
}

pub fn exists(conn: &Connection, like: &Like) -> SantaResult<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM likes WHERE post_id = ?1 AND participant_id = ?2",
        params![like.post_id.to_db_string(), like.participant_id.to_db_string()],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

pub fn find_by_post(conn: &Connection, post_id: Id<Post>) -> SantaResult<Vec<Id<Participant>>> {
    let mut stmt = conn.prepare(
        "SELECT participant_id FROM likes WHERE post_id = ?1 ORDER BY rowid",
    )?;

    let ids = stmt
        .query_map(params![post_id.to_db_string()], |row| {
            let id_str: String = row.get(0)?;
            Ok(id_str)
        })?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|s| parse_id(&s))
        .collect::<SantaResult<Vec<_>>>()?;

    Ok(ids)
}
