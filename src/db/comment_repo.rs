use chrono::SecondsFormat;
use rusqlite::{params, Connection};

use crate::db::{parse_id, parse_timestamp};
use crate::error::SantaResult;
use crate::model::{Comment, Id, Post};

pub fn insert(conn: &Connection, comment: &Comment) -> SantaResult<()> {
    conn.execute(
        "INSERT INTO comments (id, post_id, author_id, content, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            comment.id.to_db_string(),
            comment.post_id.to_db_string(),
            comment.author_id.to_db_string(),
            comment.content,
            comment.created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
        ],
    )?;
    Ok(())
}

pub fn delete(conn: &Connection, comment_id: Id<Comment>) -> SantaResult<()> {
    conn.execute(
        "DELETE FROM comments WHERE id = ?1",
        params![comment_id.to_db_string()],
    )?;
    Ok(())
}

/// Oldest first, the order a thread is read in.
pub fn find_by_post(conn: &Connection, post_id: Id<Post>) -> SantaResult<Vec<Comment>> {
    let mut stmt = conn.prepare(
        "SELECT id, post_id, author_id, content, created_at
         FROM comments WHERE post_id = ?1 ORDER BY created_at, rowid",
    )?;

    let rows: Vec<(String, String, String, String, String)> = stmt
        .query_map(params![post_id.to_db_string()], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(|(id, post, author, content, created_at)| {
            Ok(Comment {
                id: parse_id(&id)?,
                post_id: parse_id(&post)?,
                author_id: parse_id(&author)?,
                content,
                created_at: parse_timestamp(&created_at)?,
            })
        })
        .collect()
}
