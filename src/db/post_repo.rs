use chrono::SecondsFormat;
use rusqlite::{params, Connection};

use crate::db::{parse_id, parse_timestamp};
use crate::error::SantaResult;
use crate::model::{Group, Id, Post};

/// Stores the post row only; likes and comments have their own repos.
pub fn insert(conn: &Connection, post: &Post) -> SantaResult<()> {
    conn.execute(
        "INSERT INTO posts (id, group_id, author_id, content, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            post.id.to_db_string(),
            post.group_id.to_db_string(),
            post.author_id.to_db_string(),
            post.content,
            post.created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
        ],
    )?;
    Ok(())
}

pub fn delete(conn: &Connection, post_id: Id<Post>) -> SantaResult<()> {
    conn.execute(
        "DELETE FROM posts WHERE id = ?1",
        params![post_id.to_db_string()],
    )?;
    Ok(())
}

pub fn find_by_id(conn: &Connection, id: Id<Post>) -> SantaResult<Option<Post>> {
    let mut stmt = conn.prepare(
        "SELECT id, group_id, author_id, content, created_at FROM posts WHERE id = ?1",
    )?;

    let result = stmt.query_row(params![id.to_db_string()], |row| Ok(row_to_post(row)));

    match result {
        Ok(post) => Ok(Some(post?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Newest first, without likes or comments attached.
pub fn find_by_group(conn: &Connection, group_id: Id<Group>) -> SantaResult<Vec<Post>> {
    let mut stmt = conn.prepare(
        "SELECT id, group_id, author_id, content, created_at
         FROM posts WHERE group_id = ?1 ORDER BY created_at DESC, rowid DESC",
    )?;

    let posts = stmt
        .query_map(params![group_id.to_db_string()], |row| Ok(row_to_post(row)))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(posts)
}

fn row_to_post(row: &rusqlite::Row) -> SantaResult<Post> {
    let id_str: String = row.get(0)?;
    let group_str: String = row.get(1)?;
    let author_str: String = row.get(2)?;
    let created_at: String = row.get(4)?;

    Ok(Post {
        id: parse_id(&id_str)?,
        group_id: parse_id(&group_str)?,
        author_id: parse_id(&author_str)?,
        content: row.get(3)?,
        created_at: parse_timestamp(&created_at)?,
        likes: Vec::new(),
        comments: Vec::new(),
    })
}
