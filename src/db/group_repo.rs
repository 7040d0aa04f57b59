use chrono::SecondsFormat;
use rusqlite::{params, Connection};

use crate::db::{parse_id, parse_timestamp};
use crate::error::SantaResult;
use crate::model::{Group, Id};

pub fn insert(conn: &Connection, group: &Group) -> SantaResult<()> {
    conn.execute(
        "INSERT INTO groups (id, name, admin_id, slug, is_drawn, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            group.id.to_db_string(),
            group.name,
            group.admin_id,
            group.slug,
            group.is_drawn as i32,
            group.created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
        ],
    )?;
    Ok(())
}

pub fn update(conn: &Connection, group: &Group) -> SantaResult<()> {
    conn.execute(
        "UPDATE groups SET name = ?1, admin_id = ?2, is_drawn = ?3 WHERE id = ?4",
        params![
            group.name,
            group.admin_id,
            group.is_drawn as i32,
            group.id.to_db_string(),
        ],
    )?;
    Ok(())
}

pub fn set_drawn(conn: &Connection, group_id: Id<Group>, is_drawn: bool) -> SantaResult<()> {
    conn.execute(
        "UPDATE groups SET is_drawn = ?1 WHERE id = ?2",
        params![is_drawn as i32, group_id.to_db_string()],
    )?;
    Ok(())
}

pub fn delete(conn: &Connection, group_id: Id<Group>) -> SantaResult<()> {
    conn.execute(
        "DELETE FROM groups WHERE id = ?1",
        params![group_id.to_db_string()],
    )?;
    Ok(())
}

pub fn find_by_id(conn: &Connection, id: Id<Group>) -> SantaResult<Option<Group>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, admin_id, slug, is_drawn, created_at FROM groups WHERE id = ?1",
    )?;

    let result = stmt.query_row(params![id.to_db_string()], |row| Ok(row_to_group(row)));

    match result {
        Ok(group) => Ok(Some(group?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn find_by_slug(conn: &Connection, slug: &str) -> SantaResult<Option<Group>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, admin_id, slug, is_drawn, created_at FROM groups WHERE slug = ?1",
    )?;

    let result = stmt.query_row(params![slug], |row| Ok(row_to_group(row)));

    match result {
        Ok(group) => Ok(Some(group?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// All groups, newest first.
pub fn find_all(conn: &Connection) -> SantaResult<Vec<Group>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, admin_id, slug, is_drawn, created_at
         FROM groups ORDER BY created_at DESC, rowid DESC",
    )?;

    let groups = stmt
        .query_map([], |row| Ok(row_to_group(row)))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(groups)
}

fn row_to_group(row: &rusqlite::Row) -> SantaResult<Group> {
    let id_str: String = row.get(0)?;
    let created_at: String = row.get(5)?;

    Ok(Group {
        id: parse_id(&id_str)?,
        name: row.get(1)?,
        admin_id: row.get(2)?,
        slug: row.get(3)?,
        is_drawn: row.get::<_, i32>(4)? != 0,
        created_at: parse_timestamp(&created_at)?,
    })
}
