use rusqlite::{params, Connection};

use crate::db::parse_id;
use crate::error::SantaResult;
use crate::model::{AvatarColor, Group, Id, Participant};

/// Inserts at the end of the group's roster.
pub fn insert(conn: &Connection, participant: &Participant) -> SantaResult<()> {
    conn.execute(
        "INSERT INTO participants (id, group_id, name, phone, avatar_color, position)
         VALUES (?1, ?2, ?3, ?4, ?5,
                 (SELECT COALESCE(MAX(position), -1) + 1 FROM participants WHERE group_id = ?2))",
        params![
            participant.id.to_db_string(),
            participant.group_id.to_db_string(),
            participant.name,
            participant.phone,
            participant.avatar_color.map(|c| c.to_db_str()),
        ],
    )?;
    Ok(())
}

pub fn update(conn: &Connection, participant: &Participant) -> SantaResult<()> {
    conn.execute(
        "UPDATE participants SET name = ?1, phone = ?2, avatar_color = ?3 WHERE id = ?4",
        params![
            participant.name,
            participant.phone,
            participant.avatar_color.map(|c| c.to_db_str()),
            participant.id.to_db_string(),
        ],
    )?;
    Ok(())
}

pub fn delete(conn: &Connection, participant_id: Id<Participant>) -> SantaResult<()> {
    conn.execute(
        "DELETE FROM participants WHERE id = ?1",
        params![participant_id.to_db_string()],
    )?;
    Ok(())
}

pub fn find_by_id(conn: &Connection, id: Id<Participant>) -> SantaResult<Option<Participant>> {
    let mut stmt = conn.prepare(
        "SELECT id, group_id, name, phone, avatar_color FROM participants WHERE id = ?1",
    )?;

    let result = stmt.query_row(params![id.to_db_string()], |row| {
        Ok(row_to_participant(row))
    });

    match result {
        Ok(participant) => Ok(Some(participant?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Roster in join order.
pub fn find_by_group(conn: &Connection, group_id: Id<Group>) -> SantaResult<Vec<Participant>> {
    let mut stmt = conn.prepare(
        "SELECT id, group_id, name, phone, avatar_color
         FROM participants WHERE group_id = ?1 ORDER BY position",
    )?;

    let participants = stmt
        .query_map(params![group_id.to_db_string()], |row| {
            Ok(row_to_participant(row))
        })?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(participants)
}

pub fn count_by_group(conn: &Connection, group_id: Id<Group>) -> SantaResult<usize> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM participants WHERE group_id = ?1",
        params![group_id.to_db_string()],
        |row| row.get(0),
    )?;
    Ok(count as usize)
}

fn row_to_participant(row: &rusqlite::Row) -> SantaResult<Participant> {
    let id_str: String = row.get(0)?;
    let group_str: String = row.get(1)?;
    let color: Option<String> = row.get(4)?;

    Ok(Participant {
        id: parse_id(&id_str)?,
        group_id: parse_id(&group_str)?,
        name: row.get(2)?,
        phone: row.get(3)?,
        avatar_color: color.as_deref().and_then(AvatarColor::from_db_str),
        secret_friend_id: None,
        secret_friend_name: None,
    })
}
