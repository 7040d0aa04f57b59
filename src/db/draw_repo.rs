use rusqlite::{params, Connection};

use crate::db::parse_id;
use crate::draw::Pairing;
use crate::error::SantaResult;
use crate::model::{Group, Id, Participant};

/// One stored row of a draw: `giver_id` gives to `receiver_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawRecord {
    pub giver_id: Id<Participant>,
    pub receiver_id: Id<Participant>,
}

/// Drops any earlier draw for the group and stores `pairings` in its place.
/// Run inside a transaction; a half-written draw must never be visible.
pub fn replace(
    conn: &Connection,
    group_id: Id<Group>,
    pairings: &[Pairing<Id<Participant>>],
) -> SantaResult<()> {
    delete_for_group(conn, group_id)?;

    let mut stmt = conn.prepare(
        "INSERT INTO draw_results (group_id, giver_id, receiver_id) VALUES (?1, ?2, ?3)",
    )?;
    for pairing in pairings {
        stmt.execute(params![
            group_id.to_db_string(),
            pairing.giver.to_db_string(),
            pairing.receiver.to_db_string(),
        ])?;
    }
    Ok(())
}

pub fn delete_for_group(conn: &Connection, group_id: Id<Group>) -> SantaResult<()> {
    conn.execute(
        "DELETE FROM draw_results WHERE group_id = ?1",
        params![group_id.to_db_string()],
    )?;
    Ok(())
}

pub fn find_by_group(conn: &Connection, group_id: Id<Group>) -> SantaResult<Vec<DrawRecord>> {
    let mut stmt = conn.prepare(
        "SELECT giver_id, receiver_id FROM draw_results WHERE group_id = ?1",
    )?;

    let rows: Vec<(String, String)> = stmt
        .query_map(params![group_id.to_db_string()], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(|(giver, receiver)| {
            Ok(DrawRecord {
                giver_id: parse_id(&giver)?,
                receiver_id: parse_id(&receiver)?,
            })
        })
        .collect()
}
