use rand::Rng;
use rusqlite::{Connection, Transaction, TransactionBehavior};
use tracing::{debug, info, warn};

use crate::db::{draw_repo, group_repo, participant_repo};
use crate::draw::{self, Pairing};
use crate::error::{SantaError, SantaResult};
use crate::model::{Group, Id, Participant};
use crate::ops::group_ops::find_group;
use crate::validation;

/// Draws secret friends for the whole group and stores them.
///
/// Running it again on a drawn group replaces every earlier assignment.
pub fn perform_draw(
    conn: &Connection,
    group_id: Id<Group>,
) -> SantaResult<Vec<Pairing<Id<Participant>>>> {
    perform_draw_with(conn, group_id, &mut rand::rng())
}

/// [`perform_draw`] with a caller-supplied generator.
///
/// Roster read, draw results and the drawn flag all happen in one
/// `BEGIN IMMEDIATE` transaction, so two concurrent draws on the same group
/// are serialized and a failure leaves nothing behind.
pub fn perform_draw_with<R: Rng + ?Sized>(
    conn: &Connection,
    group_id: Id<Group>,
    rng: &mut R,
) -> SantaResult<Vec<Pairing<Id<Participant>>>> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;

    find_group(&tx, group_id)?;
    let participants = participant_repo::find_by_group(&tx, group_id)?;
    validation::enough_participants(participants.len())?;

    let outcome = match draw::draw_pairings(&participants, rng) {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!(group = %group_id, error = %e, "draw failed");
            return Err(e);
        }
    };
    debug!(group = %group_id, attempts = outcome.attempts, "derangement found");

    draw::verify_pairings(&outcome.pairings)?;

    draw_repo::replace(&tx, group_id, &outcome.pairings)?;
    group_repo::set_drawn(&tx, group_id, true)?;
    tx.commit()?;

    info!(
        group = %group_id,
        participants = participants.len(),
        attempts = outcome.attempts,
        "draw completed"
    );
    Ok(outcome.pairings)
}

/// Forgets the draw and unlocks the roster.
pub fn reset_draw(conn: &Connection, group_id: Id<Group>) -> SantaResult<Group> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;

    let mut group = find_group(&tx, group_id)?;
    draw_repo::delete_for_group(&tx, group_id)?;
    group_repo::set_drawn(&tx, group_id, false)?;
    tx.commit()?;

    group.is_drawn = false;
    info!(group = %group_id, "draw reset");
    Ok(group)
}

/// Loads the stored draw and checks it is still a valid assignment for the
/// current roster.
pub fn verify_stored_draw(conn: &Connection, group_id: Id<Group>) -> SantaResult<()> {
    let group = find_group(conn, group_id)?;
    if !group.is_drawn {
        return Err(SantaError::InvalidAssignment(format!(
            "group '{}' has not been drawn",
            group.name
        )));
    }

    let roster: Vec<Id<Participant>> = participant_repo::find_by_group(conn, group_id)?
        .into_iter()
        .map(|p| p.id)
        .collect();
    let records = draw_repo::find_by_group(conn, group_id)?;

    let mut receivers = Vec::with_capacity(roster.len());
    for giver in &roster {
        let record = records
            .iter()
            .find(|r| r.giver_id == *giver)
            .ok_or_else(|| SantaError::InvalidAssignment(format!("{} has no receiver", giver)))?;
        receivers.push(record.receiver_id);
    }
    if records.len() != roster.len() {
        return Err(SantaError::InvalidAssignment(format!(
            "{} draw rows for {} participants",
            records.len(),
            roster.len()
        )));
    }

    draw::verify_assignment(&roster, &receivers)?;
    Ok(())
}
