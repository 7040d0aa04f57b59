use rusqlite::{Connection, Transaction, TransactionBehavior};
use tracing::info;

use crate::db::participant_repo;
use crate::error::{SantaError, SantaResult};
use crate::model::{AvatarColor, Group, Id, Participant};
use crate::ops::group_ops::find_group;
use crate::validation;

/// Adds someone to a group that has not been drawn yet. The phone number is
/// stored digits-only so it can go straight into a wa.me link.
///
/// The drawn check and the insert share one `BEGIN IMMEDIATE` transaction,
/// so a draw committed elsewhere cannot slip in between them.
pub fn add_participant(
    conn: &Connection,
    group_id: Id<Group>,
    name: &str,
    phone: &str,
) -> SantaResult<Participant> {
    let valid_name = validation::non_blank(name, "name")?;
    let digits = validation::phone_digits(phone)?;

    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    let group = find_group(&tx, group_id)?;
    if group.is_drawn {
        return Err(SantaError::RosterLocked);
    }

    let roster_size = participant_repo::count_by_group(&tx, group_id)?;
    let mut participant = Participant::create(group_id, valid_name, digits);
    participant.avatar_color = Some(AvatarColor::for_position(roster_size));

    participant_repo::insert(&tx, &participant)?;
    tx.commit()?;
    info!(group = %group_id, participant = %participant.id, "participant added");
    Ok(participant)
}

pub fn update_participant(
    conn: &Connection,
    participant_id: Id<Participant>,
    name: Option<&str>,
    phone: Option<&str>,
) -> SantaResult<Participant> {
    let mut participant = find_participant(conn, participant_id)?;

    if let Some(n) = name {
        participant.name = validation::non_blank(n, "name")?;
    }
    if let Some(p) = phone {
        participant.phone = validation::phone_digits(p)?;
    }

    participant_repo::update(conn, &participant)?;
    Ok(participant)
}

/// Removing someone after the draw would leave a giver without a receiver
/// (and a receiver without a giver), so it is refused until the draw is reset.
pub fn remove_participant(conn: &Connection, participant_id: Id<Participant>) -> SantaResult<()> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    let participant = find_participant(&tx, participant_id)?;
    let group = find_group(&tx, participant.group_id)?;
    if group.is_drawn {
        return Err(SantaError::RosterLocked);
    }

    participant_repo::delete(&tx, participant_id)?;
    tx.commit()?;
    info!(group = %group.id, participant = %participant_id, "participant removed");
    Ok(())
}

pub(crate) fn find_participant(
    conn: &Connection,
    participant_id: Id<Participant>,
) -> SantaResult<Participant> {
    participant_repo::find_by_id(conn, participant_id)?.ok_or_else(|| SantaError::NotFound {
        entity_type: "Participant".into(),
        id: participant_id.to_string(),
    })
}
