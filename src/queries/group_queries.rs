use std::collections::HashMap;

use rusqlite::Connection;
use serde::Serialize;

use crate::db::{draw_repo, group_repo, participant_repo};
use crate::error::SantaResult;
use crate::model::{Group, Id, Participant, Post};
use crate::queries::feed_queries;

/// A group with everything a screen needs: roster (with secret friends once
/// drawn) and the feed.
#[derive(Debug, Clone, Serialize)]
pub struct GroupView {
    pub group: Group,
    pub participants: Vec<Participant>,
    pub posts: Vec<Post>,
}

impl GroupView {
    pub fn participant(&self, id: Id<Participant>) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn can_draw(&self) -> bool {
        self.participants.len() >= crate::validation::MIN_PARTICIPANTS
    }
}

pub fn get_group(conn: &Connection, group_id: Id<Group>) -> SantaResult<Option<GroupView>> {
    let group = match group_repo::find_by_id(conn, group_id)? {
        Some(g) => g,
        None => return Ok(None),
    };

    let participants = participants_with_friends(conn, &group)?;
    let posts = feed_queries::feed(conn, group_id)?;

    Ok(Some(GroupView {
        group,
        participants,
        posts,
    }))
}

pub fn get_group_by_slug(conn: &Connection, slug: &str) -> SantaResult<Option<GroupView>> {
    match group_repo::find_by_slug(conn, slug)? {
        Some(group) => get_group(conn, group.id),
        None => Ok(None),
    }
}

pub fn all_groups(conn: &Connection) -> SantaResult<Vec<Group>> {
    group_repo::find_all(conn)
}

/// Roster in join order. When the group is drawn each participant carries
/// the id and name of the person they give to; dangling rows are skipped.
pub fn participants_with_friends(conn: &Connection, group: &Group) -> SantaResult<Vec<Participant>> {
    let mut participants = participant_repo::find_by_group(conn, group.id)?;
    if !group.is_drawn {
        return Ok(participants);
    }

    let receivers: HashMap<Id<Participant>, Id<Participant>> = draw_repo::find_by_group(conn, group.id)?
        .into_iter()
        .map(|r| (r.giver_id, r.receiver_id))
        .collect();
    let names: HashMap<Id<Participant>, String> = participants
        .iter()
        .map(|p| (p.id, p.name.clone()))
        .collect();

    for participant in &mut participants {
        if let Some(receiver_id) = receivers.get(&participant.id) {
            if let Some(name) = names.get(receiver_id) {
                participant.secret_friend_id = Some(*receiver_id);
                participant.secret_friend_name = Some(name.clone());
            }
        }
    }

    Ok(participants)
}
