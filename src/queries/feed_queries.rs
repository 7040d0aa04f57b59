use rusqlite::Connection;

use crate::db::{comment_repo, like_repo, post_repo};
use crate::error::SantaResult;
use crate::model::{Group, Id, Participant, Post};

/// Shown for authors that are no longer on the roster.
pub const UNKNOWN_AUTHOR: &str = "Desconhecido";

/// Posts newest first, each with its likes and its comments oldest first.
pub fn feed(conn: &Connection, group_id: Id<Group>) -> SantaResult<Vec<Post>> {
    let mut posts = post_repo::find_by_group(conn, group_id)?;
    for post in &mut posts {
        post.likes = like_repo::find_by_post(conn, post.id)?;
        post.comments = comment_repo::find_by_post(conn, post.id)?;
    }
    Ok(posts)
}

pub fn author_name(participants: &[Participant], author_id: Id<Participant>) -> &str {
    participants
        .iter()
        .find(|p| p.id == author_id)
        .map(|p| p.name.as_str())
        .unwrap_or(UNKNOWN_AUTHOR)
}
