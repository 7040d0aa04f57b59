use rusqlite::Connection;

use crate::db::{comment_repo, like_repo, post_repo};
use crate::error::{SantaError, SantaResult};
use crate::model::{Comment, Group, Id, Like, Participant, Post};
use crate::ops::participant_ops::find_participant;
use crate::validation;

pub fn add_post(
    conn: &Connection,
    group_id: Id<Group>,
    author_id: Id<Participant>,
    content: &str,
) -> SantaResult<Post> {
    ensure_member(conn, group_id, author_id)?;
    let valid_content = validation::non_blank(content, "post")?;

    let post = Post::create(group_id, author_id, valid_content);
    post_repo::insert(conn, &post)?;
    Ok(post)
}

/// Likes the post, or removes the like if it was already there.
/// Returns whether the post is liked by `participant_id` afterwards.
pub fn toggle_like(
    conn: &Connection,
    post_id: Id<Post>,
    participant_id: Id<Participant>,
) -> SantaResult<bool> {
    let post = find_post(conn, post_id)?;
    ensure_member(conn, post.group_id, participant_id)?;

    let like = Like {
        post_id,
        participant_id,
    };
    if like_repo::exists(conn, &like)? {
        like_repo::delete(conn, &like)?;
        Ok(false)
    } else {
        like_repo::insert(conn, &like)?;
        Ok(true)
    }
}

pub fn add_comment(
    conn: &Connection,
    post_id: Id<Post>,
    author_id: Id<Participant>,
    content: &str,
) -> SantaResult<Comment> {
    let post = find_post(conn, post_id)?;
    ensure_member(conn, post.group_id, author_id)?;
    let valid_content = validation::non_blank(content, "comment")?;

    let comment = Comment::create(post_id, author_id, valid_content);
    comment_repo::insert(conn, &comment)?;
    Ok(comment)
}

/// Only the author may take a post down.
pub fn delete_post(
    conn: &Connection,
    post_id: Id<Post>,
    requester_id: Id<Participant>,
) -> SantaResult<()> {
    let post = find_post(conn, post_id)?;
    if post.author_id != requester_id {
        return Err(SantaError::Other("Only the author can delete a post".into()));
    }
    post_repo::delete(conn, post_id)
}

fn find_post(conn: &Connection, post_id: Id<Post>) -> SantaResult<Post> {
    post_repo::find_by_id(conn, post_id)?.ok_or_else(|| SantaError::NotFound {
        entity_type: "Post".into(),
        id: post_id.to_string(),
    })
}

fn ensure_member(
    conn: &Connection,
    group_id: Id<Group>,
    participant_id: Id<Participant>,
) -> SantaResult<()> {
    let participant = find_participant(conn, participant_id)?;
    if participant.group_id != group_id {
        return Err(SantaError::NotAMember {
            participant_id: participant_id.to_string(),
            group_id: group_id.to_string(),
        });
    }
    Ok(())
}
