use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::group::Group;
use super::ids::Id;
use super::participant::Participant;

/// A wish-list entry on the group feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Id<Post>,
    pub group_id: Id<Group>,
    pub author_id: Id<Participant>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub likes: Vec<Id<Participant>>,
    pub comments: Vec<Comment>,
}

impl Post {
    pub fn create(group_id: Id<Group>, author_id: Id<Participant>, content: String) -> Self {
        Self {
            id: Id::generate(),
            group_id,
            author_id,
            content,
            created_at: Utc::now(),
            likes: Vec::new(),
            comments: Vec::new(),
        }
    }

    pub fn is_liked_by(&self, participant_id: Id<Participant>) -> bool {
        self.likes.contains(&participant_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Id<Comment>,
    pub post_id: Id<Post>,
    pub author_id: Id<Participant>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn create(post_id: Id<Post>, author_id: Id<Participant>, content: String) -> Self {
        Self {
            id: Id::generate(),
            post_id,
            author_id,
            content,
            created_at: Utc::now(),
        }
    }
}

/// One participant's like on one post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    pub post_id: Id<Post>,
    pub participant_id: Id<Participant>,
}
