use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::Id;

/// Creator tag used when nobody identifies themselves on group creation.
pub const DEFAULT_ADMIN: &str = "admin";

/// A gift exchange. Participants and posts live in their own tables and are
/// assembled by `queries::group_queries`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: Id<Group>,
    pub name: String,
    pub admin_id: String,
    pub slug: String,
    pub is_drawn: bool,
    pub created_at: DateTime<Utc>,
}

impl Group {
    pub fn create(name: String, admin_id: String) -> Self {
        Self {
            id: Id::generate(),
            name,
            admin_id,
            slug: uuid::Uuid::new_v4().to_string(),
            is_drawn: false,
            created_at: Utc::now(),
        }
    }
}
