pub mod schema;
pub mod group_repo;
pub mod participant_repo;
pub mod draw_repo;
pub mod post_repo;
pub mod comment_repo;
pub mod like_repo;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{SantaError, SantaResult};
use crate::model::Id;

pub(crate) fn parse_id<T>(s: &str) -> SantaResult<Id<T>> {
    Ok(Id::new(
        Uuid::parse_str(s).map_err(|e| SantaError::Other(format!("Invalid UUID: {}", e)))?,
    ))
}

pub(crate) fn parse_timestamp(s: &str) -> SantaResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| SantaError::Other(format!("Invalid timestamp '{}': {}", s, e)))
}
